// crates/lambda-relay-core/src/interfaces/mod.rs
// ============================================================================
// Module: Lambda Relay Interfaces
// Description: Backend-agnostic interfaces for function listing and invocation.
// Purpose: Define the contract surfaces the relay runtime calls into.
// Dependencies: crate::core, async-trait, serde_json
// ============================================================================

//! ## Overview
//! Interfaces define how the relay integrates with a function-as-a-service
//! backend without embedding backend-specific details. Implementations are
//! parameterized by scope so concurrent resolutions never share mutable
//! client state, and they must report failure rather than guess: a listing
//! that cannot be completed is an error, never an empty result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifier::ScopeId;

// ============================================================================
// SECTION: Function Catalog
// ============================================================================

/// Catalog errors for scope listings.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend failed to produce the listing for a scope.
    #[error("function listing failed: {0}")]
    Listing(String),
}

/// Enumerates deployed function identifiers visible in a scope.
#[async_trait]
pub trait FunctionCatalog: Send + Sync {
    /// Returns every deployed function identifier visible in the scope.
    ///
    /// The listing must be complete: backends that page their listings drain
    /// all pages before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the listing cannot be completed.
    async fn list_functions(&self, scope: &ScopeId) -> Result<Vec<String>, CatalogError>;
}

// ============================================================================
// SECTION: Function Invoker
// ============================================================================

/// Invocation errors for a single dispatch attempt.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The request never reached the backend or received no answer.
    #[error("invocation transport failed: {0}")]
    Transport(String),
    /// The backend answered but did not accept the invocation.
    #[error("invocation rejected: {0}")]
    Rejected(String),
}

/// Acknowledgement returned when the backend accepts an invocation.
///
/// Acceptance means the request was queued for asynchronous execution, not
/// that the function's own execution later succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeReceipt {
    /// Backend acceptance status code.
    pub status_code: u16,
}

/// Fires a payload at one deployed function, asynchronously.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Requests asynchronous execution of `function` in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] when the backend rejects the invocation or the
    /// transport fails.
    async fn invoke(
        &self,
        scope: &ScopeId,
        function: &str,
        payload: &Value,
    ) -> Result<InvokeReceipt, InvokeError>;
}
