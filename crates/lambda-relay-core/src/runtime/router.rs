// crates/lambda-relay-core/src/runtime/router.rs
// ============================================================================
// Module: Lambda Relay Router
// Description: Scope discovery fan-out and sequential fallback invocation.
// Purpose: Find the best deployment per scope and fire until one accepts.
// Dependencies: crate::{core, interfaces}, tokio, tracing
// ============================================================================

//! ## Overview
//! The router composes two independently testable stages. Discovery is a
//! concurrent map: every requested scope is listed, decoded, filtered, and
//! ranked in its own task, and the per-scope winners are reassembled in
//! scope-submission order. Invocation is a sequential reduce: candidates are
//! tried one at a time, in that same order, until one backend accepts.
//! Discovery is fail-fast (a listing failure in any scope aborts the call);
//! invocation is resilient (a rejected attempt advances to the next
//! candidate). Candidates are never invoked concurrently, preserving
//! at-most-one-execution expectations for non-idempotent callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;
use tracing::warn;

use crate::core::candidate::Candidate;
use crate::core::candidate::pick_best;
use crate::core::identifier::FunctionIdentifier;
use crate::core::identifier::FunctionQuery;
use crate::core::identifier::ScopeId;
use crate::interfaces::CatalogError;
use crate::interfaces::FunctionCatalog;
use crate::interfaces::FunctionInvoker;
use crate::interfaces::InvokeReceipt;

// ============================================================================
// SECTION: Router Errors
// ============================================================================

/// Errors that abort a routing call.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The listing collaborator failed for a scope.
    ///
    /// Discovery is fail-fast: one failed scope aborts the whole call even
    /// when other scopes resolved. When several scopes fail concurrently,
    /// the scope reported is the first in submission order.
    #[error("discovery failed in scope {scope}: {source}")]
    Discovery {
        /// Scope whose listing failed.
        scope: ScopeId,
        /// Underlying catalog failure.
        source: CatalogError,
    },
    /// A scope resolution task aborted before producing a result.
    #[error("scope resolution aborted: {0}")]
    ResolutionAborted(String),
}

// ============================================================================
// SECTION: Invocation Outcome
// ============================================================================

/// Terminal outcome of a fallback invocation pass.
///
/// There are no partial states: either one candidate accepted the payload or
/// every candidate was tried without success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// A candidate accepted the invocation request.
    Accepted {
        /// The candidate that accepted.
        candidate: Candidate,
        /// Acknowledgement returned by the backend.
        receipt: InvokeReceipt,
    },
    /// No candidate existed, or every attempt failed.
    Exhausted,
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Discovery-and-fallback invocation engine.
///
/// The router holds no state beyond its collaborator handles; every call is
/// independent.
pub struct Router {
    /// Listing collaborator, shared across concurrent scope resolutions.
    catalog: Arc<dyn FunctionCatalog>,
    /// Invocation collaborator used by the sequential fallback pass.
    invoker: Arc<dyn FunctionInvoker>,
}

impl Router {
    /// Creates a router over the given collaborators.
    #[must_use]
    pub fn new(
        catalog: impl FunctionCatalog + 'static,
        invoker: impl FunctionInvoker + 'static,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            invoker: Arc::new(invoker),
        }
    }

    /// Resolves the best matching deployment within one scope.
    ///
    /// Fetches the scope's full listing, decodes every identifier (discarding
    /// malformed ones), keeps those matching the query, and returns the
    /// highest-version match, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the listing collaborator fails for this
    /// scope. The failure is scoped: other scopes may still resolve.
    pub async fn resolve_scope(
        &self,
        scope: &ScopeId,
        query: &FunctionQuery,
    ) -> Result<Option<Candidate>, CatalogError> {
        resolve_in_scope(self.catalog.as_ref(), scope, query).await
    }

    /// Resolves every requested scope concurrently.
    ///
    /// Returns one slot per input scope, in input order, regardless of task
    /// completion order. Scope order is the caller's priority order and is
    /// preserved exactly for the fallback pass.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Discovery`] when any scope's listing fails;
    /// discovery is fail-fast and never downgrades a failed scope to "no
    /// match".
    pub async fn resolve_all(
        &self,
        scopes: &[ScopeId],
        query: &FunctionQuery,
    ) -> Result<Vec<Option<Candidate>>, RouteError> {
        let mut joins = JoinSet::new();
        for (index, scope) in scopes.iter().enumerate() {
            let catalog = Arc::clone(&self.catalog);
            let scope = scope.clone();
            let query = query.clone();
            joins.spawn(async move {
                let resolved = resolve_in_scope(catalog.as_ref(), &scope, &query).await;
                (index, scope, resolved)
            });
        }

        let mut slots: Vec<Option<(ScopeId, Result<Option<Candidate>, CatalogError>)>> =
            scopes.iter().map(|_| None).collect();
        while let Some(joined) = joins.join_next().await {
            let (index, scope, resolved) =
                joined.map_err(|err| RouteError::ResolutionAborted(err.to_string()))?;
            slots[index] = Some((scope, resolved));
        }

        let mut candidates = Vec::with_capacity(slots.len());
        for slot in slots {
            let Some((scope, resolved)) = slot else {
                return Err(RouteError::ResolutionAborted(
                    "scope resolution produced no result".to_string(),
                ));
            };
            match resolved {
                Ok(candidate) => candidates.push(candidate),
                Err(source) => {
                    warn!(scope = %scope, error = %source, "scope listing failed; aborting discovery");
                    return Err(RouteError::Discovery {
                        scope,
                        source,
                    });
                }
            }
        }
        Ok(candidates)
    }

    /// Tries candidates sequentially until one backend accepts.
    ///
    /// `None` slots are skipped. The first acceptance wins and ends the pass
    /// immediately; a failed attempt is logged and discarded, and the next
    /// candidate is tried. An exhausted sequence (including the all-`None`
    /// and empty cases) yields [`InvocationOutcome::Exhausted`]. No candidate
    /// is retried within one call.
    pub async fn invoke_fallback(
        &self,
        candidates: Vec<Option<Candidate>>,
        payload: &Value,
    ) -> InvocationOutcome {
        for candidate in candidates.into_iter().flatten() {
            match self.invoker.invoke(&candidate.scope, &candidate.raw, payload).await {
                Ok(receipt) => {
                    debug!(
                        scope = %candidate.scope,
                        function = %candidate.raw,
                        status = receipt.status_code,
                        "invocation accepted"
                    );
                    return InvocationOutcome::Accepted {
                        candidate,
                        receipt,
                    };
                }
                Err(err) => {
                    debug!(
                        scope = %candidate.scope,
                        function = %candidate.raw,
                        error = %err,
                        "invocation attempt failed; advancing to next candidate"
                    );
                }
            }
        }
        InvocationOutcome::Exhausted
    }

    /// Discovers candidates across `scopes` and fires the payload at them in
    /// priority order until one backend accepts.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] when discovery fails in any scope. Invocation
    /// failures never surface here; they are absorbed into the
    /// [`InvocationOutcome`].
    pub async fn find_and_invoke(
        &self,
        query: &FunctionQuery,
        scopes: &[ScopeId],
        payload: &Value,
    ) -> Result<InvocationOutcome, RouteError> {
        let candidates = self.resolve_all(scopes, query).await?;
        Ok(self.invoke_fallback(candidates, payload).await)
    }
}

// ============================================================================
// SECTION: Scope Resolution
// ============================================================================

/// Lists, decodes, filters, and ranks one scope's deployments.
async fn resolve_in_scope(
    catalog: &dyn FunctionCatalog,
    scope: &ScopeId,
    query: &FunctionQuery,
) -> Result<Option<Candidate>, CatalogError> {
    let listing = catalog.list_functions(scope).await?;
    let mut matches = Vec::new();
    for raw in listing {
        let Ok(identifier) = FunctionIdentifier::parse(&raw) else {
            continue;
        };
        if identifier.matches(query) {
            matches.push(Candidate {
                scope: scope.clone(),
                identifier,
                raw,
            });
        }
    }
    let winner = pick_best(matches);
    debug!(
        scope = %scope,
        name = %query.name,
        environment = %query.environment,
        matched = winner.is_some(),
        "scope resolved"
    );
    Ok(winner)
}
