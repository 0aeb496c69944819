// crates/lambda-relay-core/src/lib.rs
// ============================================================================
// Module: Lambda Relay Core Library
// Description: Public API surface for the Lambda Relay engine.
// Purpose: Expose core types, collaborator interfaces, and the router.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Lambda Relay locates a deployed remote function by a structured naming
//! convention encoding application name, environment, and semantic version,
//! then invokes it asynchronously, tolerating per-candidate failure by
//! falling back to alternative deployments in caller-priority order. It is
//! backend-agnostic and integrates through explicit interfaces; the AWS
//! Lambda backend lives in the companion `lambda-relay-aws` crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::Candidate;
pub use self::core::FunctionIdentifier;
pub use self::core::FunctionQuery;
pub use self::core::IdentifierError;
pub use self::core::ScopeId;
pub use self::core::SemanticVersion;
pub use self::core::VersionError;
pub use self::core::VersionSpec;
pub use self::core::VersionSpecError;
pub use self::core::pick_best;
pub use interfaces::CatalogError;
pub use interfaces::FunctionCatalog;
pub use interfaces::FunctionInvoker;
pub use interfaces::InvokeError;
pub use interfaces::InvokeReceipt;
pub use runtime::InvocationOutcome;
pub use runtime::RouteError;
pub use runtime::Router;

// ============================================================================
// SECTION: Version
// ============================================================================

/// Library version, exposed for callers that report it alongside outcomes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
