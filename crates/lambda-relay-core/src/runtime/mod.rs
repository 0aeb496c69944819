// crates/lambda-relay-core/src/runtime/mod.rs
// ============================================================================
// Module: Lambda Relay Runtime
// Description: The discovery-and-fallback invocation engine.
// Purpose: Expose the router and its outcome types.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime layer holds the router: concurrent per-scope discovery feeding
//! a strictly sequential fallback invocation pass.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod router;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use router::InvocationOutcome;
pub use router::RouteError;
pub use router::Router;
