// crates/lambda-relay-core/src/core/mod.rs
// ============================================================================
// Module: Lambda Relay Core Types
// Description: Canonical identifier, version, and candidate structures.
// Purpose: Provide stable, serializable types for discovery and dispatch.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the deployed-function naming convention, numeric
//! semantic versions and requirement predicates, and the transient candidate
//! values that flow from discovery into fallback invocation.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod candidate;
pub mod identifier;
pub mod version;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use candidate::Candidate;
pub use candidate::pick_best;
pub use identifier::FunctionIdentifier;
pub use identifier::FunctionQuery;
pub use identifier::IdentifierError;
pub use identifier::ScopeId;
pub use version::SemanticVersion;
pub use version::VersionError;
pub use version::VersionSpec;
pub use version::VersionSpecError;
