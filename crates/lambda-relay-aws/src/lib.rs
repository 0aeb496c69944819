// crates/lambda-relay-aws/src/lib.rs
// ============================================================================
// Module: Lambda Relay AWS Backend
// Description: AWS Lambda implementation of the relay collaborator traits.
// Purpose: Expose the region-scoped catalog and invoker backend.
// Dependencies: lambda-relay-core, aws-config, aws-sdk-lambda
// ============================================================================

//! ## Overview
//! This crate binds the backend-agnostic relay engine to AWS Lambda. Relay
//! scopes are AWS regions; discovery lists the region's deployed functions
//! and invocation fires asynchronous `Event`-type invokes. Configuration is
//! immutable and per-scope clients are constructed fresh, never reused
//! across regions or mutated in place.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod backend;
pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use backend::AwsBackend;
pub use config::AwsBackendConfig;
pub use config::AwsStaticCredentials;
