// crates/lambda-relay-aws/src/config.rs
// ============================================================================
// Module: AWS Backend Configuration
// Description: Configuration for the AWS Lambda-backed relay collaborators.
// Purpose: Carry credentials and endpoint policy without mutable global state.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Backend configuration is immutable after construction. Scopes map to AWS
//! regions, and every scope resolution builds its own region-bound client
//! from this configuration, so concurrent resolutions never share or mutate
//! client state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Static access-key credentials.
///
/// When absent from the configuration, the ambient AWS credential chain
/// (environment, profile, instance role) applies instead.
#[derive(Clone, Deserialize)]
pub struct AwsStaticCredentials {
    /// Access key identifier.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
}

impl fmt::Debug for AwsStaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsStaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Backend Configuration
// ============================================================================

/// Configuration for the AWS Lambda backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AwsBackendConfig {
    /// Optional static credentials; ambient chain when unset.
    #[serde(default)]
    pub credentials: Option<AwsStaticCredentials>,
    /// Custom endpoint URL (for Lambda-compatible local stacks).
    #[serde(default)]
    pub endpoint: Option<String>,
}
