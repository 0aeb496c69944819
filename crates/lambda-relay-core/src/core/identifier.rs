// crates/lambda-relay-core/src/core/identifier.rs
// ============================================================================
// Module: Function Identifiers
// Description: Scope identifiers and the deployed-function naming convention.
// Purpose: Decode raw identifier strings into typed, matchable identifiers.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Deployed functions are named `<base-name>-<environment>-<major>-<minor>-<patch>`.
//! The base name may itself contain dashes, so decoding works from the end:
//! the last three tokens form the version, the fourth-from-last token is the
//! environment, and everything before that is the base name. Malformed
//! identifiers decode to a typed error and are excluded from candidacy;
//! they must never abort a discovery pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::version::SemanticVersion;
use crate::core::version::VersionSpec;

// ============================================================================
// SECTION: Scope Identifier
// ============================================================================

/// Identifier of an independent search and execution domain, such as a
/// deployment region.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(String);

impl ScopeId {
    /// Creates a new scope identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ScopeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ScopeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Identifier Errors
// ============================================================================

/// Errors produced while decoding a raw function identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier has fewer than four dash-separated tokens.
    #[error("identifier has too few segments: {0}")]
    TooFewSegments(String),
    /// The trailing three tokens are not a valid numeric version.
    #[error("identifier has an invalid version suffix: {0}")]
    InvalidVersion(String),
}

// ============================================================================
// SECTION: Function Identifier
// ============================================================================

/// Decoded form of a deployed function identifier.
///
/// # Invariants
/// - `version` is always a syntactically valid semantic version; raw strings
///   that fail this never construct a `FunctionIdentifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionIdentifier {
    /// Application base name; may itself contain dashes.
    pub base_name: String,
    /// Deployment environment token, e.g. `staging` or `production`.
    pub environment: String,
    /// Deployment version.
    pub version: SemanticVersion,
}

impl FunctionIdentifier {
    /// Decodes a raw identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the string has fewer than four
    /// dash-separated tokens or its trailing tokens are not a valid version.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let tokens: Vec<&str> = raw.split('-').collect();
        let Some(name_len) = tokens.len().checked_sub(4) else {
            return Err(IdentifierError::TooFewSegments(raw.to_string()));
        };
        let version_text = tokens[tokens.len() - 3 ..].join(".");
        let version = SemanticVersion::parse(&version_text)
            .map_err(|_| IdentifierError::InvalidVersion(raw.to_string()))?;
        Ok(Self {
            base_name: tokens[.. name_len].join("-"),
            environment: tokens[name_len].to_string(),
            version,
        })
    }

    /// Returns true when this identifier satisfies the query's name,
    /// environment, and version requirement. Name and environment comparison
    /// is exact; no case folding.
    #[must_use]
    pub fn matches(&self, query: &FunctionQuery) -> bool {
        self.base_name == query.name
            && self.environment == query.environment
            && query.version.matches(self.version)
    }
}

impl fmt::Display for FunctionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}",
            self.base_name,
            self.environment,
            self.version.major,
            self.version.minor,
            self.version.patch
        )
    }
}

// ============================================================================
// SECTION: Function Query
// ============================================================================

/// The caller's matching target: which deployments are eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionQuery {
    /// Exact application base name.
    pub name: String,
    /// Exact deployment environment.
    pub environment: String,
    /// Version requirement eligible deployments must satisfy.
    pub version: VersionSpec,
}

impl FunctionQuery {
    /// Builds a query from a name, an environment, and a requirement string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::version::VersionSpecError`] when the
    /// requirement string is outside the supported grammar; requirement
    /// strings are caller input and fail fast rather than matching nothing.
    pub fn new(
        name: impl Into<String>,
        environment: impl Into<String>,
        requirement: &str,
    ) -> Result<Self, crate::core::version::VersionSpecError> {
        Ok(Self {
            name: name.into(),
            environment: environment.into(),
            version: VersionSpec::parse(requirement)?,
        })
    }
}
