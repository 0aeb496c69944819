// crates/lambda-relay-core/src/core/version.rs
// ============================================================================
// Module: Semantic Versions and Requirements
// Description: Numeric semantic versions and requirement-string predicates.
// Purpose: Provide strictly parsed, numerically ordered versions for ranking.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Deployed function identifiers carry a three-component numeric version.
//! Ordering is numeric over the `(major, minor, patch)` triple, never
//! lexicographic over the string form, so `0.0.9` sorts below `0.0.10`.
//! Requirement strings (`*`, `1.2.*`, `>=1.0.0 <2.0.0`, `~1.2.3`, `^1.2.3`)
//! parse into [`VersionSpec`] predicates evaluated against parsed versions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors produced while parsing a version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The version string does not have exactly three components.
    #[error("version must have three dot-separated components: {0}")]
    ComponentCount(String),
    /// A component is empty, non-numeric, or carries a redundant leading zero.
    #[error("version component is not a plain non-negative integer: {0}")]
    Component(String),
}

/// Errors produced while parsing a version requirement string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionSpecError {
    /// The requirement string contains no tokens.
    #[error("version requirement is empty")]
    Empty,
    /// A requirement token is not part of the supported grammar.
    #[error("unsupported version requirement token: {0}")]
    Token(String),
}

// ============================================================================
// SECTION: Semantic Version
// ============================================================================

/// Three-component numeric semantic version.
///
/// # Invariants
/// - Ordering is derived from the `(major, minor, patch)` field order and is
///   therefore numeric, never lexicographic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SemanticVersion {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl SemanticVersion {
    /// Creates a version from its three components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a `major.minor.patch` version string.
    ///
    /// Components must be plain non-negative integers without redundant
    /// leading zeros.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError`] when the string is not a valid version.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let mut components = raw.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (components.next(), components.next(), components.next(), components.next())
        else {
            return Err(VersionError::ComponentCount(raw.to_string()));
        };
        Ok(Self {
            major: parse_component(major)?,
            minor: parse_component(minor)?,
            patch: parse_component(patch)?,
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parses a single version component.
fn parse_component(component: &str) -> Result<u64, VersionError> {
    if component.is_empty() || !component.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(VersionError::Component(component.to_string()));
    }
    if component.len() > 1 && component.starts_with('0') {
        return Err(VersionError::Component(component.to_string()));
    }
    component.parse::<u64>().map_err(|_| VersionError::Component(component.to_string()))
}

// ============================================================================
// SECTION: Version Requirements
// ============================================================================

/// Comparison operator inside a requirement clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    /// Exactly equal.
    Exact,
    /// Strictly greater.
    Greater,
    /// Greater or equal.
    GreaterOrEqual,
    /// Strictly less.
    Less,
    /// Less or equal.
    LessOrEqual,
}

impl CompareOp {
    /// Evaluates the operator for a candidate against a bound.
    fn holds(self, candidate: SemanticVersion, bound: SemanticVersion) -> bool {
        match self {
            Self::Exact => candidate.cmp(&bound) == Ordering::Equal,
            Self::Greater => candidate.cmp(&bound) == Ordering::Greater,
            Self::GreaterOrEqual => candidate.cmp(&bound) != Ordering::Less,
            Self::Less => candidate.cmp(&bound) == Ordering::Less,
            Self::LessOrEqual => candidate.cmp(&bound) != Ordering::Greater,
        }
    }
}

/// One clause of a requirement; all clauses of a spec must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    /// Matches every version.
    Any,
    /// Matches versions with the given major component.
    MajorSeries {
        /// Required major component.
        major: u64,
    },
    /// Matches versions with the given major and minor components.
    MinorSeries {
        /// Required major component.
        major: u64,
        /// Required minor component.
        minor: u64,
    },
    /// Matches versions by comparison against a bound.
    Compare {
        /// Comparison operator.
        op: CompareOp,
        /// Bound version.
        bound: SemanticVersion,
    },
}

impl Clause {
    /// Evaluates the clause against a version.
    fn matches(&self, version: SemanticVersion) -> bool {
        match self {
            Self::Any => true,
            Self::MajorSeries {
                major,
            } => version.major == *major,
            Self::MinorSeries {
                major,
                minor,
            } => version.major == *major && version.minor == *minor,
            Self::Compare {
                op,
                bound,
            } => op.holds(version, *bound),
        }
    }
}

/// Parsed version requirement evaluated against [`SemanticVersion`] values.
///
/// Serializes as its source string; deserialization re-parses and rejects
/// unsupported grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionSpec {
    /// Original requirement string, kept for display and serialization.
    source: String,
    /// Conjunctive clauses; every clause must hold.
    clauses: Vec<Clause>,
}

impl VersionSpec {
    /// Parses a requirement string.
    ///
    /// Tokens are separated by whitespace and/or commas and are combined
    /// conjunctively. Supported tokens: `*`, bare prefixes (`1`, `1.2`),
    /// wildcard prefixes (`1.*`, `1.2.x`), exact versions (`1.2.3`,
    /// `=1.2.3`), comparators (`>`, `>=`, `<`, `<=`), tilde (`~1.2.3`), and
    /// caret (`^1.2.3`).
    ///
    /// # Errors
    ///
    /// Returns [`VersionSpecError`] when the string is empty or any token is
    /// outside the supported grammar.
    pub fn parse(requirement: &str) -> Result<Self, VersionSpecError> {
        let mut clauses = Vec::new();
        for token in requirement.split(|ch: char| ch.is_whitespace() || ch == ',') {
            if token.is_empty() {
                continue;
            }
            parse_token(token, &mut clauses)?;
        }
        if clauses.is_empty() {
            return Err(VersionSpecError::Empty);
        }
        Ok(Self {
            source: requirement.to_string(),
            clauses,
        })
    }

    /// Returns true when the version satisfies every clause.
    #[must_use]
    pub fn matches(&self, version: SemanticVersion) -> bool {
        self.clauses.iter().all(|clause| clause.matches(version))
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

impl TryFrom<String> for VersionSpec {
    type Error = VersionSpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionSpec> for String {
    fn from(spec: VersionSpec) -> Self {
        spec.source
    }
}

// ============================================================================
// SECTION: Requirement Token Parsing
// ============================================================================

/// Parses one requirement token into clauses.
fn parse_token(token: &str, clauses: &mut Vec<Clause>) -> Result<(), VersionSpecError> {
    if let Some(rest) = token.strip_prefix(">=") {
        clauses.push(compare_clause(CompareOp::GreaterOrEqual, rest, token)?);
        return Ok(());
    }
    if let Some(rest) = token.strip_prefix("<=") {
        clauses.push(compare_clause(CompareOp::LessOrEqual, rest, token)?);
        return Ok(());
    }
    if let Some(rest) = token.strip_prefix('>') {
        clauses.push(compare_clause(CompareOp::Greater, rest, token)?);
        return Ok(());
    }
    if let Some(rest) = token.strip_prefix('<') {
        clauses.push(compare_clause(CompareOp::Less, rest, token)?);
        return Ok(());
    }
    if let Some(rest) = token.strip_prefix('=') {
        clauses.push(compare_clause(CompareOp::Exact, rest, token)?);
        return Ok(());
    }
    if let Some(rest) = token.strip_prefix('~') {
        let bound = parse_bound(rest, token)?;
        clauses.push(Clause::Compare {
            op: CompareOp::GreaterOrEqual,
            bound,
        });
        clauses.push(Clause::Compare {
            op: CompareOp::Less,
            bound: SemanticVersion::new(bound.major, bound.minor + 1, 0),
        });
        return Ok(());
    }
    if let Some(rest) = token.strip_prefix('^') {
        let bound = parse_bound(rest, token)?;
        clauses.push(Clause::Compare {
            op: CompareOp::GreaterOrEqual,
            bound,
        });
        clauses.push(Clause::Compare {
            op: CompareOp::Less,
            bound: caret_upper_bound(bound),
        });
        return Ok(());
    }
    clauses.push(plain_clause(token)?);
    Ok(())
}

/// Builds a comparison clause from an operator and its version text.
fn compare_clause(
    op: CompareOp,
    version: &str,
    token: &str,
) -> Result<Clause, VersionSpecError> {
    Ok(Clause::Compare {
        op,
        bound: parse_bound(version, token)?,
    })
}

/// Parses the version text of a comparator, tilde, or caret token.
fn parse_bound(version: &str, token: &str) -> Result<SemanticVersion, VersionSpecError> {
    SemanticVersion::parse(version).map_err(|_| VersionSpecError::Token(token.to_string()))
}

/// Returns the exclusive upper bound of a caret requirement.
fn caret_upper_bound(bound: SemanticVersion) -> SemanticVersion {
    if bound.major > 0 {
        SemanticVersion::new(bound.major + 1, 0, 0)
    } else if bound.minor > 0 {
        SemanticVersion::new(0, bound.minor + 1, 0)
    } else {
        SemanticVersion::new(0, 0, bound.patch + 1)
    }
}

/// Parses a bare token: `*`, `1`, `1.2`, `1.*`, `1.2.*`, or `1.2.3`.
fn plain_clause(token: &str) -> Result<Clause, VersionSpecError> {
    let components: Vec<&str> = token.split('.').collect();
    let invalid = || VersionSpecError::Token(token.to_string());
    match components.as_slice() {
        [major] => {
            if is_wildcard(major) {
                Ok(Clause::Any)
            } else {
                Ok(Clause::MajorSeries {
                    major: parse_component(major).map_err(|_| invalid())?,
                })
            }
        }
        [major, minor] => {
            let major = parse_component(major).map_err(|_| invalid())?;
            if is_wildcard(minor) {
                Ok(Clause::MajorSeries {
                    major,
                })
            } else {
                Ok(Clause::MinorSeries {
                    major,
                    minor: parse_component(minor).map_err(|_| invalid())?,
                })
            }
        }
        [major, minor, patch] => {
            let major = parse_component(major).map_err(|_| invalid())?;
            if is_wildcard(minor) {
                if is_wildcard(patch) {
                    return Ok(Clause::MajorSeries {
                        major,
                    });
                }
                return Err(invalid());
            }
            let minor = parse_component(minor).map_err(|_| invalid())?;
            if is_wildcard(patch) {
                Ok(Clause::MinorSeries {
                    major,
                    minor,
                })
            } else {
                Ok(Clause::Compare {
                    op: CompareOp::Exact,
                    bound: SemanticVersion::new(
                        major,
                        minor,
                        parse_component(patch).map_err(|_| invalid())?,
                    ),
                })
            }
        }
        _ => Err(invalid()),
    }
}

/// Returns true for the wildcard component spellings.
fn is_wildcard(component: &str) -> bool {
    matches!(component, "*" | "x" | "X")
}
