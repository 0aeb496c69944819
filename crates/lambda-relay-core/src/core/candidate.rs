// crates/lambda-relay-core/src/core/candidate.rs
// ============================================================================
// Module: Invocation Candidates
// Description: Scope-bound discovered deployments and best-version ranking.
// Purpose: Carry the winner of a scope's discovery pass to the invoker.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A candidate is a discovered deployment eligible for invocation. It keeps
//! the raw identifier string because that string, not the decoded form, is
//! what addresses the remote function at invocation time. Candidates are
//! transient: created during one discovery call, consumed by the fallback
//! invoker, and discarded with the call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifier::FunctionIdentifier;
use crate::core::identifier::ScopeId;

// ============================================================================
// SECTION: Candidate
// ============================================================================

/// A discovered, scope-bound deployment eligible for invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Scope the deployment was discovered in.
    pub scope: ScopeId,
    /// Decoded identifier.
    pub identifier: FunctionIdentifier,
    /// Original identifier string used to address the remote function.
    pub raw: String,
}

// ============================================================================
// SECTION: Ranking
// ============================================================================

/// Selects the highest-version candidate, or `None` for empty input.
///
/// Comparison is numeric over the version triple. Equal versions keep the
/// first-seen candidate, so selection is deterministic for a fixed listing
/// order.
#[must_use]
pub fn pick_best(candidates: Vec<Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        let replace = best
            .as_ref()
            .is_none_or(|current| candidate.identifier.version > current.identifier.version);
        if replace {
            best = Some(candidate);
        }
    }
    best
}
