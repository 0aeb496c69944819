// crates/lambda-relay-core/tests/router.rs
// ============================================================================
// Module: Router Behavior Tests
// Description: Discovery fan-out and fallback invocation against stubs.
// Purpose: Pin ordering, fail-fast discovery, and first-success semantics.
// ============================================================================

//! ## Overview
//! Exercises the router against stub collaborators with recorded calls:
//! per-scope ranking, order-preserving fan-out, fail-fast discovery errors,
//! sequential first-success-wins fallback, and exhaustion.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lambda_relay_core::Candidate;
use lambda_relay_core::CatalogError;
use lambda_relay_core::FunctionCatalog;
use lambda_relay_core::FunctionIdentifier;
use lambda_relay_core::FunctionInvoker;
use lambda_relay_core::FunctionQuery;
use lambda_relay_core::InvocationOutcome;
use lambda_relay_core::InvokeError;
use lambda_relay_core::InvokeReceipt;
use lambda_relay_core::RouteError;
use lambda_relay_core::Router;
use lambda_relay_core::ScopeId;
use serde_json::json;
use tokio::time::sleep;

// ============================================================================
// SECTION: Stub Collaborators
// ============================================================================

/// Scripted scope listing: identifiers, a failure, or a delayed answer.
#[derive(Clone)]
enum Listing {
    /// Listing succeeds with these raw identifiers.
    Functions(Vec<&'static str>),
    /// Listing succeeds after a delay, exercising out-of-order completion.
    Delayed(Duration, Vec<&'static str>),
    /// Listing fails for this scope.
    Fails,
}

/// Catalog stub with scripted listings and recorded scope calls.
#[derive(Clone, Default)]
struct StubCatalog {
    /// Scripted listing per scope.
    listings: BTreeMap<String, Listing>,
    /// Scopes listed, in call order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubCatalog {
    /// Scripts a listing for a scope.
    fn with(mut self, scope: &str, listing: Listing) -> Self {
        self.listings.insert(scope.to_string(), listing);
        self
    }

    /// Returns the scopes listed so far.
    fn calls(&self) -> Vec<String> {
        self.calls.lock().map_or_else(|_| Vec::new(), |calls| calls.clone())
    }
}

#[async_trait]
impl FunctionCatalog for StubCatalog {
    async fn list_functions(&self, scope: &ScopeId) -> Result<Vec<String>, CatalogError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(scope.as_str().to_string());
        }
        match self.listings.get(scope.as_str()) {
            Some(Listing::Functions(functions)) => {
                Ok(functions.iter().map(ToString::to_string).collect())
            }
            Some(Listing::Delayed(delay, functions)) => {
                sleep(*delay).await;
                Ok(functions.iter().map(ToString::to_string).collect())
            }
            Some(Listing::Fails) => {
                Err(CatalogError::Listing(format!("listing unavailable in {scope}")))
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Invoker stub accepting a fixed set of identifiers, recording attempts.
#[derive(Clone, Default)]
struct StubInvoker {
    /// Raw identifiers the backend accepts.
    accepts: BTreeSet<String>,
    /// Attempted `(scope, function)` pairs, in call order.
    attempts: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubInvoker {
    /// Marks an identifier as accepted by the backend.
    fn accepting(mut self, function: &str) -> Self {
        self.accepts.insert(function.to_string());
        self
    }

    /// Returns the attempted `(scope, function)` pairs so far.
    fn attempts(&self) -> Vec<(String, String)> {
        self.attempts.lock().map_or_else(|_| Vec::new(), |attempts| attempts.clone())
    }
}

#[async_trait]
impl FunctionInvoker for StubInvoker {
    async fn invoke(
        &self,
        scope: &ScopeId,
        function: &str,
        _payload: &serde_json::Value,
    ) -> Result<InvokeReceipt, InvokeError> {
        if let Ok(mut attempts) = self.attempts.lock() {
            attempts.push((scope.as_str().to_string(), function.to_string()));
        }
        if self.accepts.contains(function) {
            Ok(InvokeReceipt {
                status_code: 202,
            })
        } else {
            Err(InvokeError::Rejected("status 500".to_string()))
        }
    }
}

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds the query used by most cases below.
fn query(requirement: &str) -> FunctionQuery {
    FunctionQuery::new("app", "production", requirement).unwrap()
}

/// Builds a candidate for assertions.
fn candidate(scope: &str, raw: &str) -> Candidate {
    Candidate {
        scope: ScopeId::new(scope),
        identifier: FunctionIdentifier::parse(raw).unwrap(),
        raw: raw.to_string(),
    }
}

/// Shorthand for scope lists.
fn scopes(names: &[&str]) -> Vec<ScopeId> {
    names.iter().map(|name| ScopeId::new(*name)).collect()
}

// ============================================================================
// SECTION: Scope Resolution
// ============================================================================

#[tokio::test]
async fn resolve_scope_picks_highest_version_and_discards_malformed() {
    let catalog = StubCatalog::default().with(
        "eu-west-1",
        Listing::Functions(vec![
            "app-production-0-0-9",
            "not-an-identifier",
            "app-production-0-0-13",
            "app-production-0-0-10",
            "app-staging-9-9-9",
        ]),
    );
    let router = Router::new(catalog, StubInvoker::default());

    let resolved =
        router.resolve_scope(&ScopeId::new("eu-west-1"), &query("*")).await.unwrap();
    assert_eq!(resolved, Some(candidate("eu-west-1", "app-production-0-0-13")));
}

#[tokio::test]
async fn resolve_scope_yields_none_without_matches() {
    let catalog = StubCatalog::default()
        .with("eu-west-1", Listing::Functions(vec!["other-production-1-0-0"]));
    let router = Router::new(catalog, StubInvoker::default());

    let resolved =
        router.resolve_scope(&ScopeId::new("eu-west-1"), &query("*")).await.unwrap();
    assert_eq!(resolved, None);
}

// ============================================================================
// SECTION: Fan-Out Aggregation
// ============================================================================

#[tokio::test]
async fn resolve_all_preserves_scope_order() {
    let catalog = StubCatalog::default()
        .with("us-east-1", Listing::Functions(vec!["other-production-1-0-0"]))
        .with("eu-west-1", Listing::Functions(vec!["app-production-0-1-3"]));
    let router = Router::new(catalog, StubInvoker::default());

    let resolved =
        router.resolve_all(&scopes(&["us-east-1", "eu-west-1"]), &query("*")).await.unwrap();
    assert_eq!(resolved, vec![None, Some(candidate("eu-west-1", "app-production-0-1-3"))]);
}

#[tokio::test]
async fn resolve_all_reassembles_input_order_despite_completion_order() {
    let catalog = StubCatalog::default()
        .with(
            "us-east-1",
            Listing::Delayed(Duration::from_millis(50), vec!["app-production-0-0-1"]),
        )
        .with("eu-west-1", Listing::Functions(vec!["app-production-0-0-2"]));
    let router = Router::new(catalog.clone(), StubInvoker::default());

    let resolved =
        router.resolve_all(&scopes(&["us-east-1", "eu-west-1"]), &query("*")).await.unwrap();
    assert_eq!(
        resolved,
        vec![
            Some(candidate("us-east-1", "app-production-0-0-1")),
            Some(candidate("eu-west-1", "app-production-0-0-2")),
        ]
    );
    let mut calls = catalog.calls();
    calls.sort();
    assert_eq!(calls, vec!["eu-west-1".to_string(), "us-east-1".to_string()]);
}

#[tokio::test]
async fn resolve_all_fails_fast_when_any_scope_listing_fails() {
    let catalog = StubCatalog::default()
        .with("us-east-1", Listing::Functions(vec!["app-production-0-1-0"]))
        .with("eu-west-1", Listing::Fails);
    let router = Router::new(catalog, StubInvoker::default());

    let error =
        router.resolve_all(&scopes(&["us-east-1", "eu-west-1"]), &query("*")).await.unwrap_err();
    assert!(matches!(error, RouteError::Discovery { scope, .. } if scope.as_str() == "eu-west-1"));
}

#[tokio::test]
async fn resolve_all_reports_the_first_failing_scope_in_submission_order() {
    let catalog = StubCatalog::default()
        .with("us-east-1", Listing::Fails)
        .with("eu-west-1", Listing::Fails);
    let router = Router::new(catalog, StubInvoker::default());

    let error =
        router.resolve_all(&scopes(&["us-east-1", "eu-west-1"]), &query("*")).await.unwrap_err();
    assert!(matches!(error, RouteError::Discovery { scope, .. } if scope.as_str() == "us-east-1"));
}

// ============================================================================
// SECTION: Fallback Invocation
// ============================================================================

#[tokio::test]
async fn fallback_skips_none_and_stops_at_first_acceptance() {
    let invoker = StubInvoker::default().accepting("app-production-0-0-3");
    let router = Router::new(StubCatalog::default(), invoker.clone());

    let outcome = router
        .invoke_fallback(
            vec![
                None,
                Some(candidate("us-east-1", "app-production-0-0-2")),
                Some(candidate("eu-west-1", "app-production-0-0-3")),
                Some(candidate("ap-south-1", "app-production-0-0-4")),
            ],
            &json!({"task": "render"}),
        )
        .await;

    assert_eq!(
        outcome,
        InvocationOutcome::Accepted {
            candidate: candidate("eu-west-1", "app-production-0-0-3"),
            receipt: InvokeReceipt {
                status_code: 202,
            },
        }
    );
    assert_eq!(
        invoker.attempts(),
        vec![
            ("us-east-1".to_string(), "app-production-0-0-2".to_string()),
            ("eu-west-1".to_string(), "app-production-0-0-3".to_string()),
        ]
    );
}

#[tokio::test]
async fn fallback_exhausts_when_every_attempt_fails() {
    let invoker = StubInvoker::default();
    let router = Router::new(StubCatalog::default(), invoker.clone());

    let outcome = router
        .invoke_fallback(
            vec![
                Some(candidate("us-east-1", "app-production-0-0-1")),
                Some(candidate("eu-west-1", "app-production-0-0-2")),
            ],
            &json!({}),
        )
        .await;

    assert_eq!(outcome, InvocationOutcome::Exhausted);
    assert_eq!(invoker.attempts().len(), 2);
}

#[tokio::test]
async fn fallback_exhausts_on_empty_and_all_none_input() {
    let router = Router::new(StubCatalog::default(), StubInvoker::default());

    assert_eq!(router.invoke_fallback(Vec::new(), &json!({})).await, InvocationOutcome::Exhausted);
    assert_eq!(
        router.invoke_fallback(vec![None, None], &json!({})).await,
        InvocationOutcome::Exhausted
    );
}

// ============================================================================
// SECTION: Find And Invoke
// ============================================================================

#[tokio::test]
async fn find_and_invoke_tries_scopes_in_priority_order() {
    let catalog = StubCatalog::default()
        .with("us-east-1", Listing::Functions(vec!["app-production-0-0-9"]))
        .with("eu-west-1", Listing::Functions(vec!["app-production-0-0-13"]));
    let invoker = StubInvoker::default().accepting("app-production-0-0-13");
    let router = Router::new(catalog, invoker.clone());

    let outcome = router
        .find_and_invoke(&query("0.0.*"), &scopes(&["us-east-1", "eu-west-1"]), &json!({"id": 7}))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        InvocationOutcome::Accepted {
            candidate: candidate("eu-west-1", "app-production-0-0-13"),
            receipt: InvokeReceipt {
                status_code: 202,
            },
        }
    );
    assert_eq!(
        invoker.attempts(),
        vec![
            ("us-east-1".to_string(), "app-production-0-0-9".to_string()),
            ("eu-west-1".to_string(), "app-production-0-0-13".to_string()),
        ]
    );
}

#[tokio::test]
async fn find_and_invoke_aborts_on_discovery_failure_even_with_other_matches() {
    let catalog = StubCatalog::default()
        .with("us-east-1", Listing::Functions(vec!["app-production-0-0-9"]))
        .with("eu-west-1", Listing::Fails);
    let invoker = StubInvoker::default().accepting("app-production-0-0-9");
    let router = Router::new(catalog, invoker.clone());

    let error = router
        .find_and_invoke(&query("*"), &scopes(&["us-east-1", "eu-west-1"]), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(error, RouteError::Discovery { scope, .. } if scope.as_str() == "eu-west-1"));
    assert!(invoker.attempts().is_empty());
}

#[tokio::test]
async fn find_and_invoke_exhausts_when_no_scope_matches() {
    let catalog = StubCatalog::default()
        .with("us-east-1", Listing::Functions(vec!["other-production-1-0-0"]))
        .with("eu-west-1", Listing::Functions(Vec::new()));
    let router = Router::new(catalog, StubInvoker::default());

    let outcome = router
        .find_and_invoke(&query("*"), &scopes(&["us-east-1", "eu-west-1"]), &json!({}))
        .await
        .unwrap();
    assert_eq!(outcome, InvocationOutcome::Exhausted);
}
