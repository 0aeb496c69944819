// crates/lambda-relay-aws/src/backend.rs
// ============================================================================
// Module: AWS Lambda Backend
// Description: AWS Lambda implementation of the relay collaborator traits.
// Purpose: List deployed functions per region and fire asynchronous invokes.
// Dependencies: lambda-relay-core, aws-config, aws-sdk-lambda
// ============================================================================

//! ## Overview
//! The backend maps relay scopes to AWS regions. Each operation builds an
//! immutable, region-bound client from the backend configuration; no client
//! is shared across scopes or mutated between calls. Listings drain the
//! paginated `ListFunctions` API fully before returning; a partial first
//! page must not hide higher-version deployments. Invocations use the
//! asynchronous `Event` type; HTTP 202 from the service means the request
//! was accepted for execution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_lambda::Client;
use aws_sdk_lambda::config::Credentials;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use lambda_relay_core::CatalogError;
use lambda_relay_core::FunctionCatalog;
use lambda_relay_core::FunctionInvoker;
use lambda_relay_core::InvokeError;
use lambda_relay_core::InvokeReceipt;
use lambda_relay_core::ScopeId;
use serde_json::Value;
use tracing::debug;

use crate::config::AwsBackendConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Provider name attached to static credentials.
const STATIC_CREDENTIALS_PROVIDER: &str = "lambda-relay-static";

/// Status the service answers with when it accepts an asynchronous invoke.
const ACCEPTED_STATUS: u16 = 202;

// ============================================================================
// SECTION: Backend
// ============================================================================

/// AWS Lambda-backed catalog and invoker.
#[derive(Debug, Clone)]
pub struct AwsBackend {
    /// Immutable backend configuration.
    config: AwsBackendConfig,
}

impl AwsBackend {
    /// Creates a backend from the given configuration.
    #[must_use]
    pub const fn new(config: AwsBackendConfig) -> Self {
        Self {
            config,
        }
    }

    /// Builds an immutable client bound to the scope's region.
    async fn client_for(&self, scope: &ScopeId) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(scope.as_str().to_string()));
        if let Some(credentials) = &self.config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                STATIC_CREDENTIALS_PROVIDER,
            ));
        }
        if let Some(endpoint) = &self.config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared_config = loader.load().await;
        Client::new(&shared_config)
    }
}

#[async_trait]
impl FunctionCatalog for AwsBackend {
    async fn list_functions(&self, scope: &ScopeId) -> Result<Vec<String>, CatalogError> {
        let client = self.client_for(scope).await;
        let mut names = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let mut request = client.list_functions();
            if let Some(marker) = &marker {
                request = request.marker(marker);
            }
            let output = request
                .send()
                .await
                .map_err(|err| CatalogError::Listing(err.to_string()))?;
            for function in output.functions() {
                if let Some(name) = function.function_name() {
                    names.push(name.to_string());
                }
            }
            marker = output.next_marker().map(ToString::to_string);
            if marker.is_none() {
                break;
            }
        }
        debug!(scope = %scope, functions = names.len(), "listed deployed functions");
        Ok(names)
    }
}

#[async_trait]
impl FunctionInvoker for AwsBackend {
    async fn invoke(
        &self,
        scope: &ScopeId,
        function: &str,
        payload: &Value,
    ) -> Result<InvokeReceipt, InvokeError> {
        let bytes = serde_json::to_vec(payload)
            .map_err(|err| InvokeError::Transport(format!("payload serialization: {err}")))?;
        let client = self.client_for(scope).await;
        let output = client
            .invoke()
            .function_name(function)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(bytes))
            .send()
            .await
            .map_err(|err| InvokeError::Transport(err.to_string()))?;
        let status_code = u16::try_from(output.status_code())
            .map_err(|_| InvokeError::Rejected("status code out of range".to_string()))?;
        if status_code != ACCEPTED_STATUS {
            return Err(InvokeError::Rejected(format!("status {status_code}")));
        }
        debug!(scope = %scope, function = %function, status = status_code, "invocation accepted");
        Ok(InvokeReceipt {
            status_code,
        })
    }
}
