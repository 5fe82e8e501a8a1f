//! Remote call client for JSON-RPC 2.0 over HTTP POST.
//!
//! One `execute` is one network exchange. Every failure mode (status,
//! connection, body parsing, backend error) comes back as a `CallError`;
//! nothing is thrown past this boundary.

use super::helpers::{invalid_status, unwrap_response};
use super::models::{CallState, RpcPayload, RpcRequest};
use crate::config::ClientConfig;
use crate::error::CallError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Everything a call depends on. Two calls with equal params are the same
/// logical request.
#[derive(Debug, Clone, PartialEq)]
pub struct CallParams {
    pub request: RpcPayload,
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub unwrap: bool,
}

impl CallParams {
    pub fn raw(mut self) -> Self {
        self.unwrap = false;
        self
    }
}

/// HTTP client bound to a configured endpoint and header set.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RpcClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Params for `request` against the configured endpoint and headers,
    /// unwrapping the response.
    pub fn params(&self, request: impl Into<RpcPayload>) -> CallParams {
        CallParams {
            request: request.into(),
            endpoint: self.config.endpoint.clone(),
            headers: self.config.headers.clone(),
            unwrap: true,
        }
    }

    /// Params for the API description request.
    pub fn description_params(&self) -> CallParams {
        self.params(RpcRequest::new(self.config.description_method.as_str()))
    }

    /// Performs the exchange and returns the unwrapped outcome.
    pub async fn execute(&self, params: &CallParams) -> Result<Value, CallError> {
        let body = serde_json::to_vec(&params.request)
            .map_err(|e| CallError::protocol(format!("Cannot serialize request: {}", e)))?;

        let mut builder = self.http.post(&params.endpoint).body(body);
        for (name, value) in &params.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        log::debug!("[RPC] POST {} ({})", params.endpoint, describe(&params.request));

        let response = builder
            .send()
            .await
            .map_err(|e| CallError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("[RPC] {} answered {}", params.endpoint, status);
            return Err(invalid_status(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| CallError::protocol(e.to_string()))?;

        unwrap_response(json, params.unwrap)
    }

    /// Same as `execute`, folded into a terminal `CallState`.
    pub async fn call(&self, params: &CallParams) -> CallState {
        let state = CallState::from(self.execute(params).await);
        if let CallState::Failure(error) = &state {
            log::info!("[RPC] {} failed: {}", describe(&params.request), error);
        }
        state
    }
}

/// Short label for logs: the method, or the methods of a batch.
fn describe(payload: &RpcPayload) -> String {
    match payload {
        RpcPayload::Single(request) => request.method.clone(),
        RpcPayload::Batch(requests) => format!(
            "batch[{}]",
            requests
                .iter()
                .map(|r| r.method.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
