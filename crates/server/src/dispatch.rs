//! Request dispatch: validation, tool lookup, prompt compilation, relay.
//!
//! Each call is an independent pipeline. The dispatcher keeps no state between
//! calls, so one instance is shared by every connection.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use gateway::{CompletionRequest, Gateway};
use registry::{ToolDefinition, ToolRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_STATUS: &str = "Medical Assistant Suite API is running!";

/// The operations the endpoint supports.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read-only capability listing.
    Probe,
    /// Generate a document with one tool.
    Submit(SubmitRequest),
}

/// Body of a generate call. Both fields are required; they are optional here
/// so that a missing field is reported by the dispatcher, not the decoder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubmitRequest {
    #[serde(rename = "toolType", default)]
    pub tool_type: Option<Value>,
    #[serde(rename = "inputData", default)]
    pub input_data: Option<Value>,
}

impl SubmitRequest {
    pub fn new(tool_type: impl Into<String>, input_data: Value) -> Self {
        Self {
            tool_type: Some(Value::String(tool_type.into())),
            input_data: Some(input_data),
        }
    }

    /// Decode a raw request body. An empty body decodes as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, Failure> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Failure::BadRequest(format!("Invalid JSON body: {e}")))?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| Failure::BadRequest(format!("Invalid request body: {e}"))),
            _ => Ok(Self::default()),
        }
    }

    /// The tool id, or `None` unless it is a non-empty string.
    fn tool_id(&self) -> Option<&str> {
        match self.tool_type.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// The input payload, or `None` when absent or null.
    fn input(&self) -> Option<&Value> {
        self.input_data.as_ref().filter(|v| !v.is_null())
    }
}

/// Response to a probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub status: String,
    pub timestamp: String,
    pub available_tools: Vec<String>,
    pub version: String,
}

/// Successful generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated {
    pub success: bool,
    pub result: String,
    pub tool_type: String,
    pub tool_name: String,
    pub timestamp: String,
}

/// Every way a call can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The caller sent an incomplete or invalid request.
    #[error("{0}")]
    BadRequest(String),

    /// The deployment is broken (missing credential, malformed template).
    #[error("{0}")]
    ServerMisconfiguration(String),

    /// The completion provider failed.
    #[error("{0}")]
    UpstreamError(String),

    /// The HTTP method is not one the endpoint serves.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// Result of dispatching one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Probed(ProbeReport),
    Generated(Generated),
    Failed(Failure),
}

/// Translates operations into registry lookups and completion calls.
pub struct Dispatcher<G> {
    registry: Arc<ToolRegistry>,
    gateway: Option<G>,
    status: String,
    version: String,
}

impl<G: Gateway> Dispatcher<G> {
    /// Create a dispatcher. `gateway` is `None` when no credential is
    /// configured; submits then fail as a server misconfiguration.
    pub fn new(registry: Arc<ToolRegistry>, gateway: Option<G>) -> Self {
        Self {
            registry,
            gateway,
            status: DEFAULT_STATUS.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, operation: Operation) -> Outcome {
        match operation {
            Operation::Probe => Outcome::Probed(self.probe()),
            Operation::Submit(request) => match self.submit(request).await {
                Ok(generated) => Outcome::Generated(generated),
                Err(failure) => Outcome::Failed(failure),
            },
        }
    }

    pub fn probe(&self) -> ProbeReport {
        ProbeReport {
            status: self.status.clone(),
            timestamp: timestamp(Utc::now()),
            available_tools: self.available_tools(),
            version: self.version.clone(),
        }
    }

    pub async fn submit(&self, request: SubmitRequest) -> Result<Generated, Failure> {
        let tool_id = request.tool_id();
        let input = request.input();
        let (tool_id, input) = match (tool_id, input) {
            (Some(tool_id), Some(input)) => (tool_id, input),
            (None, None) => return Err(bad_request("Tool type and input data are required")),
            (None, Some(_)) => return Err(bad_request("Tool type is required")),
            (Some(tool_id), None) => {
                return Err(bad_request(failed(tool_id, &"Input data is required")));
            }
        };
        if !input.is_object() {
            return Err(bad_request(failed(
                tool_id,
                &"Input data must be a JSON object",
            )));
        }

        let Ok(tool) = self.registry.lookup(tool_id) else {
            return Err(bad_request(format!(
                "Unknown tool type: {tool_id}. Available tools: {}",
                self.available_tools().join(", ")
            )));
        };

        let Some(gateway) = &self.gateway else {
            error!(tool = %tool.id, "completion API key not configured");
            return Err(Failure::ServerMisconfiguration(failed(
                &tool.id,
                &"Completion API key not configured",
            )));
        };

        let prompt = registry::compile(&tool.prompt_template, input, Utc::now()).map_err(|e| {
            error!(tool = %tool.id, error = %e, "tool template cannot be compiled");
            Failure::ServerMisconfiguration(failed(&tool.id, &e))
        })?;

        info!(tool = %tool.id, "processing request");

        let response = gateway
            .complete(completion_request(tool, prompt))
            .await
            .map_err(|e| {
                error!(tool = %tool.id, error = %e, "completion failed");
                Failure::UpstreamError(failed(&tool.id, &e))
            })?;

        Ok(Generated {
            success: true,
            result: response.text,
            tool_type: tool.id.clone(),
            tool_name: tool.display_name.clone(),
            timestamp: timestamp(Utc::now()),
        })
    }

    fn available_tools(&self) -> Vec<String> {
        self.registry
            .list_ids()
            .into_iter()
            .map(String::from)
            .collect()
    }
}

/// Build the outbound request from a tool's model parameters.
pub fn completion_request(tool: &ToolDefinition, prompt: String) -> CompletionRequest {
    CompletionRequest {
        model: tool.model.clone(),
        prompt,
        temperature: tool.temperature,
        max_tokens: tool.max_tokens,
    }
}

/// RFC 3339 UTC with millisecond precision, e.g. `2025-07-01T02:03:04.567Z`.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn bad_request(message: impl Into<String>) -> Failure {
    let message = message.into();
    warn!(%message, "rejected request");
    Failure::BadRequest(message)
}

fn failed(tool_id: &str, cause: &dyn std::fmt::Display) -> String {
    format!("Failed to process {tool_id} request: {cause}")
}
