use crate::codec::encode_bytes;
use crate::error::{EnhancerError, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

/// Outcome of every request made through [`crate::client::EnhancerClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Success { payload: Map<String, Value> },
    Failure { message: String },
}

impl OperationResult {
    pub fn success(payload: Map<String, Value>) -> Self {
        OperationResult::Success { payload }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        OperationResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success { .. })
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            OperationResult::Success { payload } => Some(payload),
            OperationResult::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OperationResult::Success { .. } => None,
            OperationResult::Failure { message } => Some(message),
        }
    }

    /// Payload as-is, or `{"error": message}` for failures.
    pub fn to_json(&self) -> Value {
        match self {
            OperationResult::Success { payload } => Value::Object(payload.clone()),
            OperationResult::Failure { message } => json!({ "error": message }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnhancementRequest {
    pub image_bytes: Vec<u8>,
    pub model: String,
    pub options: Map<String, Value>,
}

impl EnhancementRequest {
    pub fn new(
        image_bytes: Vec<u8>,
        model: impl Into<String>,
        options: Map<String, Value>,
    ) -> Result<Self> {
        let model = model.into();
        if image_bytes.is_empty() {
            return Err(EnhancerError::InvalidRequest("image is empty".to_string()));
        }
        if model.trim().is_empty() {
            return Err(EnhancerError::InvalidRequest(
                "model identifier is empty".to_string(),
            ));
        }
        Ok(Self {
            image_bytes,
            model,
            options,
        })
    }

    /// Wire body for `POST /api/enhance`.
    pub fn to_payload(&self) -> Value {
        json!({
            "image": encode_bytes(&self.image_bytes),
            "model": self.model,
            "options": self.options,
        })
    }
}

/// Commands accepted by the multiplexed `/api/admin` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminCommandKind {
    Status,
    Health,
    Logs,
    Metrics,
    TestApis,
    ClearCache,
    DebugImage,
    ExportData,
    SystemInfo,
}

impl AdminCommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminCommandKind::Status => "status",
            AdminCommandKind::Health => "health",
            AdminCommandKind::Logs => "logs",
            AdminCommandKind::Metrics => "metrics",
            AdminCommandKind::TestApis => "test-apis",
            AdminCommandKind::ClearCache => "clear-cache",
            AdminCommandKind::DebugImage => "debug-image",
            AdminCommandKind::ExportData => "export-data",
            AdminCommandKind::SystemInfo => "system-info",
        }
    }
}

impl fmt::Display for AdminCommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCommand {
    pub command: AdminCommandKind,
    pub args: Map<String, Value>,
    pub admin_key: String,
}

impl AdminCommand {
    pub fn new(command: AdminCommandKind, args: Map<String, Value>, admin_key: &str) -> Self {
        Self {
            command,
            args,
            admin_key: admin_key.to_string(),
        }
    }
}
