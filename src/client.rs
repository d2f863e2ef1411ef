use crate::codec::decode_result;
use crate::config::ClientConfig;
use crate::constants::{
    ADMIN_PATH, ADMIN_TIMEOUT, CLASSIFY_PATH, CLASSIFY_TIMEOUT, ENHANCE_PATH, ENHANCE_TIMEOUT,
};
use crate::error::{EnhancerError, Result};
use crate::models::{AdminCommand, AdminCommandKind, EnhancementRequest, OperationResult};
use crate::transport::{HttpTransport, Method, Transport};
use crate::validation::validate_input_path;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// The three remote operations and what distinguishes them on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Enhance,
    Classify,
    Admin,
}

impl Operation {
    fn path(self) -> &'static str {
        match self {
            Operation::Enhance => ENHANCE_PATH,
            Operation::Classify => CLASSIFY_PATH,
            Operation::Admin => ADMIN_PATH,
        }
    }

    fn timeout(self) -> Duration {
        match self {
            Operation::Enhance => ENHANCE_TIMEOUT,
            Operation::Classify => CLASSIFY_TIMEOUT,
            Operation::Admin => ADMIN_TIMEOUT,
        }
    }

    fn status_failure(self) -> &'static str {
        match self {
            Operation::Enhance => "Enhancement failed",
            Operation::Classify => "Classification failed",
            Operation::Admin => "Admin command failed",
        }
    }

    fn fault_failure(self) -> &'static str {
        match self {
            Operation::Enhance => "Error enhancing image",
            Operation::Classify => "Error classifying image",
            Operation::Admin => "Error executing admin command",
        }
    }
}

/// Client for the enhancement service.
///
/// Every operation returns an [`OperationResult`]; transport, I/O and
/// schema errors are folded into [`OperationResult::Failure`] here and
/// never reach the caller as `Err`.
pub struct EnhancerClient<T: Transport = HttpTransport> {
    transport: T,
    admin_key: Option<String>,
}

impl EnhancerClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.base_url)?;
        Ok(Self::with_transport(transport, config.admin_key))
    }
}

impl<T: Transport> EnhancerClient<T> {
    pub fn with_transport(transport: T, admin_key: Option<String>) -> Self {
        Self {
            transport,
            admin_key,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reads `image_path` and submits it for enhancement.
    pub fn enhance_image(
        &self,
        image_path: &Path,
        model: &str,
        options: Map<String, Value>,
    ) -> OperationResult {
        let request = match load_request(image_path, model, options) {
            Ok(request) => request,
            Err(e) => return self.fault(Operation::Enhance, e),
        };

        crate::info!("Enhancing image: {}", image_path.display());
        let result = self.enhance(&request);
        if result.is_success() {
            crate::info!("Image enhancement completed successfully");
        }
        result
    }

    pub fn enhance(&self, request: &EnhancementRequest) -> OperationResult {
        self.dispatch(Operation::Enhance, &request.to_payload())
    }

    /// Asks the service to grade image quality and suggest enhancements.
    pub fn classify_image(&self, image_path: &Path) -> OperationResult {
        let image = match validate_input_path(image_path).and_then(|_| read_image(image_path)) {
            Ok(bytes) => crate::codec::encode_bytes(&bytes),
            Err(e) => return self.fault(Operation::Classify, e),
        };

        self.dispatch(Operation::Classify, &json!({ "image": image }))
    }

    /// Sends one command to the multiplexed admin endpoint.
    pub fn admin_command(&self, kind: AdminCommandKind, args: Map<String, Value>) -> OperationResult {
        let Some(admin_key) = self.admin_key.as_deref() else {
            return self.fault(
                Operation::Admin,
                EnhancerError::Config(
                    "no admin key configured (pass --admin-key or set ADMIN_KEY)".to_string(),
                ),
            );
        };

        crate::verbose!("Admin command: {}", kind);
        let command = AdminCommand::new(kind, args, admin_key);
        match serde_json::to_value(&command) {
            Ok(payload) => self.dispatch(Operation::Admin, &payload),
            Err(e) => self.fault(Operation::Admin, EnhancerError::InvalidRequest(e.to_string())),
        }
    }

    pub fn system_status(&self) -> OperationResult {
        self.admin_command(AdminCommandKind::Status, Map::new())
    }

    pub fn health_check(&self) -> OperationResult {
        self.admin_command(AdminCommandKind::Health, Map::new())
    }

    pub fn logs(&self, level: &str, limit: u32) -> OperationResult {
        self.admin_command(
            AdminCommandKind::Logs,
            object(json!({ "level": level, "limit": limit })),
        )
    }

    pub fn metrics(&self, time_range: &str) -> OperationResult {
        self.admin_command(
            AdminCommandKind::Metrics,
            object(json!({ "timeRange": time_range })),
        )
    }

    pub fn test_apis(&self) -> OperationResult {
        self.admin_command(AdminCommandKind::TestApis, Map::new())
    }

    pub fn clear_cache(&self) -> OperationResult {
        self.admin_command(AdminCommandKind::ClearCache, Map::new())
    }

    pub fn debug_image(&self, image_id: &str, include_metadata: bool) -> OperationResult {
        self.admin_command(
            AdminCommandKind::DebugImage,
            object(json!({ "imageId": image_id, "includeMetadata": include_metadata })),
        )
    }

    pub fn export_data(&self, data_type: &str, format: &str) -> OperationResult {
        self.admin_command(
            AdminCommandKind::ExportData,
            object(json!({ "type": data_type, "format": format })),
        )
    }

    pub fn system_info(&self) -> OperationResult {
        self.admin_command(AdminCommandKind::SystemInfo, Map::new())
    }

    /// Writes the image carried by an enhancement result to `output_path`.
    ///
    /// Parent directories are not created. On success the payload holds
    /// `outputPath` and `bytes`.
    pub fn save_enhanced_image(
        &self,
        result: &Map<String, Value>,
        output_path: &Path,
    ) -> OperationResult {
        let written = decode_result(&self.transport, result).and_then(|bytes| {
            fs::write(output_path, &bytes)?;
            Ok(bytes.len())
        });

        match written {
            Ok(len) => {
                crate::info!("Enhanced image saved to: {}", output_path.display());
                OperationResult::success(object(json!({
                    "outputPath": output_path.display().to_string(),
                    "bytes": len,
                })))
            }
            Err(e) => {
                let message = format!("Error saving enhanced image: {}", e);
                crate::error!("{}", message);
                OperationResult::failure(message)
            }
        }
    }

    fn dispatch(&self, operation: Operation, payload: &Value) -> OperationResult {
        let response = match self.transport.send(
            Method::Post,
            operation.path(),
            Some(payload),
            operation.timeout(),
        ) {
            Ok(response) => response,
            Err(e) => return self.fault(operation, e),
        };

        if !response.is_ok() {
            let message = format!(
                "{}: {} - {}",
                operation.status_failure(),
                response.status,
                response.text()
            );
            crate::error!("{}", message);
            return OperationResult::failure(message);
        }

        match response.json_object() {
            Ok(payload) => OperationResult::success(payload),
            Err(e) => self.fault(operation, e),
        }
    }

    fn fault(&self, operation: Operation, err: EnhancerError) -> OperationResult {
        let message = format!("{}: {}", operation.fault_failure(), err);
        crate::error!("{}", message);
        OperationResult::failure(message)
    }
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

fn load_request(path: &Path, model: &str, options: Map<String, Value>) -> Result<EnhancementRequest> {
    validate_input_path(path)?;
    EnhancementRequest::new(read_image(path)?, model, options)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
