use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const ADMIN_KEY_ENV: &str = "ADMIN_KEY";

pub const ENHANCE_PATH: &str = "/api/enhance";
pub const CLASSIFY_PATH: &str = "/api/classify";
pub const ADMIN_PATH: &str = "/api/admin";

// Enhancement is long-running work on the server side.
pub const ENHANCE_TIMEOUT: Duration = Duration::from_secs(300);
pub const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(60);
pub const ADMIN_TIMEOUT: Duration = Duration::from_secs(60);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

pub const BATCH_PAUSE: Duration = Duration::from_secs(1);

pub const DEFAULT_MODEL: &str = "nightmareai/real-esrgan";
pub const DEFAULT_SCALE: u32 = 4;

pub const DATA_URI_PREFIX: &str = "data:";
pub const JPEG_DATA_URI_HEADER: &str = "data:image/jpeg;base64,";
pub const ENHANCED_IMAGE_FIELD: &str = "enhancedImage";
pub const ENHANCED_FILE_PREFIX: &str = "enhanced_";

/// Maximum input file size in bytes (100MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const ERROR_PREFIX: &str = "❌";
