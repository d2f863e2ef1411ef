use crate::constants::{DATA_URI_PREFIX, DOWNLOAD_TIMEOUT, ENHANCED_IMAGE_FIELD, JPEG_DATA_URI_HEADER};
use crate::error::{EnhancerError, Result};
use crate::transport::{Method, Transport};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Wraps raw bytes in a `data:image/jpeg;base64,` URI.
///
/// The MIME tag is fixed; the service sniffs the real format itself.
pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("{}{}", JPEG_DATA_URI_HEADER, BASE64.encode(bytes))
}

/// Reads `path` and encodes its contents as a data URI.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use image_enhancer::codec::encode_image;
///
/// let uri = encode_image(Path::new("photo.jpg")).unwrap();
/// assert!(uri.starts_with("data:image/jpeg;base64,"));
/// ```
pub fn encode_image(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(encode_bytes(&bytes))
}

/// Decodes the payload following the first comma of a data URI.
///
/// Line-wrapped base64 is accepted; ASCII whitespace is dropped first.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let (_, data) = uri
        .split_once(',')
        .ok_or_else(|| EnhancerError::Schema("data URI has no ',' separator".to_string()))?;
    let compact: Vec<u8> = data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    BASE64
        .decode(compact)
        .map_err(|e| EnhancerError::InvalidResponse(format!("invalid base64 image data: {}", e)))
}

/// Recovers the enhanced image bytes from a result payload.
///
/// Inline data URIs are decoded locally; anything else is treated as a URL
/// and fetched with a single GET through `transport`.
pub fn decode_result<T: Transport>(transport: &T, payload: &Map<String, Value>) -> Result<Vec<u8>> {
    let field = payload.get(ENHANCED_IMAGE_FIELD).ok_or_else(|| {
        EnhancerError::Schema(format!("no '{}' in result", ENHANCED_IMAGE_FIELD))
    })?;
    let value = field.as_str().ok_or_else(|| {
        EnhancerError::Schema(format!("'{}' is not a string", ENHANCED_IMAGE_FIELD))
    })?;

    if value.starts_with(DATA_URI_PREFIX) {
        return decode_data_uri(value);
    }

    let response = transport.send(Method::Get, value, None, DOWNLOAD_TIMEOUT)?;
    if !response.is_ok() {
        return Err(EnhancerError::HttpStatus {
            status: response.status,
            body: response.text(),
        });
    }
    Ok(response.body)
}
