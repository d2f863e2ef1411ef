use crate::constants::DEFAULT_BASE_URL;

/// Connection settings for an [`crate::client::EnhancerClient`].
///
/// The admin key is never defaulted: without one, admin commands fail
/// locally instead of reaching the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub admin_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            admin_key: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: Option<String>, admin_key: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_key: admin_key.filter(|key| !key.trim().is_empty()),
        }
    }
}
