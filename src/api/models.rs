use std::time::Duration;

use serde::Serialize;

/// JSON body of the /api/stream request
#[derive(Debug, Clone, Serialize)]
pub struct StreamRequestBody {
    pub url: String,
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` waits as long as the transport allows.
    pub timeout: Option<Duration>,
}

pub const DEFAULT_BASE_URL: &str = "https://metube-backend-fswb.onrender.com";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}
