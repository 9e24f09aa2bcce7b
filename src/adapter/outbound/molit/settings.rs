//! MOLIT API configuration.

use serde::Deserialize;

/// Environment variable holding the data.go.kr service key.
pub const SERVICE_KEY_ENV: &str = "MOLIT_SERVICE_KEY";

/// MOLIT open API settings. The service key is never read from the file.
#[derive(Debug, Clone, Deserialize)]
pub struct MolitConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Page size requested from the API.
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: u32,
}

fn default_api_url() -> String {
    "https://apis.data.go.kr/1613000/RTMSDataSvcAptRent/getRTMSDataSvcAptRent".into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

const fn default_rows_per_page() -> u32 {
    1_000
}

impl Default for MolitConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            rows_per_page: default_rows_per_page(),
        }
    }
}

impl MolitConfig {
    /// Service key from the environment, if set and non-empty.
    #[must_use]
    pub fn service_key() -> Option<String> {
        std::env::var(SERVICE_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
