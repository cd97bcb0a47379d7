mod loader;

use serde::{Deserialize, Serialize};

use crate::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub use loader::{get_default_config, load_configuration, write_config_to};

/// Settings needed to construct a [`WalletApiClient`](crate::http::WalletApiClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
