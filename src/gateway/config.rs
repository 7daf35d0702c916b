//! Image gateway configuration parsed from environment variables.

use super::types::GatewayError;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_IMAGE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: GatewayTimeouts,
}

impl GatewayConfig {
    /// Build typed gateway config from environment variables.
    ///
    /// Optional:
    /// - `IMAGE_API_KEY_ENV`: names the env var holding the key (default `GEMINI_API_KEY`)
    /// - `IMAGE_MODEL`: default `gemini-2.5-flash-image`
    /// - `IMAGE_BASE_URL`: default Generative Language API base URL
    /// - `IMAGE_REQUEST_TIMEOUT_SECS`: default 120
    /// - `IMAGE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingApiKey`] if the key variable is unset or
    /// empty, and [`GatewayError::ConfigParse`] for a malformed timeout.
    pub fn from_env() -> Result<Self, GatewayError> {
        let key_var = std::env::var("IMAGE_API_KEY_ENV").unwrap_or_else(|_| DEFAULT_API_KEY_ENV.to_string());
        let api_key = std::env::var(&key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingApiKey { var: key_var.clone() })?;

        let model = std::env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        let base_url = std::env::var("IMAGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = GatewayTimeouts {
            request_secs: env_parse_secs("IMAGE_REQUEST_TIMEOUT_SECS", DEFAULT_IMAGE_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_secs("IMAGE_CONNECT_TIMEOUT_SECS", DEFAULT_IMAGE_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn env_parse_secs(key: &str, default: u64) -> Result<u64, GatewayError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(GatewayError::ConfigParse(format!("{key} must be a positive integer, got '{raw}'"))),
            Ok(secs) => Ok(secs),
        },
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
