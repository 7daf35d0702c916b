//! Image gateway: the async boundary to the image model.
//!
//! DESIGN
//! ======
//! Everything outside this module talks to the [`ImageGateway`] trait, so the
//! generation service can be driven by a mock in tests. The only concrete
//! client is Gemini, configured from environment variables by
//! [`config::GatewayConfig::from_env`].

pub mod config;
pub mod gemini;
pub mod types;

use std::sync::Arc;

use config::GatewayConfig;
use tracing::info;
pub use types::{AspectRatio, GatewayError, ImageGateway};

/// Build the configured gateway from environment variables.
///
/// # Errors
///
/// Returns an error if the API key is missing, a setting is malformed, or
/// the HTTP client fails to build.
pub fn from_env() -> Result<Arc<dyn ImageGateway>, GatewayError> {
    let config = GatewayConfig::from_env()?;
    let client = gemini::GeminiClient::new(config)?;
    info!(model = client.model(), "image gateway initialized");
    Ok(Arc::new(client))
}
