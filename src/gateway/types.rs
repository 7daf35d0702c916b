//! Gateway types: provider-neutral errors, aspect ratios, image references
//! and the [`ImageGateway`] trait.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by image gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the image provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The image provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// An image passed in for editing is not an inline `data:` URL.
    #[error("image is not a data URL")]
    NotInlineImage,
}

impl GatewayError {
    /// Stable code for logs and exit messages.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::NotInlineImage => "E_NOT_INLINE_IMAGE",
        }
    }

    /// Whether the same request could succeed if sent again later.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// ASPECT RATIO
// =============================================================================

/// Output aspect ratio for a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait,
    Landscape,
    Tall,
    Wide,
}

impl AspectRatio {
    pub const ALL: [Self; 5] = [Self::Square, Self::Portrait, Self::Landscape, Self::Tall, Self::Wide];

    /// Wire form sent to the provider.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "3:4",
            Self::Landscape => "4:3",
            Self::Tall => "9:16",
            Self::Wide => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| format!("unsupported aspect ratio: {s} (expected 1:1, 3:4, 4:3, 9:16 or 16:9)"))
    }
}

// =============================================================================
// DATA URLS
// =============================================================================

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Build a base64 `data:` URL.
#[must_use]
pub fn to_data_url(mime_type: Option<&str>, base64: &str) -> String {
    let mime = mime_type
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_IMAGE_MIME);
    format!("data:{mime};base64,{base64}")
}

/// Split a base64 `data:` URL into its mime type and payload.
///
/// Returns `None` for anything else, including remote URLs.
#[must_use]
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let mime = if mime.is_empty() { DEFAULT_IMAGE_MIME } else { mime };
    Some((mime, payload))
}

/// Prompt text actually sent for generation: the style modifier, then the prompt.
#[must_use]
pub fn full_prompt(style_modifier: &str, prompt: &str) -> String {
    format!("{style_modifier} {prompt}")
}

// =============================================================================
// GATEWAY TRAIT
// =============================================================================

/// Async boundary to an image model. Enables mocking in tests.
///
/// `Ok(None)` means the provider answered but returned no image.
#[async_trait::async_trait]
pub trait ImageGateway: Send + Sync {
    /// Generate an image from a text prompt.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the request fails or the response is malformed.
    async fn generate_image(
        &self,
        prompt: &str,
        style_modifier: &str,
        aspect: AspectRatio,
    ) -> Result<Option<String>, GatewayError>;

    /// Edit an existing image according to a text instruction.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the image cannot be sent, the request
    /// fails, or the response is malformed.
    async fn edit_image(&self, image: &str, instruction: &str) -> Result<Option<String>, GatewayError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
