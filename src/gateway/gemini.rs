//! Gemini `generateContent` client.
//!
//! Both operations go through the same endpoint: generation sends a text
//! part plus an `imageConfig`, editing sends the source image as an
//! `inlineData` part followed by the instruction. The reply's first inline
//! image part becomes a `data:` URL.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::config::GatewayConfig;
use super::types::{AspectRatio, GatewayError, ImageGateway, full_prompt, split_data_url, to_data_url};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url, model: config.model })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, body: &GcRequest<'_>) -> Result<Option<String>, GatewayError> {
        let path = format!("/models/{}:generateContent", self.model);
        let text = self.send_json(&path, body).await?;
        parse_generate_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(GatewayError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl ImageGateway for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        style_modifier: &str,
        aspect: AspectRatio,
    ) -> Result<Option<String>, GatewayError> {
        let text = full_prompt(style_modifier, prompt);
        info!(model = %self.model, %aspect, prompt_len = text.len(), "gemini: generate image");
        let body = GcRequest {
            contents: vec![GcContent { parts: vec![GcPart::text(&text)] }],
            generation_config: Some(GcGenerationConfig { image_config: GcImageConfig { aspect_ratio: aspect.as_str() } }),
        };
        self.generate_content(&body).await
    }

    async fn edit_image(&self, image: &str, instruction: &str) -> Result<Option<String>, GatewayError> {
        let (mime_type, data) = split_data_url(image).ok_or(GatewayError::NotInlineImage)?;
        info!(model = %self.model, mime_type, bytes = data.len(), "gemini: edit image");
        let body = GcRequest {
            contents: vec![GcContent { parts: vec![GcPart::inline(mime_type, data), GcPart::text(instruction)] }],
            generation_config: None,
        };
        self.generate_content(&body).await
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GcRequest<'a> {
    contents: Vec<GcContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GcGenerationConfig<'a>>,
}

#[derive(Serialize)]
struct GcContent<'a> {
    parts: Vec<GcPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GcPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<GcInlineData<'a>>,
}

impl<'a> GcPart<'a> {
    fn text(text: &'a str) -> Self {
        Self { text: Some(text), inline_data: None }
    }

    fn inline(mime_type: &'a str, data: &'a str) -> Self {
        Self { text: None, inline_data: Some(GcInlineData { mime_type, data }) }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GcInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GcGenerationConfig<'a> {
    image_config: GcImageConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GcImageConfig<'a> {
    aspect_ratio: &'a str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Pull the first inline image out of a `generateContent` reply.
///
/// A reply without candidates or without an image part yields `Ok(None)`;
/// only a body that is not JSON is an error.
pub(crate) fn parse_generate_response(json_text: &str) -> Result<Option<String>, GatewayError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| GatewayError::ApiParse(e.to_string()))?;
    let parts = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array);
    let Some(parts) = parts else {
        debug!("gemini: reply has no candidate parts");
        return Ok(None);
    };

    let image = parts.iter().find_map(|part| {
        let inline = part.get("inlineData")?;
        let data = inline.get("data").and_then(Value::as_str)?;
        let mime = inline.get("mimeType").and_then(Value::as_str);
        Some(to_data_url(mime, data))
    });
    if image.is_none() {
        debug!(parts = parts.len(), "gemini: reply has no inline image");
    }
    Ok(image)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
