//! Gemini-compatible API adapter
//!
//! Single-turn `generateContent` requests with the generation settings
//! passed as named `generationConfig` fields.

use reviewdeck_core::config::GeminiSettings;
use reviewdeck_core::generation::GenerationRequest;
use serde::Serialize;

use crate::error::ClientError;
use crate::transport::HttpRequest;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Request builder for a Gemini-compatible endpoint
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    base_url: String,
}

impl GeminiAdapter {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &GeminiSettings) -> Self {
        Self::new(&settings.base_url)
    }

    pub fn build_request(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<HttpRequest, ClientError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&request.model)
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::other(format!("failed to encode Gemini request: {e}")))?;

        Ok(HttpRequest::new(url, body).header("x-goog-api-key", api_key))
    }
}

/// Prefix applied to remote Gemini failures.
pub fn describe_failure(err: &ClientError) -> String {
    format!("Gemini call failed: {err}")
}
