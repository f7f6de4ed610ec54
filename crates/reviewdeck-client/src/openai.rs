//! OpenAI-compatible API adapter
//!
//! The provider family exposes several request shapes over its history. The
//! adapter is bound to one shape when it is built, from the shapes the
//! configured endpoint supports, preferring the richest. Nothing is probed
//! per call.

use reviewdeck_core::config::OpenAiSettings;
use reviewdeck_core::generation::GenerationRequest;
use reviewdeck_core::provider::OpenAiApi;
use serde_json::json;
use tracing::debug;

use crate::error::ClientError;
use crate::transport::HttpRequest;

/// Remediation appended to errors that point at an API-shape mismatch
pub const LEGACY_API_HINT: &str =
    "The endpoint rejected the request shape. If the OpenAI-compatible \
     endpoint was recently changed or upgraded, align `openai.apis` in the config with the APIs it \
     supports (chat_completions, responses, completions).";

/// Phrases in an error message that mention the older API surface
const LEGACY_API_MARKERS: &[&str] = &["ChatCompletion", "v1/completions", "/completions endpoint"];

/// Whether an error message suggests a mismatch with the older API surface.
pub fn needs_legacy_hint(message: &str) -> bool {
    LEGACY_API_MARKERS.iter().any(|m| message.contains(m))
}

/// Request builder for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    base_url: String,
    api: Option<OpenAiApi>,
}

impl OpenAiAdapter {
    /// Bind to the richest of the `supported` API shapes. An empty list
    /// binds nothing and every request fails with `NoSupportedApi`.
    pub fn new(base_url: &str, supported: &[OpenAiApi]) -> Self {
        let api = supported.iter().min().copied();
        debug!("OpenAI adapter bound to {:?} at {}", api, base_url);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api,
        }
    }

    pub fn from_settings(settings: &OpenAiSettings) -> Self {
        Self::new(&settings.base_url, &settings.apis)
    }

    /// The bound API shape
    pub fn api(&self) -> Option<OpenAiApi> {
        self.api
    }

    /// Build the request for the bound shape.
    pub fn build_request(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<HttpRequest, ClientError> {
        let api = self.api.ok_or(ClientError::NoSupportedApi)?;
        let url = format!("{}/{}", self.base_url, api.path());

        let body = match api {
            OpenAiApi::ChatCompletions => json!({
                "model": request.model,
                "messages": [{ "role": "user", "content": request.prompt }],
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
            }),
            OpenAiApi::Responses => json!({
                "model": request.model,
                "input": request.prompt,
                "max_output_tokens": request.max_tokens,
                "temperature": request.temperature,
            }),
            OpenAiApi::Completions => json!({
                "model": request.model,
                "prompt": request.prompt,
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
            }),
        };

        Ok(HttpRequest::new(url, body).header("Authorization", format!("Bearer {api_key}")))
    }
}
