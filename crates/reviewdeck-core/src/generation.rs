//! Generation request and result types
//!
//! `GenerationResult` is the only shape returned across the dispatcher
//! boundary. It serializes to exactly one of `{"text": ...}` or
//! `{"error": ...}`.

use serde::{Deserialize, Serialize};

/// Output token budget for content generation
pub const DEFAULT_MAX_TOKENS: u32 = 12000;

/// Output token budget for the connectivity self-test
pub const SELF_TEST_MAX_TOKENS: u32 = 2000;

/// Sampling temperature for content generation
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Sampling temperature for the connectivity self-test
pub const SELF_TEST_TEMPERATURE: f64 = 0.0;

/// A single-turn generation request. Constructed per call, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Normalized outcome of a generation call: text or error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Text {
        text: String,
        /// Set when no known text field was found and `text` is the whole
        /// response stringified.
        #[serde(default, skip_serializing_if = "is_false")]
        raw_response: bool,
    },
    Error {
        error: String,
    },
}

impl GenerationResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            raw_response: false,
        }
    }

    /// Best-effort text made from the whole response
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            raw_response: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn is_raw(&self) -> bool {
        matches!(
            self,
            Self::Text {
                raw_response: true,
                ..
            }
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Error { .. } => None,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::Error { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = GenerationRequest::new("gpt-4o-mini", "hello");
        assert_eq!(req.max_tokens, 12000);
        assert_eq!(req.temperature, 0.2);
    }

    #[test]
    fn test_request_builders() {
        let req = GenerationRequest::new("gemini-2.5-flash", "ping")
            .with_max_tokens(SELF_TEST_MAX_TOKENS)
            .with_temperature(SELF_TEST_TEMPERATURE);
        assert_eq!(req.max_tokens, 2000);
        assert_eq!(req.temperature, 0.0);
    }

    #[test]
    fn test_text_serializes_without_error_key() {
        let json = serde_json::to_value(GenerationResult::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hi"}));
    }

    #[test]
    fn test_raw_text_carries_marker() {
        let json = serde_json::to_value(GenerationResult::raw("{}")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "{}", "raw_response": true}));
    }

    #[test]
    fn test_error_serializes_without_text_key() {
        let json = serde_json::to_value(GenerationResult::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn test_deserialize_error_shape() {
        let result: GenerationResult = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(result.as_error(), Some("nope"));
        assert!(!result.is_text());
    }

    #[test]
    fn test_accessors() {
        let ok = GenerationResult::text("done");
        assert_eq!(ok.as_text(), Some("done"));
        assert!(ok.as_error().is_none());
        assert!(!ok.is_raw());

        let err = GenerationResult::error("bad");
        assert_eq!(err.as_error(), Some("bad"));
        assert!(err.as_text().is_none());
    }
}
