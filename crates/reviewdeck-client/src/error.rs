//! Error types for reviewdeck-client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{provider} API key not set.")]
    MissingCredential { provider: &'static str },

    #[error(
        "{provider} support is not compiled into this build. \
         Rebuild with `--features {feature}`."
    )]
    ProviderDisabled {
        provider: &'static str,
        feature: &'static str,
    },

    #[error(
        "installed client exposes no supported API. Enable at least one of chat_completions, \
         responses or completions under `openai.apis` in the config."
    )]
    NoSupportedApi,

    #[error("Unsupported model/provider: {model}")]
    UnsupportedModel { model: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{message}\n\nHint: {hint}")]
    Hinted { message: String, hint: String },

    #[error("{0}")]
    Other(String),
}

impl ClientError {
    pub fn missing_credential(provider: &'static str) -> Self {
        Self::MissingCredential { provider }
    }

    pub fn hinted(msg: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Hinted {
            message: msg.into(),
            hint: hint.into(),
        }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = ClientError::missing_credential("OpenAI");
        assert_eq!(err.to_string(), "OpenAI API key not set.");
    }

    #[test]
    fn test_no_supported_api_names_condition() {
        let msg = ClientError::NoSupportedApi.to_string();
        assert!(msg.starts_with("installed client exposes no supported API"));
    }

    #[test]
    fn test_hinted_keeps_message_and_hint() {
        let err = ClientError::hinted("endpoint rejected request", "check the API shape");
        assert_eq!(
            err.to_string(),
            "endpoint rejected request\n\nHint: check the API shape"
        );
    }

    #[test]
    fn test_api_error_message() {
        let err = ClientError::Api {
            status: 401,
            message: "Incorrect API key provided".into(),
        };
        assert_eq!(err.to_string(), "API error (401): Incorrect API key provided");
    }
}
