//! Provider identities and model routing
//!
//! A model identifier is routed to a provider family by its prefix. Names
//! that match no known family go to OpenAI under the permissive policy,
//! which is the default; the strict policy refuses them instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A remote text-generation API family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
}

impl Provider {
    /// All supported providers
    pub fn all() -> &'static [Provider] {
        &[Provider::OpenAi, Provider::Gemini]
    }

    /// Key used in credential updates and config (`openai`, `gemini`)
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }

    /// Human-readable name, used in user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }

    /// Environment variables consulted when seeding the credential set at startup.
    pub fn startup_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["OPENAI_API_KEY"],
            Provider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        }
    }

    /// Environment variables consulted at call time when no explicit key is set.
    pub fn call_time_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["OPENAI_API_KEY"],
            Provider::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        }
    }

    /// Classify a model identifier by prefix. `None` for unrecognized names.
    pub fn classify(model: &str) -> Option<Provider> {
        if model.starts_with("gpt") {
            Some(Provider::OpenAi)
        } else if model.starts_with("gemini") {
            Some(Provider::Gemini)
        } else {
            None
        }
    }

    /// Route a model identifier, defaulting unrecognized names to OpenAI.
    pub fn for_model(model: &str) -> Provider {
        Self::classify(model).unwrap_or(Provider::OpenAi)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How model identifiers that match no known prefix are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingPolicy {
    /// Unrecognized names go to OpenAI
    #[default]
    Permissive,
    /// Unrecognized names are rejected
    Strict,
}

impl RoutingPolicy {
    pub fn route(&self, model: &str) -> Option<Provider> {
        match self {
            RoutingPolicy::Permissive => Some(Provider::for_model(model)),
            RoutingPolicy::Strict => Provider::classify(model),
        }
    }
}

/// API shapes offered by the OpenAI-compatible provider family.
///
/// Declaration order is preference order: the richest shape comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenAiApi {
    /// `POST /chat/completions` with a message list
    ChatCompletions,
    /// `POST /responses` with a single input
    Responses,
    /// Legacy `POST /completions` with a raw prompt
    Completions,
}

impl OpenAiApi {
    pub fn all() -> &'static [OpenAiApi] {
        &[
            OpenAiApi::ChatCompletions,
            OpenAiApi::Responses,
            OpenAiApi::Completions,
        ]
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            OpenAiApi::ChatCompletions => "chat/completions",
            OpenAiApi::Responses => "responses",
            OpenAiApi::Completions => "completions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt_models_route_to_openai() {
        for model in ["gpt-4o-mini", "gpt-4.1-mini", "gpt"] {
            assert_eq!(Provider::for_model(model), Provider::OpenAi, "{model}");
        }
    }

    #[test]
    fn test_gemini_models_route_to_gemini() {
        for model in ["gemini-2.5-flash", "gemini-3-flash-preview", "gemini"] {
            assert_eq!(Provider::for_model(model), Provider::Gemini, "{model}");
        }
    }

    #[test]
    fn test_unknown_models_default_to_openai() {
        // Deliberate: unrecognized names are not rejected under the default policy.
        for model in ["claude-3", "o3-mini", "", "Gemini-2.5-flash", "llama3:8b"] {
            assert_eq!(Provider::classify(model), None, "{model}");
            assert_eq!(Provider::for_model(model), Provider::OpenAi, "{model}");
        }
    }

    #[test]
    fn test_strict_policy_rejects_unknown_models() {
        assert_eq!(RoutingPolicy::Strict.route("claude-3"), None);
        assert_eq!(
            RoutingPolicy::Strict.route("gemini-2.5-flash"),
            Some(Provider::Gemini)
        );
        assert_eq!(
            RoutingPolicy::Permissive.route("claude-3"),
            Some(Provider::OpenAi)
        );
    }

    #[test]
    fn test_provider_serde_names() {
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(serde_json::to_string(&Provider::Gemini).unwrap(), "\"gemini\"");
    }

    #[test]
    fn test_openai_api_preference_order() {
        let mut apis = vec![
            OpenAiApi::Completions,
            OpenAiApi::ChatCompletions,
            OpenAiApi::Responses,
        ];
        apis.sort();
        assert_eq!(apis, OpenAiApi::all());
    }

    #[test]
    fn test_openai_api_serde_names() {
        let apis: Vec<OpenAiApi> =
            serde_yaml::from_str("[chat_completions, responses, completions]").unwrap();
        assert_eq!(apis, OpenAiApi::all());
    }
}
