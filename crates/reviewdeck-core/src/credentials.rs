//! In-memory API credential set
//!
//! Seeded from the environment at startup and optionally overwritten by the
//! operator. Owned by the host process and shared by handle; readers take a
//! snapshot per call, so a concurrent update is visible to later calls only
//! (last writer wins).

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::Deserialize;
use tracing::debug;

use crate::provider::Provider;

/// Partial credential update. Empty or absent values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialUpdate {
    #[serde(default)]
    pub openai: Option<String>,
    #[serde(default)]
    pub gemini: Option<String>,
}

impl CredentialUpdate {
    fn value_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::Gemini => self.gemini.as_deref(),
        }
    }
}

/// Read a process environment variable, treating empty values as unset.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Provider name to API secret
#[derive(Default)]
pub struct CredentialSet {
    keys: RwLock<HashMap<Provider, String>>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    /// Seed from an arbitrary variable lookup, using each provider's startup variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut keys = HashMap::new();
        for provider in Provider::all() {
            let found = provider
                .startup_env_vars()
                .iter()
                .find_map(|&var| lookup(var).filter(|v| !v.is_empty()));
            if let Some(key) = found {
                debug!("{} key found in environment", provider.display_name());
                keys.insert(*provider, key);
            }
        }
        Self {
            keys: RwLock::new(keys),
        }
    }

    /// Apply a partial update. Non-empty values overwrite; nothing is ever erased.
    pub fn update(&self, update: &CredentialUpdate) {
        let mut keys = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        for provider in Provider::all() {
            if let Some(value) = update.value_for(*provider).filter(|v| !v.is_empty()) {
                debug!("{} key updated", provider.display_name());
                keys.insert(*provider, value.to_string());
            }
        }
    }

    /// The explicitly held key for a provider, if any.
    pub fn get(&self, provider: Provider) -> Option<String> {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&provider)
            .filter(|k| !k.is_empty())
            .cloned()
    }

    pub fn is_set(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }

    /// Resolve the key to use for a call: the held key, else the provider's
    /// call-time environment variables through `lookup`.
    pub fn resolve(
        &self,
        provider: Provider,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.get(provider).or_else(|| {
            provider
                .call_time_env_vars()
                .iter()
                .find_map(|&var| lookup(var).filter(|v| !v.is_empty()))
        })
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.keys.read().unwrap_or_else(PoisonError::into_inner);
        let mut held: Vec<&str> = keys.keys().map(|p| p.name()).collect();
        held.sort_unstable();
        f.debug_struct("CredentialSet").field("held", &held).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn update(openai: &str, gemini: &str) -> CredentialUpdate {
        CredentialUpdate {
            openai: Some(openai.into()),
            gemini: Some(gemini.into()),
        }
    }

    #[test]
    fn test_empty_value_never_erases() {
        let creds = CredentialSet::new();
        creds.update(&update("oldkey", "oldkey2"));
        creds.update(&update("", "newkey"));

        assert_eq!(creds.get(Provider::OpenAi).as_deref(), Some("oldkey"));
        assert_eq!(creds.get(Provider::Gemini).as_deref(), Some("newkey"));
    }

    #[test]
    fn test_absent_value_never_erases() {
        let creds = CredentialSet::new();
        creds.update(&update("a", "b"));
        creds.update(&CredentialUpdate::default());
        assert_eq!(creds.get(Provider::OpenAi).as_deref(), Some("a"));
        assert_eq!(creds.get(Provider::Gemini).as_deref(), Some("b"));
    }

    #[test]
    fn test_operator_value_overwrites_environment() {
        let creds = CredentialSet::from_lookup(|var| match var {
            "OPENAI_API_KEY" => Some("from-env".into()),
            _ => None,
        });
        assert_eq!(creds.get(Provider::OpenAi).as_deref(), Some("from-env"));

        creds.update(&CredentialUpdate {
            openai: Some("from-operator".into()),
            gemini: None,
        });
        assert_eq!(creds.get(Provider::OpenAi).as_deref(), Some("from-operator"));
    }

    #[test]
    fn test_startup_gemini_prefers_gemini_var() {
        let creds = CredentialSet::from_lookup(|var| match var {
            "GEMINI_API_KEY" => Some("gemini".into()),
            "GOOGLE_API_KEY" => Some("google".into()),
            _ => None,
        });
        assert_eq!(creds.get(Provider::Gemini).as_deref(), Some("gemini"));
    }

    #[test]
    fn test_startup_gemini_falls_back_to_google_var() {
        let creds = CredentialSet::from_lookup(|var| match var {
            "GEMINI_API_KEY" => Some(String::new()),
            "GOOGLE_API_KEY" => Some("google".into()),
            _ => None,
        });
        assert_eq!(creds.get(Provider::Gemini).as_deref(), Some("google"));
    }

    #[test]
    fn test_resolve_prefers_held_key() {
        let creds = CredentialSet::new();
        creds.update(&update("held", ""));
        let key = creds.resolve(Provider::OpenAi, |_| Some("env".into()));
        assert_eq!(key.as_deref(), Some("held"));
    }

    #[test]
    fn test_resolve_reads_environment_at_call_time() {
        let creds = CredentialSet::new();
        let key = creds.resolve(Provider::Gemini, |var| match var {
            "GOOGLE_API_KEY" => Some("google".into()),
            "GEMINI_API_KEY" => Some("gemini".into()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("google"));
    }

    #[test]
    fn test_resolve_none_when_nothing_configured() {
        let creds = CredentialSet::new();
        assert!(creds.resolve(Provider::OpenAi, no_env).is_none());
        assert!(!creds.is_set(Provider::OpenAi));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = CredentialSet::new();
        creds.update(&update("sk-secret", ""));
        let debug = format!("{creds:?}");
        assert!(debug.contains("openai"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_update_deserializes_partial_json() {
        let update: CredentialUpdate = serde_json::from_str(r#"{"gemini": "k"}"#).unwrap();
        assert!(update.openai.is_none());
        assert_eq!(update.gemini.as_deref(), Some("k"));
    }
}
