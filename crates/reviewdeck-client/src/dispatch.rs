//! Unified text generation dispatcher
//!
//! Routes a request to the OpenAI- or Gemini-compatible provider based on
//! the model identifier, resolves the API key, posts a single request and
//! extracts the generated text. `generate` never fails: every error is
//! returned as a `GenerationResult` error.

use std::sync::Arc;

use reviewdeck_core::config::ProviderSettings;
use reviewdeck_core::credentials::{CredentialSet, env_var};
use reviewdeck_core::generation::{GenerationRequest, GenerationResult};
use reviewdeck_core::provider::{Provider, RoutingPolicy};
use tracing::{Instrument, debug, info_span, warn};

use crate::error::ClientError;
use crate::extract::{Extracted, extract_text};
use crate::gemini::{self, GeminiAdapter};
use crate::openai::{LEGACY_API_HINT, OpenAiAdapter, needs_legacy_hint};
use crate::transport::{HttpRequest, Transport};

/// Environment variable lookup used for call-time credential fallback
pub type EnvLookup = fn(&str) -> Option<String>;

/// Routes generation requests to a provider through a transport
pub struct Dispatcher<T> {
    transport: T,
    credentials: Arc<CredentialSet>,
    routing: RoutingPolicy,
    openai: OpenAiAdapter,
    gemini: GeminiAdapter,
    env: EnvLookup,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, credentials: Arc<CredentialSet>, settings: &ProviderSettings) -> Self {
        let openai = OpenAiAdapter::from_settings(&settings.openai);
        if openai.api().is_none() {
            warn!("`openai.apis` is empty, requests to OpenAI models will fail");
        }
        Self {
            transport,
            credentials,
            routing: settings.routing,
            openai,
            gemini: GeminiAdapter::from_settings(&settings.gemini),
            env: env_var,
        }
    }

    /// Replace the process environment lookup used when no key is held.
    pub fn with_env_lookup(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn credentials(&self) -> &Arc<CredentialSet> {
        &self.credentials
    }

    /// The provider a model identifier routes to under the configured policy.
    pub fn route(&self, model: &str) -> Option<Provider> {
        self.routing.route(model)
    }

    /// Whether a key is available for `provider`, held or from the environment.
    pub fn has_credential(&self, provider: Provider) -> bool {
        self.credentials.resolve(provider, self.env).is_some()
    }

    /// Generate text for a single-turn prompt.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let request_id = uuid::Uuid::new_v4();
        let span = info_span!("generate", %request_id, model = %request.model);

        async {
            match self.try_generate(request).await {
                Ok(Extracted::Text(text)) => {
                    debug!("generated {} chars", text.len());
                    GenerationResult::text(text)
                }
                Ok(Extracted::Raw(raw)) => {
                    warn!("no known text field in response, returning the raw response");
                    GenerationResult::raw(raw)
                }
                Err(err) => {
                    warn!("generation failed: {err}");
                    GenerationResult::error(err.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_generate(&self, request: &GenerationRequest) -> Result<Extracted, ClientError> {
        let provider = self
            .route(&request.model)
            .ok_or_else(|| ClientError::UnsupportedModel {
                model: request.model.clone(),
            })?;
        if Provider::classify(&request.model).is_none() {
            debug!("unrecognized model name, routing to {provider} by default");
        }

        ensure_compiled(provider)?;

        let api_key = self
            .credentials
            .resolve(provider, self.env)
            .ok_or_else(|| ClientError::missing_credential(provider.display_name()))?;

        let http_request = self.build_request(provider, &api_key, request)?;
        debug!("dispatching to {provider}");

        let response = self
            .transport
            .post_json(http_request)
            .await
            .map_err(|err| remote_failure(provider, err))?;

        Ok(extract_text(&response))
    }

    fn build_request(
        &self,
        provider: Provider,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<HttpRequest, ClientError> {
        match provider {
            Provider::OpenAi => self.openai.build_request(api_key, request),
            Provider::Gemini => self.gemini.build_request(api_key, request),
        }
    }
}

/// Fail early when a provider's support was left out of the build.
fn ensure_compiled(provider: Provider) -> Result<(), ClientError> {
    let compiled = match provider {
        Provider::OpenAi => cfg!(feature = "openai"),
        Provider::Gemini => cfg!(feature = "gemini"),
    };
    if compiled {
        Ok(())
    } else {
        Err(ClientError::ProviderDisabled {
            provider: provider.display_name(),
            feature: provider.name(),
        })
    }
}

/// Normalize an error raised by the remote call.
fn remote_failure(provider: Provider, err: ClientError) -> ClientError {
    match provider {
        Provider::OpenAi => {
            let message = err.to_string();
            if needs_legacy_hint(&message) {
                ClientError::hinted(message, LEGACY_API_HINT)
            } else {
                err
            }
        }
        Provider::Gemini => ClientError::other(gemini::describe_failure(&err)),
    }
}
