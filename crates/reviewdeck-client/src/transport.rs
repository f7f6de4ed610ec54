//! Outbound HTTP seam
//!
//! Provider adapters describe a request as an `HttpRequest`; a `Transport`
//! posts it and hands back the decoded JSON body. `HttpTransport` is the
//! reqwest implementation used by the binary. Tests substitute their own.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;

/// A JSON POST to a provider endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    #[cfg(test)]
    pub(crate) fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends provider requests. One attempt per call, no retries.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn post_json(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send {
        (**self).post_json(request)
    }
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport. Without a timeout the client's own default applies.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("reviewdeck/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<Value, ClientError> {
        debug!("POST {}", request.url);

        let mut builder = self.http.post(&request.url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Ok(parse_body(body))
    }
}

/// Decode a success body, keeping non-JSON bodies as a JSON string.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

/// Extract a human-readable message from a provider error response.
///
/// OpenAI and Gemini both report `{"error": {"message": ...}}`.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error").and_then(|e| match e {
                Value::String(s) => Some(s.clone()),
                other => other
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(String::from),
            })
        })
        .unwrap_or_else(|| body.to_string())
}
