//! Single-shot HTTP transport
//!
//! One call in, one HTTP request out. Retries and timeouts beyond the client
//! timeout belong to callers. Every call leaves an audit record on the
//! `adops::audit` target; mutating calls also record the payload and the
//! parsed response with credentials redacted.

use std::time::Duration;

use adops_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use adops_domain::{AdOpsError, ApiConfig};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::InfraError;

const AUDIT_TARGET: &str = "adops::audit";
const REDACTED: &str = "[REDACTED]";
const SENSITIVE_KEYS: &[&str] = &["password", "token"];
const ERROR_BODY_SNIPPET: usize = 512;

/// Query parameters as `(name, value)` pairs.
pub type Query<'a> = &'a [(&'a str, String)];

/// HTTP transport bound to one base URL
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: Url,
}

impl HttpTransport {
    /// Start building a new transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Transport configured from the `[api]` section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AdOpsError> {
        Self::builder()
            .base_url(&config.base_url)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request and parse the body as JSON.
    ///
    /// Non-2xx or a network failure is `Transport`; a 2xx body that is not
    /// JSON is `MalformedResponse`. An empty 2xx body parses as `null`.
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> Result<Value, AdOpsError> {
        let url = self.endpoint(path, query)?;
        let mutating = method != Method::GET;

        let mut builder = self.client.request(method.clone(), url.clone());
        builder = with_token(builder, token)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        if mutating {
            let payload = body.map(redacted).unwrap_or(Value::Null);
            info!(target: AUDIT_TARGET, %method, %url, %payload, "Sending request");
        }

        let response = self.execute(&method, &url, builder).await?;
        let text = response.text().await.map_err(|err| AdOpsError::from(InfraError::from(err)))?;

        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&text).map_err(|err| {
                warn!(%method, %url, error = %err, "Response body is not JSON");
                AdOpsError::from(InfraError::from(err))
            })?
        };

        if mutating {
            info!(target: AUDIT_TARGET, %method, %url, response = %redacted(&value), "Received response");
        }

        Ok(value)
    }

    /// Send one GET and return the raw body bytes.
    pub async fn request_bytes(
        &self,
        path: &str,
        token: Option<&str>,
        query: Query<'_>,
    ) -> Result<Vec<u8>, AdOpsError> {
        let url = self.endpoint(path, query)?;
        let builder = with_token(self.client.request(Method::GET, url.clone()), token)?;

        let response = self.execute(&Method::GET, &url, builder).await?;
        let bytes = response.bytes().await.map_err(|err| AdOpsError::from(InfraError::from(err)))?;
        debug!(%url, bytes = bytes.len(), "Downloaded body");
        Ok(bytes.to_vec())
    }

    async fn execute(
        &self,
        method: &Method,
        url: &Url,
        builder: RequestBuilder,
    ) -> Result<Response, AdOpsError> {
        debug!(%method, %url, "sending HTTP request");

        let response = builder.send().await.map_err(|err| {
            warn!(target: AUDIT_TARGET, %method, %url, error = %err, "HTTP request failed");
            AdOpsError::from(InfraError::from(err))
        })?;

        let status = response.status();
        info!(target: AUDIT_TARGET, %method, %url, status = status.as_u16(), "HTTP exchange");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(ERROR_BODY_SNIPPET).collect();
        Err(AdOpsError::Transport(format!(
            "{method} {} returned HTTP {}: {}",
            url.path(),
            status.as_u16(),
            snippet.trim()
        )))
    }

    fn endpoint(&self, path: &str, query: Query<'_>) -> Result<Url, AdOpsError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&joined).map_err(|err| AdOpsError::from(InfraError::from(err)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

/// The platform expects the raw token, without a `Bearer` prefix.
fn with_token(builder: RequestBuilder, token: Option<&str>) -> Result<RequestBuilder, AdOpsError> {
    match token {
        Some(token) => {
            let mut value = HeaderValue::from_str(token).map_err(|_| {
                AdOpsError::Auth("session token contains invalid header characters".to_string())
            })?;
            value.set_sensitive(true);
            Ok(builder.header(AUTHORIZATION, value))
        }
        None => Ok(builder),
    }
}

/// Copy of `value` with credential fields masked, at any depth.
fn redacted(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    if SENSITIVE_KEYS.contains(&key.as_str()) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redacted(inner))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redacted).collect()),
        other => other.clone(),
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpTransportBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<HttpTransport, AdOpsError> {
        let base_url = Url::parse(self.base_url.trim())
            .map_err(|err| AdOpsError::from(InfraError::from(err)))?;

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(|err| AdOpsError::from(InfraError::from(err)))?;

        Ok(HttpTransport { client, base_url })
    }
}
