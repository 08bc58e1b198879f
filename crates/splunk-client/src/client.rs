//! Request transport: one authenticated HTTP round trip per call.

use knowledge::{KnowledgeError, KnowledgeResult, KnowledgeService, ResponseEnvelope};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use url::{form_urlencoded, Url};

use crate::config::ClientConfig;

/// Query parameter appended to every request.
const OUTPUT_MODE: &str = "output_mode";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the Splunk management REST API.
///
/// Owns its own HTTP transport; settings such as
/// [`ClientConfig::insecure_skip_verify`] never leak into other clients.
/// Holds no per-call mutable state and may be shared across tasks.
#[derive(Debug)]
pub struct SplunkClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: SecretString,
}

impl SplunkClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// [`KnowledgeError::Construction`] if the URL is not an absolute
    /// `http`/`https` URL without query or fragment, or if the TLS transport
    /// cannot be initialised.
    pub fn new(config: ClientConfig) -> KnowledgeResult<Self> {
        let construction = |message: String| KnowledgeError::Construction {
            url: config.url.clone(),
            message,
        };

        let parsed = Url::parse(&config.url).map_err(|e| construction(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(construction(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(construction(
                "base URL must not carry a query or fragment".to_string(),
            ));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if config.insecure_skip_verify {
            tracing::warn!(url = %parsed, "TLS certificate verification disabled for this client");
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| construction(e.to_string()))?;

        let base_url = parsed.as_str().trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, username = %config.username, "client constructed");

        Ok(Self {
            http,
            base_url,
            username: config.username,
            password: config.password,
        })
    }

    /// Returns the normalised base URL (no trailing slash).
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Returns the knowledge-object operations of this client.
    pub fn knowledge(&self) -> &dyn KnowledgeService {
        self
    }

    /// Sends one request and returns the decoded envelope.
    ///
    /// `path` is service-relative and may already carry query parameters;
    /// those are kept and `query` is appended after them. `output_mode=json`
    /// is always added last and replaces any `output_mode` the caller passed.
    /// A `body` is sent as `application/x-www-form-urlencoded`.
    ///
    /// The response body is always read to the end before returning, so the
    /// connection is released on the success and the error paths alike.
    ///
    /// # Errors
    ///
    /// - [`KnowledgeError::Transport`] for network failures.
    /// - [`KnowledgeError::Request`] for any status of 400 or above.
    /// - [`KnowledgeError::Decode`] if a successful body is not an envelope.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> KnowledgeResult<ResponseEnvelope> {
        let url = self.request_url(path, query)?;

        let mut request = self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(self.password.expose_secret()));
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if status >= 400 {
            tracing::warn!(status, "service rejected request");
            return Err(KnowledgeError::Request {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        tracing::debug!(status, bytes = bytes.len(), "request completed");
        ResponseEnvelope::from_slice(&bytes)
    }

    /// Sends a `GET` with extra query parameters.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> KnowledgeResult<ResponseEnvelope> {
        self.send(Method::GET, path, query, None).await
    }

    /// Sends a `POST` with a form-encoded body.
    pub async fn post_form(&self, path: &str, form: String) -> KnowledgeResult<ResponseEnvelope> {
        self.send(Method::POST, path, &[], Some(form)).await
    }

    /// Sends a `DELETE`.
    pub async fn delete(&self, path: &str) -> KnowledgeResult<ResponseEnvelope> {
        self.send(Method::DELETE, path, &[], None).await
    }

    fn request_url(&self, path: &str, query: &[(&str, String)]) -> KnowledgeResult<Url> {
        let invalid_path = |message: String| KnowledgeError::InvalidPath {
            path: path.to_string(),
            message,
        };

        if !path.starts_with('/') {
            return Err(invalid_path("service path must start with '/'".to_string()));
        }
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| invalid_path(e.to_string()))?;

        // Segments already in `path` are kept byte for byte, valueless keys included.
        let mut combined = String::new();
        if let Some(existing) = url.query() {
            for segment in existing.split('&').filter(|s| !s.is_empty()) {
                let key = segment.split_once('=').map_or(segment, |(key, _)| key);
                if key != OUTPUT_MODE {
                    if !combined.is_empty() {
                        combined.push('&');
                    }
                    combined.push_str(segment);
                }
            }
        }

        // Start position 0 so the first appended pair is separated from `combined`.
        let mut extra = form_urlencoded::Serializer::for_suffix(combined, 0);
        extra.extend_pairs(
            query
                .iter()
                .filter(|(key, _)| *key != OUTPUT_MODE)
                .map(|(key, value)| (*key, value.as_str())),
        );
        extra.append_pair(OUTPUT_MODE, "json");

        url.set_query(Some(&extra.finish()));
        Ok(url)
    }
}

fn transport_error(err: reqwest::Error) -> KnowledgeError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    KnowledgeError::Transport { message }
}
