//! Client configuration.

use std::time::Duration;

use secrecy::SecretString;

/// `User-Agent` sent when the caller does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("splunk-knowledge/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a [`crate::SplunkClient`].
///
/// The password is held in a [`SecretString`]; `Debug` output redacts it.
#[derive(Debug)]
pub struct ClientConfig {
    /// Base URL of the management port, e.g. `https://splunk.example:8089`.
    pub url: String,
    /// Basic-auth user name.
    pub username: String,
    /// Basic-auth password.
    pub password: SecretString,
    /// Disables TLS certificate and hostname verification.
    ///
    /// Only for test instances with self-signed certificates. The setting
    /// applies to this client's transport alone.
    pub insecure_skip_verify: bool,
    /// Whole-request deadline. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a config that verifies TLS, has no timeout, and sends
    /// [`DEFAULT_USER_AGENT`].
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            insecure_skip_verify: false,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Disables TLS certificate and hostname verification for this client only.
    #[must_use]
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
