use std::fmt::Debug;

const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// Builder for [`SendGridConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SendGridConfigBuilder {
    api_key: String,
    base_url: Option<String>,
}

impl SendGridConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Sets a custom base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> SendGridConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        SendGridConfig {
            api_key: self.api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl Debug for SendGridConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridConfigBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration for [`SendGridTransport`](crate::SendGridTransport).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SendGridConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl SendGridConfig {
    pub(crate) fn send_url(&self) -> String {
        format!("{}/v3/mail/send", self.base_url)
    }
}

impl Debug for SendGridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
