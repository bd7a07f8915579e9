//! A model provider for OpenAI-compatible chat-completion APIs.
//!
//! Groq is the default endpoint, any server speaking the same protocol
//! can be used by setting a custom base URL.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use quickcall_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use reqwest::{Client, Response, StatusCode, header};
use serde_json::Value;

pub use config::{OpenAIConfig, OpenAIConfigBuilder};
use proto::ChatCompletion;

/// Error type for [`OpenAIProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    body: Option<Value>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            body: None,
        }
    }

    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// OpenAI-compatible model provider.
#[derive(Clone, Debug)]
pub struct OpenAIProvider {
    client: Client,
    config: Arc<OpenAIConfig>,
}

impl OpenAIProvider {
    /// Creates a new `OpenAIProvider` with the given configuration.
    #[inline]
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this provider.
    #[inline]
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

impl ModelProvider for OpenAIProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>>
    + Send
    + 'static
    + use<>
    {
        let openai_req = proto::create_request(req, &self.config);
        let url = self.config.completions_url();
        debug!("posting {} messages to {url}", req.messages.len());
        let resp_fut = self
            .client
            .post(url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&openai_req)
            .send();

        async move {
            let resp = resp_fut.await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Transport)
            })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(api_error(resp).await);
            }

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            let is_json = content_type
                .as_deref()
                .and_then(|v| v.parse().ok())
                .map(|m: Mime| {
                    m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
                })
                // Some compatible servers omit the header entirely.
                .unwrap_or(true);
            if !is_json {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::InvalidResponse,
                ));
            }

            let completion = resp.json::<ChatCompletion>().await.map_err(
                |err| Error::new(format!("{err}"), ErrorKind::InvalidResponse),
            )?;
            trace!("got a completion: {completion:?}");
            proto::first_reply(completion).ok_or_else(|| {
                Error::new("response has no choices", ErrorKind::InvalidResponse)
            })
        }
    }
}

/// Converts a non-success response into an error, keeping the JSON body
/// when the server sent one.
async fn api_error(resp: Response) -> Error {
    let status = resp.status();
    let kind = if status == StatusCode::TOO_MANY_REQUESTS {
        ErrorKind::RateLimitExceeded
    } else {
        ErrorKind::Api
    };
    let text = match resp.text().await {
        Ok(text) => text,
        Err(err) => {
            return Error::new(format!("{status}: {err}"), kind);
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(body) => {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(|msg| format!("{status}: {msg}"))
                .unwrap_or_else(|| format!("{status}"));
            Error::new(message, kind).with_body(body)
        }
        Err(_) if text.is_empty() => Error::new(format!("{status}"), kind),
        Err(_) => Error::new(format!("{status}: {text}"), kind),
    }
}

