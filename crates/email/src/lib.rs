//! Transactional email delivery.
//!
//! [`EmailTransport`] is the seam callers depend on; [`SendGridTransport`]
//! implements it on top of the SendGrid v3 HTTP API.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod message;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::{Client, header};

pub use config::{SendGridConfig, SendGridConfigBuilder};
pub use message::EmailMessage;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never got a response.
    Transport,
    /// The provider answered with a non-success status.
    Rejected,
}

/// Error type for [`EmailTransport`] implementations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status_code: Option<u16>,
}

impl Error {
    /// Creates a new error.
    #[inline]
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            status_code: None,
        }
    }

    fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status code, if the provider responded.
    #[inline]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

/// What the provider reported for an accepted message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SendReceipt {
    /// HTTP status code of the provider response (SendGrid answers `202`).
    pub status_code: u16,
}

/// A type that can deliver one [`EmailMessage`] per call.
///
/// Implementations must not retry: a failed send is reported as is.
pub trait EmailTransport: Send + Sync + 'static {
    /// Sends the message.
    fn send(
        &self,
        msg: &EmailMessage,
    ) -> impl Future<Output = Result<SendReceipt, Error>>
    + Send
    + 'static
    + use<Self>;
}

/// Email transport backed by the SendGrid v3 API.
#[derive(Clone, Debug)]
pub struct SendGridTransport {
    client: Client,
    config: Arc<SendGridConfig>,
}

impl SendGridTransport {
    /// Creates a new `SendGridTransport` with the given configuration.
    #[inline]
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl EmailTransport for SendGridTransport {
    fn send(
        &self,
        msg: &EmailMessage,
    ) -> impl Future<Output = Result<SendReceipt, Error>>
    + Send
    + 'static
    + use<>
    {
        debug!("sending email to {} ({:?})", msg.to(), msg.subject());
        // The credential is attached per call, nothing is cached on the
        // client.
        let resp_fut = self
            .client
            .post(self.config.send_url())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .json(&proto::create_request(msg))
            .send();

        async move {
            let resp = resp_fut.await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Transport)
            })?;
            let status = resp.status();
            if status.is_success() {
                return Ok(SendReceipt {
                    status_code: status.as_u16(),
                });
            }

            let message = match resp.text().await {
                Ok(text) if text.is_empty() => format!("{status}"),
                Ok(text) => format!("{status}: {text}"),
                Err(err) => format!("{status}: {err}"),
            };
            Err(Error::new(message, ErrorKind::Rejected)
                .with_status_code(status.as_u16()))
        }
    }
}
