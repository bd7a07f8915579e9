use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the fake model answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// A successful reply with text content.
    #[serde(rename = "content")]
    Content(String),
    /// A successful reply whose content is `null`.
    #[serde(rename = "empty")]
    Empty,
    /// The provider fails.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
}

/// A preset provider failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetFailure {
    /// The error message.
    pub message: String,
    /// Whether the failure was reported by the API (with a body) or by the
    /// transport.
    pub from_api: bool,
    /// Structured error body, only used when `from_api` is set.
    pub body: Option<Value>,
}

impl PresetReply {
    /// Creates a successful reply.
    #[inline]
    pub fn content<S: Into<String>>(content: S) -> Self {
        PresetReply::Content(content.into())
    }

    /// Creates a transport failure.
    #[inline]
    pub fn transport_failure<S: Into<String>>(message: S) -> Self {
        PresetReply::Failure(PresetFailure {
            message: message.into(),
            from_api: false,
            body: None,
        })
    }

    /// Creates an API failure carrying a structured body.
    #[inline]
    pub fn api_failure<S: Into<String>>(message: S, body: Value) -> Self {
        PresetReply::Failure(PresetFailure {
            message: message.into(),
            from_api: true,
            body: Some(body),
        })
    }
}
