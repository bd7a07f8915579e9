use serde::{Deserialize, Serialize};

/// The part of a completion response that callers consume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelReply {
    /// Text content of the first choice. `None` if the model returned no
    /// text (e.g. a `null` content).
    pub content: Option<String>,
    /// The reason the model stopped, as reported by the provider.
    pub finish_reason: Option<String>,
}

impl ModelReply {
    /// Creates a reply with the given text content.
    #[inline]
    pub fn with_content<S: Into<String>>(content: S) -> Self {
        Self {
            content: Some(content.into()),
            finish_reason: None,
        }
    }
}
