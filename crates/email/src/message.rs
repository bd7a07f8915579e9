use serde::{Deserialize, Serialize};

/// A single HTML email.
///
/// The message is immutable once built and is only meant to live for one
/// send call.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailMessage {
    to: String,
    from: String,
    subject: String,
    html: String,
}

impl EmailMessage {
    /// Creates a message. No validation is performed on any field.
    #[inline]
    pub fn new(
        to: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }

    /// Returns the recipient address.
    #[inline]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the sender address.
    #[inline]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the subject line.
    #[inline]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the HTML body.
    #[inline]
    pub fn html(&self) -> &str {
        &self.html
    }
}
