use serde::{Deserialize, Serialize};

/// Outcome reported back to whoever invoked a tool.
///
/// Serializes to `{"status":"success"}` or
/// `{"status":"error","message":"..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolStatus {
    /// The tool did its job.
    Success,
    /// The tool failed.
    Error {
        /// What went wrong.
        message: String,
    },
}

impl ToolStatus {
    /// Creates an error status.
    #[inline]
    pub fn error<S: Into<String>>(message: S) -> Self {
        ToolStatus::Error {
            message: message.into(),
        }
    }

    /// Returns `true` for [`ToolStatus::Success`].
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ToolStatus::Success)
    }
}
