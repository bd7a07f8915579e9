//! Conversation-related types.

use quickcall_model::{ModelMessage, ModelRequest};

/// An ordered list of messages, as sent to the model.
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Conversation {
    messages: Vec<ModelMessage>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a system message.
    #[inline]
    pub fn with_system<S: Into<String>>(mut self, content: S) -> Self {
        self.messages.push(ModelMessage::System(content.into()));
        self
    }

    /// Appends a user message.
    #[inline]
    pub fn with_user<S: Into<String>>(mut self, content: S) -> Self {
        self.messages.push(ModelMessage::User(content.into()));
        self
    }

    /// Appends an assistant message.
    #[inline]
    pub fn with_assistant<S: Into<String>>(mut self, content: S) -> Self {
        self.messages.push(ModelMessage::Assistant(content.into()));
        self
    }

    /// Appends a message in place.
    #[inline]
    pub fn push(&mut self, msg: ModelMessage) {
        self.messages.push(msg);
    }

    /// Returns the messages in order.
    #[inline]
    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }
}

impl From<Conversation> for Vec<ModelMessage> {
    #[inline]
    fn from(conversation: Conversation) -> Self {
        conversation.messages
    }
}

impl From<Conversation> for ModelRequest {
    #[inline]
    fn from(conversation: Conversation) -> Self {
        ModelRequest::with_messages(conversation.messages)
    }
}
