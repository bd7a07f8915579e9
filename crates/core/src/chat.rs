use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::pin::Pin;
use std::sync::Arc;

use quickcall_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelRequest,
};
use serde_json::Value;
use tracing::Instrument;

type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = Result<String, ChatError>> + Send>>;
type HandlerFn =
    Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// Why a chat query produced no text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatError {
    /// The provider failed, either before or after reaching the service.
    Provider {
        /// Kind reported by the provider.
        kind: ErrorKind,
        /// Human readable message.
        message: String,
        /// Structured error body returned by the service, if any.
        body: Option<Value>,
    },
    /// The service answered, but the first choice has no text content.
    EmptyReply,
}

impl ChatError {
    fn from_provider<E: ModelProviderError>(err: &E) -> Self {
        ChatError::Provider {
            kind: err.kind(),
            message: format!("{err}"),
            body: err.body().cloned(),
        }
    }

    /// Returns the provider error kind, `None` for an empty reply.
    #[inline]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ChatError::Provider { kind, .. } => Some(*kind),
            ChatError::EmptyReply => None,
        }
    }

    /// Returns the most useful detail to show: the structured body if the
    /// service sent one, otherwise the message.
    pub fn detail(&self) -> String {
        match self {
            ChatError::Provider {
                body: Some(body), ..
            } => body.to_string(),
            ChatError::Provider { message, .. } => message.clone(),
            ChatError::EmptyReply => "empty reply".to_owned(),
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Provider { kind, message, .. } => {
                write!(f, "{kind}: {message}")
            }
            ChatError::EmptyReply => write!(f, "the model returned no text"),
        }
    }
}

impl StdError for ChatError {}

/// A single-shot chat client.
///
/// Wraps a model provider behind a type-erased interface. Every call
/// issues exactly one request and returns the text of the first choice.
#[derive(Clone)]
pub struct ChatClient {
    handler_fn: HandlerFn,
}

impl ChatClient {
    /// Creates a client that sends requests through `provider`.
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // Erase `P` so that the client can be stored without a generic
        // parameter.
        let handler_fn: HandlerFn =
            Arc::new(move |req: ModelRequest| -> BoxedSendRequestFuture {
                let fut = provider.send_request(&req);
                Box::pin(
                    async move {
                        trace!("sending a request: {req:?}");
                        match fut.await {
                            Ok(reply) => {
                                reply.content.ok_or(ChatError::EmptyReply)
                            }
                            Err(err) => Err(ChatError::from_provider(&err)),
                        }
                    }
                    .instrument(trace_span!("chat client req")),
                )
            });
        Self { handler_fn }
    }

    /// Sends `messages` in order and returns the reply text.
    ///
    /// The reply is logged at `info` level, failures at `error` level.
    pub async fn ask(
        &self,
        messages: impl Into<Vec<ModelMessage>>,
    ) -> Result<String, ChatError> {
        self.send_request(ModelRequest::with_messages(messages))
            .await
    }

    /// Same as [`ask`](Self::ask), but only logs failures and returns
    /// `None`. Callers cannot tell an error from an empty reply.
    pub async fn ask_or_log(
        &self,
        messages: impl Into<Vec<ModelMessage>>,
    ) -> Option<String> {
        self.ask(messages).await.ok()
    }

    /// Sends a prepared request and returns the reply text.
    pub async fn send_request(
        &self,
        req: ModelRequest,
    ) -> Result<String, ChatError> {
        let result = (self.handler_fn)(req).await;
        match &result {
            Ok(content) => info!("{content}"),
            Err(err) => error!("{}", err.detail()),
        }
        result
    }
}
