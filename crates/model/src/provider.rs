use std::error::Error;

use serde_json::Value;

use crate::error::ErrorKind;
use crate::reply::ModelReply;
use crate::request::ModelRequest;

/// The error type for a model provider.
pub trait ModelProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the structured error body sent by the remote service, if
    /// there is one.
    fn body(&self) -> Option<&Value> {
        None
    }
}

/// A type that represents a model provider, which sends one chat
/// completion request per call.
///
/// Once the provider is created, it should behave like a stateless object.
/// Implementations must not retry on their own: one call to
/// [`send_request`](ModelProvider::send_request) is one outbound request.
pub trait ModelProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ModelProviderError;

    /// Sends a request to the model.
    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>>
    + Send
    + 'static
    + use<Self>;
}
