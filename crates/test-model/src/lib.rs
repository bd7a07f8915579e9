//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex};

use quickcall_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelReply, ModelRequest,
};
use serde_json::Value;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    body: Option<Value>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
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

#[derive(Default)]
struct State {
    script: VecDeque<PresetReply>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Replies are consumed in the order they were added, one per request.
/// If the script runs out, the request fails with an `InvalidResponse`
/// error. Every request is recorded, so tests can assert both the
/// payload and the number of calls.
///
/// Clones share the same script and request log.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    state: Arc<Mutex<State>>,
}

impl TestModelProvider {
    /// Appends a reply to the script.
    #[inline]
    pub fn add_reply(&self, reply: PresetReply) {
        self.lock().script.push_back(reply);
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    /// Returns how many requests were received.
    #[inline]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panicking test thread must not hide the log from other tests.
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>>
    + Send
    + 'static
    + use<>
    {
        let mut state = self.lock();
        state.requests.push(req.clone());
        let result = match state.script.pop_front() {
            Some(PresetReply::Content(content)) => {
                Ok(ModelReply::with_content(content))
            }
            Some(PresetReply::Empty) => Ok(ModelReply::default()),
            Some(PresetReply::Failure(failure)) => Err(Error {
                message: failure.message,
                kind: if failure.from_api {
                    ErrorKind::Api
                } else {
                    ErrorKind::Transport
                },
                body: failure.body,
            }),
            None => Err(Error {
                message: "not enough replies".to_owned(),
                kind: ErrorKind::InvalidResponse,
                body: None,
            }),
        };
        ready(result)
    }
}
