//! Tool call supports.
//!
//! A tool is the minimal capability contract an agent runtime needs:
//! something with a name, a description and a JSON schema that accepts
//! typed arguments and produces a typed result.

mod error;
mod status;

use std::pin::Pin;

use quickcall_model::ModelTool;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{Error, ErrorKind};
pub use status::ToolStatus;

/// The result of a type-erased tool call.
pub type ToolResult = Result<Value, Error>;

/// A tool that can be called by an agent runtime.
///
/// Implementations of this trait should be stateless. Context such as
/// credentials or fixed addresses is set during initialization and copied
/// into the future returned by [`execute`](Tool::execute).
pub trait Tool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// The type of output that the tool produces.
    type Output: Serialize + Send;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool.
    fn parameter_schema(&self) -> &Value;

    /// Executes the tool with the given input.
    ///
    /// This method must return a future that is fully independent of
    /// `self`.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = Self::Output> + Send + 'static;
}

pub(crate) trait ToolObject: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameter_schema(&self) -> &Value;

    fn execute(
        &self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>>;

    fn definition(&self) -> ModelTool {
        ModelTool {
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            parameters: self.parameter_schema().clone(),
        }
    }
}

pub(crate) struct AnyTool<T: Tool>(pub T);

impl<T: Tool> ToolObject for AnyTool<T> {
    #[inline]
    fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    fn description(&self) -> &str {
        self.0.description()
    }

    #[inline]
    fn parameter_schema(&self) -> &Value {
        self.0.parameter_schema()
    }

    #[inline]
    fn execute(
        &self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let input: T::Input = match serde_json::from_value(arguments) {
            Ok(input) => input,
            Err(err) => {
                let reason = format!("{err}");
                return Box::pin(std::future::ready(ToolResult::Err(
                    Error::invalid_input().with_reason(reason),
                )));
            }
        };
        let fut = self.0.execute(input);
        Box::pin(async move {
            let output = fut.await;
            serde_json::to_value(output).map_err(|err| {
                Error::execution_error().with_reason(format!("{err}"))
            })
        })
    }
}
