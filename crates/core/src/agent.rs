use std::future::ready;
use std::pin::Pin;
use std::sync::Arc;

use quickcall_model::{ModelMessage, ModelTool};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::tool::{AnyTool, Error as ToolError, Tool, ToolObject, ToolResult};

/// A declarative agent: a name, instructions, a model identifier and the
/// tools the agent may call.
///
/// The configuration doesn't run anything by itself. It is meant to be
/// read by an orchestration runtime, which can list the tool definitions,
/// invoke a tool by name, or serialize the whole record:
///
/// ```json
/// { "name": "...", "instructions": "...", "model": "...",
///   "tools": [{ "name": "...", "description": "...", "parameters": {} }] }
/// ```
#[derive(Clone)]
pub struct AgentConfig {
    name: String,
    instructions: String,
    model: String,
    tools: Vec<Arc<dyn ToolObject>>,
}

impl AgentConfig {
    /// Returns the agent name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the instructions.
    #[inline]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the model identifier.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the instructions as a system message.
    #[inline]
    pub fn system_message(&self) -> ModelMessage {
        ModelMessage::System(self.instructions.clone())
    }

    /// Returns definitions of all tools, in registration order.
    #[inline]
    pub fn tools(&self) -> Vec<ModelTool> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Calls the tool named `name` once with JSON `arguments`.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == name)
        else {
            warn!("tool not found: {name}");
            return Box::pin(ready(Err(
                ToolError::not_found().with_reason(name.to_owned())
            )));
        };
        debug!(agent = %self.name, "calling tool {name}");
        trace!("tool arguments: {arguments:?}");
        tool.execute(arguments)
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tool_names: Vec<_> = self.tools.iter().map(|t| t.name()).collect();
        f.debug_struct("AgentConfig")
            .field("name", &self.name)
            .field("instructions", &self.instructions)
            .field("model", &self.model)
            .field("tools", &tool_names)
            .finish()
    }
}

impl Serialize for AgentConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tools: Vec<_> = self
            .tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name(),
                description: tool.description(),
                parameters: tool.parameter_schema(),
            })
            .collect();
        let mut state = serializer.serialize_struct("AgentConfig", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("instructions", &self.instructions)?;
        state.serialize_field("model", &self.model)?;
        state.serialize_field("tools", &tools)?;
        state.end()
    }
}

#[derive(serde::Serialize)]
struct ToolDefinition<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

/// [`AgentConfig`] builder.
pub struct AgentConfigBuilder {
    name: String,
    instructions: String,
    model: Option<String>,
    tools: Vec<Arc<dyn ToolObject>>,
}

impl AgentConfigBuilder {
    /// Creates a new builder for an agent named `name`.
    #[inline]
    pub fn with_name<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            model: None,
            tools: vec![],
        }
    }

    /// Sets the instructions.
    #[inline]
    pub fn with_instructions<S: Into<String>>(mut self, instructions: S) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Sets the model identifier. Defaults to `gpt-4o-mini`.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Registers a tool. A tool with the same name replaces the earlier
    /// one and keeps its position.
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        let tool: Arc<dyn ToolObject> = Arc::new(AnyTool(tool));
        match self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            Some(existing) => {
                warn!("replacing tool: {}", tool.name());
                *existing = tool;
            }
            None => self.tools.push(tool),
        }
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> AgentConfig {
        AgentConfig {
            name: self.name,
            instructions: self.instructions,
            model: self.model.unwrap_or_else(|| "gpt-4o-mini".to_owned()),
            tools: self.tools,
        }
    }
}
