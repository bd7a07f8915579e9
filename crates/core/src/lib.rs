//! Core building blocks: a single-shot chat client, the tool contract and
//! declarative agent configurations.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod agent;
mod chat;
pub mod conversation;
pub mod tool;

pub use agent::{AgentConfig, AgentConfigBuilder};
pub use chat::{ChatClient, ChatError};
pub use conversation::Conversation;
