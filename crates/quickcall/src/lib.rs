//! Single-shot calls to hosted language models, plus an email tool that
//! agent runtimes can invoke.
//!
//! The crate includes a small CLI. It can also be used as a library: build
//! a [`Settings`], derive the provider configs from it, and hand them to
//! [`ChatClient`](quickcall_core::ChatClient) or the tools.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod agents;
mod settings;
pub mod tools;
mod translator;

pub use settings::{EmailSettings, MissingVarError, Settings};
pub use translator::{TRANSLATOR_PROMPT, translate, translation_request};

/// Re-exports of [`quickcall_core`] crate.
pub mod core {
    pub use quickcall_core::*;
}
