//! An abstraction layer for hosted chat-completion models.
//!
//! This crate establishes a small protocol that any chat-completion
//! backend can implement, so that callers can switch providers (or use
//! a fake one in tests) without touching their own code.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod reply;
mod request;

pub use error::*;
pub use provider::*;
pub use reply::*;
pub use request::*;
