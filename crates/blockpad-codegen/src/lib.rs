//! Code generation for blockpad.
//!
//! Deterministically turns a [`blockpad_graph::BlockGraph`] into blockpad
//! script text. Each block type has a registered generator function; the
//! generator walks the top-level statement chains in creation order,
//! resolving value sockets recursively. Generation is all-or-nothing: a
//! block type with no registered generator fails the whole call and no
//! partial text escapes.

pub mod builtins;
pub mod error;
pub mod generator;

pub use error::{GenerateError, Result};
pub use generator::{
    escape_string, quote_string, CodeGenerator, Order, StatementGenerator, ValueFragment,
    ValueGenerator,
};
