//! Blockpad script interpreter with synchronous run-to-completion execution.
//!
//! Executes the text produced by `blockpad-codegen`. The evaluation context
//! is constrained by construction: the only name generated code can call is
//! [`SINK_CAPABILITY`], bound to the [`Sink`] injected per execution. There
//! is no other host access to deny because none is reachable.
//!
//! By the time [`execute`] returns, every effect the program will ever
//! produce has already gone through the sink; nothing is deferred.

mod error;
mod interpreter;
mod parser;
mod value;

pub use error::Error;
pub use interpreter::{execute, Sink, SinkError, SINK_CAPABILITY};
pub use value::Value;

/// Result type for interpreter operations.
pub type Result<T> = std::result::Result<T, Error>;
