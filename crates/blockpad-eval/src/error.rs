//! Error types for the blockpad interpreter.

use thiserror::Error;

/// Errors that can occur while running generated script.
///
/// Every variant is terminal for the run: the caller surfaces the Display
/// text as one log entry and never retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The generated text did not lex or parse.
    #[error("parse error: {0}")]
    Parse(String),
    /// Execution failed, e.g. a call to a name that is not a capability.
    #[error("runtime error: {0}")]
    Runtime(String),
    /// The output capability itself failed.
    #[error("output capability failed: {0}")]
    Capability(String),
}
