//! Error types for code generation.

use blockpad_graph::BlockId;
use thiserror::Error;

/// Errors raised while generating code from a block graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A block instance's type has no registered generator.
    #[error("no generator registered for block type `{0}`")]
    UnknownBlockType(String),
    /// A connection points at a block id the graph does not contain.
    #[error("connection points at missing block {0}")]
    DanglingConnection(BlockId),
    /// A statement position is connected to a value-block generator.
    #[error("block type `{0}` generates a value, not a statement")]
    ExpectedStatement(String),
    /// A value socket is connected to a statement-block generator.
    #[error("block type `{0}` generates a statement, not a value")]
    ExpectedValue(String),
}

pub type Result<T> = std::result::Result<T, GenerateError>;
