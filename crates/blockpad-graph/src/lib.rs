//! Block model for blockpad.
//!
//! A block is either a *statement* (performs an effect, chains to a next
//! statement) or a *value* (plugs into a socket, produces a value). The
//! [`BlockGraph`] holds the user's current program: block instances, their
//! socket connections, and the top-level statement chains. The graph is
//! editor-owned data; this crate only models and validates it, it never
//! executes anything.

mod block;
mod graph;

pub use block::{BlockDefinition, BlockKind, Catalog};
pub use graph::{BlockGraph, BlockId, BlockInstance, GraphError};
