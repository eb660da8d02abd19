//! Block instances and the block graph.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{BlockKind, Catalog};

/// Identity of one block instance within its graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockId(u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from editing a block graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("block type `{0}` is not in the catalog")]
    UnknownBlockType(String),
    #[error("no block {0} in the graph")]
    UnknownBlock(BlockId),
    #[error("block type `{block_type}` has no socket `{socket}`")]
    UnknownSocket { block_type: String, socket: String },
    #[error("block type `{0}` is not a value block")]
    NotAValueBlock(String),
    #[error("block type `{0}` is not a statement block")]
    NotAStatementBlock(String),
    #[error("block type `{0}` does not accept a next statement")]
    NoNextLink(String),
}

/// One placed block: its type, literal fields, and connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    pub id: BlockId,
    pub type_name: String,
    /// Literal field values, e.g. the `TEXT` field of a `text` block.
    #[serde(default)]
    pub fields: HashMap<String, String>,
    /// Value socket → connected value block. At most one block per socket.
    #[serde(default)]
    pub inputs: HashMap<String, BlockId>,
    /// The statement that continues this one's chain, if any.
    #[serde(default)]
    pub next: Option<BlockId>,
}

impl BlockInstance {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn input(&self, socket: &str) -> Option<BlockId> {
        self.inputs.get(socket).copied()
    }
}

/// The user's current program: block instances plus the top-level statement
/// chains, in creation order.
///
/// Acyclicity is the editor's invariant; the graph assumes it and does not
/// re-verify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockGraph {
    blocks: HashMap<BlockId, BlockInstance>,
    roots: Vec<BlockId>,
    next_id: u64,
}

impl BlockGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new block of a cataloged type. Statement blocks start a new
    /// top-level chain; value blocks float until connected into a socket.
    pub fn add_block(&mut self, catalog: &Catalog, type_name: &str) -> Result<BlockId, GraphError> {
        let def = catalog
            .get(type_name)
            .ok_or_else(|| GraphError::UnknownBlockType(type_name.to_string()))?;

        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(
            id,
            BlockInstance {
                id,
                type_name: type_name.to_string(),
                fields: HashMap::new(),
                inputs: HashMap::new(),
                next: None,
            },
        );
        if def.kind == BlockKind::Statement {
            self.roots.push(id);
        }
        Ok(id)
    }

    /// Set a literal field on a block.
    pub fn set_field(
        &mut self,
        id: BlockId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GraphError> {
        let block = self.blocks.get_mut(&id).ok_or(GraphError::UnknownBlock(id))?;
        block.fields.insert(name.into(), value.into());
        Ok(())
    }

    /// Plug a value block into a value socket. Replaces any previous
    /// connection on that socket.
    pub fn connect_value(
        &mut self,
        catalog: &Catalog,
        parent: BlockId,
        socket: &str,
        child: BlockId,
    ) -> Result<(), GraphError> {
        let parent_type = self.type_of(parent)?.to_string();
        let parent_def = catalog
            .get(&parent_type)
            .ok_or(GraphError::UnknownBlockType(parent_type.clone()))?;
        if !parent_def.has_socket(socket) {
            return Err(GraphError::UnknownSocket {
                block_type: parent_type,
                socket: socket.to_string(),
            });
        }

        let child_type = self.type_of(child)?.to_string();
        let child_def = catalog
            .get(&child_type)
            .ok_or(GraphError::UnknownBlockType(child_type.clone()))?;
        if child_def.kind != BlockKind::Value {
            return Err(GraphError::NotAValueBlock(child_type));
        }

        if let Some(block) = self.blocks.get_mut(&parent) {
            block.inputs.insert(socket.to_string(), child);
        }
        Ok(())
    }

    /// Chain `child` as the statement following `parent`. The child stops
    /// being a top-level chain of its own.
    pub fn connect_next(
        &mut self,
        catalog: &Catalog,
        parent: BlockId,
        child: BlockId,
    ) -> Result<(), GraphError> {
        let parent_type = self.type_of(parent)?.to_string();
        let parent_def = catalog
            .get(&parent_type)
            .ok_or(GraphError::UnknownBlockType(parent_type.clone()))?;
        if parent_def.kind != BlockKind::Statement {
            return Err(GraphError::NotAStatementBlock(parent_type));
        }
        if !parent_def.has_next {
            return Err(GraphError::NoNextLink(parent_type));
        }

        let child_type = self.type_of(child)?.to_string();
        let child_def = catalog
            .get(&child_type)
            .ok_or(GraphError::UnknownBlockType(child_type.clone()))?;
        if child_def.kind != BlockKind::Statement {
            return Err(GraphError::NotAStatementBlock(child_type));
        }

        if let Some(block) = self.blocks.get_mut(&parent) {
            block.next = Some(child);
        }
        self.roots.retain(|&r| r != child);
        Ok(())
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockInstance> {
        self.blocks.get(&id)
    }

    /// Top-level statement chains, in creation order.
    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn type_of(&self, id: BlockId) -> Result<&str, GraphError> {
        self.blocks
            .get(&id)
            .map(|b| b.type_name.as_str())
            .ok_or(GraphError::UnknownBlock(id))
    }
}
