//! Block type definitions and the definition catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Whether a block performs an effect in a statement chain or produces a
/// value for a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Chains to a next statement; has no output value.
    Statement,
    /// Plugs into a value socket; produces a value.
    Value,
}

/// Declares a block type: its kind and its connection points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub type_name: String,
    pub kind: BlockKind,
    /// Value sockets, in declaration order. Each accepts at most one
    /// connected value block.
    pub value_sockets: Vec<String>,
    /// Whether a statement block of this type accepts a next-statement link.
    pub has_next: bool,
}

impl BlockDefinition {
    /// A statement block with previous/next links and no sockets yet.
    pub fn statement(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            kind: BlockKind::Statement,
            value_sockets: Vec::new(),
            has_next: true,
        }
    }

    /// A value block with no sockets yet.
    pub fn value(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            kind: BlockKind::Value,
            value_sockets: Vec::new(),
            has_next: false,
        }
    }

    /// Add a value socket.
    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.value_sockets.push(socket.into());
        self
    }

    pub fn has_socket(&self, socket: &str) -> bool {
        self.value_sockets.iter().any(|s| s == socket)
    }
}

/// Type name → block definition.
///
/// Registration is one-time: registering a type name that already exists
/// leaves the existing definition untouched, so "reinstall on every run"
/// callers are no-ops by construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    defs: HashMap<String, BlockDefinition>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog with the stock block types the playground ships.
    ///
    /// Currently just `text`, the string-literal value block (its literal
    /// lives in the instance field `TEXT`).
    pub fn stock() -> Self {
        let mut catalog = Self::new();
        catalog.register(BlockDefinition::value("text"));
        catalog
    }

    /// Register a definition. Returns `false` (and keeps the existing entry)
    /// when the type name is already registered.
    pub fn register(&mut self, def: BlockDefinition) -> bool {
        match self.defs.entry(def.type_name.clone()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(def);
                true
            }
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&BlockDefinition> {
        self.defs.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.defs.contains_key(type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_catalog_has_text() {
        let catalog = Catalog::stock();
        let text = catalog.get("text").expect("stock text block");
        assert_eq!(text.kind, BlockKind::Value);
        assert!(text.value_sockets.is_empty());
    }

    #[test]
    fn register_is_idempotent() {
        let mut catalog = Catalog::new();
        assert!(catalog.register(BlockDefinition::statement("text_print").with_socket("TEXT")));

        // A second registration must not replace the first definition.
        assert!(!catalog.register(BlockDefinition::value("text_print")));
        let def = catalog.get("text_print").expect("registered");
        assert_eq!(def.kind, BlockKind::Statement);
        assert!(def.has_socket("TEXT"));
    }
}
