//! The code generator: a registry of per-type generator functions plus the
//! graph walk that stitches their fragments together.

use std::collections::HashMap;

use blockpad_graph::{BlockGraph, BlockId, BlockInstance};

use crate::error::{GenerateError, Result};

/// Binding strength of a generated value fragment's outermost operator.
///
/// A fragment embedded in a context tighter than its own order gets wrapped
/// in parentheses by [`CodeGenerator::value_to_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Order {
    /// A literal or an already-parenthesized expression.
    Atomic,
    /// An additive expression (`a + b`).
    Additive,
    /// A context that accepts any expression unwrapped, e.g. a call argument.
    /// Only meaningful as an outer order; fragments never carry it.
    None,
}

/// An expression fragment plus the order tag a caller needs to decide on
/// parenthesization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFragment {
    pub code: String,
    pub order: Order,
}

impl ValueFragment {
    pub fn new(code: impl Into<String>, order: Order) -> Self {
        Self {
            code: code.into(),
            order,
        }
    }

    /// A fragment that never needs wrapping.
    pub fn atomic(code: impl Into<String>) -> Self {
        Self::new(code, Order::Atomic)
    }
}

/// Generates the expression fragment for one value block.
pub type ValueGenerator =
    fn(&CodeGenerator, &BlockGraph, &BlockInstance) -> Result<ValueFragment>;

/// Generates the statement text for one statement block (without its chain).
pub type StatementGenerator = fn(&CodeGenerator, &BlockGraph, &BlockInstance) -> Result<String>;

#[derive(Debug, Clone, Copy)]
enum Generator {
    Value(ValueGenerator),
    Statement(StatementGenerator),
}

/// Maps block type names to generator functions and walks the graph.
///
/// The registry is owned by the instance: construct one at initialization and
/// pass it explicitly wherever generation happens. `generate` is a pure
/// function of the graph snapshot, so repeated calls on an unchanged graph
/// return identical text.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    registry: HashMap<String, Generator>,
}

impl CodeGenerator {
    /// A generator with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator preloaded with the stock generators in [`crate::builtins`].
    pub fn with_builtins() -> Self {
        let mut generator = Self::new();
        crate::builtins::install(&mut generator);
        generator
    }

    /// Register a value-block generator. Returns `false` (keeping the
    /// existing entry) when the type already has one.
    pub fn register_value(&mut self, type_name: impl Into<String>, func: ValueGenerator) -> bool {
        self.register(type_name.into(), Generator::Value(func))
    }

    /// Register a statement-block generator. Returns `false` (keeping the
    /// existing entry) when the type already has one.
    pub fn register_statement(
        &mut self,
        type_name: impl Into<String>,
        func: StatementGenerator,
    ) -> bool {
        self.register(type_name.into(), Generator::Statement(func))
    }

    pub fn has_generator(&self, type_name: &str) -> bool {
        self.registry.contains_key(type_name)
    }

    /// Generate the whole program for a graph snapshot.
    ///
    /// An empty graph, or one with no top-level statement chain, yields the
    /// empty string. An unregistered block type anywhere in the walk fails
    /// the entire call.
    pub fn generate(&self, graph: &BlockGraph) -> Result<String> {
        tracing::debug!(blocks = graph.len(), roots = graph.roots().len(), "generating program");
        let mut output = String::new();
        for &root in graph.roots() {
            self.generate_chain(graph, root, &mut output)?;
        }
        Ok(output)
    }

    /// Resolve one value socket to expression text.
    ///
    /// An unconnected socket resolves to `default`, the generator-declared
    /// fallback. A connected fragment that binds no tighter than `outer` is
    /// parenthesized; atomics never wrap, and an `Order::None` context wraps
    /// nothing.
    pub fn value_to_code(
        &self,
        graph: &BlockGraph,
        block: &BlockInstance,
        socket: &str,
        outer: Order,
        default: &str,
    ) -> Result<String> {
        let Some(child_id) = block.input(socket) else {
            return Ok(default.to_string());
        };
        let child = self.resolve(graph, child_id)?;
        let fragment = match self.lookup(child)? {
            Generator::Value(func) => func(self, graph, child)?,
            Generator::Statement(_) => {
                return Err(GenerateError::ExpectedValue(child.type_name.clone()));
            }
        };
        let wrap = match (fragment.order, outer) {
            (_, Order::None) => false,
            (Order::Atomic, _) => false,
            (inner, outer) => inner >= outer,
        };
        if wrap {
            Ok(format!("({})", fragment.code))
        } else {
            Ok(fragment.code)
        }
    }

    fn generate_chain(&self, graph: &BlockGraph, first: BlockId, output: &mut String) -> Result<()> {
        let mut cursor = Some(first);
        while let Some(id) = cursor {
            let block = self.resolve(graph, id)?;
            let code = match self.lookup(block)? {
                Generator::Statement(func) => func(self, graph, block)?,
                Generator::Value(_) => {
                    return Err(GenerateError::ExpectedStatement(block.type_name.clone()));
                }
            };
            output.push_str(&code);
            cursor = block.next;
        }
        Ok(())
    }

    fn resolve<'g>(&self, graph: &'g BlockGraph, id: BlockId) -> Result<&'g BlockInstance> {
        graph.get(id).ok_or(GenerateError::DanglingConnection(id))
    }

    fn lookup(&self, block: &BlockInstance) -> Result<Generator> {
        self.registry
            .get(&block.type_name)
            .copied()
            .ok_or_else(|| GenerateError::UnknownBlockType(block.type_name.clone()))
    }

    fn register(&mut self, type_name: String, func: Generator) -> bool {
        match self.registry.entry(type_name) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(func);
                true
            }
        }
    }
}

/// Escape a string for a double-quoted blockpad script literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Quote a string as a blockpad script literal.
pub fn quote_string(s: &str) -> String {
    format!("\"{}\"", escape_string(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpad_graph::{BlockDefinition, Catalog};

    // A two-socket join block, standing in for the stock catalogue's
    // concatenation generator. Produces an Additive fragment.
    fn join_value(
        ctx: &CodeGenerator,
        graph: &BlockGraph,
        block: &BlockInstance,
    ) -> Result<ValueFragment> {
        let a = ctx.value_to_code(graph, block, "A", Order::Additive, "\"\"")?;
        let b = ctx.value_to_code(graph, block, "B", Order::Additive, "\"\"")?;
        Ok(ValueFragment::new(format!("{a} + {b}"), Order::Additive))
    }

    fn show_statement(
        ctx: &CodeGenerator,
        graph: &BlockGraph,
        block: &BlockInstance,
    ) -> Result<String> {
        let value = ctx.value_to_code(graph, block, "TEXT", Order::None, "\"\"")?;
        Ok(format!("emit({value});\n"))
    }

    fn setup() -> (Catalog, CodeGenerator) {
        let mut catalog = Catalog::stock();
        catalog.register(BlockDefinition::statement("show").with_socket("TEXT"));
        catalog.register(
            BlockDefinition::value("join")
                .with_socket("A")
                .with_socket("B"),
        );
        let mut generator = CodeGenerator::with_builtins();
        generator.register_statement("show", show_statement);
        generator.register_value("join", join_value);
        (catalog, generator)
    }

    #[test]
    fn empty_graph_generates_empty_string() {
        let (_, generator) = setup();
        let graph = BlockGraph::new();
        assert_eq!(generator.generate(&graph).unwrap(), "");
    }

    #[test]
    fn floating_value_blocks_generate_nothing() {
        let (catalog, generator) = setup();
        let mut graph = BlockGraph::new();
        graph.add_block(&catalog, "text").unwrap();
        assert_eq!(generator.generate(&graph).unwrap(), "");
    }

    #[test]
    fn text_literal_is_quoted_and_escaped() {
        let (catalog, generator) = setup();
        let mut graph = BlockGraph::new();
        let show = graph.add_block(&catalog, "show").unwrap();
        let text = graph.add_block(&catalog, "text").unwrap();
        graph.set_field(text, "TEXT", "say \"hi\"\n").unwrap();
        graph.connect_value(&catalog, show, "TEXT", text).unwrap();

        assert_eq!(
            generator.generate(&graph).unwrap(),
            "emit(\"say \\\"hi\\\"\\n\");\n"
        );
    }

    #[test]
    fn unconnected_socket_uses_generator_default() {
        let (catalog, generator) = setup();
        let mut graph = BlockGraph::new();
        graph.add_block(&catalog, "show").unwrap();
        assert_eq!(generator.generate(&graph).unwrap(), "emit(\"\");\n");
    }

    #[test]
    fn chains_concatenate_in_next_order() {
        let (catalog, generator) = setup();
        let mut graph = BlockGraph::new();
        let a = graph.add_block(&catalog, "show").unwrap();
        let b = graph.add_block(&catalog, "show").unwrap();
        let text = graph.add_block(&catalog, "text").unwrap();
        graph.set_field(text, "TEXT", "first").unwrap();
        graph.connect_value(&catalog, a, "TEXT", text).unwrap();
        graph.connect_next(&catalog, a, b).unwrap();

        assert_eq!(
            generator.generate(&graph).unwrap(),
            "emit(\"first\");\nemit(\"\");\n"
        );
    }

    #[test]
    fn additive_fragment_in_additive_context_is_parenthesized() {
        let (catalog, generator) = setup();
        let mut graph = BlockGraph::new();
        let show = graph.add_block(&catalog, "show").unwrap();
        let outer = graph.add_block(&catalog, "join").unwrap();
        let inner = graph.add_block(&catalog, "join").unwrap();
        let text = graph.add_block(&catalog, "text").unwrap();
        graph.set_field(text, "TEXT", "x").unwrap();
        graph.connect_value(&catalog, show, "TEXT", outer).unwrap();
        graph.connect_value(&catalog, outer, "A", inner).unwrap();
        graph.connect_value(&catalog, inner, "A", text).unwrap();

        // The inner join binds no tighter than the outer one, so it wraps;
        // the whole expression sits unwrapped in the call argument.
        assert_eq!(
            generator.generate(&graph).unwrap(),
            "emit((\"x\" + \"\") + \"\");\n"
        );
    }

    #[test]
    fn unregistered_type_fails_the_whole_call() {
        let (mut catalog, generator) = setup();
        catalog.register(BlockDefinition::statement("mystery"));
        let mut graph = BlockGraph::new();
        let a = graph.add_block(&catalog, "show").unwrap();
        let text = graph.add_block(&catalog, "text").unwrap();
        graph.set_field(text, "TEXT", "before").unwrap();
        graph.connect_value(&catalog, a, "TEXT", text).unwrap();
        let b = graph.add_block(&catalog, "mystery").unwrap();
        graph.connect_next(&catalog, a, b).unwrap();

        let err = generator.generate(&graph).unwrap_err();
        assert_eq!(err, GenerateError::UnknownBlockType("mystery".into()));
    }

    #[test]
    fn value_generator_in_statement_position_is_rejected() {
        let (mut catalog, generator) = setup();
        // Catalog disagreement: declared as a statement, generated as a value.
        catalog.register(BlockDefinition::statement("join2"));
        let mut generator2 = generator;
        generator2.register_value("join2", join_value);
        let mut graph = BlockGraph::new();
        graph.add_block(&catalog, "join2").unwrap();

        let err = generator2.generate(&graph).unwrap_err();
        assert_eq!(err, GenerateError::ExpectedStatement("join2".into()));
    }

    #[test]
    fn generation_is_deterministic() {
        let (catalog, generator) = setup();
        let mut graph = BlockGraph::new();
        let show = graph.add_block(&catalog, "show").unwrap();
        let join = graph.add_block(&catalog, "join").unwrap();
        let t1 = graph.add_block(&catalog, "text").unwrap();
        let t2 = graph.add_block(&catalog, "text").unwrap();
        graph.set_field(t1, "TEXT", "a").unwrap();
        graph.set_field(t2, "TEXT", "b").unwrap();
        graph.connect_value(&catalog, show, "TEXT", join).unwrap();
        graph.connect_value(&catalog, join, "A", t1).unwrap();
        graph.connect_value(&catalog, join, "B", t2).unwrap();

        let first = generator.generate(&graph).unwrap();
        let second = generator.generate(&graph).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "emit(\"a\" + \"b\");\n");
    }

    #[test]
    fn register_keeps_first_entry() {
        let (_, mut generator) = setup();
        assert!(!generator.register_statement("show", show_statement));
        assert!(generator.has_generator("show"));
    }

    #[test]
    fn escape_helpers() {
        assert_eq!(escape_string("hello"), "hello");
        assert_eq!(escape_string("hello\nworld"), "hello\\nworld");
        assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(quote_string("a\tb"), "\"a\\tb\"");
    }
}
