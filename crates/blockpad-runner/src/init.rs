//! One-time workspace initialization: the custom print block and the seeded
//! example graph.

use blockpad_codegen::{CodeGenerator, Order, Result as GenResult};
use blockpad_eval::SINK_CAPABILITY;
use blockpad_graph::{BlockDefinition, BlockGraph, BlockInstance, Catalog, GraphError};

/// Block type of the output statement block.
pub const PRINT_BLOCK: &str = "text_print";
/// The value socket the print block reads.
pub const PRINT_SOCKET: &str = "TEXT";

/// Register the print block's definition and generator.
///
/// Safe to call more than once: existing entries are left untouched, so
/// registration order can never affect behavior.
pub fn install_print_block(catalog: &mut Catalog, generator: &mut CodeGenerator) {
    catalog.register(BlockDefinition::statement(PRINT_BLOCK).with_socket(PRINT_SOCKET));
    generator.register_statement(PRINT_BLOCK, print_statement);
}

/// `text_print` — emits its resolved TEXT value through the output
/// capability. An unconnected socket falls back to the empty string literal.
fn print_statement(
    ctx: &CodeGenerator,
    graph: &BlockGraph,
    block: &BlockInstance,
) -> GenResult<String> {
    let value = ctx.value_to_code(graph, block, PRINT_SOCKET, Order::None, "\"\"")?;
    Ok(format!("{SINK_CAPABILITY}({value});\n"))
}

/// Build the startup example: a print block wired to a text literal reading
/// "Halo Dunia".
pub fn seed_example_graph(catalog: &Catalog) -> Result<BlockGraph, GraphError> {
    let mut graph = BlockGraph::new();
    let print = graph.add_block(catalog, PRINT_BLOCK)?;
    let text = graph.add_block(catalog, "text")?;
    graph.set_field(text, "TEXT", "Halo Dunia")?;
    graph.connect_value(catalog, print, PRINT_SOCKET, text)?;
    Ok(graph)
}
