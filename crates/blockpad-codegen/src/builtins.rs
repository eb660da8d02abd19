//! Stock generators for the built-in block types.
//!
//! Only `text` lives here; the playground's output statement block is an
//! application-registered custom block, installed by the runner at startup.

use blockpad_graph::{BlockGraph, BlockInstance};

use crate::error::Result;
use crate::generator::{quote_string, CodeGenerator, ValueFragment};

/// Field holding a `text` block's literal.
pub const TEXT_FIELD: &str = "TEXT";

/// Register the stock generators into `generator`. Already-registered types
/// are left untouched, so calling this more than once is a no-op.
pub fn install(generator: &mut CodeGenerator) {
    generator.register_value("text", text_literal);
}

/// `text` — a string literal. A missing field generates the empty literal.
fn text_literal(
    _gen: &CodeGenerator,
    _graph: &BlockGraph,
    block: &BlockInstance,
) -> Result<ValueFragment> {
    let raw = block.field(TEXT_FIELD).unwrap_or("");
    Ok(ValueFragment::atomic(quote_string(raw)))
}
