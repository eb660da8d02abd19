//! Execution of parsed blockpad script against the injected sink.

use thiserror::Error;

use crate::error::Error as EvalError;
use crate::parser::{parse, Expr, Stmt};
use crate::value::Value;

/// The single capability name generated code may call.
pub const SINK_CAPABILITY: &str = "emit";

/// Failure reported by a sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SinkError(pub String);

/// The output capability generated code emits through.
///
/// Wired before any generation or execution happens and stable for the whole
/// process lifetime.
pub trait Sink {
    fn emit(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Run generated source to completion, routing every effect through `sink`.
///
/// The source is trimmed first; an empty or all-whitespace program is
/// "nothing to run" and returns `Ok(())` without invoking the parser —
/// callers distinguish that from "ran and produced no output" by comparing
/// sink state. Any failure, including the sink's own, comes back as one
/// [`EvalError`]; nothing is retried or re-raised.
pub fn execute(source: &str, sink: &mut dyn Sink) -> crate::Result<()> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let program = parse(trimmed)?;
    for stmt in &program {
        exec_stmt(stmt, sink)?;
    }
    Ok(())
}

fn exec_stmt(stmt: &Stmt, sink: &mut dyn Sink) -> crate::Result<()> {
    // Expression statements are evaluated for effect; the value is dropped.
    eval_expr(&stmt.expr, sink)?;
    Ok(())
}

fn eval_expr(expr: &Expr, sink: &mut dyn Sink) -> crate::Result<Value> {
    match expr {
        Expr::Str(s) => Ok(Value::String(s.clone())),
        Expr::Num(n) => Ok(Value::Number(*n)),
        Expr::Bool(b) => Ok(Value::Boolean(*b)),
        Expr::Add(left, right) => {
            let left = eval_expr(left, sink)?;
            let right = eval_expr(right, sink)?;
            Ok(left.add(&right))
        }
        Expr::Call { callee, args } => call_capability(callee, args, sink),
    }
}

fn call_capability(callee: &str, args: &[Expr], sink: &mut dyn Sink) -> crate::Result<Value> {
    if callee != SINK_CAPABILITY {
        return Err(EvalError::Runtime(format!(
            "unknown capability `{callee}`"
        )));
    }
    if args.len() != 1 {
        return Err(EvalError::Runtime(format!(
            "{SINK_CAPABILITY} takes exactly one argument, got {}",
            args.len()
        )));
    }

    let value = eval_expr(&args[0], sink)?;
    sink.emit(&value.to_string_value())
        .map_err(|e| EvalError::Capability(e.to_string()))?;
    Ok(Value::Null)
}
