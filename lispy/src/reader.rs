use crate::error::LispErr;
use crate::syntax::{Ast, ANCHOR};
use crate::value::Value;

fn read_number(contents: &str) -> Value {
    match contents.parse::<i64>() {
        Ok(x) => Value::number(x),
        Err(_) => Value::error(LispErr::InvalidNumber),
    }
}

#[inline(always)]
fn is_skipped<A: Ast>(node: &A) -> bool {
    matches!(node.contents(), "(" | ")") || node.tag() == ANCHOR
}

/// Converts a syntax tree into a value tree.
///
/// Leaves tagged `number` or `symbol` become atoms. Anything else, the root
/// and `sexpr` nodes included, becomes an S-expression of its children in
/// order, minus parentheses and anchors.
pub fn read<A: Ast>(node: &A) -> Value {
    let tag = node.tag();
    tracing::trace!(tag, contents = node.contents(), "read");

    if tag.contains("number") {
        return read_number(node.contents());
    }
    if tag.contains("symbol") {
        return Value::symbol(node.contents());
    }

    let mut sexpr = Value::sexpr();
    for child in node.children().iter().filter(|c| !is_skipped(*c)) {
        sexpr.push(read(child));
    }
    sexpr
}
