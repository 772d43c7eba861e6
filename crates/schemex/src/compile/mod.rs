//! Expression tree to schema compiler.
//!
//! [`compile`] tries its rules in a fixed order and the first match wins.
//! Several rules accept overlapping shapes (`a - b` is a dashed name, `x < 5`
//! a range, `{} >> {}` a conditional), so the order is part of the language:
//!
//! 1. assignment
//! 2. `left >> right`
//! 3. `min <= x < max`
//! 4. `x < max`, `x >= min`, ...
//! 5. names: identifiers, member chains, dashed words, `null`
//! 6. object literals
//! 7. array literals
//! 8. `||` / `&&` chains
//! 9. string, number and boolean constants
//! 10. regular expressions
//! 11. calls
//! 12. arrow functions
//! 13. `!!` literals
//! 14. `test ? then : else`

mod array;
mod assign;
mod call;
mod conditional;
pub mod literal;
mod object;
mod range;
mod union;

pub use assign::resolve_reference;

use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::name::is_reference;
use crate::schema::Schema;
use schemex_syntax::{BinaryOp, Node, NodeKind, UnaryOp};

/// Compile one expression into a schema.
pub fn compile(node: &Node, config: &mut Config) -> Result<Schema> {
    match &node.kind {
        NodeKind::Assignment {
            operator,
            target,
            value,
        } => return assign::assignment(node, operator, target, value, config),
        NodeKind::Binary {
            operator: BinaryOp::Shr,
            left,
            right,
        } => return conditional::shift(left, right, config),
        _ => {}
    }

    if let Some(range) = range::Between::matches(node) {
        return range.compile(config);
    }
    if let Some(range) = range::Bound::matches(node) {
        return range.compile(config);
    }
    if is_reference(node) {
        return resolve_reference(node, config);
    }

    match &node.kind {
        NodeKind::Object { members } => object::compile_object(node, members, config),
        NodeKind::Array { elements } => array::compile_array(elements, false, config),
        NodeKind::Logical { .. } => union::compile_logical(node, config),
        NodeKind::String { value } => Ok(constant(Schema::string(value.clone()))),
        NodeKind::Boolean { value } => Ok(constant(Schema::Bool(*value))),
        NodeKind::Regex { pattern, .. } => Ok(Schema::object([
            ("type", Schema::string("string")),
            ("pattern", Schema::string(pattern.clone())),
        ])),
        NodeKind::Call { callee, arguments } => call::compile_call(node, callee, arguments, config),
        NodeKind::Arrow { params, body } => assign::arrow(node, params, body, config),
        NodeKind::Unary {
            operator: UnaryOp::Not,
            ..
        } => compile_pure(node, config),
        NodeKind::Conditional {
            test,
            consequent,
            alternate,
        } => conditional::ternary(test, consequent, alternate, config),
        _ => match node.as_number() {
            Some(value) => Ok(constant(Schema::number(value))),
            None => Err(CompileError::unknown_syntax(node)),
        },
    }
}

fn constant(value: Schema) -> Schema {
    Schema::object([("const", value)])
}

/// `!!{...}` keeps an object literal as written; `!![...]` fixes the length.
fn compile_pure(node: &Node, config: &mut Config) -> Result<Schema> {
    let Some(operand) = node.pure_operand() else {
        return Err(CompileError::syntax(r#"Unknown operator "!""#, &node.span));
    };
    match &operand.kind {
        NodeKind::Object { .. } => literal::convert(operand, config),
        NodeKind::Array { elements } => array::compile_array(elements, true, config),
        _ => Err(CompileError::syntax(
            format!(
                r#"Unknown argument type for "!!" operator: {}"#,
                operand.kind_name()
            ),
            &operand.span,
        )),
    }
}
