//! `if` / `then` / `else` schemas.

use super::compile;
use crate::config::Config;
use crate::error::Result;
use crate::methods::set_key;
use crate::schema::Schema;
use schemex_syntax::{BinaryOp, Node, NodeKind, ObjectMember};

/// `left >> right`: when `left` matches, the object must also match `right`.
///
/// The condition admits extra properties; the consequence is both sides
/// spread into one object.
pub(super) fn shift(left: &Node, right: &Node, config: &mut Config) -> Result<Schema> {
    let (condition, consequence) = shift_parts(left, right, config)?;
    Ok(Schema::object([("if", condition), ("then", consequence)]))
}

fn shift_parts(left: &Node, right: &Node, config: &mut Config) -> Result<(Schema, Schema)> {
    let condition = compile(left, config)?;
    let condition = set_key(condition, "additionalProperties", Schema::Bool(true));

    let combined = Node::object(vec![
        ObjectMember::spread(left.clone()),
        ObjectMember::spread(right.clone()),
    ])
    .with_span(left.span.clone());
    let consequence = compile(&combined, config)?;
    Ok((condition, consequence))
}

pub(super) fn is_shift(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Binary {
            operator: BinaryOp::Shr,
            ..
        }
    )
}

/// `a >> b || c >> d || ...`: a chain of conditions where each `else` holds
/// the next one. The last `else` requires one of the conditions to match.
pub(super) fn switch(cases: &[&Node], config: &mut Config) -> Result<Schema> {
    let mut pairs = Vec::with_capacity(cases.len());
    for case in cases {
        if let NodeKind::Binary { left, right, .. } = &case.kind {
            pairs.push(shift_parts(left, right, config)?);
        }
    }

    let conditions = pairs.iter().map(|(condition, _)| condition.clone()).collect();
    let mut tail = Schema::object([("oneOf", Schema::Array(conditions))]);
    for (condition, consequence) in pairs.into_iter().rev() {
        tail = Schema::object([("if", condition), ("then", consequence), ("else", tail)]);
    }
    Ok(tail)
}

/// `test ? consequent : alternate`
pub(super) fn ternary(
    test: &Node,
    consequent: &Node,
    alternate: &Node,
    config: &mut Config,
) -> Result<Schema> {
    Ok(Schema::object([
        ("if", compile(test, config)?),
        ("then", compile(consequent, config)?),
        ("else", compile(alternate, config)?),
    ]))
}
