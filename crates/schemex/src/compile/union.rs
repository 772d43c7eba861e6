//! `||` and `&&` chains: unions, intersections, enums and switches.

use super::compile;
use super::conditional::{is_shift, switch};
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::schema::Schema;
use schemex_syntax::{LogicalOp, Node, NodeKind};

pub(super) fn compile_logical(node: &Node, config: &mut Config) -> Result<Schema> {
    let NodeKind::Logical { operator, .. } = &node.kind else {
        return Err(CompileError::unknown_syntax(node));
    };
    let operator = *operator;

    let mut leaves = Vec::new();
    flatten(node, operator, &mut leaves)?;

    if operator == LogicalOp::Or {
        if leaves.iter().all(|leaf| is_shift(leaf)) {
            return switch(&leaves, config);
        }
        if leaves.iter().all(|leaf| member_kind(leaf).is_some()) {
            return Ok(enumeration(&leaves));
        }
    }

    let mut branches = Vec::with_capacity(leaves.len());
    for leaf in leaves {
        branches.push(compile(leaf, config)?);
    }
    let key = match operator {
        LogicalOp::And => "allOf",
        _ => "anyOf",
    };
    Ok(Schema::object([(key, Schema::Array(branches))]))
}

/// Collect the operands of a chain of one operator. Parenthesized groups
/// are kept whole.
fn flatten<'a>(node: &'a Node, root: LogicalOp, leaves: &mut Vec<&'a Node>) -> Result<()> {
    let NodeKind::Logical {
        operator,
        left,
        right,
    } = &node.kind
    else {
        leaves.push(node);
        return Ok(());
    };
    if *operator == LogicalOp::Nullish {
        return Err(CompileError::syntax(
            format!("Invalid enum operator: {}", operator.as_str()),
            &node.span,
        ));
    }
    if *operator != root {
        return Err(CompileError::syntax(
            format!("All operators of enum should be same type: {}", root.as_str()),
            &node.span,
        ));
    }
    for side in [left, right] {
        if matches!(side.kind, NodeKind::Logical { .. }) && !side.parenthesized {
            flatten(side, root, leaves)?;
        } else {
            leaves.push(side);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    String,
    Number,
    Null,
}

impl MemberKind {
    fn type_name(self) -> &'static str {
        match self {
            MemberKind::String => "string",
            MemberKind::Number => "number",
            MemberKind::Null => "null",
        }
    }
}

fn member_kind(node: &Node) -> Option<MemberKind> {
    match node.kind {
        NodeKind::String { .. } => Some(MemberKind::String),
        NodeKind::Null => Some(MemberKind::Null),
        _ => node.as_number().map(|_| MemberKind::Number),
    }
}

fn member_value(node: &Node) -> Schema {
    match (&node.kind, node.as_number()) {
        (NodeKind::String { value }, _) => Schema::string(value.clone()),
        (_, Some(value)) => Schema::number(value),
        _ => Schema::Null,
    }
}

/// `"a" || "b"` is `{type: "string", enum: ["a", "b"]}`. Mixed kinds become
/// an `anyOf` with one branch per kind, `null` last.
fn enumeration(leaves: &[&Node]) -> Schema {
    let mut groups: Vec<(MemberKind, Vec<Schema>)> = Vec::new();
    let mut has_null = false;

    for leaf in leaves {
        let Some(kind) = member_kind(leaf) else {
            continue;
        };
        if kind == MemberKind::Null {
            has_null = true;
            continue;
        }
        let value = member_value(leaf);
        match groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, values)) => values.push(value),
            None => groups.push((kind, vec![value])),
        }
    }

    let null = || Schema::object([("type", Schema::string(MemberKind::Null.type_name()))]);
    let group = |kind: MemberKind, values: Vec<Schema>| {
        Schema::object([
            ("type", Schema::string(kind.type_name())),
            ("enum", Schema::Array(values)),
        ])
    };

    match (groups.len(), has_null) {
        (0, _) => null(),
        (1, false) => {
            let (kind, values) = groups.remove(0);
            group(kind, values)
        }
        _ => {
            let mut branches: Vec<Schema> = groups
                .into_iter()
                .map(|(kind, mut values)| {
                    if values.len() == 1 {
                        Schema::object([("const", values.remove(0))])
                    } else {
                        group(kind, values)
                    }
                })
                .collect();
            if has_null {
                branches.push(null());
            }
            Schema::object([("anyOf", Schema::Array(branches))])
        }
    }
}
