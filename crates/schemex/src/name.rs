//! Canonical names for reference-shaped nodes.
//!
//! Schema names are written as identifiers (`User`), member chains
//! (`Api.User`), dash-joined words (`date-time`, read as subtraction) or the
//! `null` literal.

use crate::error::{CompileError, Result};
use schemex_syntax::{BinaryOp, Key, Node, NodeKind, Property};

/// Whether the node is shaped like a schema name. Any binary node counts;
/// [`reference_name`] rejects the ones that aren't dash chains.
pub fn is_reference(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Identifier { .. }
            | NodeKind::Member { .. }
            | NodeKind::Null
            | NodeKind::Binary { .. }
    )
}

/// Resolve a reference-shaped node into its registry name.
pub fn reference_name(node: &Node) -> Result<String> {
    match &node.kind {
        NodeKind::Null => Ok("null".to_string()),
        NodeKind::Identifier { name } => Ok(name.clone()),
        NodeKind::Member {
            object,
            property,
            computed,
        } => {
            let object = reference_name(object)?;
            let property = match (&property.kind, computed) {
                (NodeKind::Identifier { name }, false) => name.clone(),
                (NodeKind::String { value }, true) => value.clone(),
                _ => {
                    return Err(CompileError::syntax(
                        format!("Invalid reference type: {}", property.kind_name()),
                        &property.span,
                    ));
                }
            };
            Ok(format!("{object}.{property}"))
        }
        NodeKind::Binary {
            operator,
            left,
            right,
        } => {
            if *operator != BinaryOp::Sub {
                return Err(CompileError::syntax("Invalid binary operator", &node.span));
            }
            Ok(format!("{}-{}", dash_part(left)?, dash_part(right)?))
        }
        _ => Err(CompileError::syntax(
            format!("Invalid reference type: {}", node.kind_name()),
            &node.span,
        )),
    }
}

fn dash_part(node: &Node) -> Result<String> {
    match &node.kind {
        NodeKind::Identifier { name } => Ok(name.clone()),
        NodeKind::Binary { .. } => reference_name(node),
        _ => Err(CompileError::syntax("Invalid binary item type", &node.span)),
    }
}

/// The property name an object key denotes.
///
/// Identifiers, strings and regexes name properties; numbers and other
/// bracketed expressions are rejected.
pub fn property_name(property: &Property) -> Result<String> {
    match &property.key {
        Key::Identifier(name) | Key::String(name) => Ok(name.clone()),
        Key::Regex { pattern, .. } => Ok(pattern.clone()),
        Key::Number(_) => Err(CompileError::syntax(
            "Invalid object key type: NumberLiteral",
            &property.span,
        )),
        Key::Expression(key) => Err(CompileError::syntax(
            format!("Invalid object key type: {}", key.kind_name()),
            &key.span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names() {
        let named = Property::new(Key::String("a-b".into()), Node::null());
        assert_eq!(property_name(&named).unwrap(), "a-b");

        let numbered = Property::new(Key::Number(1.0), Node::null());
        let err = property_name(&numbered).unwrap_err();
        assert_eq!(err.message(), "Invalid object key type: NumberLiteral");

        let computed = Property::new(Key::Expression(Box::new(Node::ident("a"))), Node::null());
        let err = property_name(&computed).unwrap_err();
        assert_eq!(err.message(), "Invalid object key type: Identifier");
    }

    #[test]
    fn test_names() {
        let dashed = Node::binary(
            Node::binary(Node::ident("uri"), BinaryOp::Sub, Node::ident("reference")),
            BinaryOp::Sub,
            Node::ident("x"),
        );
        assert!(is_reference(&dashed));
        assert_eq!(reference_name(&dashed).unwrap(), "uri-reference-x");

        let member = Node::member(Node::member(Node::ident("Api"), "User"), "Id");
        assert_eq!(reference_name(&member).unwrap(), "Api.User.Id");
        assert_eq!(reference_name(&Node::null()).unwrap(), "null");
    }

    #[test]
    fn test_invalid_names() {
        let err = reference_name(&Node::binary(
            Node::ident("a"),
            BinaryOp::Mul,
            Node::ident("b"),
        ))
        .unwrap_err();
        assert_eq!(err.message(), "Invalid binary operator");

        let err = reference_name(&Node::binary(
            Node::ident("a"),
            BinaryOp::Sub,
            Node::number(1),
        ))
        .unwrap_err();
        assert_eq!(err.message(), "Invalid binary item type");

        assert!(!is_reference(&Node::string("a")));
        let err = reference_name(&Node::number(1)).unwrap_err();
        assert_eq!(err.message(), "Invalid reference type: NumberLiteral");
    }
}
