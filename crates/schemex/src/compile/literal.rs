//! Verbatim conversion of literal expressions.
//!
//! Used for `!!{...}` objects and `set` values: objects and arrays are copied
//! element by element, scalars become plain values. Names are still resolved
//! through the registry and calls are compiled.

use super::{compile, resolve_reference};
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::schema::{Map, Schema};
use schemex_syntax::{Key, Node, NodeKind, ObjectMember};

pub fn convert(node: &Node, config: &mut Config) -> Result<Schema> {
    if node.is_undefined() {
        return Ok(Schema::Undefined(node.span.clone()));
    }
    if let Some(value) = node.as_number() {
        return Ok(Schema::number(value));
    }
    match &node.kind {
        NodeKind::Object { members } => {
            let mut map = Map::new();
            for member in members {
                let property = match member {
                    ObjectMember::Property(property) => property,
                    ObjectMember::Spread(spread) => {
                        return Err(CompileError::syntax(
                            "Invalid object element: Spread",
                            &spread.span,
                        ));
                    }
                };
                let name = match &property.key {
                    Key::Number(_) => {
                        return Err(CompileError::syntax(
                            "Unknown object property key type: NumberLiteral",
                            &property.span,
                        ));
                    }
                    Key::Expression(key) => {
                        return Err(CompileError::syntax(
                            format!("Unknown object property key type: {}", key.kind_name()),
                            &key.span,
                        ));
                    }
                    key => key.name().unwrap_or_default(),
                };
                let value = convert(&property.value, config)?;
                map.insert(name, value);
            }
            Ok(Schema::Object(map))
        }
        NodeKind::Array { elements } => {
            let mut list = Vec::with_capacity(elements.len());
            for element in elements {
                list.push(convert(element, config)?);
            }
            Ok(Schema::Array(list))
        }
        NodeKind::String { value } => Ok(Schema::String(value.clone())),
        NodeKind::Boolean { value } => Ok(Schema::Bool(*value)),
        NodeKind::Null => Ok(Schema::Null),
        NodeKind::Identifier { .. } | NodeKind::Member { .. } | NodeKind::Binary { .. } => {
            resolve_reference(node, config)
        }
        NodeKind::Call { .. } => compile(node, config),
        _ => Err(CompileError::unknown_syntax(node)),
    }
}
