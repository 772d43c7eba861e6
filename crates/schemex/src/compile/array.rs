//! Array literals.
//!
//! `[item]` describes every item, `[...item]` requires one matching item and
//! `[a, b, ...rest]` is a tuple. Which keywords hold the tuple and the rest
//! depends on the target draft:
//!
//! | draft | tuple         | rest              |
//! |-------|---------------|-------------------|
//! | 07    | `items`       | `additionalItems` |
//! | 2019  | `items`       | `additionalItems` |
//! | 2020  | `prefixItems` | `items`           |

use super::compile;
use crate::config::{Config, SchemaVersion};
use crate::error::{CompileError, Result};
use crate::schema::{Map, Schema};
use schemex_syntax::{Node, NodeKind};

fn spread_argument(node: &Node) -> Option<&Node> {
    match &node.kind {
        NodeKind::Spread { argument } => Some(argument),
        _ => None,
    }
}

/// `exact` comes from `!![...]` and fixes the item count.
pub(super) fn compile_array(elements: &[Node], exact: bool, config: &mut Config) -> Result<Schema> {
    let mut map = Map::new();
    map.insert("type".into(), Schema::string("array"));

    let spreads: Vec<&Node> = elements
        .iter()
        .filter(|e| spread_argument(e).is_some())
        .collect();

    if exact {
        if let Some(spread) = spreads.first() {
            return Err(CompileError::syntax(
                "Invalid array syntax. Exclamation sign with spread is not allowed",
                &spread.span,
            ));
        }
        let count = Schema::number(elements.len() as f64);
        map.insert("minItems".into(), count.clone());
        map.insert("maxItems".into(), count);
    }

    match elements {
        [] => {}
        [element] => match spread_argument(element) {
            Some(argument) => {
                map.insert("contains".into(), compile(argument, config)?);
            }
            None => {
                map.insert("items".into(), compile(element, config)?);
            }
        },
        _ => {
            if let Some(extra) = spreads.get(1) {
                return Err(CompileError::syntax(
                    "Invalid array syntax. Only one spread allowed",
                    &extra.span,
                ));
            }
            let (tuple_key, rest_key) = match config.schema_version {
                SchemaVersion::Draft2020 => ("prefixItems", "items"),
                SchemaVersion::Draft07 | SchemaVersion::Draft2019 => ("items", "additionalItems"),
            };

            let mut tuple = Vec::with_capacity(elements.len());
            for element in elements.iter().filter(|e| spread_argument(e).is_none()) {
                tuple.push(compile(element, config)?);
            }
            map.insert(tuple_key.into(), Schema::Array(tuple));

            if let Some(argument) = spreads.first().copied().and_then(spread_argument) {
                map.insert(rest_key.into(), compile(argument, config)?);
            }
        }
    }

    Ok(Schema::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(elements: Vec<Node>, exact: bool, version: SchemaVersion) -> Result<Schema> {
        let mut config = Config::default().with_schema_version(version);
        compile_array(&elements, exact, &mut config)
    }

    #[test]
    fn test_rest_keywords_follow_version() {
        let elements = || vec![Node::ident("number"), Node::spread(Node::ident("string"))];
        assert_eq!(
            run(elements(), false, SchemaVersion::Draft07).unwrap(),
            Schema::from(json!({
                "type": "array",
                "items": [{"type": "number"}],
                "additionalItems": {"type": "string"}
            }))
        );
        assert_eq!(
            run(elements(), false, SchemaVersion::Draft2020).unwrap(),
            Schema::from(json!({
                "type": "array",
                "prefixItems": [{"type": "number"}],
                "items": {"type": "string"}
            }))
        );
    }

    #[test]
    fn test_single_element() {
        assert_eq!(
            run(vec![Node::spread(Node::ident("int"))], false, SchemaVersion::Draft07).unwrap(),
            Schema::from(json!({"type": "array", "contains": {"type": "integer"}}))
        );
        assert_eq!(
            run(vec![], true, SchemaVersion::Draft07).unwrap(),
            Schema::from(json!({"type": "array", "minItems": 0, "maxItems": 0}))
        );
    }

    #[test]
    fn test_spread_errors() {
        let err = run(
            vec![
                Node::spread(Node::ident("int")),
                Node::spread(Node::ident("string")),
            ],
            false,
            SchemaVersion::Draft07,
        )
        .unwrap_err();
        assert_eq!(err.message(), "Invalid array syntax. Only one spread allowed");

        let err = run(
            vec![Node::ident("int"), Node::spread(Node::ident("string"))],
            true,
            SchemaVersion::Draft07,
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid array syntax. Exclamation sign with spread is not allowed"
        );
    }
}
