use super::Call;
use crate::config::Config;
use crate::error::Result;
use crate::schema::{Map, Schema, SchemaKind};

fn is_null_branch(schema: &Schema) -> bool {
    schema.type_name() == Some("null")
}

/// `(string || null).notNull()`: drop the `null` branches of a union.
///
/// A single remaining branch replaces the union.
pub fn not_null(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Composite)?;
    let Schema::Object(map) = schema else {
        return Err(call.fail(r#"allowed only for "enum" schema"#));
    };
    let Some((key, branches)) = ["anyOf", "allOf"].iter().find_map(|key| match map.get(*key) {
        Some(Schema::Array(branches)) => Some((*key, branches)),
        _ => None,
    }) else {
        return Err(call.fail(r#"allowed only for "enum" schema"#));
    };

    let mut kept: Vec<Schema> = branches
        .iter()
        .filter(|branch| !is_null_branch(branch))
        .cloned()
        .collect();
    if kept.len() == 1 {
        return Ok(kept.remove(0));
    }

    let mut result = Map::new();
    for (name, value) in &map {
        if name == key {
            result.insert(name.clone(), Schema::Array(std::mem::take(&mut kept)));
        } else {
            result.insert(name.clone(), value.clone());
        }
    }
    Ok(Schema::Object(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemex_syntax::Span;
    use serde_json::json;

    fn run(schema: serde_json::Value) -> Result<Schema> {
        let span = Span::default();
        not_null(
            Schema::from(schema),
            &Call::new("notNull", &[], &span),
            &mut Config::default(),
        )
    }

    #[test]
    fn test_single_branch_left() {
        let schema = run(json!({"anyOf": [{"type": "string", "enum": ["a", "b"]}, {"type": "null"}]}));
        assert_eq!(
            schema.unwrap(),
            Schema::from(json!({"type": "string", "enum": ["a", "b"]}))
        );
    }

    #[test]
    fn test_several_branches_left() {
        let schema = run(json!({"anyOf": [{"const": "a"}, {"const": 1}, {"type": "null"}]}));
        assert_eq!(
            schema.unwrap(),
            Schema::from(json!({"anyOf": [{"const": "a"}, {"const": 1}]}))
        );
    }

    #[test]
    fn test_requires_union() {
        let err = run(json!({"type": "string"})).unwrap_err();
        assert_eq!(
            err.message(),
            r#"Method "notNull" allowed only for "enum" schema"#
        );
    }
}
