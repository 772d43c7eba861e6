//! Turning compiled schemas into JSON documents and text.

use crate::error::{CompileError, Result};
use crate::schema::Schema;
use schemex_syntax::Span;
use serde_json::{Map, Value};

/// Convert a compiled schema into a plain JSON value.
///
/// A removal marker left anywhere in the tree has nothing to remove and is
/// rejected with the span it was written at.
pub fn to_document(schema: &Schema) -> Result<Value> {
    Ok(match schema {
        Schema::Null => Value::Null,
        Schema::Bool(value) => Value::Bool(*value),
        Schema::Number(value) => Value::Number(value.clone()),
        Schema::String(value) => Value::String(value.clone()),
        Schema::Array(items) => Value::Array(items.iter().map(to_document).collect::<Result<_>>()?),
        Schema::Object(map) => {
            let mut object = Map::with_capacity(map.len());
            for (key, value) in map {
                object.insert(key.clone(), to_document(value)?);
            }
            Value::Object(object)
        }
        Schema::Undefined(span) => {
            return Err(CompileError::syntax("Unexpected undefined value", span));
        }
    })
}

/// Pretty-printed JSON text of a compiled schema.
pub fn to_text(schema: &Schema) -> Result<String> {
    let document = to_document(schema)?;
    serde_json::to_string_pretty(&document)
        .map_err(|err| CompileError::runtime(err.to_string(), &Span::default()))
}
