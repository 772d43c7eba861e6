//! Merging schemas of the same type.

use super::Call;
use crate::compile::compile;
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::schema::{Map, Schema, required_names, set_required};
use schemex_syntax::Span;

/// `schema.merge(other, ...)`, also called as `add`, `assign` and `extend`.
pub fn merge(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.at_least_one()?;
    let mut sources = Vec::with_capacity(call.args.len());
    for arg in call.args {
        sources.push(compile(arg, config)?);
    }
    merge_schemas(schema, sources, call.name, call.span)
}

/// Merge `sources` into `target` in order.
///
/// All schemas must share one `type`. For objects, `required` and
/// `properties` are reconciled name by name: a source property wins along
/// with its required flag, and a removal marker drops the name. Every other
/// key except `title` is replaced in place or appended.
pub fn merge_schemas(
    target: Schema,
    sources: Vec<Schema>,
    name: &str,
    span: &Span,
) -> Result<Schema> {
    let main_type = target.type_name().map(str::to_string);
    let is_object = main_type.as_deref() == Some("object");

    let Schema::Object(mut target) = target else {
        return Err(CompileError::runtime(
            format!("Method {name:?} allowed only for schema objects"),
            span,
        ));
    };

    let mut required = required_names(&target);
    let mut properties = match target.get("properties") {
        Some(Schema::Object(properties)) => properties.clone(),
        _ => Map::new(),
    };

    for source in sources {
        let source_type = source.type_name().map(str::to_string);
        if source_type != main_type {
            return Err(CompileError::runtime(
                format!(
                    "You can extend only same type schemas: {} and {}",
                    main_type.as_deref().unwrap_or("undefined"),
                    source_type.as_deref().unwrap_or("undefined"),
                ),
                span,
            ));
        }
        let Schema::Object(source) = source else {
            continue;
        };

        if is_object {
            let source_required = required_names(&source);
            if let Some(Schema::Object(source_properties)) = source.get("properties") {
                for (key, value) in source_properties {
                    if let Schema::Undefined(_) = value {
                        required.retain(|n| n != key);
                        properties.shift_remove(key);
                        continue;
                    }
                    if source_required.contains(key) {
                        if !required.contains(key) {
                            required.push(key.clone());
                        }
                    } else {
                        required.retain(|n| n != key);
                    }
                    properties.insert(key.clone(), value.clone());
                }
            }
        }

        for (key, value) in source {
            if key == "title" || (is_object && (key == "required" || key == "properties")) {
                continue;
            }
            target.insert(key, value);
        }
    }

    if is_object {
        set_required(&mut target, required);
        target.insert("properties".to_string(), Schema::Object(properties));
    }

    Ok(Schema::Object(target))
}
