//! Object schema methods. Most of these are also `$name` directives.

use super::{Call, bool_or_schema, get_option, schema_map, set_key};
use crate::compile::{compile, literal};
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::schema::{Map, Schema, SchemaKind, properties, required_names, set_required};
use indexmap::IndexMap;
use schemex_syntax::{Node, NodeKind, ObjectMember};

/// `User.prop("name")`: the schema of one property.
pub fn prop(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let name = call.first_string(call.one_arg()?)?;
    find_property(&schema, name, call)
}

fn find_property(schema: &Schema, name: &str, call: &Call<'_>) -> Result<Schema> {
    let Some(props) = schema.as_object().and_then(properties) else {
        return Err(CompileError::syntax(
            r#"Invalid "object" schema, "properties" undefined"#,
            call.span,
        ));
    };
    props.get(name).cloned().ok_or_else(|| {
        CompileError::reference(name, format!("Property {name:?} is undefined"), call.span)
    })
}

/// `User.propItems("tags")`: the `items` of an array property.
pub fn prop_items(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let name = call.first_string(call.one_arg()?)?;
    let property = find_property(&schema, name, call)?;
    get_option(&property, "items", call)
}

/// Names (with optional aliases) from string, `{name: "alias"}` and
/// array-of-strings arguments.
fn selection(call: &Call<'_>) -> Result<IndexMap<String, String>> {
    let invalid = || {
        call.error(format!(
            "Method {:?} accept only strings, key/string objects or array of strings",
            call.name
        ))
    };

    let mut flat: Vec<&Node> = Vec::new();
    for arg in call.args {
        match &arg.kind {
            NodeKind::Array { elements } => flat.extend(elements),
            _ => flat.push(arg),
        }
    }

    let mut map = IndexMap::new();
    for item in flat {
        match &item.kind {
            NodeKind::String { value } => {
                map.insert(value.clone(), value.clone());
            }
            NodeKind::Object { members } => {
                for member in members {
                    let ObjectMember::Property(property) = member else {
                        return Err(invalid());
                    };
                    let (Some(name), Some(alias)) = (property.key.name(), property.value.as_str())
                    else {
                        return Err(invalid());
                    };
                    map.insert(name, alias.to_string());
                }
            }
            _ => return Err(invalid()),
        }
    }
    Ok(map)
}

/// `User.props("id", {name: "title"})`, also called as `pick`.
pub fn props(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    call.at_least_one()?;
    let selected = selection(call)?;

    let Schema::Object(mut map) = schema else {
        return Ok(schema);
    };
    if map.contains_key("required") {
        let names = required_names(&map)
            .into_iter()
            .filter_map(|name| selected.get(&name).cloned())
            .collect();
        set_required(&mut map, names);
    }
    if let Some(Schema::Object(props)) = map.get_mut("properties") {
        let picked: Map = std::mem::take(props)
            .into_iter()
            .filter_map(|(name, value)| selected.get(&name).map(|alias| (alias.clone(), value)))
            .collect();
        *props = picked;
    }
    Ok(Schema::Object(map))
}

/// `User.remove("password")`, also called as `omit`.
pub fn remove(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    call.at_least_one()?;
    let names = call.only_strings()?;

    let Schema::Object(mut map) = schema else {
        return Ok(schema);
    };
    if map.contains_key("required") {
        let kept = required_names(&map)
            .into_iter()
            .filter(|name| !names.contains(&name.as_str()))
            .collect();
        set_required(&mut map, kept);
    }
    if let Some(Schema::Object(props)) = map.get_mut("properties") {
        props.retain(|name, _| !names.contains(&name.as_str()));
    }
    Ok(Schema::Object(map))
}

fn toggle(schema: Schema, call: &Call<'_>, add: bool) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    call.at_least_one()?;

    let names: Vec<&str> = match call.args {
        [arg] if arg.as_str().is_none() => {
            let NodeKind::Array { elements } = &arg.kind else {
                return Err(call.fail("required array"));
            };
            let names = elements
                .iter()
                .map(|e| e.as_str().ok_or_else(|| call.fail("required array of strings")))
                .collect::<Result<Vec<_>>>()?;
            if add {
                // A list replaces `required` as a whole.
                return Ok(set_key(schema, "required", Schema::string_list(names)));
            }
            names
        }
        _ => call.only_strings()?,
    };

    let Schema::Object(mut map) = schema else {
        return Ok(schema);
    };
    let mut required = required_names(&map);
    for name in names {
        let present = required.iter().any(|n| n == name);
        if add && !present {
            required.push(name.to_string());
        } else if !add {
            required.retain(|n| n != name);
        }
    }
    set_required(&mut map, required);
    Ok(Schema::Object(map))
}

/// `User.required("a", "b")` or `User.required(["a", "b"])`.
pub fn required(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    toggle(schema, call, true)
}

/// `User.notRequired("a")`, also called as `optional`.
pub fn not_required(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    toggle(schema, call, false)
}

pub fn additional_properties(
    schema: Schema,
    call: &Call<'_>,
    config: &mut Config,
) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let value = bool_or_schema(call.one_arg()?, config)?;
    Ok(set_key(schema, "additionalProperties", value))
}

/// Writes `dependentRequired`; also called as `dependencies`.
pub fn dependent_required(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let arg = call.one_arg()?;
    call.first_object(arg)?;
    let value = literal::convert(arg, config)?;
    Ok(set_key(schema, "dependentRequired", value))
}

pub fn dependent_schemas(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let value = schema_map(call, call.one_arg()?, config)?;
    Ok(set_key(schema, "dependentSchemas", value))
}

fn property_count(schema: Schema, call: &Call<'_>) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let value = call.first_number(call.one_arg()?)?;
    Ok(set_key(schema, call.name, Schema::number(value)))
}

pub fn max_properties(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    property_count(schema, call)
}

pub fn min_properties(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    property_count(schema, call)
}

pub fn pattern_properties(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let value = schema_map(call, call.one_arg()?, config)?;
    Ok(set_key(schema, "patternProperties", value))
}

pub fn property_names(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let value = compile(call.one_arg()?, config)?;
    Ok(set_key(schema, "propertyNames", value))
}

pub fn unevaluated_properties(
    schema: Schema,
    call: &Call<'_>,
    _config: &mut Config,
) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Object)?;
    let value = call.first_boolean(call.one_arg()?)?;
    Ok(set_key(schema, "unevaluatedProperties", Schema::Bool(value)))
}

/// Writes `$id`.
pub fn id(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    let value = call.first_string(call.one_arg()?)?;
    Ok(set_key(schema, "$id", Schema::string(value)))
}

/// Writes `$ref`.
pub fn reference(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    let value = call.first_string(call.one_arg()?)?;
    Ok(set_key(schema, "$ref", Schema::string(value)))
}
