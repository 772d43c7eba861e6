use super::{Call, bool_or_schema, set_key};
use crate::compile::compile;
use crate::config::Config;
use crate::error::Result;
use crate::schema::{Schema, SchemaKind};
use schemex_syntax::NodeKind;

fn count(schema: Schema, call: &Call<'_>) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Array)?;
    let value = call.first_number(call.one_arg()?)?;
    Ok(set_key(schema, call.name, Schema::number(value)))
}

/// A schema for every item, or an array literal for positional items.
pub fn items(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Array)?;
    let arg = call.one_arg()?;
    let value = match &arg.kind {
        NodeKind::Array { elements } => {
            let mut list = Vec::with_capacity(elements.len());
            for element in elements {
                list.push(compile(element, config)?);
            }
            Schema::Array(list)
        }
        _ => compile(arg, config)?,
    };
    Ok(set_key(schema, "items", value))
}

pub fn min_items(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    count(schema, call)
}

pub fn max_items(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    count(schema, call)
}

pub fn min_contains(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    count(schema, call)
}

pub fn max_contains(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    count(schema, call)
}

pub fn unique_items(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Array)?;
    let value = call.first_boolean(call.one_arg()?)?;
    Ok(set_key(schema, "uniqueItems", Schema::Bool(value)))
}

pub fn contains(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Array)?;
    let value = compile(call.one_arg()?, config)?;
    Ok(set_key(schema, "contains", value))
}

pub fn additional_items(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Array)?;
    let value = bool_or_schema(call.one_arg()?, config)?;
    Ok(set_key(schema, "additionalItems", value))
}

pub fn unevaluated_items(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Array)?;
    let value = bool_or_schema(call.one_arg()?, config)?;
    Ok(set_key(schema, "unevaluatedItems", value))
}
