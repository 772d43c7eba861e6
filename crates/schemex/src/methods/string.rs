use super::{Call, set_key};
use crate::config::Config;
use crate::error::Result;
use crate::schema::{Schema, SchemaKind};
use schemex_syntax::NodeKind;

fn length(schema: Schema, call: &Call<'_>) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::String)?;
    let value = call.first_number(call.one_arg()?)?;
    Ok(set_key(schema, call.name, Schema::number(value)))
}

pub fn min_length(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    length(schema, call)
}

pub fn max_length(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    length(schema, call)
}

/// Accepts a string or a regular expression literal.
pub fn pattern(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::String)?;
    let arg = call.one_arg()?;
    let source = match &arg.kind {
        NodeKind::Regex { pattern, .. } => pattern.as_str(),
        _ => call.first_string(arg)?,
    };
    Ok(set_key(schema, "pattern", Schema::string(source)))
}

pub fn format(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::String)?;
    let name = call.first_string(call.one_arg()?)?;
    Ok(set_key(schema, "format", Schema::string(name)))
}
