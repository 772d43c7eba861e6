//! Numeric bounds. Receivers may be `number` or `integer` schemas.

use super::{Call, set_key};
use crate::config::Config;
use crate::error::Result;
use crate::schema::{Schema, SchemaKind};

fn bound(schema: Schema, call: &Call<'_>, key: &str) -> Result<Schema> {
    call.expect_kind(&schema, SchemaKind::Number)?;
    let value = call.first_number(call.one_arg()?)?;
    Ok(set_key(schema, key, Schema::number(value)))
}

pub fn minimum(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    bound(schema, call, "minimum")
}

pub fn maximum(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    bound(schema, call, "maximum")
}

pub fn exclusive_minimum(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    bound(schema, call, "exclusiveMinimum")
}

pub fn exclusive_maximum(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    bound(schema, call, "exclusiveMaximum")
}

pub fn multiple_of(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    bound(schema, call, "multipleOf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemex_syntax::{Node, Span};
    use serde_json::json;

    #[test]
    fn test_integer_receiver_and_negative_bound() {
        let mut config = Config::default();
        let span = Span::default();
        let args = [Node::number(-5)];
        let schema = minimum(
            Schema::from(json!({"type": "integer"})),
            &Call::new("minimum", &args, &span),
            &mut config,
        )
        .unwrap();
        assert_eq!(schema, Schema::from(json!({"type": "integer", "minimum": -5})));
    }

    #[test]
    fn test_argument_must_be_number() {
        let mut config = Config::default();
        let span = Span::default();
        let args = [Node::string("5")];
        let err = maximum(
            Schema::from(json!({"type": "number"})),
            &Call::new("maximum", &args, &span),
            &mut config,
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            r#"Method "maximum" required first argument to be a number"#
        );
    }
}
