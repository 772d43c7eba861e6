//! Schema methods (`string.minLength(3)`) and `$name` object directives.
//!
//! Every built-in is a plain function with the [`Method`] signature. They are
//! layered on three primitives: [`set`] replaces top-level keys, [`merge`]
//! reconciles two schemas of the same type, and [`get`] reads a key back.
//! Argument and receiver checks live on [`Call`] so the messages stay uniform.

mod array;
mod enums;
mod merge;
mod number;
mod object;
mod string;

pub use merge::merge_schemas;

use crate::compile::{compile, literal};
use crate::config::{Config, Method};
use crate::error::{CompileError, Result};
use crate::name::property_name;
use crate::schema::{Schema, SchemaKind, apply_entry};
use schemex_syntax::{Node, NodeKind, ObjectMember, Span};
use std::collections::HashMap;
use std::sync::Arc;

/// One invocation: the name it was called by, its raw argument nodes and
/// where it was written.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    pub name: &'a str,
    pub args: &'a [Node],
    pub span: &'a Span,
}

impl<'a> Call<'a> {
    pub fn new(name: &'a str, args: &'a [Node], span: &'a Span) -> Self {
        Self { name, args, span }
    }

    /// Runtime error located at the call.
    pub fn error(&self, message: impl Into<String>) -> CompileError {
        CompileError::runtime(message, self.span)
    }

    /// `Method "<name>" <what>`
    pub fn fail(&self, what: &str) -> CompileError {
        self.error(format!("Method {:?} {}", self.name, what))
    }

    pub fn one_arg(&self) -> Result<&'a Node> {
        match self.args {
            [arg] => Ok(arg),
            _ => Err(self.fail("required one argument")),
        }
    }

    pub fn at_least_one(&self) -> Result<()> {
        if self.args.is_empty() {
            return Err(self.fail("required at least one argument"));
        }
        Ok(())
    }

    pub fn only_strings(&self) -> Result<Vec<&'a str>> {
        self.args
            .iter()
            .map(|arg| arg.as_str().ok_or_else(|| self.fail("accept only strings")))
            .collect()
    }

    pub fn first_string<'n>(&self, arg: &'n Node) -> Result<&'n str> {
        arg.as_str()
            .ok_or_else(|| self.fail("required first argument to be a string"))
    }

    pub fn first_number(&self, arg: &Node) -> Result<f64> {
        arg.as_number()
            .ok_or_else(|| self.fail("required first argument to be a number"))
    }

    pub fn first_boolean(&self, arg: &Node) -> Result<bool> {
        match arg.kind {
            NodeKind::Boolean { value } => Ok(value),
            _ => Err(self.fail("required first argument to be a boolean")),
        }
    }

    pub fn first_object<'n>(&self, arg: &'n Node) -> Result<&'n [ObjectMember]> {
        match &arg.kind {
            NodeKind::Object { members } => Ok(members),
            _ => Err(self.fail("required first argument to be an object")),
        }
    }

    /// The receiver must describe the given kind of value.
    pub fn expect_kind(&self, schema: &Schema, kind: SchemaKind) -> Result<()> {
        if schema.kind() == kind {
            return Ok(());
        }
        let label = match kind {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Composite => "enum",
            SchemaKind::Const => "const",
            SchemaKind::Conditional => "conditional",
            SchemaKind::Raw => "raw",
        };
        Err(self.fail(&format!("allowed only for {label:?} schema")))
    }

    /// `("key", value)` or `({key: value, ...})`.
    pub fn object_or_two(&self) -> Result<Vec<(String, &'a Node)>> {
        match self.args {
            [] => Err(self.fail("required at least one argument")),
            [first] => match &first.kind {
                NodeKind::Object { members } => members
                    .iter()
                    .map(|member| match member {
                        ObjectMember::Property(property) => {
                            property_name(property).map(|name| (name, &property.value))
                        }
                        ObjectMember::Spread(node) => Err(CompileError::syntax(
                            "Invalid object element: Spread",
                            &node.span,
                        )),
                    })
                    .collect(),
                NodeKind::String { .. } => Err(self.fail("required two arguments")),
                _ => Err(self.fail("required first argument to be an object")),
            },
            [first, second] => {
                let key = self.first_string(first)?;
                Ok(vec![(key.to_string(), second)])
            }
            _ => Err(self.fail("accept only two arguments")),
        }
    }
}

/// Replace or insert top-level keys; removal markers delete.
pub fn set_keys<I>(mut schema: Schema, entries: I) -> Schema
where
    I: IntoIterator<Item = (String, Schema)>,
{
    if let Some(map) = schema.as_object_mut() {
        for (key, value) in entries {
            apply_entry(map, key, value);
        }
    }
    schema
}

/// Set a single key.
pub fn set_key(schema: Schema, key: &str, value: Schema) -> Schema {
    set_keys(schema, [(key.to_string(), value)])
}

/// A boolean literal, or anything that compiles to a schema.
pub(crate) fn bool_or_schema(arg: &Node, config: &mut Config) -> Result<Schema> {
    match arg.kind {
        NodeKind::Boolean { value } => Ok(Schema::Bool(value)),
        _ => compile(arg, config),
    }
}

/// Object literal whose values are compiled as schemas, or a call that
/// produces an object.
pub(crate) fn schema_map(call: &Call<'_>, arg: &Node, config: &mut Config) -> Result<Schema> {
    if let NodeKind::Call { .. } = arg.kind {
        let value = compile(arg, config)?;
        return match value {
            Schema::Object(_) => Ok(value),
            _ => Err(call.fail("required first argument to be an object")),
        };
    }
    let members = call.first_object(arg)?;
    let mut map = crate::schema::Map::new();
    for member in members {
        let ObjectMember::Property(property) = member else {
            return Err(CompileError::syntax(
                format!("Method {:?} invalid object property type: Spread", call.name),
                member.span(),
            ));
        };
        let name = property_name(property)?;
        map.insert(name, compile(&property.value, config)?);
    }
    Ok(Schema::Object(map))
}

/// `schema.set("key", value)` / `schema.set({key: value})`
pub fn set(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    let entries = call.object_or_two()?;
    let mut values = Vec::with_capacity(entries.len());
    for (key, node) in entries {
        values.push((key, literal::convert(node, config)?));
    }
    Ok(set_keys(schema, values))
}

/// `schema.get("key")`
pub fn get(schema: Schema, call: &Call<'_>, _config: &mut Config) -> Result<Schema> {
    let name = call.first_string(call.one_arg()?)?;
    get_option(&schema, name, call)
}

pub(crate) fn get_option(schema: &Schema, name: &str, call: &Call<'_>) -> Result<Schema> {
    schema
        .get(name)
        .cloned()
        .ok_or_else(|| call.error(format!("Option {name:?} is undefined")))
}

/// `schema.not({minimum: 10})`; the argument is taken as written, with
/// names resolved.
pub fn not(schema: Schema, call: &Call<'_>, config: &mut Config) -> Result<Schema> {
    let value = literal::convert(call.one_arg()?, config)?;
    Ok(set_key(schema, "not", value))
}

type MethodFn = fn(Schema, &Call<'_>, &mut Config) -> Result<Schema>;

fn table(entries: &[(&str, MethodFn)]) -> HashMap<String, Method> {
    entries
        .iter()
        .map(|(name, f)| {
            let method: Method = Arc::new(*f);
            (name.to_string(), method)
        })
        .collect()
}

/// Methods available on every schema value.
pub fn builtin_methods() -> HashMap<String, Method> {
    table(&[
        ("merge", merge::merge),
        ("add", merge::merge),
        ("assign", merge::merge),
        ("extend", merge::merge),
        ("get", get),
        ("set", set),
        ("not", not),
        ("minLength", string::min_length),
        ("maxLength", string::max_length),
        ("pattern", string::pattern),
        ("format", string::format),
        ("minimum", number::minimum),
        ("maximum", number::maximum),
        ("exclusiveMinimum", number::exclusive_minimum),
        ("exclusiveMaximum", number::exclusive_maximum),
        ("multipleOf", number::multiple_of),
        ("items", array::items),
        ("minItems", array::min_items),
        ("maxItems", array::max_items),
        ("uniqueItems", array::unique_items),
        ("additionalItems", array::additional_items),
        ("contains", array::contains),
        ("minContains", array::min_contains),
        ("maxContains", array::max_contains),
        ("unevaluatedItems", array::unevaluated_items),
        ("prop", object::prop),
        ("props", object::props),
        ("propItems", object::prop_items),
        ("pick", object::props),
        ("remove", object::remove),
        ("omit", object::remove),
        ("required", object::required),
        ("notRequired", object::not_required),
        ("optional", object::not_required),
        ("additionalProperties", object::additional_properties),
        ("dependencies", object::dependent_required),
        ("dependentRequired", object::dependent_required),
        ("dependentSchemas", object::dependent_schemas),
        ("maxProperties", object::max_properties),
        ("minProperties", object::min_properties),
        ("patternProperties", object::pattern_properties),
        ("propertyNames", object::property_names),
        ("unevaluatedProperties", object::unevaluated_properties),
        ("id", object::id),
        ("ref", object::reference),
        ("notNull", enums::not_null),
    ])
}

/// `$name` keys understood inside object literals.
pub fn builtin_directives() -> HashMap<String, Method> {
    table(&[
        ("additionalProperties", object::additional_properties),
        ("dependencies", object::dependent_required),
        ("dependentRequired", object::dependent_required),
        ("dependentSchemas", object::dependent_schemas),
        ("maxProperties", object::max_properties),
        ("minProperties", object::min_properties),
        ("patternProperties", object::pattern_properties),
        ("propertyNames", object::property_names),
        ("required", object::required),
        ("unevaluatedProperties", object::unevaluated_properties),
        ("id", object::id),
        ("ref", object::reference),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call<'a>(name: &'a str, args: &'a [Node], span: &'a Span) -> Call<'a> {
        Call::new(name, args, span)
    }

    #[test]
    fn test_object_or_two() {
        let span = Span::default();
        let args = [Node::string("a")];
        let err = call("set", &args, &span).object_or_two().unwrap_err();
        assert_eq!(err.message(), r#"Method "set" required two arguments"#);

        let args = [Node::number(1)];
        let err = call("set", &args, &span).object_or_two().unwrap_err();
        assert_eq!(
            err.message(),
            r#"Method "set" required first argument to be an object"#
        );

        let args = [Node::number(1), Node::number(2)];
        let err = call("set", &args, &span).object_or_two().unwrap_err();
        assert_eq!(
            err.message(),
            r#"Method "set" required first argument to be a string"#
        );

        let args = [Node::string("a"), Node::number(2), Node::number(3)];
        let err = call("set", &args, &span).object_or_two().unwrap_err();
        assert_eq!(err.message(), r#"Method "set" accept only two arguments"#);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        let span = Span::default();
        let schema = Schema::from(json!({"type": "string", "format": "email"}));

        let args = [Node::object(vec![
            ObjectMember::property("minLength", Node::number(1)),
            ObjectMember::property("format", Node::ident("undefined")),
        ])];
        let schema = set(schema, &call("set", &args, &span), &mut config).unwrap();
        assert_eq!(
            schema,
            Schema::from(json!({"type": "string", "minLength": 1}))
        );

        let args = [Node::string("minLength")];
        let value = get(schema.clone(), &call("get", &args, &span), &mut config).unwrap();
        assert_eq!(value, Schema::number(1.0));

        let args = [Node::string("maxLength")];
        let err = get(schema, &call("get", &args, &span), &mut config).unwrap_err();
        assert_eq!(err.message(), r#"Option "maxLength" is undefined"#);
    }

    #[test]
    fn test_expect_kind_message() {
        let span = Span::default();
        let schema = Schema::from(json!({"type": "string"}));
        let err = call("minimum", &[], &span)
            .expect_kind(&schema, SchemaKind::Number)
            .unwrap_err();
        assert_eq!(
            err.message(),
            r#"Method "minimum" allowed only for "number" schema"#
        );
    }
}
