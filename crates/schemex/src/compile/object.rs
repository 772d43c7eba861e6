//! Object literals.
//!
//! `{a: string, [b]: int}` becomes an `object` schema with `a` required and
//! `b` optional. Spreads merge other schemas in, regex keys collect into
//! `patternProperties`, `$name` keys run directives and `undefined` values
//! remove inherited properties.

use super::{compile, literal};
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::methods::{Call, merge_schemas};
use crate::name::property_name;
use crate::schema::{Map, Schema, apply_entry, insert_property, remove_property, toggle_required};
use schemex_syntax::{Key, Node, NodeKind, ObjectMember, Property, Span};

fn skeleton() -> Map {
    let mut map = Map::new();
    map.insert("type".into(), Schema::string("object"));
    map.insert("additionalProperties".into(), Schema::Bool(false));
    map.insert("required".into(), Schema::Array(Vec::new()));
    map.insert("properties".into(), Schema::Object(Map::new()));
    map
}

fn into_map(schema: Schema, what: &str, span: &Span) -> Result<Map> {
    match schema {
        Schema::Object(map) => Ok(map),
        _ => Err(CompileError::runtime(
            format!("{what} must return an object schema"),
            span,
        )),
    }
}

pub(super) fn compile_object(
    node: &Node,
    members: &[ObjectMember],
    config: &mut Config,
) -> Result<Schema> {
    let mut map = skeleton();
    let mut patterns: Vec<(&str, &Property)> = Vec::new();

    for (index, member) in members.iter().enumerate() {
        let property = match member {
            ObjectMember::Property(property) => property,
            ObjectMember::Spread(spread) => {
                let NodeKind::Spread { argument } = &spread.kind else {
                    return Err(CompileError::unknown_syntax(spread));
                };
                map = spread_into(map, argument, config)?;
                continue;
            }
        };

        let name = match &property.key {
            Key::Regex { pattern, .. } => {
                patterns.push((pattern.as_str(), property));
                continue;
            }
            _ => property_name(property)?,
        };

        if let Some(directive) = name.strip_prefix('$') {
            if let Some(run) = config.object_options.get(directive).cloned() {
                tracing::trace!(directive, "applying object directive");
                let call = Call::new(directive, std::slice::from_ref(&property.value), &property.span);
                let result = run(Schema::Object(map), &call, config)?;
                map = into_map(result, &format!("Directive {name:?}"), &property.span)?;
                continue;
            }
        }

        if property.value.is_undefined() {
            toggle_required(&mut map, &name, false);
            remove_property(&mut map, &name);
            continue;
        }

        toggle_required(&mut map, &name, !property.computed);
        let mut value = compile(&property.value, config)?;

        let previous = index.checked_sub(1).and_then(|i| match &members[i] {
            ObjectMember::Property(previous) => Some(previous),
            ObjectMember::Spread(_) => None,
        });
        describe_property(&mut map, &mut value, property, previous);

        insert_property(&mut map, name, value);
    }

    if !patterns.is_empty() {
        let mut compiled = Map::new();
        for (pattern, property) in patterns {
            compiled.insert(pattern.to_string(), compile(&property.value, config)?);
        }
        match map.get_mut("patternProperties") {
            Some(Schema::Object(existing)) => existing.extend(compiled),
            _ => {
                map.insert("patternProperties".into(), Schema::Object(compiled));
            }
        }
    }

    let mut schema = Schema::Object(map);
    schema.describe(node.comments.preferred());
    Ok(schema)
}

/// `...!!{...}` overwrites keys as written; any other spread is merged.
fn spread_into(mut map: Map, argument: &Node, config: &mut Config) -> Result<Map> {
    if let Some(operand @ Node {
        kind: NodeKind::Object { .. },
        ..
    }) = argument.pure_operand()
    {
        if let Schema::Object(values) = literal::convert(operand, config)? {
            for (key, value) in values {
                apply_entry(&mut map, key, value);
            }
        }
        return Ok(map);
    }

    let source = compile(argument, config)?;
    let merged = merge_schemas(Schema::Object(map), vec![source], "merge", &argument.span)?;
    into_map(merged, "Spread", &argument.span)
}

/// Attach comments next to a property as descriptions.
///
/// A leading comment that starts on the line where the previous property
/// ends belongs to that property; the rest describe this one.
fn describe_property(
    map: &mut Map,
    value: &mut Schema,
    property: &Property,
    previous: Option<&Property>,
) {
    let comments = &property.comments;
    if comments.is_empty() {
        return;
    }

    let first = comments.leading.first();
    match (first, previous) {
        (Some(first), Some(previous)) if previous.span.end.line == first.span.start.line => {
            if let (Some(name), Some(Schema::Object(props))) =
                (previous.key.name(), map.get_mut("properties"))
            {
                if let Some(previous) = props.get_mut(&name) {
                    previous.describe(std::slice::from_ref(first));
                }
            }
            if comments.leading.len() > 1 {
                value.describe(&comments.leading[1..]);
            } else {
                value.describe(&comments.trailing);
            }
        }
        _ => value.describe(comments.preferred()),
    }
}
