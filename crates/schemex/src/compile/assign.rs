//! Named schemas: `Name = expr`, `Name => expr` and references to them.

use super::compile;
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::name::reference_name;
use crate::registry::{Entry, is_builtin};
use crate::schema::Schema;
use schemex_syntax::{AssignOp, Comment, Node};

pub(super) fn assignment(
    node: &Node,
    operator: &AssignOp,
    target: &Node,
    value: &Node,
    config: &mut Config,
) -> Result<Schema> {
    if *operator != AssignOp::Assign {
        return Err(CompileError::syntax(
            format!("Invalid assign operator: {:?}", operator.as_str()),
            &node.span,
        ));
    }
    let name = reference_name(target)?;
    register(&name, value, node.comments.preferred(), config)
}

/// A one-parameter arrow names its body; any other arrow is its body.
pub(super) fn arrow(
    node: &Node,
    params: &[Node],
    body: &Node,
    config: &mut Config,
) -> Result<Schema> {
    match params {
        [param] => {
            let name = reference_name(param)?;
            register(&name, body, node.comments.preferred(), config)
        }
        _ => compile(body, config),
    }
}

fn register(
    name: &str,
    value: &Node,
    comments: &[Comment],
    config: &mut Config,
) -> Result<Schema> {
    let mut schema = compile(value, config)?;
    if !is_builtin(name) {
        schema.set_title(name);
    }
    schema.describe(comments);
    config.schemas.insert_compiled(name, schema.clone());
    tracing::debug!(name, "registered schema");
    Ok(schema)
}

/// Look a name up in the registry, compiling declared entries on the way.
pub fn resolve_reference(node: &Node, config: &mut Config) -> Result<Schema> {
    let name = reference_name(node)?;
    tracing::trace!(name = %name, "resolving reference");

    let mut schema = match config.schemas.get(&name) {
        None => return Err(CompileError::unknown_reference(&name, &node.span)),
        Some(Entry::Compiled(schema)) => schema.clone(),
        Some(Entry::Source(source)) => {
            if config.resolving.contains(&name) {
                return Err(CompileError::runtime(
                    format!("Circular reference: {name:?}"),
                    &node.span,
                ));
            }
            let source = source.clone();
            config.resolving.push(name.clone());
            let result = compile(&source, config);
            config.resolving.pop();
            result?
        }
    };

    if !is_builtin(&name) {
        schema.set_title(&name);
    }
    Ok(schema)
}
