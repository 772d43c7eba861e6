//! Compile compact schema expressions into JSON Schema.
//!
//! `schemex` reads a small expression language and produces JSON Schema
//! documents. `{id: uint, [name]: string}` is an object with a required `id`
//! and an optional `name`; `"a" || "b"` is a string enum; `0 <= x < 10` a
//! bounded number; `User = {...}` names a schema for later reference.
//!
//! # Architecture
//!
//! ```text
//! Source text       Reader          Tree          Compiler          Output
//! ───────────     ──────────     ──────────     ─────────────     ──────────
//! "{a: int}"  ──> schemex-syntax ──> Node ──> compile (compile/) ──> Schema ──> JSON
//!                                                   │
//!                                         Config: registry, methods,
//!                                         functions, directives
//! ```
//!
//! # Example
//!
//! ```
//! use schemex::{compile_source, Config};
//!
//! let mut config = Config::default();
//! let document = compile_source("{id: uint, [name]: string}", &mut config).unwrap();
//!
//! assert_eq!(document["required"], serde_json::json!(["id"]));
//! assert_eq!(document["properties"]["id"]["minimum"], serde_json::json!(0));
//! ```
//!
//! # Extending
//!
//! Methods (`schema.name(args)`), functions (`name(args)`) and `$name`
//! object directives live in open tables on [`Config`]; built-ins and
//! user entries share the same maps, so overriding is insertion.
//!
//! ```ignore
//! let config = Config::default().with_function("nullable", |call, config| {
//!     let inner = schemex::compile(call.one_arg()?, config)?;
//!     Ok(Schema::object([("anyOf", Schema::Array(vec![inner, Schema::Null]))]))
//! });
//! ```
//!
//! # Feature Flags
//!
//! - `read-typescript` (default) - tree-sitter reader; enables the
//!   source-text entry points and [`Session::new`]

pub mod compile;
pub mod config;
pub mod error;
pub mod methods;
pub mod name;
pub mod postprocess;
pub mod registry;
pub mod schema;
pub mod session;

pub use compile::compile;
pub use config::{Config, Function, Method, Options, OptionsError, SchemaVersion};
pub use error::{CompileError, ErrorKind, Result};
pub use methods::Call;
pub use registry::{Entry, Registry, is_builtin};
pub use schema::{Map, Schema, SchemaKind};
pub use session::Session;

pub use schemex_syntax::{Node, ReadOptions, Reader};

use name::reference_name;
use schemex_syntax::NodeKind;
use serde_json::Value;

/// Read source text into an expression tree.
#[cfg(feature = "read-typescript")]
pub fn parse_to_tree(code: &str, options: &ReadOptions) -> Result<Node> {
    Ok(schemex_syntax::read_source(code, options)?)
}

/// Read and compile source text into a JSON document.
#[cfg(feature = "read-typescript")]
pub fn compile_source(code: &str, config: &mut Config) -> Result<Value> {
    compile_source_with(code, &ReadOptions::default(), config)
}

/// [`compile_source`] with the text's file name and position.
#[cfg(feature = "read-typescript")]
pub fn compile_source_with(code: &str, options: &ReadOptions, config: &mut Config) -> Result<Value> {
    let tree = parse_to_tree(code, options)?;
    let schema = compile_tree(&tree, config)?;
    tree_to_document(&schema)
}

/// Compile a whole tree.
///
/// On failure the registry is restored to what it held before the call, so
/// assignments made on the way are not kept.
pub fn compile_tree(node: &Node, config: &mut Config) -> Result<Schema> {
    tracing::debug!(kind = node.kind_name(), "compiling tree");
    let snapshot = config.schemas.clone();

    match compile(node, config) {
        Ok(mut schema) => {
            schema.describe(node.comments.preferred());
            tracing::debug!(schemas = config.schemas.len(), "compiled tree");
            Ok(schema)
        }
        Err(err) => {
            config.schemas = snapshot;
            config.resolving.clear();
            tracing::debug!(error = %err, "compile failed, registry restored");
            Err(err)
        }
    }
}

pub fn tree_to_document(schema: &Schema) -> Result<Value> {
    postprocess::to_document(schema)
}

pub fn tree_to_text(schema: &Schema) -> Result<String> {
    postprocess::to_text(schema)
}

/// Read source text and register its named schema without compiling it.
#[cfg(feature = "read-typescript")]
pub fn declare(code: &str, config: &mut Config) -> Result<Node> {
    let tree = parse_to_tree(code, &ReadOptions::default())?;
    declare_tree(&tree, config)?;
    Ok(tree)
}

/// Register the named schema in `node`, uncompiled.
///
/// `Name = expr`, `(Name) => expr` and `() => Name = expr` name `expr`.
/// Anything else is left alone. A declared schema is compiled each time it
/// is referenced, so it may refer to names declared after it.
pub fn declare_tree(node: &Node, config: &mut Config) -> Result<()> {
    let (target, value) = match &node.kind {
        NodeKind::Assignment { target, value, .. } => (&**target, &**value),
        NodeKind::Arrow { params, body } => match (params.first(), &body.kind) {
            (Some(param), _) => (param, &**body),
            (None, NodeKind::Assignment { target, value, .. }) => (&**target, &**value),
            (None, _) => return Ok(()),
        },
        _ => return Ok(()),
    };
    let name = reference_name(target)?;
    tracing::debug!(name = %name, "declared schema");
    config.schemas.declare(name, value.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemex_syntax::ObjectMember;
    use serde_json::json;

    #[test]
    fn test_failed_compile_keeps_registry() {
        let mut config = Config::default();
        let before = config.schemas.len();

        // A = {b: (B = int), c: missing}
        let node = Node::assign(
            Node::ident("A"),
            Node::object(vec![
                ObjectMember::property("b", Node::assign(Node::ident("B"), Node::ident("int"))),
                ObjectMember::property("c", Node::ident("missing")),
            ]),
        );
        let err = compile_tree(&node, &mut config).unwrap_err();
        assert_eq!(err.reference_name(), Some("missing"));
        assert_eq!(config.schemas.len(), before);
        assert!(!config.schemas.contains("B"));
    }

    #[test]
    fn test_declare_tree_shapes() {
        let mut config = Config::default();
        declare_tree(&Node::assign(Node::ident("A"), Node::ident("string")), &mut config).unwrap();
        declare_tree(
            &Node::arrow(vec![Node::ident("B")], Node::ident("int")),
            &mut config,
        )
        .unwrap();
        declare_tree(
            &Node::arrow(vec![], Node::assign(Node::ident("C"), Node::ident("uint"))),
            &mut config,
        )
        .unwrap();
        declare_tree(&Node::ident("D"), &mut config).unwrap();

        for name in ["A", "B", "C"] {
            assert!(matches!(config.schemas.get(name), Some(Entry::Source(_))));
        }
        assert!(!config.schemas.contains("D"));

        let schema = compile_tree(&Node::ident("B"), &mut config).unwrap();
        assert_eq!(
            tree_to_document(&schema).unwrap(),
            json!({"title": "B", "type": "integer"})
        );
    }
}
