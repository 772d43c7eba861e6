//! `fn(args)` and `schema.method(args)`.

use super::compile;
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::methods::Call;
use crate::schema::Schema;
use schemex_syntax::{Node, NodeKind};

pub(super) fn compile_call(
    node: &Node,
    callee: &Node,
    arguments: &[Node],
    config: &mut Config,
) -> Result<Schema> {
    match &callee.kind {
        NodeKind::Identifier { name } => {
            let Some(function) = config.functions.get(name).cloned() else {
                return Err(CompileError::reference(
                    name,
                    format!("Unknown function: {name:?}"),
                    &callee.span,
                ));
            };
            tracing::trace!(function = %name, "calling function");
            function(&Call::new(name, arguments, &node.span), config)
        }
        NodeKind::Member {
            object,
            property,
            computed: false,
        } => {
            let Some(name) = property.as_identifier() else {
                return Err(CompileError::unknown_syntax(property));
            };
            let receiver = compile(object, config)?;
            let Some(method) = config.methods.get(name).cloned() else {
                return Err(CompileError::reference(
                    name,
                    format!("Unknown schema method: {name:?}"),
                    &property.span,
                ));
            };
            tracing::trace!(method = %name, "calling method");

            let mut result = method(receiver, &Call::new(name, arguments, &node.span), config)?;
            if result.is_falsy() {
                return Err(CompileError::runtime(
                    format!("Method {name:?} must return schema"),
                    &node.span,
                ));
            }
            // Method results are anonymous.
            result.strip_names();
            Ok(result)
        }
        _ => Err(CompileError::syntax(
            format!("Invalid call expression: {}", callee.kind_name()),
            &callee.span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_method_result_loses_title() {
        let mut config = Config::default();
        config.schemas.insert_compiled(
            "Name",
            Schema::from(json!({"title": "Name", "type": "string"})),
        );
        let node = Node::method_call(Node::ident("Name"), "minLength", vec![Node::number(2)]);
        assert_eq!(
            compile(&node, &mut config).unwrap(),
            Schema::from(json!({"type": "string", "minLength": 2}))
        );
    }

    #[test]
    fn test_custom_function_and_method() {
        let mut config = Config::default()
            .with_function("nullable", |call, config| {
                let inner = compile(call.one_arg()?, config)?;
                Ok(Schema::object([(
                    "anyOf",
                    Schema::Array(vec![inner, Schema::from(json!({"type": "null"}))]),
                )]))
            })
            .with_method("nothing", |_schema, _call, _config| Ok(Schema::Null));

        let node = Node::call(Node::ident("nullable"), vec![Node::ident("int")]);
        assert_eq!(
            compile(&node, &mut config).unwrap(),
            Schema::from(json!({"anyOf": [{"type": "integer"}, {"type": "null"}]}))
        );

        let node = Node::method_call(Node::ident("int"), "nothing", vec![]);
        let err = compile(&node, &mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.message(), r#"Method "nothing" must return schema"#);
    }

    #[test]
    fn test_unknown_callees() {
        let mut config = Config::default();
        let err = compile(&Node::call(Node::ident("f"), vec![]), &mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(err.message(), r#"Unknown function: "f""#);

        let node = Node::method_call(Node::ident("int"), "nope", vec![]);
        let err = compile(&node, &mut config).unwrap_err();
        assert_eq!(err.reference_name(), Some("nope"));
        assert_eq!(err.message(), r#"Unknown schema method: "nope""#);

        let node = Node::call(Node::string("f"), vec![]);
        let err = compile(&node, &mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Invalid call expression: StringLiteral");
    }
}
