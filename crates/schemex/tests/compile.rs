//! End-to-end tests: source text in, JSON Schema document out.

#![cfg(feature = "read-typescript")]

use schemex::compile::literal;
use schemex::methods::set_key;
use schemex::{
    CompileError, Config, ErrorKind, ReadOptions, Schema, SchemaVersion, Session, compile_source,
    compile_source_with, declare,
};
use serde_json::{Value, json};

fn compile(code: &str) -> Value {
    compile_with(code, &mut Config::default())
}

fn compile_with(code: &str, config: &mut Config) -> Value {
    compile_source(code, config).unwrap_or_else(|err| panic!("{code}: {err}"))
}

fn compile_err(code: &str) -> CompileError {
    compile_source(code, &mut Config::default()).expect_err("compile should fail")
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

mod objects {
    use super::*;

    #[test]
    fn kitchen_sink() {
        let document = compile(
            r#"{
                id: number,
                name: string,
                regex: /^\d+$/,
                constNumber: 10,
                constString: "test",
                constBoolean: true,
                [optional]: string,
                listInt: [int],
                listStr: [!!{type: 'string'}],
                listObj: [{type: string}],
                listOr: [number || string],
                listTwo: [number, string],
                enumInt: -1 || 2 || 3,
                [enumIntNull]: -1 || 2 || null,
                enumStr: "user" || 'account' || "item",
                [enumIntStr]: "1" || 1 || "2" || 2 || null,
                any_of: number || string || int || null,
                all_of: number && string && int,
                [intBetween]: -1 <= int < 10,
                [intLT]: uint < 10,
                [intInArr]: [uint <= 10],
            }"#,
        );

        assert_eq!(
            document,
            json!({
                "type": "object",
                "additionalProperties": false,
                "required": [
                    "id", "name", "regex", "constNumber", "constString", "constBoolean",
                    "listInt", "listStr", "listObj", "listOr", "listTwo", "enumInt",
                    "enumStr", "any_of", "all_of"
                ],
                "properties": {
                    "id": {"type": "number"},
                    "name": {"type": "string"},
                    "regex": {"type": "string", "pattern": "^\\d+$"},
                    "constNumber": {"const": 10},
                    "constString": {"const": "test"},
                    "constBoolean": {"const": true},
                    "optional": {"type": "string"},
                    "listInt": {"type": "array", "items": {"type": "integer"}},
                    "listStr": {"type": "array", "items": {"type": "string"}},
                    "listObj": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "additionalProperties": false,
                            "required": ["type"],
                            "properties": {"type": {"type": "string"}}
                        }
                    },
                    "listOr": {
                        "type": "array",
                        "items": {"anyOf": [{"type": "number"}, {"type": "string"}]}
                    },
                    "listTwo": {
                        "type": "array",
                        "items": [{"type": "number"}, {"type": "string"}]
                    },
                    "enumInt": {"type": "number", "enum": [-1, 2, 3]},
                    "enumIntNull": {"anyOf": [
                        {"type": "number", "enum": [-1, 2]},
                        {"type": "null"}
                    ]},
                    "enumStr": {"type": "string", "enum": ["user", "account", "item"]},
                    "enumIntStr": {"anyOf": [
                        {"type": "string", "enum": ["1", "2"]},
                        {"type": "number", "enum": [1, 2]},
                        {"type": "null"}
                    ]},
                    "any_of": {"anyOf": [
                        {"type": "number"},
                        {"type": "string"},
                        {"type": "integer"},
                        {"type": "null"}
                    ]},
                    "all_of": {"allOf": [
                        {"type": "number"},
                        {"type": "string"},
                        {"type": "integer"}
                    ]},
                    "intBetween": {"type": "integer", "minimum": -1, "exclusiveMaximum": 10},
                    "intLT": {"type": "integer", "minimum": 0, "exclusiveMaximum": 10},
                    "intInArr": {
                        "type": "array",
                        "items": {"type": "integer", "minimum": 0, "maximum": 10}
                    }
                }
            })
        );
    }

    #[test]
    fn required_follows_first_appearance() {
        let document = compile("{b: string, a: number, [c]: boolean, b: int}");
        assert_eq!(document["required"], json!(["b", "a"]));
        assert_eq!(keys(&document["properties"]), ["b", "a", "c"]);
        assert_eq!(document["properties"]["b"], json!({"type": "integer"}));
    }

    #[test]
    fn dashed_builtin_names() {
        let mut config = Config::default();
        let document = compile_with("{at: date-time, link: uri-reference}", &mut config);
        assert_eq!(
            document["properties"]["link"],
            json!({"type": "string", "format": "uri-reference"})
        );
        assert_eq!(document["properties"]["at"], compile_with("date-time", &mut config));
        assert!(document["properties"]["at"]["pattern"].is_string());
    }

    #[test]
    fn spread_and_removal() {
        let mut config = Config::default();
        compile_with("One = {a: string, b: string}", &mut config);
        let document = compile_with("{...One, b: undefined, c: number}", &mut config);
        assert_eq!(
            document,
            json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["a", "c"],
                "properties": {"a": {"type": "string"}, "c": {"type": "number"}}
            })
        );
    }

    #[test]
    fn pure_spreads_set_keys() {
        let document = compile(
            "{
                ...!!{
                    additionalProperties: true,
                    test: 2,
                    test3: 5,
                    required: ['id'],
                    properties: {id: {const: 3}},
                },
                ...!!{
                    additionalProperties: false,
                    test: 3,
                    test2: 4,
                    required: ['name'],
                    properties: {name: {const: 2}},
                },
                test: 1,
            }",
        );
        assert_eq!(
            document,
            json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["name", "test"],
                "properties": {"name": {"const": 2}, "test": {"const": 1}},
                "test": 3,
                "test2": 4,
                "test3": 5
            })
        );
    }

    #[test]
    fn regex_keys() {
        let document = compile(r"{[/^\d+$/]: string, [/^x-/]: int}");
        assert_eq!(document["required"], json!([]));
        assert_eq!(
            document["patternProperties"],
            json!({"^\\d+$": {"type": "string"}, "^x-": {"type": "integer"}})
        );
    }

    #[test]
    fn directives() {
        let document = compile(
            "{id: number, $additionalProperties: true, $propertyNames: uuid, token: string}",
        );
        assert_eq!(
            document,
            json!({
                "type": "object",
                "additionalProperties": true,
                "propertyNames": {"type": "string", "format": "uuid"},
                "required": ["id", "token"],
                "properties": {"id": {"type": "number"}, "token": {"type": "string"}}
            })
        );

        let document = compile("{id: number, name: string, $required: [], token: string}");
        assert_eq!(document["required"], json!(["token"]));

        let document = compile("{$maxProperties: 5, $ref: 'one'}");
        assert_eq!(document["maxProperties"], json!(5));
        assert_eq!(document["$ref"], json!("one"));
    }

    #[test]
    fn custom_directive() {
        let mut config = Config::default().with_object_option("test", |schema, call, config| {
            let value = literal::convert(call.one_arg()?, config)?;
            Ok(set_key(schema, "success", value))
        });
        let document = compile_with("{test: 'one', $test: 1}", &mut config);
        assert_eq!(
            document,
            json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["test"],
                "properties": {"test": {"const": "one"}},
                "success": 1
            })
        );
    }
}

mod literals {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(compile("5"), json!({"const": 5}));
        assert_eq!(compile("-2.5"), json!({"const": -2.5}));
        assert_eq!(compile("'x'"), json!({"const": "x"}));
        assert_eq!(compile("false"), json!({"const": false}));
    }

    #[test]
    fn pure_objects_are_kept() {
        assert_eq!(compile("!!{a: 1, b: 2}"), json!({"a": 1, "b": 2}));
        assert_eq!(
            compile("!!{type: 'string', test: string, deep: {test: {value: int}}, list: [1, uint]}"),
            json!({
                "type": "string",
                "test": {"type": "string"},
                "deep": {"test": {"value": {"type": "integer"}}},
                "list": [1, {"type": "integer", "minimum": 0}]
            })
        );
    }

    #[test]
    fn enums() {
        assert_eq!(compile("1 || 2 || 3"), json!({"type": "number", "enum": [1, 2, 3]}));
        assert_eq!(
            compile("1 || 'a' || null"),
            json!({"anyOf": [{"const": 1}, {"const": "a"}, {"type": "null"}]})
        );
        assert_eq!(
            compile("'string' || 'null'"),
            json!({"type": "string", "enum": ["string", "null"]})
        );
        assert_eq!(
            compile("string || null"),
            json!({"anyOf": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn mixed_operators_are_rejected() {
        let err = compile_err("int || string && null");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "All operators of enum should be same type: ||");
    }
}

mod arrays {
    use super::*;

    fn with_version(code: &str, version: SchemaVersion) -> Value {
        compile_with(code, &mut Config::default().with_schema_version(version))
    }

    #[test]
    fn rest_keywords_follow_version() {
        assert_eq!(
            with_version("[number, ...string]", SchemaVersion::Draft07),
            json!({
                "type": "array",
                "items": [{"type": "number"}],
                "additionalItems": {"type": "string"}
            })
        );
        assert_eq!(
            with_version("[number, ...string]", SchemaVersion::Draft2019),
            with_version("[number, ...string]", SchemaVersion::Draft07)
        );
        assert_eq!(
            with_version("[number, ...string]", SchemaVersion::Draft2020),
            json!({
                "type": "array",
                "prefixItems": [{"type": "number"}],
                "items": {"type": "string"}
            })
        );
    }

    #[test]
    fn shapes() {
        assert_eq!(compile("[]"), json!({"type": "array"}));
        assert_eq!(
            compile("!![]"),
            json!({"type": "array", "minItems": 0, "maxItems": 0})
        );
        assert_eq!(
            compile("!![number, string]"),
            json!({
                "type": "array",
                "minItems": 2,
                "maxItems": 2,
                "items": [{"type": "number"}, {"type": "string"}]
            })
        );
        assert_eq!(
            compile("[...number]"),
            json!({"type": "array", "contains": {"type": "number"}})
        );
        assert_eq!(
            compile("[number, number, ...(string || boolean)].minContains(1).maxContains(5)"),
            json!({
                "type": "array",
                "items": [{"type": "number"}, {"type": "number"}],
                "additionalItems": {"anyOf": [{"type": "string"}, {"type": "boolean"}]},
                "minContains": 1,
                "maxContains": 5
            })
        );
        assert_eq!(
            compile("[...(string || boolean)].items(number)"),
            json!({
                "type": "array",
                "contains": {"anyOf": [{"type": "string"}, {"type": "boolean"}]},
                "items": {"type": "number"}
            })
        );
        assert_eq!(
            compile("array.items([number])"),
            json!({"type": "array", "items": [{"type": "number"}]})
        );
    }

    #[test]
    fn spread_errors() {
        let err = compile_err("[...number, ...string]");
        assert_eq!(err.message(), "Invalid array syntax. Only one spread allowed");
        let err = compile_err("!![number, ...string]");
        assert_eq!(
            err.message(),
            "Invalid array syntax. Exclamation sign with spread is not allowed"
        );
    }
}

mod named {
    use super::*;

    #[test]
    fn references_are_repeatable() {
        let mut config = Config::default();
        let assigned = compile_with("Schema = {a: string}", &mut config);
        let first = compile_with("Schema", &mut config);
        let second = compile_with("Schema", &mut config);

        assert_eq!(assigned, first);
        assert_eq!(first, second);
        insta::assert_json_snapshot!(first, @r#"
        {
          "title": "Schema",
          "type": "object",
          "additionalProperties": false,
          "required": [
            "a"
          ],
          "properties": {
            "a": {
              "type": "string"
            }
          }
        }
        "#);
    }

    #[test]
    fn member_chain_names() {
        let mut config = Config::default();
        compile_with("Schema.field1.field2 = {test3: string}", &mut config);
        assert!(config.schemas.contains("Schema.field1.field2"));
        let document = compile_with("Schema.field1.field2", &mut config);
        assert_eq!(document["title"], json!("Schema.field1.field2"));
    }

    #[test]
    fn arrows() {
        let mut config = Config::default();
        let user = compile_with("User => ({[name]: string})", &mut config);
        assert_eq!(user["title"], json!("User"));
        assert_eq!(user["required"], json!([]));

        let test = compile_with("() => Test.Schema = {...User, test: number}", &mut config);
        assert_eq!(
            test,
            json!({
                "title": "Test.Schema",
                "type": "object",
                "additionalProperties": false,
                "required": ["test"],
                "properties": {"name": {"type": "string"}, "test": {"type": "number"}}
            })
        );

        let omitted = compile_with("(Test2) => Test.Schema.omit('test')", &mut config);
        assert_eq!(
            omitted,
            json!({
                "title": "Test2",
                "type": "object",
                "additionalProperties": false,
                "required": [],
                "properties": {"name": {"type": "string"}}
            })
        );
    }

    #[test]
    fn builtin_names_get_no_title() {
        let mut config = Config::default();
        let document = compile_with("uint = int.minimum(0)", &mut config);
        assert_eq!(document, json!({"type": "integer", "minimum": 0}));
    }

    #[test]
    fn declarations_allow_forward_references() {
        let mut config = Config::default();
        declare("{id: Test}", &mut config).unwrap();
        declare("Holder = {id: Test}", &mut config).unwrap();
        declare("Test = !!{type: 'number'}", &mut config).unwrap();

        assert_eq!(
            compile_with("Holder", &mut config),
            json!({
                "title": "Holder",
                "type": "object",
                "additionalProperties": false,
                "required": ["id"],
                "properties": {"id": {"title": "Test", "type": "number"}}
            })
        );
        assert_eq!(
            compile_with("Test", &mut config),
            json!({"title": "Test", "type": "number"})
        );
    }

    #[test]
    fn circular_declarations_are_reported() {
        let mut config = Config::default();
        declare("A = {b: B}", &mut config).unwrap();
        declare("B = {a: A}", &mut config).unwrap();

        let err = compile_source("A", &mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.message(), r#"Circular reference: "A""#);
    }

    #[test]
    fn failed_compile_is_not_committed() {
        let mut config = Config::default();
        let err = compile_source("A = {b: B = int, c: missing}", &mut config).unwrap_err();
        assert_eq!(err.reference_name(), Some("missing"));
        assert!(!config.schemas.contains("A"));
        assert!(!config.schemas.contains("B"));
    }
}

mod methods {
    use super::*;

    fn user_config() -> Config {
        let mut config = Config::default();
        compile_with("User = {id: number, [name]: string, [age]: number}", &mut config);
        config
    }

    #[test]
    fn object_methods_match_literals() {
        let cases = [
            ("User.pick('id', 'name')", "{id: number, [name]: string}"),
            ("User.remove('id', 'name')", "{[age]: number}"),
            (
                "User.add({token: uuid})",
                "{id: number, [name]: string, [age]: number, token: uuid}",
            ),
            ("User.required('name')", "{id: number, name: string, [age]: number}"),
            ("User.notRequired('id')", "{[id]: number, [name]: string, [age]: number}"),
            (
                "User.optional('id').set('required', User.get('required'))",
                "{id: number, [name]: string, [age]: number}",
            ),
            ("User.prop('id')", "number"),
            ("{uuid: User.prop('name')}", "{uuid: string}"),
            ("/d+/.set('minLength', 10)", "!!{type: 'string', pattern: 'd+', minLength: 10}"),
            ("(!!{type: 'string'}).set('minLength', 10)", "!!{type: 'string', minLength: 10}"),
            ("number.not({minimum: 10})", "!!{type: 'number', not: {minimum: 10}}"),
        ];

        for (method, literal) in cases {
            let mut config = user_config();
            let actual = compile_with(method, &mut config);
            let expected = compile_with(literal, &mut config);
            assert_eq!(actual, expected, "{method}");
        }
    }

    #[test]
    fn props_with_aliases() {
        let base = "{id: number, [name]: string, age: number}";
        assert_eq!(
            compile(&format!("{base}.props('id', {{name: 'test1', \"age\": 'test2'}})")),
            json!({
                "type": "object",
                "additionalProperties": false,
                "required": ["id", "test2"],
                "properties": {
                    "id": {"type": "number"},
                    "test1": {"type": "string"},
                    "test2": {"type": "number"}
                }
            })
        );
        assert_eq!(
            compile(&format!("{base}.props([{{'id': 'test'}}, 'age'], 'name')"))["required"],
            json!(["test", "age"])
        );
    }

    #[test]
    fn method_results_are_anonymous() {
        let mut config = Config::default();
        compile_with(
            "# desc
            User = {id: number, name: string}",
            &mut config,
        );
        let document = compile_with("User.props('id')", &mut config);
        assert_eq!(keys(&document), ["type", "additionalProperties", "required", "properties"]);
    }

    #[test]
    fn typed_setters() {
        assert_eq!(
            compile("string.minLength(2).maxLength(10).format('email')"),
            json!({"type": "string", "minLength": 2, "maxLength": 10, "format": "email"})
        );
        assert_eq!(
            compile("string.pattern(/^a/)"),
            json!({"type": "string", "pattern": "^a"})
        );
        assert_eq!(
            compile("int.minimum(-5).exclusiveMaximum(5).multipleOf(2)"),
            json!({"type": "integer", "minimum": -5, "exclusiveMaximum": 5, "multipleOf": 2})
        );
        assert_eq!(
            compile("array.minItems(1).maxItems(3).uniqueItems(true)"),
            json!({"type": "array", "minItems": 1, "maxItems": 3, "uniqueItems": true})
        );
        assert_eq!(
            compile("{test: [number], name: string}.propItems('test')"),
            json!({"type": "number"})
        );
        assert_eq!(
            compile("{a: string}.id('urn:a').minProperties(1)")["$id"],
            json!("urn:a")
        );
    }

    #[test]
    fn not_null() {
        assert_eq!(compile("(string || null).notNull()"), json!({"type": "string"}));
        assert_eq!(compile("(null || string).notNull()"), json!({"type": "string"}));
        assert_eq!(
            compile("(int || string || null).notNull()"),
            json!({"anyOf": [{"type": "integer"}, {"type": "string"}]})
        );
    }

    #[test]
    fn receiver_type_is_checked() {
        let err = compile_err("string.minimum(1)");
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.message(), r#"Method "minimum" allowed only for "number" schema"#);

        let err = compile_err("{a: string}.merge(int)");
        assert_eq!(
            err.message(),
            "You can extend only same type schemas: object and integer"
        );
    }

    #[test]
    fn custom_method_and_function() {
        let mut config = Config::default()
            .with_method("test", |schema, call, config| {
                let value = literal::convert(call.one_arg()?, config)?;
                Ok(set_key(schema, "test", value))
            })
            .with_function("test", |call, _config| {
                let parts: Vec<String> = call
                    .args
                    .iter()
                    .map(|arg| match arg.as_number() {
                        Some(value) => schemex_syntax::format_number(value),
                        None => arg.as_str().unwrap_or_default().to_string(),
                    })
                    .collect();
                Ok(Schema::string(format!("test={}", parts.join("-"))))
            });

        assert_eq!(
            compile_with("number.test(true)", &mut config),
            json!({"type": "number", "test": true})
        );
        assert_eq!(
            compile_with("{id: test(1, \"2\")}", &mut config)["properties"],
            json!({"id": "test=1-2"})
        );
    }
}

mod conditionals {
    use super::*;

    #[test]
    fn shift_with_named_condition() {
        let mut config = Config::default();
        compile_with("User => ({name: 'User'})", &mut config);
        let document = compile_with("Test2 => (User >> {test: 'test2'})", &mut config);
        assert_eq!(
            document,
            json!({
                "title": "Test2",
                "if": {
                    "title": "User",
                    "type": "object",
                    "additionalProperties": true,
                    "required": ["name"],
                    "properties": {"name": {"const": "User"}}
                },
                "then": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name", "test"],
                    "properties": {"name": {"const": "User"}, "test": {"const": "test2"}}
                }
            })
        );
    }

    #[test]
    fn switch_chain() {
        let document = compile("{kind: 'a'} >> {a: int} || {kind: 'b'} >> {b: string}");
        assert_eq!(document["if"]["properties"]["kind"], json!({"const": "a"}));
        assert_eq!(document["else"]["if"]["properties"]["kind"], json!({"const": "b"}));
        assert_eq!(
            document["else"]["else"]["oneOf"],
            json!([document["if"].clone(), document["else"]["if"].clone()])
        );
    }

    #[test]
    fn ternary() {
        assert_eq!(
            compile("Test => (int ? (-1 || id) : null)"),
            json!({
                "title": "Test",
                "if": {"type": "integer"},
                "then": {"anyOf": [{"const": -1}, {"type": "integer", "minimum": 1}]},
                "else": {"type": "null"}
            })
        );
    }
}

mod descriptions {
    use super::*;

    #[test]
    fn property_comments() {
        let document = compile(
            "
            # main desc
            {
                // desc 1
                test1: 1,
                test2: 2, // desc 2
                // desc 3
                test3: 3, // omit desc
                test4: 4, // desc 4
            }
            ",
        );
        insta::assert_json_snapshot!(document, @r#"
        {
          "description": "main desc",
          "type": "object",
          "additionalProperties": false,
          "required": [
            "test1",
            "test2",
            "test3",
            "test4"
          ],
          "properties": {
            "test1": {
              "description": "desc 1",
              "const": 1
            },
            "test2": {
              "description": "desc 2",
              "const": 2
            },
            "test3": {
              "description": "desc 3",
              "const": 3
            },
            "test4": {
              "description": "desc 4",
              "const": 4
            }
          }
        }
        "#);
    }

    #[test]
    fn root_comments() {
        let document = compile(
            "
            // test desc2
            Test2 = {id: 1}
            ",
        );
        assert_eq!(document["title"], json!("Test2"));
        assert_eq!(document["description"], json!("test desc2"));

        assert_eq!(
            compile("# test desc2\n!!{id: 1}"),
            json!({"description": "test desc2", "id": 1})
        );
        assert_eq!(
            compile("// test desc 3\nstring"),
            json!({"description": "test desc 3", "type": "string"})
        );
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_reference_points_at_name() {
        let err = compile_err("{id: a}");
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(err.reference_name(), Some("a"));
        assert_eq!(err.to_string(), r#"Unknown reference: "a" (1:5)"#);
    }

    #[test]
    fn locations_follow_read_options() {
        let options = ReadOptions::default()
            .with_source_file("/some/test.sx")
            .with_start(100, 10);
        let err = compile_source_with("{id: a}", &options, &mut Config::default()).unwrap_err();
        assert_eq!(err.to_string(), r#"Unknown reference: "a" (/some/test.sx:100:15)"#);
    }

    #[test]
    fn wrong_arity() {
        let err = compile_err("{id: string.minLength()}");
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert_eq!(err.message(), r#"Method "minLength" required one argument"#);
        assert_eq!(err.span().map(|span| span.start.column), Some(5));
    }

    #[test]
    fn invalid_shapes() {
        assert_eq!(compile_err("{id: 1 | 2}").kind(), ErrorKind::Syntax);
        assert_eq!(compile_err("{id: !int}").message(), r#"Unknown operator "!""#);
        assert_eq!(compile_err("A += int").message(), r#"Invalid assign operator: "+=""#);
        assert_eq!(compile_err("unknownFn(1)").message(), r#"Unknown function: "unknownFn""#);
        assert_eq!(
            compile_err("string.nope()").message(),
            r#"Unknown schema method: "nope""#
        );
    }

    #[test]
    fn number_keys_are_rejected() {
        let err = compile_err("{1: int}");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Invalid object key type: NumberLiteral");
        assert_eq!(err.span().map(ToString::to_string).as_deref(), Some("1:1"));

        let err = compile_err("!!{1: 2}");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.message(), "Unknown object property key type: NumberLiteral");
    }

    #[test]
    fn empty_source() {
        let err = compile_err("");
        assert_eq!(err.kind(), ErrorKind::Read);
        assert_eq!(err.message(), "Empty expression");
        assert_eq!(err.span().map(ToString::to_string).as_deref(), Some("1:0"));
    }

    #[test]
    fn numbers_out_of_range() {
        let err = compile_err("1e400");
        assert_eq!(err.kind(), ErrorKind::Read);
        assert_eq!(err.span().map(ToString::to_string).as_deref(), Some("1:0"));
    }

    #[test]
    fn read_errors() {
        let err = compile_err("\n{\n\tid: \n}");
        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(err.span().is_some());
    }
}

mod ranges {
    use super::*;

    #[test]
    fn between_from_source() {
        for (source, lower, upper) in [
            ("0 < int < 10", "exclusiveMinimum", "exclusiveMaximum"),
            ("0 < int <= 10", "exclusiveMinimum", "maximum"),
            ("0 <= int < 10", "minimum", "exclusiveMaximum"),
            ("0 <= int <= 10", "minimum", "maximum"),
        ] {
            let mut expected = serde_json::Map::new();
            expected.insert("type".into(), json!("integer"));
            expected.insert(lower.into(), json!(0));
            expected.insert(upper.into(), json!(10));
            assert_eq!(compile(source), Value::Object(expected), "{source}");
        }
    }

    #[test]
    fn between_inside_objects() {
        let document = compile("{a: 0 <= int < 10, b: string}");
        assert_eq!(
            document["properties"]["a"],
            json!({"type": "integer", "minimum": 0, "exclusiveMaximum": 10})
        );
        assert_eq!(document["required"], json!(["a", "b"]));
    }

    #[test]
    fn bounds_from_source() {
        assert_eq!(
            compile("number <= 5"),
            json!({"type": "number", "maximum": 5})
        );
        assert_eq!(
            compile("number > -2.5"),
            json!({"type": "number", "exclusiveMinimum": -2.5})
        );
    }
}

mod sessions {
    use super::*;

    #[test]
    fn session_keeps_definitions() {
        let mut session = Session::new(Config::default());
        session.compile("Name = string.minLength(1)").unwrap();
        let document = session.compile("{name: Name}").unwrap();
        assert_eq!(
            document["properties"]["name"],
            json!({"title": "Name", "type": "string", "minLength": 1})
        );

        let text = schemex::tree_to_text(&Schema::from(document.clone())).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, document);
    }
}
