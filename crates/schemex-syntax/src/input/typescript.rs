//! Tree-sitter based reader for the curly-brace expression syntax.
//!
//! Source text is read as a single expression using the TypeScript grammar.
//! The text is wrapped in parentheses before parsing so a leading `{` is an
//! object literal rather than a block; reported positions are shifted back so
//! they refer to the caller's text.

use crate::ir::*;
use crate::traits::{ReadError, ReadOptions, Reader};
use std::sync::Arc;
use tree_sitter::{Parser, Point};

type TsNode<'t> = tree_sitter::Node<'t>;

/// Static instance of the TypeScript reader.
pub static TYPESCRIPT_READER: TypeScriptReader = TypeScriptReader;

/// Expression reader using tree-sitter's TypeScript grammar.
pub struct TypeScriptReader;

impl Reader for TypeScriptReader {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["sx", "ts", "js"]
    }

    fn read(&self, source: &str, options: &ReadOptions) -> Result<Node, ReadError> {
        read_source(source, options)
    }
}

/// Parse one expression into a tree.
pub fn read_source(source: &str, options: &ReadOptions) -> Result<Node, ReadError> {
    if is_blank(source) {
        let start = Position::new(options.start_line, options.start_column);
        return Err(ReadError::Syntax {
            message: "Empty expression".into(),
            span: Span {
                file: options.source_file.clone(),
                start,
                end: start,
            },
        });
    }

    let wrapped = format!("({}\n)", hash_comments_to_line_comments(source));

    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|err| ReadError::Init(err.to_string()))?;

    let tree = parser
        .parse(&wrapped, None)
        .ok_or_else(|| ReadError::Init("parser returned no tree".into()))?;

    let ctx = ReadContext {
        source: &wrapped,
        file: options.source_file.clone(),
        start_line: options.start_line,
        start_column: options.start_column,
    };
    ctx.read_root(tree.root_node())
}

/// Build `left op right`, keeping comparison chains grouped to the left.
///
/// The grammar reads `a < b < c` as `a < (b < c)` because `<` may open type
/// arguments. A chain is regrouped as `(a < b) < c`, the same shape
/// `a <= b <= c` already has. Parenthesized operands are left alone.
fn group_comparison(operator: BinaryOp, left: Node, right: Node) -> NodeKind {
    match right.kind {
        NodeKind::Binary {
            operator: next,
            left: inner,
            right: rest,
        } if operator.is_relational() && next.is_relational() && !right.parenthesized => {
            let span = Span {
                file: left.span.file.clone(),
                start: left.span.start,
                end: inner.span.end,
            };
            let grouped = Node::new(group_comparison(operator, left, *inner)).with_span(span);
            NodeKind::Binary {
                operator: next,
                left: Box::new(grouped),
                right: rest,
            }
        }
        kind => NodeKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(Node { kind, ..right }),
        },
    }
}

/// Nothing but whitespace and line comments.
fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line.starts_with("//")
    })
}

/// Rewrite `#` line comments to `//`. Only a `#` that starts a line (after
/// indentation) is touched.
fn hash_comments_to_line_comments(source: &str) -> String {
    if !source.contains('#') {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len() + 8);
    for (index, line) in source.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix('#') {
            out.push_str(&line[..line.len() - trimmed.len()]);
            out.push_str("//");
            out.push_str(rest);
        } else {
            out.push_str(line);
        }
    }
    out
}

struct ReadContext<'a> {
    source: &'a str,
    file: Option<Arc<str>>,
    start_line: usize,
    start_column: usize,
}

/// Where the walk over a bracketed list currently is.
#[derive(Clone, Copy, PartialEq)]
enum Slot {
    Open,
    AfterElement,
    AfterSeparator,
}

impl<'a> ReadContext<'a> {
    fn node_text(&self, node: TsNode) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn position(&self, point: Point) -> Position {
        let column = if point.row == 0 {
            // Account for the opening parenthesis of the wrapper.
            point.column.saturating_sub(1) + self.start_column
        } else {
            point.column
        };
        Position::new(self.start_line + point.row, column)
    }

    fn span(&self, node: TsNode) -> Span {
        Span {
            file: self.file.clone(),
            start: self.position(node.start_position()),
            end: self.position(node.end_position()),
        }
    }

    fn unsupported(&self, node: TsNode) -> ReadError {
        ReadError::Unsupported {
            kind: node.kind().to_string(),
            span: self.span(node),
        }
    }

    fn missing(&self, node: TsNode, what: &str) -> ReadError {
        ReadError::Syntax {
            message: format!("{} missing {}", node.kind(), what),
            span: self.span(node),
        }
    }

    fn field<'t>(&self, node: TsNode<'t>, name: &str) -> Result<TsNode<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.missing(node, name))
    }

    fn read_root(&self, root: TsNode) -> Result<Node, ReadError> {
        if root.has_error() {
            return Err(self.first_error(root));
        }

        let statement = first_named(root).ok_or_else(|| ReadError::Syntax {
            message: "Empty expression".into(),
            span: self.span(root),
        })?;
        let wrapper = match statement.kind() {
            "expression_statement" => first_named(statement).ok_or_else(|| ReadError::Syntax {
                message: "Empty expression".into(),
                span: self.span(statement),
            })?,
            _ => return Err(self.unsupported(statement)),
        };
        if wrapper.kind() != "parenthesized_expression" {
            return Err(self.unsupported(wrapper));
        }

        let mut items = self.collect_items(wrapper)?;
        if items.len() != 1 {
            return Err(ReadError::Syntax {
                message: "Expected a single expression".into(),
                span: self.span(wrapper),
            });
        }
        let (inner, comments) = items.remove(0);
        Ok(self.read_expr(inner)?.with_comments(comments))
    }

    /// Build a syntax error from the first error or missing node, in document order.
    fn first_error(&self, root: TsNode) -> ReadError {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.is_missing() {
                return ReadError::Syntax {
                    message: format!("Missing {}", node.kind()),
                    span: self.span(node),
                };
            }
            if node.is_error() {
                let token = self.node_text(node).chars().next();
                let message = match token {
                    Some(token) => format!("Unexpected token '{}'", token),
                    None => "Unexpected token".to_string(),
                };
                return ReadError::Syntax {
                    message,
                    span: self.span(node),
                };
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node
                .children(&mut cursor)
                .filter(|child| child.has_error() || child.is_missing())
                .collect();
            stack.extend(children.into_iter().rev());
        }
        ReadError::Syntax {
            message: "Syntax error".into(),
            span: self.span(root),
        }
    }

    /// Walk the children of a bracketed list (object, array, arguments, the
    /// wrapper) and pair each element with the comments that belong to it.
    fn collect_items<'t>(&self, node: TsNode<'t>) -> Result<Vec<(TsNode<'t>, Comments)>, ReadError> {
        let mut items: Vec<(TsNode<'t>, Comments)> = Vec::new();
        let mut pending = Vec::new();
        let mut slot = Slot::Open;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "comment" => {
                    let comment = self.read_comment(child);
                    match (slot, items.last_mut()) {
                        (Slot::AfterElement, Some((_, comments))) => comments.trailing.push(comment),
                        _ => pending.push(comment),
                    }
                }
                "," => slot = Slot::AfterSeparator,
                "(" | "[" | "{" => slot = Slot::Open,
                ")" | "]" | "}" => {
                    if let Some((_, comments)) = items.last_mut() {
                        comments.trailing.append(&mut pending);
                    }
                }
                _ if child.is_named() => {
                    items.push((
                        child,
                        Comments {
                            leading: std::mem::take(&mut pending),
                            trailing: Vec::new(),
                        },
                    ));
                    slot = Slot::AfterElement;
                }
                _ => return Err(self.unsupported(child)),
            }
        }

        Ok(items)
    }

    fn read_comment(&self, node: TsNode) -> Comment {
        let text = self.node_text(node);
        let body = if let Some(line) = text.strip_prefix("//") {
            line
        } else {
            text.strip_prefix("/*")
                .and_then(|rest| rest.strip_suffix("*/"))
                .unwrap_or(text)
        };
        Comment::new(body.trim(), self.span(node))
    }

    fn read_expr(&self, node: TsNode) -> Result<Node, ReadError> {
        let kind = match node.kind() {
            "parenthesized_expression" => {
                let items = self.collect_items(node)?;
                return match items.as_slice() {
                    [(inner, _)] => Ok(self.read_expr(*inner)?.parenthesized()),
                    _ => Err(self.unsupported(node)),
                };
            }

            // Literals
            "identifier" => NodeKind::Identifier {
                name: self.node_text(node).to_string(),
            },
            "undefined" => NodeKind::Identifier {
                name: "undefined".into(),
            },
            "number" => NodeKind::Number {
                value: self.read_number(node)?,
            },
            "string" => NodeKind::String {
                value: self.read_string(node)?,
            },
            "template_string" => NodeKind::String {
                value: self.read_template(node)?,
            },
            "true" => NodeKind::Boolean { value: true },
            "false" => NodeKind::Boolean { value: false },
            "null" => NodeKind::Null,
            "regex" => NodeKind::Regex {
                pattern: self.node_text(self.field(node, "pattern")?).to_string(),
                flags: node
                    .child_by_field_name("flags")
                    .map(|flags| self.node_text(flags).to_string())
                    .unwrap_or_default(),
            },

            // Operators
            "binary_expression" => self.read_binary(node)?,
            "unary_expression" => {
                let operator = self.node_text(self.field(node, "operator")?);
                let operator = UnaryOp::from_operator(operator).ok_or_else(|| self.unsupported(node))?;
                NodeKind::Unary {
                    operator,
                    argument: Box::new(self.read_expr(self.field(node, "argument")?)?),
                }
            }
            "assignment_expression" => NodeKind::Assignment {
                operator: AssignOp::Assign,
                target: Box::new(self.read_expr(self.field(node, "left")?)?),
                value: Box::new(self.read_expr(self.field(node, "right")?)?),
            },
            "augmented_assignment_expression" => NodeKind::Assignment {
                operator: AssignOp::Compound(
                    self.node_text(self.field(node, "operator")?).to_string(),
                ),
                target: Box::new(self.read_expr(self.field(node, "left")?)?),
                value: Box::new(self.read_expr(self.field(node, "right")?)?),
            },
            "ternary_expression" => NodeKind::Conditional {
                test: Box::new(self.read_expr(self.field(node, "condition")?)?),
                consequent: Box::new(self.read_expr(self.field(node, "consequence")?)?),
                alternate: Box::new(self.read_expr(self.field(node, "alternative")?)?),
            },

            // Access and calls
            "member_expression" => {
                let property = self.field(node, "property")?;
                NodeKind::Member {
                    object: Box::new(self.read_expr(self.field(node, "object")?)?),
                    property: Box::new(
                        Node::ident(self.node_text(property)).with_span(self.span(property)),
                    ),
                    computed: false,
                }
            }
            "subscript_expression" => NodeKind::Member {
                object: Box::new(self.read_expr(self.field(node, "object")?)?),
                property: Box::new(self.read_expr(self.field(node, "index")?)?),
                computed: true,
            },
            "call_expression" => {
                let arguments = self.field(node, "arguments")?;
                if arguments.kind() != "arguments" {
                    return Err(self.unsupported(arguments));
                }
                NodeKind::Call {
                    callee: Box::new(self.read_expr(self.field(node, "function")?)?),
                    arguments: self.read_list(arguments)?,
                }
            }
            "arrow_function" => self.read_arrow(node)?,

            // Containers
            "object" => NodeKind::Object {
                members: self.read_object(node)?,
            },
            "array" => NodeKind::Array {
                elements: self.read_list(node)?,
            },
            "spread_element" => {
                let argument = first_named(node).ok_or_else(|| self.missing(node, "argument"))?;
                NodeKind::Spread {
                    argument: Box::new(self.read_expr(argument)?),
                }
            }

            _ => return Err(self.unsupported(node)),
        };

        Ok(Node::new(kind).with_span(self.span(node)))
    }

    fn read_binary(&self, node: TsNode) -> Result<NodeKind, ReadError> {
        let operator = self.node_text(self.field(node, "operator")?);
        let left = Box::new(self.read_expr(self.field(node, "left")?)?);
        let right = Box::new(self.read_expr(self.field(node, "right")?)?);

        if let Some(operator) = LogicalOp::from_operator(operator) {
            return Ok(NodeKind::Logical {
                operator,
                left,
                right,
            });
        }

        let operator = BinaryOp::from_operator(operator).ok_or_else(|| self.unsupported(node))?;
        Ok(group_comparison(operator, *left, *right))
    }

    fn read_arrow(&self, node: TsNode) -> Result<NodeKind, ReadError> {
        let mut params = Vec::new();

        if let Some(param) = node.child_by_field_name("parameter") {
            params.push(self.read_expr(param)?);
        } else if let Some(list) = node.child_by_field_name("parameters") {
            let mut cursor = list.walk();
            for param in list.named_children(&mut cursor) {
                match param.kind() {
                    "comment" => {}
                    "required_parameter" | "optional_parameter" => {
                        params.push(self.read_expr(self.field(param, "pattern")?)?);
                    }
                    "identifier" => params.push(self.read_expr(param)?),
                    _ => return Err(self.unsupported(param)),
                }
            }
        }

        let body = self.field(node, "body")?;
        if body.kind() == "statement_block" {
            return Err(self.unsupported(body));
        }

        Ok(NodeKind::Arrow {
            params,
            body: Box::new(self.read_expr(body)?),
        })
    }

    /// Array elements or call arguments.
    fn read_list(&self, node: TsNode) -> Result<Vec<Node>, ReadError> {
        self.collect_items(node)?
            .into_iter()
            .map(|(child, comments)| Ok(self.read_expr(child)?.with_comments(comments)))
            .collect()
    }

    fn read_object(&self, node: TsNode) -> Result<Vec<ObjectMember>, ReadError> {
        let mut members = Vec::new();

        for (child, comments) in self.collect_items(node)? {
            let member = match child.kind() {
                "pair" => ObjectMember::Property(self.read_pair(child, comments)?),
                "shorthand_property_identifier" => {
                    let name = self.node_text(child).to_string();
                    let span = self.span(child);
                    ObjectMember::Property(Property {
                        key: Key::Identifier(name.clone()),
                        computed: false,
                        value: Node::ident(name).with_span(span.clone()),
                        span,
                        comments,
                    })
                }
                "spread_element" => ObjectMember::Spread(self.read_expr(child)?.with_comments(comments)),
                _ => return Err(self.unsupported(child)),
            };
            members.push(member);
        }

        Ok(members)
    }

    fn read_pair(&self, node: TsNode, mut comments: Comments) -> Result<Property, ReadError> {
        let key_node = self.field(node, "key")?;
        let value = self.read_expr(self.field(node, "value")?)?;

        // Comments written between the key and the end of the value.
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                comments.trailing.push(self.read_comment(child));
            }
        }

        let (key, computed) = match key_node.kind() {
            "property_identifier" | "identifier" => {
                (Key::Identifier(self.node_text(key_node).to_string()), false)
            }
            "string" => (Key::String(self.read_string(key_node)?), false),
            "number" => (Key::Number(self.read_number(key_node)?), false),
            "computed_property_name" => {
                let inner = first_named(key_node).ok_or_else(|| self.missing(key_node, "expression"))?;
                let inner = self.read_expr(inner)?;
                let key = match inner.kind {
                    NodeKind::Identifier { name } => Key::Identifier(name),
                    NodeKind::String { value } => Key::String(value),
                    NodeKind::Number { value } => Key::Number(value),
                    NodeKind::Regex { pattern, flags } => Key::Regex { pattern, flags },
                    _ => Key::Expression(Box::new(inner)),
                };
                (key, true)
            }
            _ => return Err(self.unsupported(key_node)),
        };

        Ok(Property {
            key,
            computed,
            value,
            span: self.span(node),
            comments,
        })
    }

    fn read_number(&self, node: TsNode) -> Result<f64, ReadError> {
        let text = self.node_text(node);
        match parse_number(text) {
            Some(value) if value.is_finite() => Ok(value),
            Some(_) => Err(ReadError::Syntax {
                message: format!("Number literal out of range: {}", text),
                span: self.span(node),
            }),
            None => Err(ReadError::Syntax {
                message: format!("Invalid number literal: {}", text),
                span: self.span(node),
            }),
        }
    }

    fn read_string(&self, node: TsNode) -> Result<String, ReadError> {
        let text = self.node_text(node);
        let body = text.get(1..text.len().saturating_sub(1)).unwrap_or("");
        unescape(body).ok_or_else(|| ReadError::Syntax {
            message: "Invalid escape sequence".into(),
            span: self.span(node),
        })
    }

    fn read_template(&self, node: TsNode) -> Result<String, ReadError> {
        let mut cursor = node.walk();
        if node
            .named_children(&mut cursor)
            .any(|child| child.kind() == "template_substitution")
        {
            return Err(self.unsupported(node));
        }
        self.read_string(node)
    }
}

fn first_named(node: TsNode) -> Option<TsNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let cleaned = cleaned.strip_suffix('n').unwrap_or(&cleaned);

    let radix = |prefix: [&str; 2], radix: u32| {
        prefix
            .iter()
            .find_map(|p| cleaned.strip_prefix(*p))
            .map(|digits| u64::from_str_radix(digits, radix).ok().map(|v| v as f64))
    };

    if let Some(value) = radix(["0x", "0X"], 16) {
        return value;
    }
    if let Some(value) = radix(["0o", "0O"], 8) {
        return value;
    }
    if let Some(value) = radix(["0b", "0B"], 2) {
        return value;
    }
    cleaned.parse::<f64>().ok()
}

/// Resolve escape sequences in a quoted literal body.
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok()?
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    let high = u32::from_str_radix(&hex, 16).ok()?;
                    // Surrogate pair written as two \u escapes.
                    if (0xD800..0xDC00).contains(&high) {
                        let rest: String = chars.clone().take(6).collect();
                        match rest.strip_prefix("\\u").and_then(|h| u32::from_str_radix(h, 16).ok()) {
                            Some(low) if (0xDC00..0xE000).contains(&low) => {
                                for _ in 0..6 {
                                    chars.next();
                                }
                                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                            }
                            _ => high,
                        }
                    } else {
                        high
                    }
                };
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => out.push(other),
        }
    }

    Some(out)
}
