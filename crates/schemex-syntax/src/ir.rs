//! Expression tree shared by readers and the schema compiler.
//!
//! Nodes are immutable once read. Every node carries the [`Span`] it was read
//! from and the comments attached to it, so diagnostics and descriptions can
//! point back into the author's text.

mod structure_eq;

pub use structure_eq::StructureEq;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A line/column pair. Lines are 1-based, columns are 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Source range of a node or comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<Arc<str>>,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            file: None,
            start,
            end,
        }
    }

    /// Span covering a single line range, handy for hand-built trees.
    pub fn lines(start: usize, end: usize) -> Self {
        Self::new(Position::new(start, 0), Position::new(end, 0))
    }

    pub fn with_file(mut self, file: impl Into<Arc<str>>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.start.line, self.start.column),
            None => write!(f, "{}:{}", self.start.line, self.start.column),
        }
    }
}

/// A comment with its delimiters stripped and surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl Comment {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Comments attached before (`leading`) and after (`trailing`) a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comments {
    pub leading: Vec<Comment>,
    pub trailing: Vec<Comment>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    /// Leading comments if there are any, otherwise trailing ones.
    pub fn preferred(&self) -> &[Comment] {
        if self.leading.is_empty() {
            &self.trailing
        } else {
            &self.leading
        }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    #[serde(skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
    /// Written inside parentheses in the source.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub parenthesized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Assignment {
        operator: AssignOp,
        target: Box<Node>,
        value: Box<Node>,
    },
    Binary {
        operator: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Logical {
        operator: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        operator: UnaryOp,
        argument: Box<Node>,
    },
    Identifier {
        name: String,
    },
    Member {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    Object {
        members: Vec<ObjectMember>,
    },
    Array {
        elements: Vec<Node>,
    },
    Number {
        value: f64,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool,
    },
    Null,
    Regex {
        pattern: String,
        flags: String,
    },
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Arrow {
        params: Vec<Node>,
        body: Box<Node>,
    },
    Conditional {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    Spread {
        argument: Box<Node>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`, `||=`, ... kept verbatim.
    Compound(String),
}

impl AssignOp {
    pub fn as_str(&self) -> &str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Compound(op) => op,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Eq,
    StrictEq,
    Ne,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
    In,
    InstanceOf,
}

impl BinaryOp {
    pub fn from_operator(text: &str) -> Option<Self> {
        Some(match text {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "**" => BinaryOp::Exp,
            "==" => BinaryOp::Eq,
            "===" => BinaryOp::StrictEq,
            "!=" => BinaryOp::Ne,
            "!==" => BinaryOp::StrictNe,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Ge,
            "<<" => BinaryOp::Shl,
            ">>" => BinaryOp::Shr,
            ">>>" => BinaryOp::UShr,
            "&" => BinaryOp::BitAnd,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "in" => BinaryOp::In,
            "instanceof" => BinaryOp::InstanceOf,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "**",
            BinaryOp::Eq => "==",
            BinaryOp::StrictEq => "===",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictNe => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::In => "in",
            BinaryOp::InstanceOf => "instanceof",
        }
    }

    /// `<`, `<=`, `>`, `>=`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
    Nullish,
}

impl LogicalOp {
    pub fn from_operator(text: &str) -> Option<Self> {
        match text {
            "&&" => Some(LogicalOp::And),
            "||" => Some(LogicalOp::Or),
            "??" => Some(LogicalOp::Nullish),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
            LogicalOp::Nullish => "??",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOp {
    pub fn from_operator(text: &str) -> Option<Self> {
        Some(match text {
            "!" => UnaryOp::Not,
            "-" => UnaryOp::Neg,
            "+" => UnaryOp::Plus,
            "~" => UnaryOp::BitNot,
            "typeof" => UnaryOp::TypeOf,
            "void" => UnaryOp::Void,
            "delete" => UnaryOp::Delete,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::BitNot => "~",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
        }
    }
}

/// One entry of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum ObjectMember {
    Property(Property),
    /// `...argument`; the node itself is a [`NodeKind::Spread`].
    Spread(Node),
}

impl ObjectMember {
    pub fn property(name: impl Into<String>, value: Node) -> Self {
        ObjectMember::Property(Property::new(Key::Identifier(name.into()), value))
    }

    /// `[name]: value`
    pub fn optional(name: impl Into<String>, value: Node) -> Self {
        let mut property = Property::new(Key::Identifier(name.into()), value);
        property.computed = true;
        ObjectMember::Property(property)
    }

    pub fn spread(argument: Node) -> Self {
        ObjectMember::Spread(Node::spread(argument))
    }

    pub fn span(&self) -> &Span {
        match self {
            ObjectMember::Property(property) => &property.span,
            ObjectMember::Spread(node) => &node.span,
        }
    }

    pub fn comments(&self) -> &Comments {
        match self {
            ObjectMember::Property(property) => &property.comments,
            ObjectMember::Spread(node) => &node.comments,
        }
    }
}

/// `key: value`, `[key]: value` or a shorthand `key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: Key,
    /// Key was written in brackets.
    pub computed: bool,
    pub value: Node,
    pub span: Span,
    #[serde(skip_serializing_if = "Comments::is_empty")]
    pub comments: Comments,
}

impl Property {
    pub fn new(key: Key, value: Node) -> Self {
        Self {
            key,
            computed: false,
            value,
            span: Span::default(),
            comments: Comments::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_leading_comment(mut self, text: impl Into<String>) -> Self {
        let span = self.span.clone();
        self.comments.leading.push(Comment::new(text, span));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Key {
    Identifier(String),
    String(String),
    Number(f64),
    Regex { pattern: String, flags: String },
    /// Any other bracketed expression.
    Expression(Box<Node>),
}

impl Key {
    /// The property name this key denotes, if it denotes one.
    pub fn name(&self) -> Option<String> {
        match self {
            Key::Identifier(name) | Key::String(name) => Some(name.clone()),
            Key::Number(value) => Some(format_number(*value)),
            Key::Regex { pattern, .. } => Some(pattern.clone()),
            Key::Expression(_) => None,
        }
    }
}

/// Render a number the way it would be written as an object key.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: Span::default(),
            comments: Comments::default(),
            parenthesized: false,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_comments(mut self, comments: Comments) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_leading_comment(mut self, text: impl Into<String>) -> Self {
        let span = self.span.clone();
        self.comments.leading.push(Comment::new(text, span));
        self
    }

    pub fn parenthesized(mut self) -> Self {
        self.parenthesized = true;
        self
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Identifier { name: name.into() })
    }

    pub fn number(value: impl Into<f64>) -> Self {
        let value = value.into();
        if value < 0.0 {
            // Negative literals are read as unary minus over a positive number.
            return Self::unary(UnaryOp::Neg, Self::new(NodeKind::Number { value: -value }));
        }
        Self::new(NodeKind::Number { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(NodeKind::String {
            value: value.into(),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(NodeKind::Boolean { value })
    }

    pub fn null() -> Self {
        Self::new(NodeKind::Null)
    }

    pub fn regex(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self::new(NodeKind::Regex {
            pattern: pattern.into(),
            flags: flags.into(),
        })
    }

    pub fn object(members: Vec<ObjectMember>) -> Self {
        Self::new(NodeKind::Object { members })
    }

    pub fn array(elements: Vec<Node>) -> Self {
        Self::new(NodeKind::Array { elements })
    }

    pub fn spread(argument: Node) -> Self {
        Self::new(NodeKind::Spread {
            argument: Box::new(argument),
        })
    }

    pub fn binary(left: Node, operator: BinaryOp, right: Node) -> Self {
        Self::new(NodeKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn logical(left: Node, operator: LogicalOp, right: Node) -> Self {
        Self::new(NodeKind::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(operator: UnaryOp, argument: Node) -> Self {
        Self::new(NodeKind::Unary {
            operator,
            argument: Box::new(argument),
        })
    }

    /// `!!argument`
    pub fn pure(argument: Node) -> Self {
        Self::unary(UnaryOp::Not, Self::unary(UnaryOp::Not, argument))
    }

    pub fn member(object: Node, property: impl Into<String>) -> Self {
        Self::new(NodeKind::Member {
            object: Box::new(object),
            property: Box::new(Self::ident(property)),
            computed: false,
        })
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Self::new(NodeKind::Call {
            callee: Box::new(callee),
            arguments,
        })
    }

    /// `object.method(arguments...)`
    pub fn method_call(object: Node, method: impl Into<String>, arguments: Vec<Node>) -> Self {
        Self::call(Self::member(object, method), arguments)
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Self::new(NodeKind::Assignment {
            operator: AssignOp::Assign,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn arrow(params: Vec<Node>, body: Node) -> Self {
        Self::new(NodeKind::Arrow {
            params,
            body: Box::new(body),
        })
    }

    pub fn conditional(test: Node, consequent: Node, alternate: Node) -> Self {
        Self::new(NodeKind::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /// Name used in diagnostics (`ObjectLiteral`, `Call`, ...).
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Assignment { .. } => "Assignment",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Logical { .. } => "Logical",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Member { .. } => "MemberAccess",
            NodeKind::Object { .. } => "ObjectLiteral",
            NodeKind::Array { .. } => "ArrayLiteral",
            NodeKind::Number { .. } => "NumberLiteral",
            NodeKind::String { .. } => "StringLiteral",
            NodeKind::Boolean { .. } => "BooleanLiteral",
            NodeKind::Null => "NullLiteral",
            NodeKind::Regex { .. } => "RegexLiteral",
            NodeKind::Call { .. } => "Call",
            NodeKind::Arrow { .. } => "ArrowFunction",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::Spread { .. } => "Spread",
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::String { value } => Some(value),
            _ => None,
        }
    }

    /// Numeric value of a number literal, including a negated one (`-1`).
    /// Non-finite values are not numbers JSON can hold and give `None`.
    pub fn as_number(&self) -> Option<f64> {
        let value = match &self.kind {
            NodeKind::Number { value } => *value,
            NodeKind::Unary {
                operator: UnaryOp::Neg,
                argument,
            } => match argument.kind {
                NodeKind::Number { value } => -value,
                _ => return None,
            },
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// The bare identifier `undefined`.
    pub fn is_undefined(&self) -> bool {
        self.as_identifier() == Some("undefined")
    }

    /// The operand of a `!!operand` marker.
    pub fn pure_operand(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Unary {
                operator: UnaryOp::Not,
                argument,
            } => match &argument.kind {
                NodeKind::Unary {
                    operator: UnaryOp::Not,
                    argument,
                } => Some(argument),
                _ => None,
            },
            _ => None,
        }
    }
}
