//! Compile errors.
//!
//! Every error raised while compiling a tree carries the span of the node that
//! caused it. Errors are never recovered: the first one aborts the compile.

use schemex_syntax::{Node, ReadError, Span};

/// Broad class of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tree has a shape no rule accepts.
    Syntax,
    /// A schema, function or method name could not be resolved.
    Reference,
    /// An operation was called with arguments it does not accept.
    Runtime,
    /// The source text could not be read into a tree.
    Read,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("{message} ({span})")]
    Syntax { message: String, span: Span },

    #[error("{message} ({span})")]
    Reference {
        name: String,
        message: String,
        span: Span,
    },

    #[error("{message} ({span})")]
    Runtime { message: String, span: Span },

    #[error(transparent)]
    Read(#[from] ReadError),
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

impl CompileError {
    pub fn syntax(message: impl Into<String>, span: &Span) -> Self {
        CompileError::Syntax {
            message: message.into(),
            span: span.clone(),
        }
    }

    /// `Unknown syntax: <Kind>` for a node no rule accepts.
    pub fn unknown_syntax(node: &Node) -> Self {
        Self::syntax(format!("Unknown syntax: {}", node.kind_name()), &node.span)
    }

    /// `Unknown reference: "<name>"`.
    pub fn unknown_reference(name: &str, span: &Span) -> Self {
        Self::reference(name, format!("Unknown reference: {:?}", name), span)
    }

    pub fn reference(name: &str, message: impl Into<String>, span: &Span) -> Self {
        CompileError::Reference {
            name: name.to_string(),
            message: message.into(),
            span: span.clone(),
        }
    }

    pub fn runtime(message: impl Into<String>, span: &Span) -> Self {
        CompileError::Runtime {
            message: message.into(),
            span: span.clone(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Syntax { .. } => ErrorKind::Syntax,
            CompileError::Reference { .. } => ErrorKind::Reference,
            CompileError::Runtime { .. } => ErrorKind::Runtime,
            CompileError::Read(_) => ErrorKind::Read,
        }
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            CompileError::Syntax { span, .. }
            | CompileError::Reference { span, .. }
            | CompileError::Runtime { span, .. } => Some(span),
            CompileError::Read(err) => err.span(),
        }
    }

    /// The message without the location suffix.
    pub fn message(&self) -> String {
        match self {
            CompileError::Syntax { message, .. }
            | CompileError::Reference { message, .. }
            | CompileError::Runtime { message, .. } => message.clone(),
            CompileError::Read(err) => err.to_string(),
        }
    }

    /// The unresolved name of a reference error.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            CompileError::Reference { name, .. } => Some(name),
            _ => None,
        }
    }
}
