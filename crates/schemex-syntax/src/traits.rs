//! Traits for surface readers.

use crate::ir::{Node, Span};
use std::sync::Arc;

/// Error that can occur when reading source text into an expression tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("{message}")]
    Syntax { message: String, span: Span },

    #[error("unsupported syntax: {kind}")]
    Unsupported { kind: String, span: Span },

    #[error("reader initialization failed: {0}")]
    Init(String),
}

impl ReadError {
    pub fn span(&self) -> Option<&Span> {
        match self {
            ReadError::Syntax { span, .. } | ReadError::Unsupported { span, .. } => Some(span),
            ReadError::Init(_) => None,
        }
    }
}

/// Where the text being read sits in its containing file.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// File name recorded in every span.
    pub source_file: Option<Arc<str>>,
    /// Line number of the first line of the text (1-based).
    pub start_line: usize,
    /// Column of the first character of the text (0-based).
    pub start_column: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            source_file: None,
            start_line: 1,
            start_column: 0,
        }
    }
}

impl ReadOptions {
    pub fn with_source_file(mut self, file: impl Into<Arc<str>>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    pub fn with_start(mut self, line: usize, column: usize) -> Self {
        self.start_line = line;
        self.start_column = column;
        self
    }
}

/// A reader parses a single expression into the tree.
pub trait Reader: Send + Sync {
    /// Syntax identifier (e.g., "typescript").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles.
    fn extensions(&self) -> &'static [&'static str];

    /// Parse source text into an expression tree.
    fn read(&self, source: &str, options: &ReadOptions) -> Result<Node, ReadError>;
}
