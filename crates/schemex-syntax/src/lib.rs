//! Expression trees for the schemex schema language.
//!
//! `schemex-syntax` holds the tree that schema source is read into and the
//! readers that produce it. The tree mirrors a small curly-brace expression
//! grammar (object and array literals, operators, calls, arrow functions,
//! regular expressions) and keeps source spans and comments on every node.
//!
//! # Architecture
//!
//! ```text
//! Source text          Reader               Tree
//! ───────────      ───────────────      ──────────
//! "{a: string}" ─> TypeScriptReader ─> Node (ir.rs)
//!                  (tree-sitter)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use schemex_syntax::{read_source, ReadOptions, NodeKind};
//!
//! let node = read_source("{id: number}", &ReadOptions::default())?;
//! assert!(matches!(node.kind, NodeKind::Object { .. }));
//! ```
//!
//! Nodes can also be built by hand with the constructors on [`Node`];
//! [`StructureEq`] compares trees while ignoring spans and comments.

pub mod ir;
pub mod traits;

pub mod input;

// Re-exports: tree types
pub use ir::{
    AssignOp, BinaryOp, Comment, Comments, Key, LogicalOp, Node, NodeKind, ObjectMember, Position,
    Property, Span, StructureEq, UnaryOp, format_number,
};

// Re-exports: Traits
pub use traits::{ReadError, ReadOptions, Reader};

// Re-exports: Built-in readers
#[cfg(feature = "read-typescript")]
pub use input::read_source;
#[cfg(feature = "read-typescript")]
pub use input::typescript::{TYPESCRIPT_READER, TypeScriptReader};
