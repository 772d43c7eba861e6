//! Named schema registry.
//!
//! Maps canonical names to either an uncompiled expression (declared but not
//! yet compiled) or a compiled schema. A new registry is seeded with the
//! built-in primitives (`string`, `int`, `date-time`, ...).

use crate::schema::{Map, Schema};
use indexmap::IndexMap;
use schemex_syntax::Node;
use std::sync::OnceLock;

/// Built-in primitive schemas, keyed by name.
static PRIMITIVES: OnceLock<Map> = OnceLock::new();

fn primitives() -> &'static Map {
    PRIMITIVES.get_or_init(|| {
        match serde_json::from_str::<serde_json::Value>(include_str!("../schemas/primitives.json"))
        {
            Ok(value) => Schema::from(value).into_object().unwrap_or_default(),
            Err(err) => {
                tracing::error!(error = %err, "embedded primitive schemas are invalid");
                Map::new()
            }
        }
    })
}

/// Whether `name` is one of the built-in primitives.
pub fn is_builtin(name: &str) -> bool {
    primitives().contains_key(name)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Declared, compiled on each reference.
    Source(Node),
    /// Compiled once, cloned on each reference.
    Compiled(Schema),
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, Entry>,
}

impl Registry {
    /// An empty registry, without primitives.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in primitive.
    pub fn with_builtins() -> Self {
        let entries = primitives()
            .iter()
            .map(|(name, schema)| (name.clone(), Entry::Compiled(schema.clone())))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Store a compiled schema. A later write under the same name wins.
    pub fn insert_compiled(&mut self, name: impl Into<String>, schema: Schema) {
        self.entries.insert(name.into(), Entry::Compiled(schema));
    }

    /// Store an uncompiled expression.
    pub fn declare(&mut self, name: impl Into<String>, node: Node) {
        self.entries.insert(name.into(), Entry::Source(node));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
