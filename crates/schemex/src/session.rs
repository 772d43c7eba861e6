//! A configuration paired with a reader.

use crate::config::Config;
use crate::error::Result;
use schemex_syntax::{Node, ReadOptions, Reader};
use serde_json::Value;

/// Compiles source text against one [`Config`].
///
/// Named schemas registered by one call are visible to the next.
pub struct Session {
    config: Config,
    reader: &'static dyn Reader,
}

impl Session {
    /// A session reading the built-in curly-brace syntax.
    #[cfg(feature = "read-typescript")]
    pub fn new(config: Config) -> Self {
        Self::with_reader(config, &schemex_syntax::TYPESCRIPT_READER)
    }

    pub fn with_reader(config: Config, reader: &'static dyn Reader) -> Self {
        Self { config, reader }
    }

    pub fn compile(&mut self, source: &str) -> Result<Value> {
        self.compile_with(source, &ReadOptions::default())
    }

    pub fn compile_with(&mut self, source: &str, options: &ReadOptions) -> Result<Value> {
        tracing::debug!(language = self.reader.language(), "compiling source");
        let tree = self.reader.read(source, options)?;
        let schema = crate::compile_tree(&tree, &mut self.config)?;
        crate::tree_to_document(&schema)
    }

    /// Register a named schema without compiling it. See [`crate::declare_tree`].
    pub fn declare(&mut self, source: &str) -> Result<Node> {
        let tree = self.reader.read(source, &ReadOptions::default())?;
        crate::declare_tree(&tree, &mut self.config)?;
        Ok(tree)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
