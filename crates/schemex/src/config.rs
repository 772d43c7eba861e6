//! Compile configuration.
//!
//! A [`Config`] is threaded by `&mut` through every recursive compile step:
//! the registry it holds grows as assignments are compiled, and the method,
//! function and directive tables decide what calls mean.
//!
//! The serializable part lives in [`Options`] and can be loaded from TOML:
//! ```toml
//! schema-version = "2020"
//! ```

use crate::error::Result;
use crate::methods::{self, Call};
use crate::registry::Registry;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// `receiver.name(args...)`, also used for `$name` object directives.
pub type Method = Arc<dyn Fn(Schema, &Call<'_>, &mut Config) -> Result<Schema> + Send + Sync>;

/// `name(args...)`
pub type Function = Arc<dyn Fn(&Call<'_>, &mut Config) -> Result<Schema> + Send + Sync>;

/// Target JSON Schema draft. Only array keywords differ between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[default]
    #[serde(rename = "07")]
    Draft07,
    #[serde(rename = "2019")]
    Draft2019,
    #[serde(rename = "2020")]
    Draft2020,
}

impl SchemaVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::Draft07 => "07",
            SchemaVersion::Draft2019 => "2019",
            SchemaVersion::Draft2020 => "2020",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "07" | "7" | "draft-07" => Ok(SchemaVersion::Draft07),
            "2019" | "2019-09" => Ok(SchemaVersion::Draft2019),
            "2020" | "2020-12" => Ok(SchemaVersion::Draft2020),
            other => Err(format!("unknown schema version: {other}")),
        }
    }
}

/// Settings that can be read from a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    pub schema_version: SchemaVersion,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Options {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, OptionsError> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> std::result::Result<Self, OptionsError> {
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Everything one compile session sees.
#[derive(Clone)]
pub struct Config {
    pub schemas: Registry,
    pub methods: HashMap<String, Method>,
    pub functions: HashMap<String, Function>,
    /// `$name` keys inside object literals.
    pub object_options: HashMap<String, Method>,
    pub schema_version: SchemaVersion,
    /// Names being resolved right now, innermost last.
    pub(crate) resolving: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schemas: Registry::with_builtins(),
            methods: methods::builtin_methods(),
            functions: HashMap::new(),
            object_options: methods::builtin_directives(),
            schema_version: SchemaVersion::default(),
            resolving: Vec::new(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort();
        let mut object_options: Vec<_> = self.object_options.keys().collect();
        object_options.sort();
        f.debug_struct("Config")
            .field("schemas", &self.schemas.names().collect::<Vec<_>>())
            .field("methods", &methods)
            .field("functions", &functions)
            .field("object_options", &object_options)
            .field("schema_version", &self.schema_version)
            .finish()
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schemas(mut self, schemas: Registry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn with_schema_version(mut self, version: SchemaVersion) -> Self {
        self.schema_version = version;
        self
    }

    pub fn with_options(mut self, options: &Options) -> Self {
        self.schema_version = options.schema_version;
        self
    }

    /// Add or replace a method.
    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(Schema, &Call<'_>, &mut Config) -> Result<Schema> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Add or replace a function.
    pub fn with_function<F>(mut self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Call<'_>, &mut Config) -> Result<Schema> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    /// Add or replace a `$name` directive.
    pub fn with_object_option<F>(mut self, name: impl Into<String>, directive: F) -> Self
    where
        F: Fn(Schema, &Call<'_>, &mut Config) -> Result<Schema> + Send + Sync + 'static,
    {
        self.object_options.insert(name.into(), Arc::new(directive));
        self
    }
}
