//! Compiled schema trees.
//!
//! A [`Schema`] is a JSON-shaped value: maps keep insertion order so the
//! produced documents list keys the way they were written. One extra variant,
//! [`Schema::Undefined`], marks a value that removes its key when applied.

use indexmap::IndexMap;
use schemex_syntax::{Comment, Span};
use serde_json::{Number, Value};

/// String-keyed, insertion-ordered schema map.
pub type Map = IndexMap<String, Schema>;

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Schema>),
    Object(Map),
    /// Written as `undefined`; removes the key it is assigned to.
    Undefined(Span),
}

/// What a compiled schema describes, judged from its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Const,
    /// `anyOf` / `allOf` / `oneOf`
    Composite,
    /// `if` / `then` / `else`
    Conditional,
    /// Anything else, including non-map values.
    Raw,
}

impl Schema {
    /// Number value; integral values are stored as integers.
    pub fn number(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            return Schema::Number(Number::from(value as i64));
        }
        Number::from_f64(value).map_or(Schema::Null, Schema::Number)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Schema::String(value.into())
    }

    /// `["a", "b"]`
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Array(items.into_iter().map(|s| Schema::String(s.into())).collect())
    }

    /// Build an object schema from key/value pairs.
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Schema::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Schema::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Schema::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_object(self) -> Option<Map> {
        match self {
            Schema::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Schema::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// The `type` keyword, when it is a string.
    pub fn type_name(&self) -> Option<&str> {
        self.get("type").and_then(Schema::as_str)
    }

    /// `type` for messages: the keyword value or `undefined`.
    pub fn type_label(&self) -> &str {
        self.type_name().unwrap_or("undefined")
    }

    /// Values a method may not return.
    pub fn is_falsy(&self) -> bool {
        matches!(self, Schema::Null | Schema::Undefined(_))
    }

    pub fn kind(&self) -> SchemaKind {
        let Some(map) = self.as_object() else {
            return SchemaKind::Raw;
        };
        match self.type_name() {
            Some("object") => return SchemaKind::Object,
            Some("array") => return SchemaKind::Array,
            Some("string") => return SchemaKind::String,
            Some("number" | "integer") => return SchemaKind::Number,
            _ => {}
        }
        if map.contains_key("const") {
            SchemaKind::Const
        } else if ["anyOf", "allOf", "oneOf"].iter().any(|k| map.contains_key(*k)) {
            SchemaKind::Composite
        } else if map.contains_key("if") {
            SchemaKind::Conditional
        } else {
            SchemaKind::Raw
        }
    }

    /// Set `title`, replacing an existing one in place or inserting it first.
    pub fn set_title(&mut self, name: &str) {
        if let Schema::Object(map) = self {
            match map.get_mut("title") {
                Some(title) => *title = Schema::string(name),
                None => {
                    map.shift_insert(0, "title".to_string(), Schema::string(name));
                }
            }
        }
    }

    /// Prepend a `description` built from comments, unless one is present.
    pub fn describe(&mut self, comments: &[Comment]) {
        if comments.is_empty() {
            return;
        }
        if let Schema::Object(map) = self {
            if map.contains_key("description") {
                return;
            }
            let text = comments
                .iter()
                .map(|c| c.text.trim())
                .collect::<Vec<_>>()
                .join("\n");
            map.shift_insert(0, "description".to_string(), Schema::String(text));
        }
    }

    /// Drop `title` and `description`.
    pub fn strip_names(&mut self) {
        if let Schema::Object(map) = self {
            map.shift_remove("title");
            map.shift_remove("description");
        }
    }
}

/// Names listed under `required`, ignoring anything that isn't a string.
pub fn required_names(map: &Map) -> Vec<String> {
    match map.get("required") {
        Some(Schema::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn set_required(map: &mut Map, names: Vec<String>) {
    map.insert("required".to_string(), Schema::string_list(names));
}

/// Add a name to `required` unless present, or remove it.
pub fn toggle_required(map: &mut Map, name: &str, required: bool) {
    let mut names = required_names(map);
    let present = names.iter().any(|n| n == name);
    if required && !present {
        names.push(name.to_string());
    } else if !required && present {
        names.retain(|n| n != name);
    } else {
        return;
    }
    set_required(map, names);
}

pub fn properties(map: &Map) -> Option<&Map> {
    map.get("properties").and_then(Schema::as_object)
}

pub fn insert_property(map: &mut Map, name: String, value: Schema) {
    match map.get_mut("properties") {
        Some(Schema::Object(properties)) => {
            properties.insert(name, value);
        }
        _ => {
            map.insert("properties".to_string(), Schema::object([(name, value)]));
        }
    }
}

pub fn remove_property(map: &mut Map, name: &str) {
    if let Some(Schema::Object(properties)) = map.get_mut("properties") {
        properties.shift_remove(name);
    }
}

/// Insert or, for a removal marker, delete.
pub fn apply_entry(map: &mut Map, key: String, value: Schema) {
    match value {
        Schema::Undefined(_) => {
            map.shift_remove(&key);
        }
        value => {
            map.insert(key, value);
        }
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Schema::Null,
            Value::Bool(b) => Schema::Bool(b),
            Value::Number(n) => Schema::Number(n),
            Value::String(s) => Schema::String(s),
            Value::Array(items) => Schema::Array(items.into_iter().map(Schema::from).collect()),
            Value::Object(map) => {
                Schema::Object(map.into_iter().map(|(k, v)| (k, Schema::from(v))).collect())
            }
        }
    }
}
