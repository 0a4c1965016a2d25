//! The in-memory representation of a parsed JSON document.

/// A parsed JSON value.
///
/// `true` and `false` are distinct variants rather than a single `Bool`
/// carrier so that the kind of a value is exactly its variant; [`Value::as_bool`]
/// bridges both for callers that only care about the boolean.
///
/// Objects are not a hashmap or anything that relies on key equality: member
/// order is insertion order and duplicate keys are retained as-is, so
/// downstream users can report on semantically questionable (but
/// grammatically well-formed) documents instead of silently losing members.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    True,
    False,
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// A short human-readable description of the variant.
    pub fn kind_desc(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::True => "true",
            Value::False => "false",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean if this is `True` or `False`, `None` otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`, `None` otherwise.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the decoded string contents if this is a `String`, `None`
    /// otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an `Array`, `None` otherwise.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the members if this is an `Object`, `None` otherwise. Members
    /// keep their source order, duplicates included.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up an object member by key. When the document contains duplicate
    /// keys, the first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Index into an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(elements) => elements.get(index),
            _ => None,
        }
    }
}
