//! The dynamic value model validated by the engine.
//!
//! [`Value`] distinguishes the container kinds a validator may ask for
//! (vectors, lists, sets and maps with arbitrary keys) and carries keywords
//! alongside strings. Maps and sets keep insertion order, so a path index into
//! a set is stable. Values convert losslessly from [`serde_json::Value`].

use indexmap::{IndexMap, IndexSet};
use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use crate::path::PathSegment;

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A symbolic name, rendered with a leading `:`.
    Keyword(String),
    Vector(Vec<Value>),
    List(Vec<Value>),
    Set(IndexSet<Value>),
    Map(IndexMap<Value, Value>),
}

impl Value {
    /// Creates a keyword value.
    pub fn keyword(name: impl Into<String>) -> Self {
        Value::Keyword(name.into())
    }

    /// Creates a vector from the given items.
    pub fn vector<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Vector(items.into_iter().map(Into::into).collect())
    }

    /// Creates a list from the given items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a set from the given items, keeping first-insertion order.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Creates a map from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value of an `Int` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Value, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the child at `segment`, or `None` when there is none.
    ///
    /// Maps resolve a field against a keyword key first and a string key
    /// second, and an index against an integer key. Vectors and lists resolve
    /// by position, sets by insertion-order position.
    pub fn get(&self, segment: &PathSegment) -> Option<&Value> {
        match (self, segment) {
            (Value::Map(map), PathSegment::Field(name)) => map
                .get(&Value::Keyword(name.clone()))
                .or_else(|| map.get(&Value::Str(name.clone()))),
            (Value::Map(map), PathSegment::Index(idx)) => i64::try_from(*idx)
                .ok()
                .and_then(|i| map.get(&Value::Int(i))),
            (Value::Vector(items) | Value::List(items), PathSegment::Index(idx)) => items.get(*idx),
            (Value::Set(items), PathSegment::Index(idx)) => items.get_index(*idx),
            _ => None,
        }
    }

    /// Navigates through `path`, yielding `Nil` for anything missing.
    pub fn get_in(&self, path: &[PathSegment]) -> Value {
        let mut current = self;
        for segment in path {
            match current.get(segment) {
                Some(child) => current = child,
                None => return Value::Nil,
            }
        }
        current.clone()
    }

    /// Returns this value with `value` stored at `segment`.
    ///
    /// Non-container receivers are replaced by a map (for a field) or a
    /// vector padded with `Nil` (for an index).
    pub fn assoc(self, segment: &PathSegment, value: Value) -> Value {
        match (self, segment) {
            (Value::Map(mut map), PathSegment::Field(name)) => {
                let keyword = Value::Keyword(name.clone());
                let key = if map.contains_key(&keyword) {
                    keyword
                } else {
                    Value::Str(name.clone())
                };
                map.insert(key, value);
                Value::Map(map)
            }
            (Value::Map(mut map), PathSegment::Index(idx)) => {
                map.insert(index_key(*idx), value);
                Value::Map(map)
            }
            (Value::Vector(items), PathSegment::Index(idx)) => {
                Value::Vector(set_or_push(items, *idx, value))
            }
            (Value::List(items), PathSegment::Index(idx)) => {
                Value::List(set_or_push(items, *idx, value))
            }
            (Value::Set(mut items), PathSegment::Index(_)) => {
                items.insert(value);
                Value::Set(items)
            }
            (_, PathSegment::Field(name)) => {
                let mut map = IndexMap::new();
                map.insert(Value::Str(name.clone()), value);
                Value::Map(map)
            }
            (_, PathSegment::Index(idx)) => {
                let mut items = vec![Value::Nil; *idx];
                items.push(value);
                Value::Vector(items)
            }
        }
    }

    /// Returns this value with `value` stored at the end of `path`,
    /// creating intermediate containers as needed.
    pub fn assoc_in(self, path: &[PathSegment], value: Value) -> Value {
        match path.split_first() {
            None => value,
            Some((segment, rest)) => {
                let child = self.get(segment).cloned().unwrap_or_default();
                let updated = child.assoc_in(rest, value);
                self.assoc(segment, updated)
            }
        }
    }

    /// Returns this container with `value` stored under `key`.
    ///
    /// Maps insert `key` as-is, sequences treat an integer `key` as a
    /// position, and sets ignore `key` and insert `value`.
    pub fn insert_key(self, key: Value, value: Value) -> Value {
        match self {
            Value::Map(mut map) => {
                map.insert(key, value);
                Value::Map(map)
            }
            Value::Set(mut items) => {
                items.insert(value);
                Value::Set(items)
            }
            other => other.assoc(&PathSegment::from_key(&key), value),
        }
    }

    /// Converts this value into JSON.
    ///
    /// Keywords become strings, lists and sets become arrays, non-finite
    /// floats become `null`, and non-string map keys are rendered.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Nil => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Str(s) | Value::Keyword(s) => Json::String(s.clone()),
            Value::Vector(items) | Value::List(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Set(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (PathSegment::from_key(k).to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn index_key(idx: usize) -> Value {
    match i64::try_from(idx) {
        Ok(i) => Value::Int(i),
        Err(_) => Value::Str(idx.to_string()),
    }
}

fn set_or_push(mut items: Vec<Value>, idx: usize, value: Value) -> Vec<Value> {
    if idx < items.len() {
        items[idx] = value;
    } else {
        items.push(value);
    }
    items
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) | Value::Keyword(s) => s.hash(state),
            Value::Vector(items) | Value::List(items) => items.hash(state),
            // Set and map equality ignore order, so their hashes must too.
            Value::Set(items) => {
                state.write_usize(items.len());
                state.write_u64(unordered_hash(items.iter()));
            }
            Value::Map(map) => {
                state.write_usize(map.len());
                state.write_u64(unordered_hash(map.iter()));
            }
        }
    }
}

fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items.fold(0u64, |acc, item| {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Keyword(k) => write!(f, ":{}", k),
            Value::Vector(items) => write_seq(f, "[", items.iter(), "]"),
            Value::List(items) => write_seq(f, "(", items.iter(), ")"),
            Value::Set(items) => write_seq(f, "#{", items.iter(), "}"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::Vector(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Vector(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Nil)
    }
}
