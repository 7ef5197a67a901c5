//! Object graph walker: turns live composite values into owned, acyclic,
//! depth-bounded snapshot trees.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use super::value::{ObjectRef, Value};

/// Deepest level that is expanded; anything below becomes [`MAX_DEPTH_NAME`].
pub const MAX_DEPTH: usize = 10;

/// Node name used in place of objects nested deeper than [`MAX_DEPTH`].
pub const MAX_DEPTH_NAME: &str = "MAX_DEPTH";

/// Marker for a field that points back at the object holding it.
pub const SELF_MARKER: &str = "<self>";

/// Snapshot of one composite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walkable {
    pub name: String,
    pub fields: IndexMap<String, Captured>,
}

impl Walkable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    fn max_depth() -> Self {
        Self::new(MAX_DEPTH_NAME)
    }

    pub fn is_max_depth(&self) -> bool {
        self.name == MAX_DEPTH_NAME && self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Captured> {
        self.fields.get(name)
    }
}

/// One captured value: a copy, never a reference into the traced program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Captured {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Captured>),
    Walkable(Walkable),
    /// Passed through from an opaque host value. Encoding it fails.
    #[serde(skip_deserializing, serialize_with = "reject_opaque")]
    Opaque(String),
}

impl Captured {
    pub fn as_walkable(&self) -> Option<&Walkable> {
        match self {
            Captured::Walkable(walkable) => Some(walkable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Captured::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Captured::Int(i) => Some(*i),
            _ => None,
        }
    }
}

#[allow(clippy::ptr_arg)]
fn reject_opaque<S: Serializer>(type_name: &String, _serializer: S) -> Result<S::Ok, S::Error> {
    Err(serde::ser::Error::custom(format!(
        "value of type `{type_name}` has no serializable form"
    )))
}

/// Marker rendered in place of an already-visited or unexpanded object.
pub fn reference_marker(object: &ObjectRef) -> String {
    format!("<{}>", object.type_name())
}

/// Deep snapshot of one variable. Each call starts with a fresh visited set.
pub fn walk(value: &Value) -> Captured {
    match value {
        Value::Object(object) => {
            let mut visited = Visited::new();
            Captured::Walkable(walk_object(object, 0, &mut visited))
        }
        other => copy_through(other),
    }
}

/// Shallow snapshot: primitives copied, composites replaced by a marker.
pub fn shallow(value: &Value) -> Captured {
    copy_through(value)
}

/// Objects seen during one top-level walk, keyed by identity.
///
/// Holding the handles keeps every visited allocation alive until the walk
/// ends, so an address cannot be reused by a different object mid-walk.
type Visited = HashMap<usize, ObjectRef>;

fn walk_object(root: &ObjectRef, depth: usize, visited: &mut Visited) -> Walkable {
    visited.insert(root.identity(), root.clone());

    if depth > MAX_DEPTH {
        return Walkable::max_depth();
    }

    let mut fields = IndexMap::new();
    for (name, value) in root.fields() {
        let captured = match &value {
            Value::Object(child) if child.same_object(root) => Captured::Str(SELF_MARKER.into()),
            Value::Object(child) if visited.contains_key(&child.identity()) => {
                Captured::Str(reference_marker(child))
            }
            Value::Object(child) => Captured::Walkable(walk_object(child, depth + 1, visited)),
            other => copy_through(other),
        };
        fields.insert(name, captured);
    }

    Walkable {
        name: root.type_name().to_string(),
        fields,
    }
}

fn copy_through(value: &Value) -> Captured {
    match value {
        Value::None => Captured::Null,
        Value::Bool(b) => Captured::Bool(*b),
        Value::Int(i) => Captured::Int(*i),
        Value::Float(f) => Captured::Float(*f),
        Value::Str(s) => Captured::Str(s.clone()),
        Value::List(items) => Captured::List(items.iter().map(copy_through).collect()),
        Value::Object(object) => Captured::Str(reference_marker(object)),
        Value::Opaque(opaque) => Captured::Opaque(opaque.type_name().to_string()),
    }
}
