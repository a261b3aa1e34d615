//! Runtime Object Representation
//!
//! Defines the tagged values scripts operate on.
//! Composite variants own their elements, so a clone never aliases the original.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Runtime-specific value outside the core variants.
///
/// Implementors are shared behind an `Arc` and only ever borrowed immutably.
pub trait ExtObject: fmt::Debug + fmt::Display + Send + Sync {
    /// Type tag reported by `Object::type_name`.
    ///
    /// Core tags such as `"undefined"` are reserved; an implementation that
    /// returns one is reported as `"opaque"` instead.
    fn type_name(&self) -> &str;

    /// Whether the value counts as false in a boolean context
    fn is_falsy(&self) -> bool {
        false
    }
}

/// Type tags of the core variants
const CORE_TYPE_NAMES: [&str; 10] = [
    "int", "float", "bool", "char", "string", "bytes", "array", "map", "error", "undefined",
];

/// Runtime object
#[derive(Debug, Clone, Default)]
pub enum Object {
    /// Signed 64-bit integer
    Int(i64),

    /// IEEE 754 double
    Float(f64),

    Bool(bool),

    /// Unicode scalar value
    Char(char),

    String(String),

    Bytes(Vec<u8>),

    /// Ordered sequence
    Array(Vec<Object>),

    /// String-keyed mapping
    Map(BTreeMap<String, Object>),

    /// Error raised by a script, carrying its message
    Error(String),

    /// Absence of a value
    #[default]
    Undefined,

    /// Extension point for runtime-specific values
    Opaque(Arc<dyn ExtObject>),
}

impl Object {
    /// Build an error object from a message
    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    /// Display name of the variant
    pub fn type_name(&self) -> &str {
        match self {
            Object::Int(_) => "int",
            Object::Float(_) => "float",
            Object::Bool(_) => "bool",
            Object::Char(_) => "char",
            Object::String(_) => "string",
            Object::Bytes(_) => "bytes",
            Object::Array(_) => "array",
            Object::Map(_) => "map",
            Object::Error(_) => "error",
            Object::Undefined => "undefined",
            Object::Opaque(ext) => match ext.type_name() {
                name if CORE_TYPE_NAMES.contains(&name) => "opaque",
                name => name,
            },
        }
    }

    /// Whether the object counts as false in a boolean context
    pub fn is_falsy(&self) -> bool {
        match self {
            Object::Int(v) => *v == 0,
            Object::Float(v) => v.is_nan(),
            Object::Bool(v) => !v,
            Object::Char(c) => *c == '\0',
            Object::String(s) => s.is_empty(),
            Object::Bytes(b) => b.is_empty(),
            Object::Array(items) => items.is_empty(),
            Object::Map(entries) => entries.is_empty(),
            Object::Error(_) | Object::Undefined => true,
            Object::Opaque(ext) => ext.is_falsy(),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Object::Undefined)
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Object>> {
        match self {
            Object::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Message of an error object
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Object::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Int(a), Object::Int(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Bool(a), Object::Bool(b)) => a == b,
            (Object::Char(a), Object::Char(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Bytes(a), Object::Bytes(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Map(a), Object::Map(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Undefined, Object::Undefined) => true,
            (Object::Opaque(a), Object::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Int(v) => write!(f, "{}", v),
            Object::Float(v) => write!(f, "{}", v),
            Object::Bool(v) => write!(f, "{}", v),
            Object::Char(c) => write!(f, "{}", c),
            Object::String(s) => write!(f, "{:?}", s),
            Object::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Object::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Object::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Object::Error(message) => write!(f, "error: {}", message),
            Object::Undefined => write!(f, "<undefined>"),
            Object::Opaque(ext) => write!(f, "{}", ext),
        }
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Object::Int(v)
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Object::Float(v)
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Object::Bool(v)
    }
}

impl From<char> for Object {
    fn from(c: char) -> Self {
        Object::Char(c)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_owned())
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

impl From<BTreeMap<String, Object>> for Object {
    fn from(entries: BTreeMap<String, Object>) -> Self {
        Object::Map(entries)
    }
}
