//! Host-Side Values
//!
//! `HostValue` is what the host receives when it does not know a value's shape
//! in advance. Widening from `Object` is lossless and exhaustive.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};

use crate::object::{ExtObject, Object};

/// Newtype-struct names the object serializer recognizes.
/// Other serializers see a plain newtype around the message or type name.
pub(crate) const ERROR_TOKEN: &str = "$vre::private::Error";
pub(crate) const OPAQUE_TOKEN: &str = "$vre::private::Opaque";

/// Dynamically-typed host value
#[derive(Debug, Clone, Default)]
pub enum HostValue {
    #[default]
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<HostValue>),
    Map(BTreeMap<String, HostValue>),
    /// Script error message
    Error(String),
    /// Shared handle to a runtime-specific value
    Opaque(Arc<dyn ExtObject>),
}

impl HostValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, HostValue::Nil)
    }
}

impl From<&Object> for HostValue {
    fn from(obj: &Object) -> Self {
        match obj {
            Object::Int(v) => HostValue::Int(*v),
            Object::Float(v) => HostValue::Float(*v),
            Object::Bool(v) => HostValue::Bool(*v),
            Object::Char(c) => HostValue::Char(*c),
            Object::String(s) => HostValue::String(s.clone()),
            Object::Bytes(b) => HostValue::Bytes(b.clone()),
            Object::Array(items) => HostValue::Array(items.iter().map(HostValue::from).collect()),
            Object::Map(entries) => HostValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), HostValue::from(value)))
                    .collect(),
            ),
            Object::Error(message) => HostValue::Error(message.clone()),
            Object::Undefined => HostValue::Nil,
            Object::Opaque(ext) => HostValue::Opaque(Arc::clone(ext)),
        }
    }
}

impl Object {
    /// Widen into the host-generic representation
    pub fn to_host(&self) -> HostValue {
        HostValue::from(self)
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Nil, HostValue::Nil) => true,
            (HostValue::Int(a), HostValue::Int(b)) => a == b,
            (HostValue::Float(a), HostValue::Float(b)) => a == b,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Char(a), HostValue::Char(b)) => a == b,
            (HostValue::String(a), HostValue::String(b)) => a == b,
            (HostValue::Bytes(a), HostValue::Bytes(b)) => a == b,
            (HostValue::Array(a), HostValue::Array(b)) => a == b,
            (HostValue::Map(a), HostValue::Map(b)) => a == b,
            (HostValue::Error(a), HostValue::Error(b)) => a == b,
            (HostValue::Opaque(a), HostValue::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for HostValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HostValue::Nil => serializer.serialize_unit(),
            HostValue::Int(v) => serializer.serialize_i64(*v),
            HostValue::Float(v) => serializer.serialize_f64(*v),
            HostValue::Bool(v) => serializer.serialize_bool(*v),
            HostValue::Char(c) => serializer.serialize_char(*c),
            HostValue::String(s) => serializer.serialize_str(s),
            HostValue::Bytes(b) => serializer.serialize_bytes(b),
            HostValue::Array(items) => serializer.collect_seq(items),
            HostValue::Map(entries) => serializer.collect_map(entries),
            HostValue::Error(message) => serializer.serialize_newtype_struct(ERROR_TOKEN, message),
            HostValue::Opaque(ext) => serializer.serialize_newtype_struct(OPAQUE_TOKEN, ext.type_name()),
        }
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        HostValue::Int(v.into())
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}

impl From<char> for HostValue {
    fn from(c: char) -> Self {
        HostValue::Char(c)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(b: Vec<u8>) -> Self {
        HostValue::Bytes(b)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(items: Vec<HostValue>) -> Self {
        HostValue::Array(items)
    }
}

impl From<BTreeMap<String, HostValue>> for HostValue {
    fn from(entries: BTreeMap<String, HostValue>) -> Self {
        HostValue::Map(entries)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(HostValue::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_is_recursive() {
        let mut entries = BTreeMap::new();
        entries.insert("xs".to_string(), Object::Array(vec![Object::Int(1), Object::Undefined]));
        let widened = Object::Map(entries).to_host();

        let mut expected = BTreeMap::new();
        expected.insert("xs".to_string(), HostValue::Array(vec![HostValue::Int(1), HostValue::Nil]));
        assert_eq!(widened, HostValue::Map(expected));
    }

    #[test]
    fn error_widens_to_message() {
        assert_eq!(Object::error("no such key").to_host(), HostValue::Error("no such key".into()));
    }

    #[test]
    fn other_serializers_see_plain_values() {
        let value = HostValue::Array(vec![
            HostValue::Nil,
            HostValue::from("a"),
            HostValue::Error("boom".into()),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[null,"a","boom"]"#);
    }

    #[test]
    fn option_maps_none_to_nil() {
        assert!(HostValue::from(None::<i64>).is_nil());
        assert_eq!(HostValue::from(Some(3)), HostValue::Int(3));
    }
}
