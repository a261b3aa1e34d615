use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use vre_object::{to_object, ConversionError, ExtObject, HostValue, Object};

fn map(entries: Vec<(&str, Object)>) -> Object {
    Object::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

#[test]
fn scalars_map_onto_variants() {
    assert_eq!(to_object(&42u8), Ok(Object::Int(42)));
    assert_eq!(to_object(&-1i16), Ok(Object::Int(-1)));
    assert_eq!(to_object(&1.25f32), Ok(Object::Float(1.25)));
    assert_eq!(to_object(&true), Ok(Object::Bool(true)));
    assert_eq!(to_object(&'λ'), Ok(Object::Char('λ')));
    assert_eq!(to_object("text"), Ok(Object::from("text")));
    assert_eq!(to_object(&()), Ok(Object::Undefined));
    assert_eq!(to_object(&None::<i64>), Ok(Object::Undefined));
    assert_eq!(to_object(&Some("x")), Ok(Object::from("x")));
}

#[test]
fn json_documents_convert() {
    let doc = json!({"name": "probe", "ok": true, "tries": [1, 2.5, null]});
    let expected = map(vec![
        ("name", Object::from("probe")),
        ("ok", Object::Bool(true)),
        (
            "tries",
            Object::Array(vec![Object::Int(1), Object::Float(2.5), Object::Undefined]),
        ),
    ]);
    assert_eq!(to_object(&doc), Ok(expected));
}

#[derive(Serialize)]
struct Reading {
    sensor: String,
    values: Vec<i32>,
    note: Option<String>,
}

#[derive(Serialize)]
enum Command {
    Stop,
    Move(i32),
    Goto { x: i32, y: i32 },
    Pair(u8, u8),
}

#[test]
fn structs_become_maps() {
    let reading = Reading {
        sensor: "t1".into(),
        values: vec![3, 4],
        note: None,
    };
    let expected = map(vec![
        ("sensor", Object::from("t1")),
        ("values", Object::Array(vec![Object::Int(3), Object::Int(4)])),
        ("note", Object::Undefined),
    ]);
    assert_eq!(to_object(&reading), Ok(expected));
}

#[test]
fn enums_are_externally_tagged() {
    assert_eq!(to_object(&Command::Stop), Ok(Object::from("Stop")));
    assert_eq!(to_object(&Command::Move(-2)), Ok(map(vec![("Move", Object::Int(-2))])));
    assert_eq!(
        to_object(&Command::Goto { x: 1, y: 2 }),
        Ok(map(vec![(
            "Goto",
            map(vec![("x", Object::Int(1)), ("y", Object::Int(2))])
        )]))
    );
    assert_eq!(
        to_object(&Command::Pair(5, 6)),
        Ok(map(vec![("Pair", Object::Array(vec![Object::Int(5), Object::Int(6)]))]))
    );
}

#[test]
fn integer_keys_are_rejected() {
    let mut by_id = HashMap::new();
    by_id.insert(1, "one");
    assert_eq!(
        to_object(&by_id),
        Err(ConversionError::NonStringKey("integer".to_string()))
    );
}

struct Callback;

impl Serialize for Callback {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("function values have no object form"))
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Element {
    Number(i64),
    Function(Callback),
}

#[test]
fn unconvertible_element_fails_whole_value() {
    let elements = vec![Element::Number(1), Element::Function(Callback)];
    assert_eq!(
        to_object(&elements),
        Err(ConversionError::Unsupported(
            "function values have no object form".to_string()
        ))
    );
}

#[derive(Debug)]
struct Socket;

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<socket>")
    }
}

impl ExtObject for Socket {
    fn type_name(&self) -> &str {
        "socket"
    }
}

#[test]
fn opaque_host_values_cannot_be_rebuilt() {
    let host = HostValue::Array(vec![HostValue::Opaque(Arc::new(Socket))]);
    assert_eq!(
        to_object(&host),
        Err(ConversionError::Opaque("socket".to_string()))
    );
}
