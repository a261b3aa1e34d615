//! Object Coercions
//!
//! Best-effort conversions from an object to one host shape.
//! `None` means the object cannot be coerced; the caller picks the fallback.

use crate::object::Object;

/// Coerce to a platform-width integer
pub fn to_int(obj: &Object) -> Option<isize> {
    to_int64(obj).and_then(|v| isize::try_from(v).ok())
}

/// Coerce to a 64-bit integer.
///
/// Floats truncate toward zero, chars yield their code point, booleans 1 or 0,
/// and strings must parse as a base-10 integer in full.
pub fn to_int64(obj: &Object) -> Option<i64> {
    match obj {
        Object::Int(v) => Some(*v),
        Object::Float(v) => Some(*v as i64),
        Object::Char(c) => Some(i64::from(u32::from(*c))),
        Object::Bool(b) => Some(i64::from(*b)),
        Object::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn to_float64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Int(v) => Some(*v as f64),
        Object::Float(v) => Some(*v),
        Object::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerce to a char; integers must be a valid Unicode scalar value
pub fn to_rune(obj: &Object) -> Option<char> {
    match obj {
        Object::Int(v) => u32::try_from(*v).ok().and_then(char::from_u32),
        Object::Char(c) => Some(*c),
        _ => None,
    }
}

/// Truthiness of any object; never fails
pub fn to_bool(obj: &Object) -> Option<bool> {
    Some(!obj.is_falsy())
}

/// Raw content for strings, display form for everything but undefined
pub fn to_string(obj: &Object) -> Option<String> {
    match obj {
        Object::Undefined => None,
        Object::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn to_bytes(obj: &Object) -> Option<Vec<u8>> {
    match obj {
        Object::Bytes(b) => Some(b.clone()),
        Object::String(s) => Some(s.as_bytes().to_vec()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn int_from_scalars() {
        assert_eq!(to_int64(&Object::Int(-7)), Some(-7));
        assert_eq!(to_int64(&Object::Float(2.9)), Some(2));
        assert_eq!(to_int64(&Object::Float(-2.9)), Some(-2));
        assert_eq!(to_int64(&Object::Char('A')), Some(65));
        assert_eq!(to_int64(&Object::Bool(true)), Some(1));
        assert_eq!(to_int64(&Object::Bool(false)), Some(0));
        assert_eq!(to_int64(&Object::from("42")), Some(42));
        assert_eq!(to_int(&Object::from("-3")), Some(-3));
    }

    #[test]
    fn int_rejects_non_numeric() {
        assert_eq!(to_int64(&Object::from("4 2")), None);
        assert_eq!(to_int64(&Object::from(" 42")), None);
        assert_eq!(to_int64(&Object::Map(BTreeMap::new())), None);
        assert_eq!(to_int64(&Object::Array(vec![Object::Int(1)])), None);
        assert_eq!(to_int64(&Object::Undefined), None);
        assert_eq!(to_int(&Object::error("x")), None);
    }

    #[test]
    fn float_coercion() {
        assert_eq!(to_float64(&Object::Int(3)), Some(3.0));
        assert_eq!(to_float64(&Object::from("2.5")), Some(2.5));
        assert_eq!(to_float64(&Object::Bool(true)), None);
        assert_eq!(to_float64(&Object::Char('a')), None);
    }

    #[test]
    fn rune_coercion() {
        assert_eq!(to_rune(&Object::Int(0x263A)), Some('☺'));
        assert_eq!(to_rune(&Object::Char('z')), Some('z'));
        assert_eq!(to_rune(&Object::Int(-1)), None);
        assert_eq!(to_rune(&Object::Int(0xD800)), None);
        assert_eq!(to_rune(&Object::from("z")), None);
    }

    #[test]
    fn bool_follows_falsiness() {
        assert_eq!(to_bool(&Object::Int(0)), Some(false));
        assert_eq!(to_bool(&Object::from("no")), Some(true));
        assert_eq!(to_bool(&Object::Undefined), Some(false));
        assert_eq!(to_bool(&Object::error("x")), Some(false));
    }

    #[test]
    fn string_coercion() {
        assert_eq!(to_string(&Object::from("plain")), Some("plain".to_string()));
        assert_eq!(to_string(&Object::Int(12)), Some("12".to_string()));
        assert_eq!(to_string(&Object::Float(1.5)), Some("1.5".to_string()));
        assert_eq!(
            to_string(&Object::Array(vec![Object::from("a"), Object::Int(1)])),
            Some(r#"["a", 1]"#.to_string())
        );
        assert_eq!(to_string(&Object::Undefined), None);
    }

    #[test]
    fn bytes_coercion() {
        assert_eq!(to_bytes(&Object::Bytes(vec![0, 255])), Some(vec![0, 255]));
        assert_eq!(to_bytes(&Object::from("hi")), Some(b"hi".to_vec()));
        assert_eq!(to_bytes(&Object::Int(1)), None);
    }
}
