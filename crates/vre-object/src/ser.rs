//! Host To Object Conversion
//!
//! A serde serializer that rebuilds any `Serialize` host value as an `Object`.
//! Sequences become arrays, maps and structs become maps keyed by string.
//! Enums are externally tagged.

use std::collections::BTreeMap;

use serde::ser::{self, Impossible, Serialize};

use crate::coerce;
use crate::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::host::{ERROR_TOKEN, OPAQUE_TOKEN};
use crate::object::Object;

/// Convert a host value using default limits.
///
/// Only values serialized through `serialize_bytes` become `Object::Bytes`.
/// A plain `Vec<u8>` or `&[u8]` serializes as a sequence and becomes an array
/// of ints; wrap it in `ByteBuf` or `Bytes` (re-exported from `serde_bytes`),
/// or use `HostValue::Bytes`.
pub fn to_object<T: Serialize + ?Sized>(value: &T) -> ConversionResult<Object> {
    to_object_with(value, &ConversionConfig::default())
}

/// Convert a host value, enforcing the limits in `config`
pub fn to_object_with<T: Serialize + ?Sized>(
    value: &T,
    config: &ConversionConfig,
) -> ConversionResult<Object> {
    value.serialize(ObjectSerializer {
        depth: 0,
        max_depth: config.max_depth,
    })
}

#[derive(Debug, Clone, Copy)]
struct ObjectSerializer {
    depth: usize,
    max_depth: usize,
}

impl ObjectSerializer {
    /// Serializer for the elements of a composite one level down
    fn nested(self) -> ConversionResult<Self> {
        if self.depth >= self.max_depth {
            return Err(ConversionError::DepthExceeded(self.max_depth));
        }
        Ok(ObjectSerializer {
            depth: self.depth + 1,
            ..self
        })
    }
}

fn int_from<T>(v: T) -> ConversionResult<Object>
where
    T: TryInto<i64> + ToString + Copy,
{
    v.try_into()
        .map(Object::Int)
        .map_err(|_| ConversionError::IntegerOverflow(v.to_string()))
}

fn tagged(variant: &'static str, inner: Object) -> Object {
    let mut entries = BTreeMap::new();
    entries.insert(variant.to_owned(), inner);
    Object::Map(entries)
}

impl ser::Serializer for ObjectSerializer {
    type Ok = Object;
    type Error = ConversionError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = VariantBuilder<SeqBuilder>;
    type SerializeMap = MapBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = VariantBuilder<MapBuilder>;

    fn serialize_bool(self, v: bool) -> ConversionResult<Object> {
        Ok(Object::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> ConversionResult<Object> {
        Ok(Object::Int(v.into()))
    }

    fn serialize_i16(self, v: i16) -> ConversionResult<Object> {
        Ok(Object::Int(v.into()))
    }

    fn serialize_i32(self, v: i32) -> ConversionResult<Object> {
        Ok(Object::Int(v.into()))
    }

    fn serialize_i64(self, v: i64) -> ConversionResult<Object> {
        Ok(Object::Int(v))
    }

    fn serialize_i128(self, v: i128) -> ConversionResult<Object> {
        int_from(v)
    }

    fn serialize_u8(self, v: u8) -> ConversionResult<Object> {
        Ok(Object::Int(v.into()))
    }

    fn serialize_u16(self, v: u16) -> ConversionResult<Object> {
        Ok(Object::Int(v.into()))
    }

    fn serialize_u32(self, v: u32) -> ConversionResult<Object> {
        Ok(Object::Int(v.into()))
    }

    fn serialize_u64(self, v: u64) -> ConversionResult<Object> {
        int_from(v)
    }

    fn serialize_u128(self, v: u128) -> ConversionResult<Object> {
        int_from(v)
    }

    fn serialize_f32(self, v: f32) -> ConversionResult<Object> {
        Ok(Object::Float(v.into()))
    }

    fn serialize_f64(self, v: f64) -> ConversionResult<Object> {
        Ok(Object::Float(v))
    }

    fn serialize_char(self, v: char) -> ConversionResult<Object> {
        Ok(Object::Char(v))
    }

    fn serialize_str(self, v: &str) -> ConversionResult<Object> {
        Ok(Object::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> ConversionResult<Object> {
        Ok(Object::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> ConversionResult<Object> {
        Ok(Object::Undefined)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> ConversionResult<Object> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> ConversionResult<Object> {
        Ok(Object::Undefined)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> ConversionResult<Object> {
        Ok(Object::Undefined)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> ConversionResult<Object> {
        Ok(Object::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> ConversionResult<Object> {
        match name {
            ERROR_TOKEN => {
                let message = value.serialize(self)?;
                Ok(Object::Error(coerce::to_string(&message).unwrap_or_default()))
            }
            OPAQUE_TOKEN => {
                let type_name = value.serialize(self)?;
                Err(ConversionError::Opaque(coerce::to_string(&type_name).unwrap_or_default()))
            }
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> ConversionResult<Object> {
        let inner = value.serialize(self.nested()?)?;
        Ok(tagged(variant, inner))
    }

    fn serialize_seq(self, len: Option<usize>) -> ConversionResult<SeqBuilder> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
            ser: self.nested()?,
        })
    }

    fn serialize_tuple(self, len: usize) -> ConversionResult<SeqBuilder> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> ConversionResult<SeqBuilder> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> ConversionResult<VariantBuilder<SeqBuilder>> {
        Ok(VariantBuilder {
            variant,
            inner: self.nested()?.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> ConversionResult<MapBuilder> {
        Ok(MapBuilder {
            entries: BTreeMap::new(),
            pending_key: None,
            ser: self.nested()?,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> ConversionResult<MapBuilder> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> ConversionResult<VariantBuilder<MapBuilder>> {
        Ok(VariantBuilder {
            variant,
            inner: self.nested()?.serialize_map(Some(len))?,
        })
    }
}

/// Collects array elements
struct SeqBuilder {
    items: Vec<Object>,
    ser: ObjectSerializer,
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> ConversionResult<()> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> ConversionResult<Object> {
        Ok(Object::Array(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> ConversionResult<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> ConversionResult<Object> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> ConversionResult<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> ConversionResult<Object> {
        ser::SerializeSeq::end(self)
    }
}

/// Collects map entries; keys must serialize as strings
struct MapBuilder {
    entries: BTreeMap<String, Object>,
    pending_key: Option<String>,
    ser: ObjectSerializer,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> ConversionResult<()> {
        self.pending_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> ConversionResult<()> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| ConversionError::Unsupported("map value without a key".to_string()))?;
        self.entries.insert(key, value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> ConversionResult<Object> {
        Ok(Object::Map(self.entries))
    }
}

impl ser::SerializeStruct for MapBuilder {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> ConversionResult<()> {
        self.entries.insert(key.to_owned(), value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> ConversionResult<Object> {
        Ok(Object::Map(self.entries))
    }
}

/// Wraps a tuple or struct variant as `{variant: inner}`
struct VariantBuilder<B> {
    variant: &'static str,
    inner: B,
}

impl ser::SerializeTupleVariant for VariantBuilder<SeqBuilder> {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> ConversionResult<()> {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> ConversionResult<Object> {
        Ok(tagged(self.variant, ser::SerializeSeq::end(self.inner)?))
    }
}

impl ser::SerializeStructVariant for VariantBuilder<MapBuilder> {
    type Ok = Object;
    type Error = ConversionError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> ConversionResult<()> {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> ConversionResult<Object> {
        Ok(tagged(self.variant, ser::SerializeStruct::end(self.inner)?))
    }
}

/// Accepts only keys that are strings already
struct KeySerializer;

fn non_string_key(kind: &str) -> ConversionError {
    ConversionError::NonStringKey(kind.to_owned())
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = ConversionError;

    type SerializeSeq = Impossible<String, ConversionError>;
    type SerializeTuple = Impossible<String, ConversionError>;
    type SerializeTupleStruct = Impossible<String, ConversionError>;
    type SerializeTupleVariant = Impossible<String, ConversionError>;
    type SerializeMap = Impossible<String, ConversionError>;
    type SerializeStruct = Impossible<String, ConversionError>;
    type SerializeStructVariant = Impossible<String, ConversionError>;

    fn serialize_str(self, v: &str) -> ConversionResult<String> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> ConversionResult<String> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> ConversionResult<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> ConversionResult<String> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> ConversionResult<String> {
        Err(non_string_key("bool"))
    }

    fn serialize_i8(self, _v: i8) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_i16(self, _v: i16) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_i32(self, _v: i32) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_i64(self, _v: i64) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u8(self, _v: u8) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u16(self, _v: u16) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u32(self, _v: u32) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_u64(self, _v: u64) -> ConversionResult<String> {
        Err(non_string_key("integer"))
    }

    fn serialize_f32(self, _v: f32) -> ConversionResult<String> {
        Err(non_string_key("float"))
    }

    fn serialize_f64(self, _v: f64) -> ConversionResult<String> {
        Err(non_string_key("float"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> ConversionResult<String> {
        Err(non_string_key("bytes"))
    }

    fn serialize_none(self) -> ConversionResult<String> {
        Err(non_string_key("none"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> ConversionResult<String> {
        Err(non_string_key("option"))
    }

    fn serialize_unit(self) -> ConversionResult<String> {
        Err(non_string_key("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> ConversionResult<String> {
        Err(non_string_key(name))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> ConversionResult<String> {
        Err(non_string_key(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> ConversionResult<Self::SerializeSeq> {
        Err(non_string_key("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> ConversionResult<Self::SerializeTuple> {
        Err(non_string_key("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> ConversionResult<Self::SerializeTupleStruct> {
        Err(non_string_key(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> ConversionResult<Self::SerializeTupleVariant> {
        Err(non_string_key(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> ConversionResult<Self::SerializeMap> {
        Err(non_string_key("map"))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> ConversionResult<Self::SerializeStruct> {
        Err(non_string_key(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> ConversionResult<Self::SerializeStructVariant> {
        Err(non_string_key(name))
    }
}
