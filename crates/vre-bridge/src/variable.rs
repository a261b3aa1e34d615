//! Named Variables
//!
//! A name bound to one object, shared between the host and a script.
//! Accessors never fail: an object that cannot be coerced reads as the zero value.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};
use vre_object::{coerce, ConversionConfig, ConversionResult, HostValue, Object, ScriptError};

/// User-defined variable for a script
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    value: Object,
}

impl Variable {
    /// Create a variable from any serializable host value.
    ///
    /// Byte data must go through `ByteBuf`, `Bytes` or `HostValue::Bytes` to
    /// become a bytes object; a bare `Vec<u8>` converts to an array of ints.
    pub fn new<T: Serialize>(name: impl Into<String>, value: T) -> ConversionResult<Self> {
        Self::with_config(name, value, &ConversionConfig::default())
    }

    /// Create a variable, enforcing the limits in `config` during conversion
    pub fn with_config<T: Serialize>(
        name: impl Into<String>,
        value: T,
        config: &ConversionConfig,
    ) -> ConversionResult<Self> {
        let name = name.into();
        match vre_object::to_object_with(&value, config) {
            Ok(value) => {
                trace!(variable = %name, value_type = value.type_name(), "variable created");
                Ok(Variable { name, value })
            }
            Err(err) => {
                debug!(variable = %name, error = %err, "host value has no object form");
                Err(err)
            }
        }
    }

    /// Wrap an object produced by the runtime
    pub fn from_object(name: impl Into<String>, value: Object) -> Self {
        Variable {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host-generic form of the value
    pub fn value(&self) -> HostValue {
        self.value.to_host()
    }

    /// Type name of the underlying object
    pub fn value_type(&self) -> &str {
        self.value.type_name()
    }

    /// Returns 0 if the value is not convertible to int
    pub fn int(&self) -> isize {
        self.coerced("int", coerce::to_int(&self.value))
    }

    /// Returns 0 if the value is not convertible to i64
    pub fn int64(&self) -> i64 {
        self.coerced("int64", coerce::to_int64(&self.value))
    }

    /// Returns 0.0 if the value is not convertible to f64
    pub fn float(&self) -> f64 {
        self.coerced("float", coerce::to_float64(&self.value))
    }

    /// Returns `'\0'` if the value is not convertible to char
    pub fn char(&self) -> char {
        self.coerced("char", coerce::to_rune(&self.value))
    }

    pub fn bool(&self) -> bool {
        self.coerced("bool", coerce::to_bool(&self.value))
    }

    /// Returns an empty string for undefined
    pub fn string(&self) -> String {
        self.coerced("string", coerce::to_string(&self.value))
    }

    /// Returns an empty vector if the value is neither bytes nor a string
    pub fn bytes(&self) -> Vec<u8> {
        self.coerced("bytes", coerce::to_bytes(&self.value))
    }

    /// Widened elements of an array; empty for any other kind
    pub fn array(&self) -> Vec<HostValue> {
        let items: Option<Vec<HostValue>> = self
            .value
            .as_array()
            .map(|items| items.iter().map(HostValue::from).collect());
        self.coerced("array", items)
    }

    /// Widened entries of a map; empty for any other kind
    pub fn map(&self) -> BTreeMap<String, HostValue> {
        let entries: Option<BTreeMap<String, HostValue>> = self.value.as_map().map(|entries| {
            entries
                .iter()
                .map(|(key, value)| (key.clone(), HostValue::from(value)))
                .collect()
        });
        self.coerced("map", entries)
    }

    /// The script's error, if the value is an error object
    pub fn error(&self) -> Option<ScriptError> {
        self.value.as_error().map(ScriptError::new)
    }

    /// Copy of the underlying object.
    ///
    /// Changes to the copy never reach the variable.
    pub fn object(&self) -> Object {
        self.value.clone()
    }

    pub fn is_undefined(&self) -> bool {
        self.value.is_undefined()
    }

    fn coerced<T: Default>(&self, shape: &str, coerced: Option<T>) -> T {
        coerced.unwrap_or_else(|| {
            trace!(
                variable = %self.name,
                value_type = self.value_type(),
                shape,
                "not coercible, using zero value"
            );
            T::default()
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}
