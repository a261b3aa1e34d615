//! Vyauma Runtime Engine - Object Model
//!
//! Tagged runtime objects and the conversions between them and host values.

pub mod coerce;
pub mod config;
pub mod error;
pub mod host;
pub mod object;
pub mod ser;

// Re-export commonly used types
pub use config::ConversionConfig;
pub use error::{ConversionError, ConversionResult, ScriptError};
pub use host::HostValue;
pub use object::{ExtObject, Object};
pub use ser::{to_object, to_object_with};
pub use serde_bytes::{ByteBuf, Bytes};
