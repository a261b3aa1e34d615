//! Vyauma Runtime Engine - Variable Bridge
//!
//! Named variables exchanged between a host program and scripts.

pub mod variable;

pub use variable::Variable;
pub use vre_object::{
    ByteBuf, Bytes, ConversionConfig, ConversionError, ConversionResult, ExtObject, HostValue, Object, ScriptError,
};
