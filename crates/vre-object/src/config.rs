//! Conversion Configuration
//!
//! Defines limits for converting host values into objects.
//! Configuration specifies constraints only; enforcement is handled by the serializer.

/// Host conversion configuration
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Maximum nesting of arrays and maps
    pub max_depth: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig { max_depth: 128 }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }
}
