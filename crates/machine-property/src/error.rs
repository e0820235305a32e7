//! Error types for values, specs, and the property registry.

use thiserror::Error;

use crate::model::{Component, Unit};

/// Error while creating or storing a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("value length {len} exceeds maximum {max}")]
    LengthExceedsLimit { len: usize, max: usize },

    #[error("failed to allocate {len} bytes of value storage")]
    AllocationFailed { len: usize },
}

/// Error while constructing a property spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("failed to copy {field} value: {source}")]
    Value {
        field: &'static str,
        #[source]
        source: ValueError,
    },
}

/// Error while registering, reading, or writing properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("property code 0x{code:02X} is already registered")]
    DuplicateCode { code: u8 },

    #[error("property code 0x{code:02X} not found")]
    PropertyNotFound { code: u8 },

    #[error("{component} of {unit} is already registered")]
    DuplicateComponent { unit: Unit, component: Component },

    #[error("{component} of {unit} not found")]
    ComponentNotFound { unit: Unit, component: Component },

    #[error("property 0x{code:02X} is not readable")]
    NotReadable { code: u8 },

    #[error("property 0x{code:02X} is not writable")]
    NotWritable { code: u8 },

    #[error("value {value} is outside the range of property 0x{code:02X}")]
    OutOfRange { code: u8, value: String },

    #[error(transparent)]
    Value(#[from] ValueError),
}
