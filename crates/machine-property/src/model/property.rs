//! Properties: a code, a spec, and a live value.

use std::fmt;

use crate::error::ValueError;
use crate::model::PropertySpec;
use crate::value::{ByteValue, MutableByteValue};

/// A single property of a component.
///
/// The spec is fixed for the life of the property. The live value can be
/// replaced through the registry, which checks permission and range first.
pub struct Property {
    code: u8,
    spec: PropertySpec,
    value: MutableByteValue,
}

impl Property {
    pub fn new(code: u8, spec: PropertySpec, value: ByteValue) -> Self {
        Self {
            code,
            spec,
            value: MutableByteValue::from(value),
        }
    }

    /// Creates a property whose live value is a copy of the spec's initial
    /// value.
    pub fn with_initial_value(code: u8, spec: PropertySpec) -> Result<Self, ValueError> {
        let value = spec.init_val().try_clone()?;
        Ok(Self::new(code, spec, value))
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn spec(&self) -> &PropertySpec {
        &self.spec
    }

    /// Returns the current live value.
    pub fn value(&self) -> &ByteValue {
        &self.value
    }

    pub(crate) fn live_value(&self) -> &MutableByteValue {
        &self.value
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ code: 0x{:02X}, spec: {}, value: {} }}",
            self.code, self.spec, self.value
        )
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("code", &self.code)
            .field("spec", &self.spec)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Permission, Resolution};
    use crate::value::storage_fault;

    fn spec(init: &[u8]) -> PropertySpec {
        PropertySpec::create(Permission::ReadWrite, Resolution::X1, init, &[], &[]).unwrap()
    }

    #[test]
    fn test_new() {
        let value = ByteValue::create(b"hi").unwrap();
        let prop = Property::new(0x10, spec(b"init"), value);
        assert_eq!(prop.code(), 0x10);
        assert_eq!(prop.value().bytes(), b"hi".to_vec());
        assert_eq!(prop.spec().init_val().bytes(), b"init".to_vec());
    }

    #[test]
    fn test_with_initial_value() {
        let prop = Property::with_initial_value(1, spec(b"initial")).unwrap();
        assert_eq!(prop.value(), prop.spec().init_val());

        // The live value is a separate copy
        prop.live_value().set(b"changed").unwrap();
        assert_eq!(prop.spec().init_val().bytes(), b"initial".to_vec());
    }

    #[test]
    fn test_with_initial_value_allocation_failure() {
        let spec = spec(b"initial");
        storage_fault::fail_next_allocation();
        let err = Property::with_initial_value(1, spec).unwrap_err();
        assert_eq!(err, ValueError::AllocationFailed { len: 7 });
    }

    #[test]
    fn test_display() {
        let spec = PropertySpec::create(
            Permission::ReadOnly,
            Resolution::X1,
            &[0xE7, 0x03],
            &[0x00],
            &[0xFF, 0xFF],
        )
        .unwrap();
        let prop = Property::with_initial_value(0xA5, spec).unwrap();
        assert_eq!(
            prop.to_string(),
            "{ code: 0xA5, spec: { format: numeric(0), permission: read-only(2), \
             resolution: x1(0), initial_value: [ 0xE7 0x03 ], minimum_value: [ 0x00 ], \
             maximum_value: [ 0xFF 0xFF ] }, value: [ 0xE7 0x03 ] }"
        );
    }
}
