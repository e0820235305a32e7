//! Property specifications.

use std::fmt;

use crate::error::{SpecError, ValueError};
use crate::model::{Format, Permission, Resolution};
use crate::validate;
use crate::value::ByteValue;

const PERMISSION_SHIFT: u8 = 0;
const FORMAT_SHIFT: u8 = PERMISSION_SHIFT + Permission::BITS;
const RESOLUTION_SHIFT: u8 = FORMAT_SHIFT + Format::BITS;

/// Immutable description of a property's value.
///
/// Holds the initial, minimum, and maximum values together with a single
/// packed byte:
///
/// ```text
/// bit   7   6 5 4   3 2   1 0
///      [0] [resol] [fmt] [perm]
/// ```
///
/// The format is inferred from the bounds once, at construction, and is
/// never set independently.
pub struct PropertySpec {
    fragment: u8,
    init_val: ByteValue,
    min_val: ByteValue,
    max_val: ByteValue,
}

impl PropertySpec {
    /// Creates a spec from raw initial, minimum, and maximum bytes.
    ///
    /// All three are copied. Nothing is kept if any copy fails.
    pub fn create(
        permission: Permission,
        resolution: Resolution,
        init: &[u8],
        min: &[u8],
        max: &[u8],
    ) -> Result<Self, SpecError> {
        let init_val = copy_field("initial", ByteValue::create(init))?;
        let min_val = copy_field("minimum", ByteValue::create(min))?;
        let max_val = copy_field("maximum", ByteValue::create(max))?;
        let format = Format::from_bounds(min, max);
        Ok(Self::assemble(permission, resolution, format, init_val, min_val, max_val))
    }

    /// Creates a spec from existing values, copying each of them.
    pub fn from_values(
        permission: Permission,
        resolution: Resolution,
        init: &ByteValue,
        min: &ByteValue,
        max: &ByteValue,
    ) -> Result<Self, SpecError> {
        let init_val = copy_field("initial", init.try_clone())?;
        let min_val = copy_field("minimum", min.try_clone())?;
        let max_val = copy_field("maximum", max.try_clone())?;
        // The copies are private, so their bytes cannot change under us.
        let format = Format::from_bounds(&min_val.bytes(), &max_val.bytes());
        Ok(Self::assemble(permission, resolution, format, init_val, min_val, max_val))
    }

    fn assemble(
        permission: Permission,
        resolution: Resolution,
        format: Format,
        init_val: ByteValue,
        min_val: ByteValue,
        max_val: ByteValue,
    ) -> Self {
        let fragment = (permission as u8) << PERMISSION_SHIFT
            | (format as u8) << FORMAT_SHIFT
            | (resolution as u8) << RESOLUTION_SHIFT;
        Self {
            fragment,
            init_val,
            min_val,
            max_val,
        }
    }

    pub fn format(&self) -> Format {
        Format::from_raw(self.fragment >> FORMAT_SHIFT)
    }

    pub fn permission(&self) -> Permission {
        Permission::from_raw(self.fragment >> PERMISSION_SHIFT)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::from_raw(self.fragment >> RESOLUTION_SHIFT)
    }

    /// Returns the packed format, permission, and resolution byte.
    pub fn fragment(&self) -> u8 {
        self.fragment
    }

    pub fn init_val(&self) -> &ByteValue {
        &self.init_val
    }

    pub fn min_val(&self) -> &ByteValue {
        &self.min_val
    }

    pub fn max_val(&self) -> &ByteValue {
        &self.max_val
    }

    /// Returns true if `value` is legal for this spec.
    ///
    /// See [`validate::is_within_range`].
    pub fn is_within_range(&self, value: &ByteValue) -> bool {
        validate::is_within_range(self, value)
    }

    /// Decodes `value` as a raw integer if this is a Numeric spec.
    pub fn decode_numeric(&self, value: &ByteValue) -> Option<i32> {
        if self.format() != Format::Numeric {
            return None;
        }
        value.with_bytes(validate::decode_numeric)
    }

    /// Decodes `value` and applies this spec's resolution.
    ///
    /// Returns `None` unless this is a Numeric spec and `value` is 1 to 4
    /// bytes long. The result is not range checked.
    pub fn to_real(&self, value: &ByteValue) -> Option<f64> {
        self.decode_numeric(value)
            .map(|raw| self.resolution().to_real(raw))
    }
}

fn copy_field(field: &'static str, result: Result<ByteValue, ValueError>) -> Result<ByteValue, SpecError> {
    result.map_err(|source| {
        #[cfg(feature = "logging")]
        log::debug!("spec construction failed on {} value: {}", field, source);
        SpecError::Value { field, source }
    })
}

impl fmt::Display for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ format: {}, permission: {}, resolution: {}, initial_value: {}, minimum_value: {}, maximum_value: {} }}",
            self.format(),
            self.permission(),
            self.resolution(),
            self.init_val,
            self.min_val,
            self.max_val,
        )
    }
}

impl fmt::Debug for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySpec")
            .field("format", &self.format())
            .field("permission", &self.permission())
            .field("resolution", &self.resolution())
            .field("init_val", &self.init_val)
            .field("min_val", &self.min_val)
            .field("max_val", &self.max_val)
            .finish()
    }
}
