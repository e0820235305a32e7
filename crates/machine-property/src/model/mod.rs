//! Property model types.
//!
//! This module contains the descriptive side of a property:
//! - Formats, permissions, and resolutions (packed enums)
//! - Specs (format, access, scaling, and bounds)
//! - Properties (code, spec, and live value)
//! - Addresses (units and components of a machine)

pub mod address;
pub mod format;
pub mod permission;
pub mod property;
pub mod resolution;
pub mod spec;

pub use address::{Component, Unit, UnitKind};
pub use format::Format;
pub use permission::Permission;
pub use property::Property;
pub use resolution::Resolution;
pub use spec::PropertySpec;
