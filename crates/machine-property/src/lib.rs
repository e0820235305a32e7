//! Compact, self-describing property model for device firmware.
//!
//! This crate provides the in-memory representation and validation of
//! properties exposed by the components of a machine: byte-encoded live
//! values paired with an immutable specification of their format, access
//! permission, decimal resolution, and legal value envelope.
//!
//! # Overview
//!
//! - **Compact**: values up to 4 bytes are stored inline; a spec packs
//!   format, permission, and resolution into a single byte
//! - **Self-describing**: the format of a property is inferred from the
//!   shape of its bounds
//! - **Thread-safe**: every value carries its own spin lock, so values can
//!   be shared across threads and interrupt-like contexts
//!
//! # Quick Start
//!
//! ```rust
//! use machine_property::{ByteValue, Format, Permission, PropertySpec, Resolution};
//!
//! // A temperature in 0.5 degree steps, -10.0 to +50.0
//! let spec = PropertySpec::create(
//!     Permission::ReadOnly,
//!     Resolution::X0_5,
//!     &0i32.to_le_bytes(),
//!     &(-20i32).to_le_bytes(),
//!     &100i32.to_le_bytes(),
//! )
//! .unwrap();
//!
//! assert_eq!(spec.format(), Format::Numeric);
//!
//! let reading = ByteValue::create(&51i32.to_le_bytes()).unwrap();
//! assert!(spec.is_within_range(&reading));
//! assert_eq!(spec.to_real(&reading), Some(25.5));
//! ```
//!
//! # Modules
//!
//! - [`value`]: The 0-255 byte value container
//! - [`model`]: Format, permission, resolution, specs, properties, addresses
//! - [`validate`]: Range validation against a spec
//! - [`registry`]: Property tables and the machine-wide registry
//! - [`error`]: Error types
//! - [`limits`]: Size limits

pub mod error;
pub mod limits;
pub mod model;
pub mod registry;
pub mod util;
pub mod validate;
pub mod value;

// Re-export commonly used types at crate root
pub use error::{RegistryError, SpecError, ValueError};
pub use model::{
    Component, Format, Permission, Property, PropertySpec, Resolution, Unit, UnitKind,
};
pub use registry::{Machine, PropertyTable};
pub use validate::{decode_numeric, is_within_range};
pub use value::{ByteValue, MutableByteValue};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
