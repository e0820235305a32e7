//! Property tables and the machine-wide registry.
//!
//! A [`Machine`] maps each `(Unit, Component)` address to the
//! [`PropertyTable`] of that component. Reads and writes go through the
//! table, which enforces the property's permission and, for writes, its
//! range. Rejected writes leave the stored value untouched.

use rustc_hash::FxHashMap;

use crate::error::RegistryError;
use crate::model::{Component, Property, Unit};
use crate::util::format_bytes;
use crate::value::{ByteValue, MutableByteValue};

/// The properties of one component, keyed by property code.
#[derive(Debug, Default)]
pub struct PropertyTable {
    properties: FxHashMap<u8, Property>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Adds a property. Codes are unique within a table.
    pub fn insert(&mut self, property: Property) -> Result<(), RegistryError> {
        let code = property.code();
        if self.properties.contains_key(&code) {
            return Err(RegistryError::DuplicateCode { code });
        }
        self.properties.insert(code, property);
        Ok(())
    }

    pub fn get(&self, code: u8) -> Option<&Property> {
        self.properties.get(&code)
    }

    /// Returns the properties ordered by code.
    pub fn properties(&self) -> Vec<&Property> {
        let mut props: Vec<&Property> = self.properties.values().collect();
        props.sort_by_key(|p| p.code());
        props
    }

    /// Returns a copy of the live value of a readable property.
    pub fn read(&self, code: u8) -> Result<ByteValue, RegistryError> {
        let property = self.lookup(code)?;
        if !property.spec().permission().can_read() {
            return Err(RegistryError::NotReadable { code });
        }
        Ok(property.value().try_clone()?)
    }

    /// Replaces the live value of a writable property.
    ///
    /// The new value must be within the property's range. The candidate is
    /// fully built before the live value is touched, so any failure leaves
    /// the stored value as it was.
    pub fn write(&self, code: u8, bytes: &[u8]) -> Result<(), RegistryError> {
        let result = self.try_write(code, bytes);

        #[cfg(feature = "logging")]
        match &result {
            Ok(()) => log::trace!("property 0x{:02X} <- {}", code, format_bytes(bytes)),
            Err(e) => log::warn!("rejected write to property 0x{:02X}: {}", code, e),
        }

        result
    }

    fn try_write(&self, code: u8, bytes: &[u8]) -> Result<(), RegistryError> {
        let property = self.lookup(code)?;
        let spec = property.spec();
        if !spec.permission().can_write() {
            return Err(RegistryError::NotWritable { code });
        }

        let candidate = ByteValue::create(bytes)?;
        if !spec.is_within_range(&candidate) {
            return Err(RegistryError::OutOfRange {
                code,
                value: format_bytes(bytes),
            });
        }

        property
            .live_value()
            .assign_from(&MutableByteValue::from(candidate));
        Ok(())
    }

    fn lookup(&self, code: u8) -> Result<&Property, RegistryError> {
        self.properties
            .get(&code)
            .ok_or(RegistryError::PropertyNotFound { code })
    }
}

/// Every component of a machine, addressed by unit and component.
#[derive(Debug, Default)]
pub struct Machine {
    components: FxHashMap<(Unit, Component), PropertyTable>,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Registers a component and its properties.
    pub fn add_component(
        &mut self,
        unit: Unit,
        component: Component,
        table: PropertyTable,
    ) -> Result<(), RegistryError> {
        let key = (unit, component);
        if self.components.contains_key(&key) {
            return Err(RegistryError::DuplicateComponent { unit, component });
        }
        self.components.insert(key, table);
        Ok(())
    }

    pub fn table(&self, unit: Unit, component: Component) -> Option<&PropertyTable> {
        self.components.get(&(unit, component))
    }

    /// Returns the registered addresses in unit, then component order.
    pub fn addresses(&self) -> Vec<(Unit, Component)> {
        let mut keys: Vec<_> = self.components.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn read(&self, unit: Unit, component: Component, code: u8) -> Result<ByteValue, RegistryError> {
        self.lookup(unit, component)?.read(code)
    }

    pub fn write(
        &self,
        unit: Unit,
        component: Component,
        code: u8,
        bytes: &[u8],
    ) -> Result<(), RegistryError> {
        self.lookup(unit, component)?.write(code, bytes)
    }

    fn lookup(&self, unit: Unit, component: Component) -> Result<&PropertyTable, RegistryError> {
        self.components
            .get(&(unit, component))
            .ok_or(RegistryError::ComponentNotFound { unit, component })
    }
}
