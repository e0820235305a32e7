//! Addresses of components within a machine.
//!
//! A machine is made of units (board, power, thermal, ...), each unit of
//! components, and each component exposes properties:
//!
//! ```text
//! Machine
//!   Unit[]          unique by (kind, index)
//!     Component[]   unique by (code, index)
//!       Property[]  unique by code
//! ```

use std::fmt;

/// Kind of a machine unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum UnitKind {
    Board = 0,
    ExpansionBoard = 1,
    Thermal = 2,
    Storage = 3,
    Power = 4,
    Light = 5,
}

impl UnitKind {
    /// Creates a UnitKind from its code.
    pub fn from_u8(v: u8) -> Option<UnitKind> {
        match v {
            0 => Some(UnitKind::Board),
            1 => Some(UnitKind::ExpansionBoard),
            2 => Some(UnitKind::Thermal),
            3 => Some(UnitKind::Storage),
            4 => Some(UnitKind::Power),
            5 => Some(UnitKind::Light),
            _ => None,
        }
    }

    /// Returns the lowercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            UnitKind::Board => "board",
            UnitKind::ExpansionBoard => "expansion-board",
            UnitKind::Thermal => "thermal",
            UnitKind::Storage => "storage",
            UnitKind::Power => "power",
            UnitKind::Light => "light",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), *self as u8)
    }
}

/// A unit of a machine, identified by kind and index.
///
/// Index 0 is the primary unit of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unit {
    pub kind: UnitKind,
    pub index: u8,
}

impl Unit {
    /// Index of the primary unit of a kind.
    pub const PRIMARY_INDEX: u8 = 0;

    pub const fn new(kind: UnitKind, index: u8) -> Self {
        Self { kind, index }
    }

    /// The primary unit of `kind`.
    pub const fn primary(kind: UnitKind) -> Self {
        Self::new(kind, Self::PRIMARY_INDEX)
    }

    pub fn is_primary(&self) -> bool {
        self.index == Self::PRIMARY_INDEX
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit{{kind={}, index={}}}", self.kind, self.index)
    }
}

/// A component within a unit, identified by code and index.
///
/// Index 0 is the primary component for its code. `level` is the depth of
/// the component in a nested component tree; root components are level 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Component {
    pub code: u8,
    pub index: u8,
    pub level: u8,
}

impl Component {
    /// Index of the primary component for a code.
    pub const PRIMARY_INDEX: u8 = 0;
    /// Level of root components.
    pub const ROOT_LEVEL: u8 = 0;

    /// Creates a root-level component.
    pub const fn new(code: u8, index: u8) -> Self {
        Self::with_level(code, index, Self::ROOT_LEVEL)
    }

    pub const fn with_level(code: u8, index: u8, level: u8) -> Self {
        Self { code, index, level }
    }

    pub fn is_primary(&self) -> bool {
        self.index == Self::PRIMARY_INDEX
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component{{code={}, index={}, level={}}}",
            self.code, self.index, self.level
        )
    }
}
