//! Property processing loop.
//!
//! Builds a small machine, then on every iteration writes a few properties
//! and logs every spec and live value.
//!
//! Usage: `property-loop [ITERATIONS]` (default 3). Set `RUST_LOG` to
//! change the log level, e.g. `RUST_LOG=trace` to see accepted writes.

use std::error::Error;

use log::info;
use machine_property::{
    Component, Machine, Permission, Property, PropertySpec, PropertyTable, Resolution,
    Unit, UnitKind,
};

const DEFAULT_ITERATIONS: u32 = 3;

/// Property codes
mod codes {
    pub const FIRMWARE_VERSION: u8 = 0x01;
    pub const TEMPERATURE: u8 = 0x10;
    pub const TARGET_TEMPERATURE: u8 = 0x11;
    pub const FAN_ENABLED: u8 = 0x12;
    pub const ALARM_MASK: u8 = 0x13;
}

const SYSTEM: Component = Component::new(0, 0);
const SENSOR: Component = Component::new(3, 0);

fn property(
    code: u8,
    permission: Permission,
    resolution: Resolution,
    init: &[u8],
    min: &[u8],
    max: &[u8],
) -> Result<Property, Box<dyn Error>> {
    let spec = PropertySpec::create(permission, resolution, init, min, max)?;
    Ok(Property::with_initial_value(code, spec)?)
}

fn numeric(
    code: u8,
    permission: Permission,
    resolution: Resolution,
    init: i32,
    min: i32,
    max: i32,
) -> Result<Property, Box<dyn Error>> {
    property(
        code,
        permission,
        resolution,
        &init.to_le_bytes(),
        &min.to_le_bytes(),
        &max.to_le_bytes(),
    )
}

fn build_machine() -> Result<Machine, Box<dyn Error>> {
    let mut system = PropertyTable::new();
    system.insert(property(
        codes::FIRMWARE_VERSION,
        Permission::ReadOnly,
        Resolution::X1,
        b"1.4.2",
        &[],
        &[],
    )?)?;

    let mut sensor = PropertyTable::new();
    sensor.insert(numeric(codes::TEMPERATURE, Permission::ReadOnly, Resolution::X0_5, 44, -80, 250)?)?;
    sensor.insert(numeric(
        codes::TARGET_TEMPERATURE,
        Permission::ReadWrite,
        Resolution::X0_5,
        80,
        0,
        160,
    )?)?;
    sensor.insert(property(codes::FAN_ENABLED, Permission::ReadWrite, Resolution::X1, &[0], &[0], &[1])?)?;
    sensor.insert(property(codes::ALARM_MASK, Permission::WriteOnly, Resolution::X1, &[0], &[], &[0x0F])?)?;

    let mut machine = Machine::new();
    machine.add_component(Unit::primary(UnitKind::Board), SYSTEM, system)?;
    machine.add_component(Unit::primary(UnitKind::Thermal), SENSOR, sensor)?;
    Ok(machine)
}

/// Target temperature (raw, 0.5 degree steps) written on iteration `i`.
///
/// Climbs by 5 degrees per iteration, saturating at `i32::MAX`.
fn target_for(i: u32) -> i32 {
    i32::try_from(i)
        .unwrap_or(i32::MAX)
        .saturating_mul(10)
        .saturating_add(80)
}

fn log_machine(machine: &Machine) {
    for (unit, component) in machine.addresses() {
        let Some(table) = machine.table(unit, component) else {
            continue;
        };
        info!("{} {}", unit, component);
        for property in table.properties() {
            let spec = property.spec();
            match spec.to_real(property.value()) {
                Some(real) => info!("  {} = {}", property, real),
                None => info!("  {}", property),
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let iterations = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u32>()?,
        None => DEFAULT_ITERATIONS,
    };

    let machine = build_machine()?;
    let thermal = Unit::primary(UnitKind::Thermal);
    info!("machine-property {}: {} components", machine_property::VERSION, machine.len());

    for i in 0..iterations {
        info!("iteration {}", i);

        let target = target_for(i);
        let fan = u8::from(i % 2 == 1);
        let mask = 1u8 << (i % 4);

        // Out-of-range writes are rejected and logged by the registry.
        let _ = machine.write(thermal, SENSOR, codes::TARGET_TEMPERATURE, &target.to_le_bytes());
        machine.write(thermal, SENSOR, codes::FAN_ENABLED, &[fan])?;
        machine.write(thermal, SENSOR, codes::ALARM_MASK, &[mask])?;

        log_machine(&machine);
    }

    Ok(())
}
