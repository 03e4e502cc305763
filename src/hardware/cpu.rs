//! Processor and mainboard devices backed by sysinfo
//!
//! Thermal component labels differ per platform and driver
//! ("coretemp Core 0", "k10temp Tctl", "acpitz temp1", ...). Components that
//! belong to the processor are renamed to the "Core #n" / "CPU Package" /
//! "Core (Tctl/Tdie)" scheme the sampler expects; everything else is reported
//! by the mainboard device. On Windows sysinfo exposes only the ACPI thermal
//! zone, which stands in for the processor temperature.

use crate::core::Result;
use crate::hardware::{Hardware, HardwareType, Sensor, SensorType};
use sysinfo::{Components, System};

/// Component chip prefixes that belong to the processor
const CPU_CHIPS: [&str; 4] = ["coretemp", "k10temp", "zenpower", "cpu"];

const WINDOWS_THERMAL_ZONE: &str = "computer";

/// Map a thermal component label onto a processor sensor name.
/// Returns None for components that are not part of the processor.
pub(crate) fn cpu_sensor_name(label: &str) -> Option<String> {
    let lower = label.to_lowercase();

    // sysinfo on Windows reports a single ACPI thermal zone labelled "Computer"
    if lower == WINDOWS_THERMAL_ZONE {
        return Some("Core (Thermal Zone)".to_string());
    }
    let (chip, rest) = match lower.split_once(' ') {
        Some((chip, rest)) => (chip, rest),
        None => ("", lower.as_str()),
    };
    let cpu_chip = CPU_CHIPS.iter().any(|c| chip.starts_with(c));

    if rest.contains("tctl") || rest.contains("tdie") {
        return Some("Core (Tctl/Tdie)".to_string());
    }
    if !cpu_chip {
        return None;
    }
    if rest.contains("package") {
        return Some("CPU Package".to_string());
    }
    if rest.starts_with("core") {
        let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Some("Core".to_string());
        }
        return Some(format!("Core #{}", digits));
    }

    // Keep the driver's own name, minus the chip prefix
    let driver_name = label.split_once(' ').map(|(_, r)| r).unwrap_or(label);
    Some(driver_name.to_string())
}

fn temperature_value(celsius: f32) -> Option<f32> {
    if celsius.is_finite() && celsius > 0.0 {
        Some(celsius)
    } else {
        None
    }
}

/// The host processor
pub struct CpuHardware {
    sys: System,
    components: Components,
    name: String,
    sensors: Vec<Sensor>,
}

impl CpuHardware {
    pub fn open() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();

        let name = sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown CPU".to_string());

        log::info!("Processor opened: {} ({} logical cores)", name, sys.cpus().len());

        let components = Components::new_with_refreshed_list();
        if !components
            .list()
            .iter()
            .any(|c| cpu_sensor_name(c.label()).is_some())
        {
            log::warn!("No processor temperature sensor found, CPU temperature will read 0");
        }

        Self {
            sys,
            components,
            name,
            sensors: Vec::new(),
        }
    }
}

impl Hardware for CpuHardware {
    fn kind(&self) -> HardwareType {
        HardwareType::Cpu
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self) -> Result<()> {
        self.sys.refresh_cpu_usage();
        self.components.refresh();

        let mut sensors = Vec::with_capacity(self.sys.cpus().len() + 1);
        sensors.push(Sensor::new(
            SensorType::Load,
            "CPU Total",
            Some(self.sys.global_cpu_info().cpu_usage()),
        ));
        for (i, cpu) in self.sys.cpus().iter().enumerate() {
            sensors.push(Sensor::new(
                SensorType::Load,
                format!("CPU Core #{}", i + 1),
                Some(cpu.cpu_usage()),
            ));
        }

        for component in self.components.list() {
            if let Some(name) = cpu_sensor_name(component.label()) {
                sensors.push(Sensor::new(
                    SensorType::Temperature,
                    name,
                    temperature_value(component.temperature()),
                ));
            }
        }

        log::trace!("{}: {} sensors", self.name, sensors.len());
        self.sensors = sensors;
        Ok(())
    }

    fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }
}

/// Thermal components that do not belong to the processor
pub struct Mainboard {
    components: Components,
    sensors: Vec<Sensor>,
}

impl Mainboard {
    pub fn open() -> Self {
        Self {
            components: Components::new_with_refreshed_list(),
            sensors: Vec::new(),
        }
    }
}

impl Hardware for Mainboard {
    fn kind(&self) -> HardwareType {
        HardwareType::Mainboard
    }

    fn name(&self) -> &str {
        "Mainboard"
    }

    fn update(&mut self) -> Result<()> {
        self.components.refresh();
        self.sensors = self
            .components
            .list()
            .iter()
            .filter(|c| cpu_sensor_name(c.label()).is_none())
            .map(|c| {
                Sensor::new(
                    SensorType::Temperature,
                    c.label(),
                    temperature_value(c.temperature()),
                )
            })
            .collect();
        Ok(())
    }

    fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }
}
