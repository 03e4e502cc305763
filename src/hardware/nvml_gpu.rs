//! NVIDIA GPU device via the NVML library
//!
//! Exposes the sensor set of the primary adapter: die temperature plus the
//! core, memory controller, video engine and bus interface load channels.

use crate::core::{Error, Result};
use crate::hardware::{Hardware, HardwareType, Sensor, SensorType};
use nvml_wrapper::enum_wrappers::device::{PcieUtilCounter, TemperatureSensor};
use nvml_wrapper::{Device, Nvml};

/// Usable PCIe bandwidth per lane in KB/s, indexed by link generation
const PCIE_LANE_KBPS: [f32; 6] = [0.0, 250_000.0, 500_000.0, 985_000.0, 1_969_000.0, 3_938_000.0];

/// Bus utilisation as the busier PCIe direction relative to the current link bandwidth.
/// Returns None when the link generation is unknown.
pub(crate) fn bus_load_percent(tx_kbps: u32, rx_kbps: u32, link_gen: u32, link_width: u32) -> Option<f32> {
    let per_lane = *PCIE_LANE_KBPS.get(link_gen as usize)?;
    let capacity = per_lane * link_width as f32;
    if capacity <= 0.0 {
        return None;
    }
    let busiest = tx_kbps.max(rx_kbps) as f32;
    Some((busiest / capacity * 100.0).clamp(0.0, 100.0))
}

/// The first NVIDIA adapter reported by NVML
pub struct NvidiaGpu {
    nvml: Nvml,
    device_index: u32,
    name: String,
    sensors: Vec<Sensor>,
}

impl NvidiaGpu {
    /// Initialize NVML and grab the first GPU device.
    /// Returns None if NVML is not available (no NVIDIA driver, no GPU, etc.)
    pub fn open() -> Option<Self> {
        let nvml = match Nvml::init() {
            Ok(n) => n,
            Err(e) => {
                log::debug!("NVML init failed: {}", e);
                return None;
            }
        };

        let device_count = nvml.device_count().ok()?;
        if device_count == 0 {
            log::debug!("NVML: no devices found");
            return None;
        }

        let name = {
            let device = nvml.device_by_index(0).ok()?;
            device.name().unwrap_or_else(|_| "NVIDIA GPU".to_string())
        };

        if device_count > 1 {
            log::info!("NVML: {} adapters found, only the first one is monitored", device_count);
        }
        log::info!("NVML initialized: {} (device 0 of {})", name, device_count);

        Some(Self {
            nvml,
            device_index: 0,
            name,
            sensors: Vec::new(),
        })
    }

    fn read_sensors(device: &Device) -> Vec<Sensor> {
        let temperature = device
            .temperature(TemperatureSensor::Gpu)
            .ok()
            .map(|t| t as f32);

        // Utilization rates (GPU & memory engine usage %)
        let utilization = device.utilization_rates().ok();
        let core_load = utilization.as_ref().map(|u| u.gpu as f32);
        let memory_controller_load = utilization.as_ref().map(|u| u.memory as f32);

        let video_engine_load = device
            .encoder_utilization()
            .ok()
            .map(|u| u.utilization as f32);

        let bus_load = match (
            device.pcie_throughput(PcieUtilCounter::Send),
            device.pcie_throughput(PcieUtilCounter::Receive),
            device.current_pcie_link_gen(),
            device.current_pcie_link_width(),
        ) {
            (Ok(tx), Ok(rx), Ok(link_gen), Ok(width)) => bus_load_percent(tx, rx, link_gen, width),
            _ => None,
        };

        vec![
            Sensor::new(SensorType::Temperature, "GPU Core", temperature),
            Sensor::new(SensorType::Load, "GPU Core", core_load),
            Sensor::new(SensorType::Load, "GPU Memory Controller", memory_controller_load),
            Sensor::new(SensorType::Load, "GPU Video Engine", video_engine_load),
            Sensor::new(SensorType::Load, "GPU Bus Interface", bus_load),
        ]
    }
}

impl Hardware for NvidiaGpu {
    fn kind(&self) -> HardwareType {
        HardwareType::GpuNvidia
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self) -> Result<()> {
        let device = self
            .nvml
            .device_by_index(self.device_index)
            .map_err(|e| Error::Sensor(format!("NVML device {}: {}", self.device_index, e)))?;
        self.sensors = Self::read_sensors(&device);
        Ok(())
    }

    fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_load_uses_busier_direction() {
        // PCIe 3.0 x16: 15.76 GB/s per direction
        let load = bus_load_percent(1_576_000, 157_600, 3, 16).unwrap();
        assert!((load - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_bus_load_is_clamped() {
        assert_eq!(bus_load_percent(u32::MAX, 0, 1, 1), Some(100.0));
    }

    #[test]
    fn test_bus_load_unknown_link() {
        assert_eq!(bus_load_percent(1000, 1000, 0, 16), None);
        assert_eq!(bus_load_percent(1000, 1000, 9, 16), None);
        assert_eq!(bus_load_percent(1000, 1000, 4, 0), None);
    }
}
