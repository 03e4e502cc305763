//! The production sensor provider

use crate::core::SensorConfig;
use crate::elevation;
use crate::hardware::{CpuHardware, Hardware, Mainboard, NvidiaGpu, SensorProvider};

/// Sensor provider over the local machine
///
/// Opened once at startup with the enabled device groups and closed once at
/// shutdown. Only one processor and one NVIDIA adapter are ever opened;
/// multi-socket and multi-GPU systems are not supported.
pub struct Computer {
    hardware: Vec<Box<dyn Hardware>>,
}

impl Computer {
    /// Open every enabled device group
    pub fn open(settings: &SensorConfig) -> Self {
        if cfg!(target_os = "windows") && !elevation::is_elevated() {
            log::warn!("Not running as administrator, temperature sensors may be unavailable");
        }

        let mut hardware: Vec<Box<dyn Hardware>> = Vec::new();

        if settings.cpu_enabled {
            hardware.push(Box::new(CpuHardware::open()));
        }

        if settings.gpu_enabled {
            match NvidiaGpu::open() {
                Some(gpu) => hardware.push(Box::new(gpu)),
                None => log::info!("No NVIDIA adapter available, graphics readings stay at zero"),
            }
        }

        if settings.mainboard_enabled {
            hardware.push(Box::new(Mainboard::open()));
        }

        log::info!("Sensor provider opened with {} device(s)", hardware.len());

        Self { hardware }
    }
}

impl SensorProvider for Computer {
    fn hardware(&mut self) -> &mut [Box<dyn Hardware>] {
        &mut self.hardware
    }

    fn close(&mut self) {
        if !self.hardware.is_empty() {
            log::info!("Closing sensor provider");
            self.hardware.clear();
        }
    }
}
