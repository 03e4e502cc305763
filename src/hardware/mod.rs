//! Hardware sensor access
//!
//! Models the machine as a list of devices (processor, NVIDIA adapter,
//! mainboard), each exposing typed sensors that are refreshed on demand:
//! - Processor: sysinfo load counters and thermal components
//! - NVIDIA GPU: NVML
//! - Physical memory: sysinfo, or GlobalMemoryStatusEx on Windows

mod computer;
mod cpu;
mod memory;
mod nvml_gpu;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(test)]
pub(crate) mod fake;

pub use computer::Computer;
pub use cpu::{CpuHardware, Mainboard};
pub use memory::SysinfoMemory;
pub use nvml_gpu::NvidiaGpu;
#[cfg(target_os = "windows")]
pub use windows::GlobalMemoryStatus;

use crate::core::Result;

/// Kind of device reported by a sensor provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareType {
    Cpu,
    GpuNvidia,
    GpuAmd,
    Mainboard,
}

/// Kind of value a sensor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorType {
    /// Degrees Celsius
    Temperature,
    /// Percent
    Load,
}

/// A single named sensor value
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    pub kind: SensorType,
    pub name: String,
    /// None when the sensor exists but could not be read
    pub value: Option<f32>,
}

impl Sensor {
    pub fn new(kind: SensorType, name: impl Into<String>, value: Option<f32>) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
        }
    }

    /// Sensor value, or zero when unavailable
    pub fn value_or_default(&self) -> f32 {
        self.value.unwrap_or_default()
    }
}

/// A device whose sensors are refreshed on demand
pub trait Hardware: Send {
    fn kind(&self) -> HardwareType;

    fn name(&self) -> &str;

    /// Re-read every sensor of this device
    fn update(&mut self) -> Result<()>;

    /// Sensor values as of the last update
    fn sensors(&self) -> &[Sensor];
}

/// An opened handle onto the machine's devices
pub trait SensorProvider: Send {
    /// All opened devices, in discovery order
    fn hardware(&mut self) -> &mut [Box<dyn Hardware>];

    /// Release the underlying libraries; the device list is empty afterwards
    fn close(&mut self) {}
}

/// Host-wide physical memory counters, in kilobytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryCounters {
    pub total_kb: u64,
    pub free_kb: u64,
}

/// Operating system instrumentation queried for memory counters
pub trait Instrumentation: Send {
    fn memory_counters(&mut self) -> Result<MemoryCounters>;
}

/// The preferred instrumentation for the current platform
pub fn default_instrumentation() -> Box<dyn Instrumentation> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::GlobalMemoryStatus)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(memory::SysinfoMemory::new())
    }
}
