//! Reading types published by the sampler

use serde::{Deserialize, Serialize};
use std::fmt;

/// Processor vendor, classified from the device name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Vendor {
    Intel,
    Amd,
    #[default]
    Unknown,
}

impl Vendor {
    /// Display name used in labels ("Intel", "AMD", or empty when unknown)
    pub fn label(&self) -> &'static str {
        match self {
            Vendor::Intel => "Intel",
            Vendor::Amd => "AMD",
            Vendor::Unknown => "",
        }
    }
}

/// Latest processor reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorReading {
    pub vendor: Vendor,
    /// Device name with the vendor token stripped
    pub model: String,
    /// Number of per-core temperature sensors found
    pub core_count: u32,
    /// Averaged total load, rounded (%)
    pub load_percent: i32,
    /// Averaged core temperature, rounded (°C)
    pub temperature_celsius: i32,
}

/// Latest graphics adapter reading (NVIDIA only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsReading {
    pub name: String,
    pub temperature_celsius: f32,
    pub core_load_percent: f32,
    pub memory_controller_load_percent: f32,
    pub video_engine_load_percent: f32,
    pub bus_interface_load_percent: f32,
}

/// Latest physical memory reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryReading {
    /// Total capacity in GB, 2 decimals
    pub total_gb: f64,
    /// Free capacity in GB, 2 decimals
    pub free_gb: f64,
    pub load_percent: i32,
}

/// The sampling steps of a tick, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleGroup {
    Processor,
    Graphics,
    Memory,
}

impl fmt::Display for SampleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleGroup::Processor => write!(f, "processor"),
            SampleGroup::Graphics => write!(f, "graphics"),
            SampleGroup::Memory => write!(f, "memory"),
        }
    }
}

/// A sampling step that failed during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
    pub group: SampleGroup,
    pub message: String,
}

/// Health of the sampler as seen by the display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SamplerStatus {
    /// Nothing has been sampled yet
    #[default]
    Starting,
    /// The last tick completed every step
    Live,
    /// One or more steps failed in the last tick; their previous readings are kept
    Degraded { failures: Vec<StepFailure> },
    /// The loop has exited
    Stopped,
}

impl SamplerStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, SamplerStatus::Degraded { .. })
    }
}

/// Everything published during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tick counter, starting at 1 for the first tick
    pub tick: u64,
    /// Unix timestamp of the last publish
    pub taken_at: i64,
    pub processor: ProcessorReading,
    pub graphics: GraphicsReading,
    pub memory: MemoryReading,
    pub status: SamplerStatus,
}
