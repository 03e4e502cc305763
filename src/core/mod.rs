//! Core module - Configuration, errors, and the reading types shared by the sampler and display

mod config;
mod error;
mod types;

pub use config::{Config, GeneralConfig, SensorConfig, WindowConfig};
pub use error::{Error, Result};
pub use types::{
    GraphicsReading, MemoryReading, ProcessorReading, SampleGroup, SamplerStatus, Snapshot,
    StepFailure, Vendor,
};
