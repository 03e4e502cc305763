//! Graphics sampling for the first NVIDIA adapter

use crate::core::{GraphicsReading, Result};
use crate::hardware::{HardwareType, Sensor, SensorProvider, SensorType};

/// Reduce an adapter's sensors to a reading. Every channel is last writer wins.
pub fn summarize(name: &str, sensors: &[Sensor]) -> GraphicsReading {
    let mut reading = GraphicsReading {
        name: name.to_string(),
        ..Default::default()
    };

    for sensor in sensors {
        let value = sensor.value_or_default();
        if sensor.kind == SensorType::Temperature {
            reading.temperature_celsius = value;
            continue;
        }

        let lower = sensor.name.to_lowercase();
        if lower.contains("gpu core") {
            reading.core_load_percent = value;
        } else if lower.contains("memory controller") {
            reading.memory_controller_load_percent = value;
        } else if lower.contains("video engine") {
            reading.video_engine_load_percent = value;
        } else if lower.contains("bus interface") {
            reading.bus_interface_load_percent = value;
        }
    }

    reading
}

/// Refresh the first NVIDIA adapter and reduce its sensors.
/// Other vendors are not supported and yield an all-zero reading.
pub fn sample(provider: &mut dyn SensorProvider) -> Result<GraphicsReading> {
    let Some(gpu) = provider
        .hardware()
        .iter_mut()
        .find(|h| h.kind() == HardwareType::GpuNvidia)
    else {
        return Ok(GraphicsReading::default());
    };

    gpu.update()?;
    Ok(summarize(gpu.name(), gpu.sensors()))
}
