//! Processor sampling: vendor classification plus averaged load and core temperature

use crate::core::{ProcessorReading, Result, Vendor};
use crate::hardware::{HardwareType, Sensor, SensorProvider, SensorType};
use crate::sampler::round_even;

/// Classify the vendor from a device name and strip the vendor token to get the model.
///
/// Names without a known vendor token keep the whole trimmed name as the model
/// rather than showing an empty processor line.
pub fn classify(name: &str) -> (Vendor, String) {
    for (token, vendor) in [("Intel", Vendor::Intel), ("AMD", Vendor::Amd)] {
        if let Some(pos) = name.find(token) {
            let model = name[pos + token.len()..].trim().to_string();
            return (vendor, model);
        }
    }
    (Vendor::Unknown, name.trim().to_string())
}

/// Reduce a processor's sensors to a reading.
///
/// Temperatures of sensors named "core" are averaged over the number of such
/// sensors. AMD "package" sensors are added to the sum without counting as a
/// core, so with no core sensors the package value is published as is.
pub fn summarize(name: &str, sensors: &[Sensor]) -> ProcessorReading {
    let (vendor, model) = classify(name);

    let mut temperature_sum = 0.0f32;
    let mut core_count = 0u32;
    let mut load_sum = 0.0f32;
    let mut load_count = 0u32;

    for sensor in sensors {
        let lower = sensor.name.to_lowercase();
        match sensor.kind {
            SensorType::Temperature if lower.contains("core") => {
                temperature_sum += sensor.value_or_default();
                core_count += 1;
            }
            SensorType::Temperature if vendor == Vendor::Amd && lower.contains("package") => {
                temperature_sum += sensor.value_or_default();
            }
            SensorType::Load if lower.contains("total") => {
                load_sum += sensor.value_or_default();
                load_count += 1;
            }
            _ => {}
        }
    }

    let temperature = if core_count > 0 {
        temperature_sum / core_count as f32
    } else {
        temperature_sum
    };
    let load = if load_count > 0 {
        load_sum / load_count as f32
    } else {
        0.0
    };

    ProcessorReading {
        vendor,
        model,
        core_count,
        load_percent: round_even(load),
        temperature_celsius: round_even(temperature),
    }
}

/// Refresh the first processor and reduce its sensors.
/// A machine without a processor device yields an all-zero reading.
pub fn sample(provider: &mut dyn SensorProvider) -> Result<ProcessorReading> {
    let Some(cpu) = provider
        .hardware()
        .iter_mut()
        .find(|h| h.kind() == HardwareType::Cpu)
    else {
        log::trace!("No processor device opened");
        return Ok(ProcessorReading::default());
    };

    cpu.update()?;
    Ok(summarize(cpu.name(), cpu.sensors()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::fake::{FakeHardware, FakeProvider};

    fn temperature(name: &str, value: f32) -> Sensor {
        Sensor::new(SensorType::Temperature, name, Some(value))
    }

    fn load(name: &str, value: f32) -> Sensor {
        Sensor::new(SensorType::Load, name, Some(value))
    }

    #[test]
    fn test_intel_vendor_and_model() {
        let (vendor, model) = classify("Intel(R) Core(TM) i7");
        assert_eq!(vendor, Vendor::Intel);
        assert_eq!(model, "(R) Core(TM) i7");

        let (vendor, model) = classify("Intel Core i5-9600K");
        assert_eq!(vendor, Vendor::Intel);
        assert_eq!(model, "Core i5-9600K");
    }

    #[test]
    fn test_amd_and_unknown_vendor() {
        assert_eq!(classify("AMD Ryzen 7 5800X"), (Vendor::Amd, "Ryzen 7 5800X".to_string()));
        assert_eq!(classify("Apple M2"), (Vendor::Unknown, "Apple M2".to_string()));
    }

    #[test]
    fn test_core_temperature_average() {
        let sensors = [temperature("Core #0", 40.0), temperature("Core #1", 50.0)];
        let reading = summarize("Intel Core i7", &sensors);

        assert_eq!(reading.core_count, 2);
        assert_eq!(reading.temperature_celsius, 45);
    }

    #[test]
    fn test_amd_package_without_cores_is_not_averaged() {
        let sensors = [temperature("CPU Package", 60.0)];
        let reading = summarize("AMD Ryzen 5 3600", &sensors);

        assert_eq!(reading.core_count, 0);
        assert_eq!(reading.temperature_celsius, 60);
    }

    #[test]
    fn test_package_ignored_for_intel() {
        let sensors = [temperature("CPU Package", 90.0), temperature("Core #0", 50.0)];
        let reading = summarize("Intel Core i7", &sensors);

        assert_eq!(reading.core_count, 1);
        assert_eq!(reading.temperature_celsius, 50);
    }

    #[test]
    fn test_amd_package_joins_core_sum() {
        // Package adds to the sum but not to the divisor
        let sensors = [temperature("Core (Tctl/Tdie)", 50.0), temperature("CPU Package", 10.0)];
        let reading = summarize("AMD Ryzen 9", &sensors);

        assert_eq!(reading.core_count, 1);
        assert_eq!(reading.temperature_celsius, 60);
    }

    #[test]
    fn test_load_uses_total_sensors_only() {
        let sensors = [
            load("CPU Total", 30.0),
            load("CPU Core #1", 100.0),
            load("CPU Core #2", 100.0),
        ];
        let reading = summarize("Intel Core i7", &sensors);

        assert_eq!(reading.load_percent, 30);
        assert_eq!(reading.core_count, 0);
        assert_eq!(reading.temperature_celsius, 0);
    }

    #[test]
    fn test_rounding_ties_to_even() {
        let reading = summarize("Intel", &[load("CPU Total", 42.5), temperature("Core #0", 43.5)]);
        assert_eq!(reading.load_percent, 42);
        assert_eq!(reading.temperature_celsius, 44);
    }

    #[test]
    fn test_unread_sensor_counts_as_zero() {
        let cpu = FakeHardware::new(HardwareType::Cpu, "Intel Core i3")
            .temperature("Core #0", 60.0)
            .unread(SensorType::Temperature, "Core #1");
        let mut provider = FakeProvider::new(vec![cpu]);

        let reading = sample(&mut provider).unwrap();
        assert_eq!(reading.core_count, 2);
        assert_eq!(reading.temperature_celsius, 30);
    }

    #[test]
    fn test_first_processor_only() {
        let first = FakeHardware::new(HardwareType::Cpu, "Intel Xeon A").load("CPU Total", 10.0);
        let second = FakeHardware::new(HardwareType::Cpu, "Intel Xeon B").load("CPU Total", 90.0);
        let second_updates = second.update_counter();
        let mut provider = FakeProvider::new(vec![first, second]);

        let reading = sample(&mut provider).unwrap();
        assert_eq!(reading.model, "Xeon A");
        assert_eq!(reading.load_percent, 10);
        assert_eq!(second_updates.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_processor_is_all_zero() {
        let mut provider = FakeProvider::new(Vec::new());
        assert_eq!(sample(&mut provider).unwrap(), ProcessorReading::default());
    }

    #[test]
    fn test_update_failure_propagates() {
        let cpu = FakeHardware::new(HardwareType::Cpu, "AMD Ryzen").failing();
        let mut provider = FakeProvider::new(vec![cpu]);
        assert!(sample(&mut provider).is_err());
    }
}
