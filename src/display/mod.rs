//! Display side of the sampler
//!
//! Snapshots arrive through a `watch` channel and are rendered on the
//! display's own task; the sampler never touches display state directly.

mod console;

pub use console::ConsoleSurface;

use crate::core::{SamplerStatus, Snapshot};
use crate::i18n::I18n;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Formatted text for every field of the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    pub processor_heading: String,
    pub processor_name: String,
    pub processor_cores: String,
    pub processor_load: String,
    pub processor_temperature: String,
    pub gpu_heading: String,
    pub gpu_temperature: String,
    pub gpu_load: String,
    pub gpu_memory_controller: String,
    pub gpu_video_engine: String,
    pub gpu_bus: String,
    pub memory_heading: String,
    pub memory_total: String,
    pub memory_free: String,
    pub memory_load: String,
    pub status: String,
    pub degraded: bool,
}

impl Labels {
    pub fn render(snapshot: &Snapshot, i18n: &I18n) -> Self {
        let cpu = &snapshot.processor;
        let gpu = &snapshot.graphics;
        let mem = &snapshot.memory;
        let gb = i18n.get("unit.gigabytes");

        let gpu_name = if gpu.name.is_empty() {
            i18n.get("gpu.none")
        } else {
            gpu.name.clone()
        };

        Self {
            processor_heading: i18n.get("processor.title"),
            processor_name: format!("{} {}", cpu.vendor.label(), cpu.model).trim().to_string(),
            processor_cores: format!("{}: {}", i18n.get("processor.cores"), cpu.core_count),
            processor_load: format!("{}: {}%", i18n.get("processor.load"), cpu.load_percent),
            processor_temperature: format!(
                "{}: {}°C",
                i18n.get("processor.temperature"),
                cpu.temperature_celsius
            ),
            gpu_heading: format!("{}: {}", i18n.get("gpu.title"), gpu_name),
            gpu_temperature: format!("{}: {}°C", i18n.get("gpu.temperature"), gpu.temperature_celsius),
            gpu_load: format!("{}: {}%", i18n.get("gpu.load"), gpu.core_load_percent),
            gpu_memory_controller: format!(
                "{}: {}%",
                i18n.get("gpu.memory_controller"),
                gpu.memory_controller_load_percent
            ),
            gpu_video_engine: format!(
                "{}: {}%",
                i18n.get("gpu.video_engine"),
                gpu.video_engine_load_percent
            ),
            gpu_bus: format!("{}: {}%", i18n.get("gpu.bus"), gpu.bus_interface_load_percent),
            memory_heading: i18n.get("memory.title"),
            memory_total: format!("{}: {} {}", i18n.get("memory.total"), mem.total_gb, gb),
            memory_free: format!("{}: {} {}", i18n.get("memory.free"), mem.free_gb, gb),
            memory_load: format!("{}: {}%", i18n.get("memory.load"), mem.load_percent),
            status: status_text(&snapshot.status, i18n),
            degraded: snapshot.status.is_degraded(),
        }
    }
}

fn status_text(status: &SamplerStatus, i18n: &I18n) -> String {
    match status {
        SamplerStatus::Starting => i18n.get("status.starting"),
        SamplerStatus::Live => i18n.get("status.live"),
        SamplerStatus::Stopped => i18n.get("status.stopped"),
        SamplerStatus::Degraded { failures } => {
            let groups: Vec<String> = failures
                .iter()
                .map(|f| i18n.get(&format!("group.{}", f.group)))
                .collect();
            format!("{}: {}", i18n.get("status.degraded"), groups.join(", "))
        }
    }
}

/// A passive sink for rendered labels
pub trait DisplaySurface {
    fn render(&mut self, labels: &Labels);
}

/// Render the latest snapshot every time the sampler publishes.
///
/// Runs on the display's own task. Snapshots published faster than they are
/// rendered are skipped; only the newest one is shown. Returns once the
/// sampler side of the channel is gone.
pub async fn drive<S: DisplaySurface>(
    mut snapshots: watch::Receiver<Snapshot>,
    i18n: &I18n,
    surface: &mut S,
) {
    loop {
        let labels = Labels::render(&snapshots.borrow_and_update(), i18n);
        surface.render(&labels);

        if snapshots.changed().await.is_err() {
            log::debug!("Sampler channel closed, display pump exiting");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        GraphicsReading, MemoryReading, ProcessorReading, SampleGroup, StepFailure, Vendor,
    };

    #[derive(Default)]
    struct RecordingSurface {
        rendered: Vec<Labels>,
    }

    impl DisplaySurface for RecordingSurface {
        fn render(&mut self, labels: &Labels) {
            self.rendered.push(labels.clone());
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            tick: 3,
            taken_at: 1_700_000_000,
            processor: ProcessorReading {
                vendor: Vendor::Intel,
                model: "Core i7-9700K".to_string(),
                core_count: 8,
                load_percent: 12,
                temperature_celsius: 47,
            },
            graphics: GraphicsReading {
                name: "NVIDIA GeForce RTX 2060".to_string(),
                temperature_celsius: 52.0,
                core_load_percent: 7.0,
                memory_controller_load_percent: 3.0,
                video_engine_load_percent: 0.0,
                bus_interface_load_percent: 1.5,
            },
            memory: MemoryReading {
                total_gb: 15.87,
                free_gb: 9.0,
                load_percent: 43,
            },
            status: SamplerStatus::Live,
        }
    }

    #[test]
    fn test_english_labels() {
        let labels = Labels::render(&snapshot(), &I18n::new("en"));

        assert_eq!(labels.processor_name, "Intel Core i7-9700K");
        assert_eq!(labels.processor_cores, "Cores: 8");
        assert_eq!(labels.processor_load, "CPU load: 12%");
        assert_eq!(labels.processor_temperature, "CPU temperature: 47°C");
        assert_eq!(labels.gpu_heading, "Graphics: NVIDIA GeForce RTX 2060");
        assert_eq!(labels.gpu_temperature, "GPU temperature: 52°C");
        assert_eq!(labels.gpu_bus, "GPU bus load: 1.5%");
        assert_eq!(labels.memory_total, "Total memory: 15.87 GB");
        assert_eq!(labels.memory_free, "Free memory: 9 GB");
        assert_eq!(labels.memory_load, "Memory load: 43%");
        assert_eq!(labels.status, "Live");
        assert!(!labels.degraded);
    }

    #[test]
    fn test_russian_labels() {
        let labels = Labels::render(&snapshot(), &I18n::new("ru"));

        assert_eq!(labels.processor_heading, "Процессор");
        assert_eq!(labels.processor_cores, "Количество ядер: 8");
        assert_eq!(labels.gpu_load, "Загрузка GPU: 7%");
        assert_eq!(labels.memory_total, "Общая память: 15.87 GB");
    }

    #[test]
    fn test_missing_adapter_and_unknown_vendor() {
        let mut snap = Snapshot::default();
        snap.processor.model = "Apple M2".to_string();
        let labels = Labels::render(&snap, &I18n::new("en"));

        assert_eq!(labels.processor_name, "Apple M2");
        assert_eq!(labels.gpu_heading, "Graphics: no NVIDIA adapter");
        assert_eq!(labels.gpu_temperature, "GPU temperature: 0°C");
        assert_eq!(labels.status, "Waiting for sensors...");
    }

    #[test]
    fn test_degraded_indicator_names_groups() {
        let mut snap = snapshot();
        snap.status = SamplerStatus::Degraded {
            failures: vec![
                StepFailure { group: SampleGroup::Graphics, message: "NVML lost".to_string() },
                StepFailure { group: SampleGroup::Memory, message: "query failed".to_string() },
            ],
        };

        let labels = Labels::render(&snap, &I18n::new("en"));
        assert!(labels.degraded);
        assert_eq!(labels.status, "Sensor read failed: graphics, memory");

        let labels = Labels::render(&snap, &I18n::new("ru"));
        assert_eq!(labels.status, "Ошибка чтения датчиков: видеокарта, память");
    }

    #[test]
    fn test_labels_serialize_for_frontend() {
        let labels = Labels::render(&snapshot(), &I18n::new("en"));
        let json = serde_json::to_value(&labels).unwrap();
        assert_eq!(json["processor_load"], "CPU load: 12%");
        assert_eq!(json["degraded"], false);
    }

    #[tokio::test]
    async fn test_drive_renders_only_latest_snapshot() {
        let (tx, rx) = watch::channel(Snapshot::default());
        let mut first = snapshot();
        first.tick = 1;
        tx.send_replace(first);
        tx.send_replace(snapshot());
        drop(tx);

        let mut surface = RecordingSurface::default();
        drive(rx, &I18n::new("en"), &mut surface).await;

        assert_eq!(surface.rendered.len(), 1);
        assert_eq!(surface.rendered[0].processor_cores, "Cores: 8");
    }

    #[tokio::test]
    async fn test_drive_follows_updates_until_sampler_is_gone() {
        let (tx, rx) = watch::channel(Snapshot::default());
        let i18n = I18n::new("en");

        let pump = async {
            let mut surface = RecordingSurface::default();
            drive(rx, &i18n, &mut surface).await;
            surface
        };
        let feed = async move {
            tokio::task::yield_now().await;
            tx.send_replace(snapshot());
            tokio::task::yield_now().await;
            drop(tx);
        };

        let (surface, _) = tokio::join!(pump, feed);
        assert_eq!(surface.rendered.first().map(|l| l.status.as_str()), Some("Waiting for sensors..."));
        assert_eq!(surface.rendered.last().map(|l| l.status.as_str()), Some("Live"));
    }
}
