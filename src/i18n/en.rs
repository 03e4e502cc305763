//! English translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // App general
    t.insert("app.title".into(), "PC Stats".into());

    // Processor
    t.insert("processor.title".into(), "Processor".into());
    t.insert("processor.cores".into(), "Cores".into());
    t.insert("processor.load".into(), "CPU load".into());
    t.insert("processor.temperature".into(), "CPU temperature".into());

    // Graphics
    t.insert("gpu.title".into(), "Graphics".into());
    t.insert("gpu.none".into(), "no NVIDIA adapter".into());
    t.insert("gpu.temperature".into(), "GPU temperature".into());
    t.insert("gpu.load".into(), "GPU load".into());
    t.insert("gpu.memory_controller".into(), "GPU memory controller".into());
    t.insert("gpu.video_engine".into(), "GPU video engine".into());
    t.insert("gpu.bus".into(), "GPU bus load".into());

    // Memory
    t.insert("memory.title".into(), "Memory".into());
    t.insert("memory.total".into(), "Total memory".into());
    t.insert("memory.free".into(), "Free memory".into());
    t.insert("memory.load".into(), "Memory load".into());

    // Status
    t.insert("status.starting".into(), "Waiting for sensors...".into());
    t.insert("status.live".into(), "Live".into());
    t.insert("status.degraded".into(), "Sensor read failed".into());
    t.insert("status.stopped".into(), "Stopped".into());
    t.insert("group.processor".into(), "processor".into());
    t.insert("group.graphics".into(), "graphics".into());
    t.insert("group.memory".into(), "memory".into());

    // Units
    t.insert("unit.gigabytes".into(), "GB".into());

    t
}
