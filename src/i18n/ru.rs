//! Russian translations

use std::collections::HashMap;

pub fn get_translations() -> HashMap<String, String> {
    let mut t = HashMap::new();

    // App general
    t.insert("app.title".into(), "PC Stats".into());

    // Processor
    t.insert("processor.title".into(), "Процессор".into());
    t.insert("processor.cores".into(), "Количество ядер".into());
    t.insert("processor.load".into(), "Загрузка процессора".into());
    t.insert("processor.temperature".into(), "Температура процессора".into());

    // Graphics
    t.insert("gpu.title".into(), "Видеокарта".into());
    t.insert("gpu.none".into(), "нет адаптера NVIDIA".into());
    t.insert("gpu.temperature".into(), "Температура GPU".into());
    t.insert("gpu.load".into(), "Загрузка GPU".into());
    t.insert("gpu.memory_controller".into(), "Загрузка контроллера памяти GPU".into());
    t.insert("gpu.video_engine".into(), "Загрузка видеодвижка GPU".into());
    t.insert("gpu.bus".into(), "Загрузка шины GPU".into());

    // Memory
    t.insert("memory.title".into(), "Память".into());
    t.insert("memory.total".into(), "Общая память".into());
    t.insert("memory.free".into(), "Свободная память".into());
    t.insert("memory.load".into(), "Загрузка памяти".into());

    // Status
    t.insert("status.starting".into(), "Ожидание датчиков...".into());
    t.insert("status.live".into(), "Обновляется".into());
    t.insert("status.degraded".into(), "Ошибка чтения датчиков".into());
    t.insert("status.stopped".into(), "Остановлено".into());
    t.insert("group.processor".into(), "процессор".into());
    t.insert("group.graphics".into(), "видеокарта".into());
    t.insert("group.memory".into(), "память".into());

    // Units
    t.insert("unit.gigabytes".into(), "GB".into());

    t
}
