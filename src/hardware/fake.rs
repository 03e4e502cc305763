use crate::core::{Error, Result};
use crate::hardware::{
    Hardware, HardwareType, Instrumentation, MemoryCounters, Sensor, SensorProvider, SensorType,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted device used in tests; counts how often it is refreshed.
pub struct FakeHardware {
    kind: HardwareType,
    name: String,
    sensors: Vec<Sensor>,
    updates: Arc<AtomicUsize>,
    fail_updates: bool,
    delay: Duration,
}

impl FakeHardware {
    pub fn new(kind: HardwareType, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            sensors: Vec::new(),
            updates: Arc::new(AtomicUsize::new(0)),
            fail_updates: false,
            delay: Duration::ZERO,
        }
    }

    pub fn temperature(mut self, name: &str, value: f32) -> Self {
        self.sensors.push(Sensor::new(SensorType::Temperature, name, Some(value)));
        self
    }

    pub fn load(mut self, name: &str, value: f32) -> Self {
        self.sensors.push(Sensor::new(SensorType::Load, name, Some(value)));
        self
    }

    pub fn unread(mut self, kind: SensorType, name: &str) -> Self {
        self.sensors.push(Sensor::new(kind, name, None));
        self
    }

    /// Every update returns a sensor error
    pub fn failing(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Every update blocks the calling thread for `delay`
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared counter of update calls
    pub fn update_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.updates)
    }
}

impl Hardware for FakeHardware {
    fn kind(&self) -> HardwareType {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.fail_updates {
            return Err(Error::Sensor(format!("{} is not responding", self.name)));
        }
        Ok(())
    }

    fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }
}

#[derive(Default)]
pub struct FakeProvider {
    hardware: Vec<Box<dyn Hardware>>,
    closed: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new(hardware: Vec<FakeHardware>) -> Self {
        Self {
            hardware: hardware
                .into_iter()
                .map(|h| Box::new(h) as Box<dyn Hardware>)
                .collect(),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closed)
    }
}

impl SensorProvider for FakeProvider {
    fn hardware(&mut self) -> &mut [Box<dyn Hardware>] {
        &mut self.hardware
    }

    fn close(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.hardware.clear();
    }
}

/// Replays scripted memory counters; the last entry repeats forever.
pub struct FakeInstrumentation {
    script: VecDeque<Result<MemoryCounters>>,
    last: MemoryCounters,
}

impl FakeInstrumentation {
    pub fn fixed(total_kb: u64, free_kb: u64) -> Self {
        Self::new(vec![Ok(MemoryCounters { total_kb, free_kb })])
    }

    pub fn new(script: Vec<Result<MemoryCounters>>) -> Self {
        Self {
            script: script.into(),
            last: MemoryCounters::default(),
        }
    }
}

impl Instrumentation for FakeInstrumentation {
    fn memory_counters(&mut self) -> Result<MemoryCounters> {
        match self.script.pop_front() {
            Some(Ok(counters)) => {
                self.last = counters;
                Ok(counters)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last),
        }
    }
}
