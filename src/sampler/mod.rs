//! Background sampling loop
//!
//! One task drives the sensor provider and the memory instrumentation. Each
//! tick samples processor, graphics and memory in that order, publishing every
//! step into a `watch` channel, then waits [`TICK_INTERVAL`] or until asked
//! to stop. The display side only ever sees the latest [`Snapshot`].
//!
//! Provider calls block, so each tick runs on tokio's blocking pool; ticks
//! never overlap and the provider is never touched from two places at once.
//! The probes sit behind a mutex that a tick holds for its whole duration, so
//! a tick abandoned by [`Sampler::stop`] still hands them back when it returns.

pub mod graphics;
pub mod memory;
pub mod processor;

use crate::core::{Error, Result, SampleGroup, SamplerStatus, Snapshot, StepFailure};
use crate::hardware::{Instrumentation, SensorProvider};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long `stop` waits for the loop to finish its current tick
pub const STOP_GRACE: Duration = Duration::from_millis(600);

/// Round to the nearest integer, ties to even
pub(crate) fn round_even(value: f32) -> i32 {
    (value as f64).round_ties_even() as i32
}

/// The data sources a sampler reads from
pub struct Probes {
    pub provider: Box<dyn SensorProvider>,
    pub instrumentation: Box<dyn Instrumentation>,
}

type ProbeSlot = Arc<Mutex<Option<Probes>>>;

// A tick that panicked poisons the slot; the loop empties it before exiting
fn lock_slot(slot: &Mutex<Option<Probes>>) -> MutexGuard<'_, Option<Probes>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// How a call to [`Sampler::stop`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The loop was not running
    NotRunning,
    /// The loop exited within the grace period
    Graceful,
    /// The grace period lapsed; the in-flight tick was abandoned and will
    /// publish nothing more
    TimedOut,
}

/// Publication handle for one run of the loop.
///
/// Goes quiet once `stop` abandons the run. The flag is checked under the
/// channel's write lock, so nothing from an abandoned tick can land after the
/// `Stopped` status that `stop` publishes.
#[derive(Clone)]
struct Outlet {
    publisher: Arc<watch::Sender<Snapshot>>,
    abandoned: Arc<AtomicBool>,
}

impl Outlet {
    fn publish(&self, update: impl FnOnce(&mut Snapshot)) {
        self.publisher.send_if_modified(|snapshot| {
            if self.abandoned.load(Ordering::SeqCst) {
                return false;
            }
            update(snapshot);
            true
        });
    }
}

struct Running {
    stop: watch::Sender<bool>,
    abandoned: Arc<AtomicBool>,
    task: JoinHandle<Result<()>>,
}

/// Periodic, cancellable hardware sampler
pub struct Sampler {
    probes: ProbeSlot,
    running: Option<Running>,
    publisher: Arc<watch::Sender<Snapshot>>,
}

impl Sampler {
    pub fn new(provider: Box<dyn SensorProvider>, instrumentation: Box<dyn Instrumentation>) -> Self {
        let (publisher, _) = watch::channel(Snapshot::default());
        Self {
            probes: Arc::new(Mutex::new(Some(Probes {
                provider,
                instrumentation,
            }))),
            running: None,
            publisher: Arc::new(publisher),
        }
    }

    /// Receiver of published snapshots, for the display side
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Snapshot {
        self.publisher.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn has_probes(&self) -> bool {
        match self.probes.try_lock() {
            Ok(slot) => slot.is_some(),
            Err(TryLockError::Poisoned(e)) => e.into_inner().is_some(),
            // An abandoned tick still holds them and releases them when done
            Err(TryLockError::WouldBlock) => true,
        }
    }

    /// Spawn the loop on the current tokio runtime and return immediately.
    ///
    /// Only one loop may run at a time; a second call before [`Sampler::stop`]
    /// fails with [`Error::AlreadyRunning`]. Fails once the provider has been
    /// closed by [`Sampler::shutdown`] or lost to a panicking tick.
    pub fn start(&mut self) -> Result<()> {
        if self.running.is_some() {
            return Err(Error::AlreadyRunning);
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::Sampler(format!("No async runtime to start on: {}", e)))?;

        if !self.has_probes() {
            return Err(Error::Sampler(
                "Sensor provider was closed or lost by a previous run".to_string(),
            ));
        }

        let (stop, stop_rx) = watch::channel(false);
        let abandoned = Arc::new(AtomicBool::new(false));
        let outlet = Outlet {
            publisher: Arc::clone(&self.publisher),
            abandoned: Arc::clone(&abandoned),
        };
        let task = runtime.spawn(run(Arc::clone(&self.probes), outlet, stop_rx));
        self.running = Some(Running {
            stop,
            abandoned,
            task,
        });

        log::info!("Sampler started ({}ms interval)", TICK_INTERVAL.as_millis());
        Ok(())
    }

    /// Ask the loop to exit after its current tick and wait up to [`STOP_GRACE`]
    pub async fn stop(&mut self) -> Result<Shutdown> {
        let Some(Running {
            stop,
            abandoned,
            mut task,
        }) = self.running.take()
        else {
            return Ok(Shutdown::NotRunning);
        };

        // The loop may already have ended on its own
        let _ = stop.send(true);

        match tokio::time::timeout(STOP_GRACE, &mut task).await {
            Ok(Ok(Ok(()))) => {
                log::info!("Sampler stopped");
                Ok(Shutdown::Graceful)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(e)) => Err(Error::Sampler(format!("Sampler task failed: {}", e))),
            Err(_) => {
                log::warn!(
                    "Sampler did not stop within {}ms, abandoning the current tick",
                    STOP_GRACE.as_millis()
                );
                abandoned.store(true, Ordering::SeqCst);
                task.abort();
                self.publisher.send_modify(|s| s.status = SamplerStatus::Stopped);
                Ok(Shutdown::TimedOut)
            }
        }
    }

    /// Stop the loop and close the sensor provider.
    ///
    /// After a timed-out stop the provider is closed on the blocking pool as
    /// soon as the abandoned tick returns; this call does not wait for it.
    pub async fn shutdown(&mut self) -> Result<Shutdown> {
        let outcome = self.stop().await;

        let slot = Arc::clone(&self.probes);
        let closing = tokio::task::spawn_blocking(move || {
            let probes = lock_slot(&slot).take();
            if let Some(mut probes) = probes {
                probes.provider.close();
            }
        });

        if !matches!(outcome, Ok(Shutdown::TimedOut)) {
            if let Err(e) = closing.await {
                log::error!("Closing the sensor provider failed: {}", e);
            }
        }
        outcome
    }
}

async fn run(probes: ProbeSlot, outlet: Outlet, mut stop: watch::Receiver<bool>) -> Result<()> {
    let mut tick = outlet.publisher.borrow().tick;

    loop {
        if *stop.borrow() {
            break;
        }
        tick += 1;

        let slot = Arc::clone(&probes);
        let tick_outlet = outlet.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let mut guard = lock_slot(&slot);
            let Some(probes) = guard.as_mut() else {
                return false;
            };
            run_tick(probes, &tick_outlet, tick);
            true
        })
        .await;

        match joined {
            Ok(true) => {}
            Ok(false) => {
                outlet.publish(|s| s.status = SamplerStatus::Stopped);
                return Err(Error::Sampler("Sensor provider is closed".to_string()));
            }
            Err(e) => {
                log::error!("Sampler tick {} failed: {}", tick, e);
                let lost = lock_slot(&probes).take();
                if let Some(mut lost) = lost {
                    lost.provider.close();
                }
                outlet.publish(|s| s.status = SamplerStatus::Stopped);
                return Err(Error::Sampler(format!(
                    "Sampler tick {} failed, sensor provider lost: {}",
                    tick, e
                )));
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK_INTERVAL) => {}
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
            }
        }
    }

    outlet.publish(|s| s.status = SamplerStatus::Stopped);
    log::debug!("Sampler loop exited after tick {}", tick);
    Ok(())
}

/// Publish one step's reading, or record why it failed
fn publish_step<T>(
    outlet: &Outlet,
    tick: u64,
    group: SampleGroup,
    result: Result<T>,
    failures: &mut Vec<StepFailure>,
    apply: impl FnOnce(&mut Snapshot, T),
) {
    match result {
        Ok(reading) => outlet.publish(|s| {
            s.tick = tick;
            s.taken_at = chrono::Utc::now().timestamp();
            apply(s, reading);
        }),
        Err(e) => {
            log::warn!("Tick {}: {} sampling failed: {}", tick, group, e);
            failures.push(StepFailure {
                group,
                message: e.to_string(),
            });
        }
    }
}

fn run_tick(probes: &mut Probes, outlet: &Outlet, tick: u64) {
    let mut failures = Vec::new();

    let processor = processor::sample(&mut *probes.provider);
    publish_step(outlet, tick, SampleGroup::Processor, processor, &mut failures, |s, r| {
        s.processor = r
    });

    let graphics = graphics::sample(&mut *probes.provider);
    publish_step(outlet, tick, SampleGroup::Graphics, graphics, &mut failures, |s, r| {
        s.graphics = r
    });

    let memory = memory::sample(&mut *probes.instrumentation);
    publish_step(outlet, tick, SampleGroup::Memory, memory, &mut failures, |s, r| {
        s.memory = r
    });

    let status = if failures.is_empty() {
        SamplerStatus::Live
    } else {
        SamplerStatus::Degraded { failures }
    };
    log::trace!("Tick {} done: {:?}", tick, status);

    outlet.publish(|s| {
        s.tick = tick;
        s.status = status;
    });
}
