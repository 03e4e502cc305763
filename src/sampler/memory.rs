//! Memory sampling: kilobyte counters to gigabytes and a load percentage

use crate::core::{MemoryReading, Result};
use crate::hardware::{Instrumentation, MemoryCounters};

const KB_PER_GB: f64 = 1024.0 * 1024.0;

fn round_2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Convert counters to a reading.
///
/// The load is derived from the already rounded gigabyte values, so it can
/// differ by a point from a percentage computed on raw kilobytes.
pub fn summarize(counters: MemoryCounters) -> MemoryReading {
    let total_gb = round_2(counters.total_kb as f64 / KB_PER_GB);
    let free_gb = round_2(counters.free_kb as f64 / KB_PER_GB);

    let load_percent = if total_gb > 0.0 {
        100 - (free_gb / total_gb * 100.0).round_ties_even() as i32
    } else {
        0
    };

    MemoryReading {
        total_gb,
        free_gb,
        load_percent,
    }
}

pub fn sample(instrumentation: &mut dyn Instrumentation) -> Result<MemoryReading> {
    Ok(summarize(instrumentation.memory_counters()?))
}
