//! Portable physical memory counters backed by sysinfo

use crate::core::Result;
use crate::hardware::{Instrumentation, MemoryCounters};
use sysinfo::System;

/// Memory instrumentation through sysinfo
///
/// "Free" is the memory available to new allocations, which is what the
/// Windows `FreePhysicalMemory` counter reports as well.
pub struct SysinfoMemory {
    sys: System,
}

impl SysinfoMemory {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysinfoMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Instrumentation for SysinfoMemory {
    fn memory_counters(&mut self) -> Result<MemoryCounters> {
        self.sys.refresh_memory();

        Ok(MemoryCounters {
            total_kb: self.sys.total_memory() / 1024,
            free_kb: self.sys.available_memory() / 1024,
        })
    }
}
