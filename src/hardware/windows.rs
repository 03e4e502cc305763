//! Windows physical memory counters via GlobalMemoryStatusEx

use crate::core::{Error, Result};
use crate::hardware::{Instrumentation, MemoryCounters};
use windows_sys::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};

/// Memory instrumentation through the Win32 memory status API
pub struct GlobalMemoryStatus;

impl Instrumentation for GlobalMemoryStatus {
    fn memory_counters(&mut self) -> Result<MemoryCounters> {
        unsafe {
            let mut status: MEMORYSTATUSEX = std::mem::zeroed();
            status.dwLength = std::mem::size_of::<MEMORYSTATUSEX>() as u32;

            if GlobalMemoryStatusEx(&mut status) == 0 {
                return Err(Error::Instrumentation(format!(
                    "GlobalMemoryStatusEx failed: {}",
                    std::io::Error::last_os_error()
                )));
            }

            Ok(MemoryCounters {
                total_kb: status.ullTotalPhys / 1024,
                free_kb: status.ullAvailPhys / 1024,
            })
        }
    }
}
