//! Administrator rights handling
//!
//! On Windows most temperature sensors are only readable from an elevated
//! process. Other platforms get no-op stubs.

/// Result of [`ensure_elevated`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// Already running with administrator rights
    Elevated,
    /// An elevated copy was launched; this process should exit
    Relaunched,
    /// Continuing without administrator rights
    Unelevated,
}

/// Relaunch through the UAC prompt when requested and not already elevated
pub fn ensure_elevated(requested: bool) -> Elevation {
    if is_elevated() {
        return Elevation::Elevated;
    }
    if requested {
        if relaunch_elevated() {
            log::info!("Relaunched with administrator rights");
            return Elevation::Relaunched;
        }
        log::warn!("Elevation was requested but the relaunch failed or was declined");
    }
    Elevation::Unelevated
}

#[cfg(target_os = "windows")]
pub fn is_elevated() -> bool {
    use windows_sys::Win32::Foundation::CloseHandle;
    use windows_sys::Win32::Security::{GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY};
    use windows_sys::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    unsafe {
        let mut token = std::ptr::null_mut();
        if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) == 0 {
            return false;
        }

        let mut elevation = TOKEN_ELEVATION { TokenIsElevated: 0 };
        let mut written = 0u32;
        let ok = GetTokenInformation(
            token,
            TokenElevation,
            &mut elevation as *mut TOKEN_ELEVATION as *mut _,
            std::mem::size_of::<TOKEN_ELEVATION>() as u32,
            &mut written,
        );
        CloseHandle(token);

        ok != 0 && elevation.TokenIsElevated != 0
    }
}

#[cfg(target_os = "windows")]
fn relaunch_elevated() -> bool {
    use windows_sys::Win32::UI::Shell::ShellExecuteW;

    fn wide(text: &str) -> Vec<u16> {
        text.encode_utf16().chain(std::iter::once(0)).collect()
    }

    let Ok(exe) = std::env::current_exe() else {
        return false;
    };
    let exe = wide(&exe.to_string_lossy());
    let verb = wide("runas");

    // ShellExecuteW reports success with a value above 32
    let instance = unsafe {
        ShellExecuteW(
            std::ptr::null_mut(),
            verb.as_ptr(),
            exe.as_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            1, // SW_SHOWNORMAL
        )
    };
    instance as usize > 32
}

#[cfg(not(target_os = "windows"))]
pub fn is_elevated() -> bool {
    false
}

#[cfg(not(target_os = "windows"))]
fn relaunch_elevated() -> bool {
    false
}
