// Platform-specific volume actuation
// Each backend sends the OS media keys for mute / volume up / volume down

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use self::macos::MacOSVolumeActuator;

#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "windows")]
pub use self::windows::WindowsVolumeActuator;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use self::linux::LinuxVolumeActuator;

use crate::models::gesture::VolumeAction;
use log::{info, warn};

/// Fire-and-forget actuation capability.
///
/// Implementations log failures and return; callers never learn whether the
/// OS accepted the key.
pub trait VolumeActuator: Send + Sync {
    fn mute(&self);
    fn volume_up(&self);
    fn volume_down(&self);

    fn trigger(&self, action: VolumeAction) {
        match action {
            VolumeAction::Mute => self.mute(),
            VolumeAction::VolumeUp => self.volume_up(),
            VolumeAction::VolumeDown => self.volume_down(),
        }
    }

    fn backend_name(&self) -> &'static str;
}

// Platform-specific type alias
#[cfg(target_os = "macos")]
pub type PlatformVolumeActuator = macos::MacOSVolumeActuator;

#[cfg(target_os = "windows")]
pub type PlatformVolumeActuator = self::windows::WindowsVolumeActuator;

#[cfg(target_os = "linux")]
pub type PlatformVolumeActuator = linux::LinuxVolumeActuator;

/// Dry-run backend: logs every action and touches nothing
#[derive(Debug, Default)]
pub struct LoggingActuator;

impl VolumeActuator for LoggingActuator {
    fn mute(&self) {
        info!("[dry-run] mute");
    }

    fn volume_up(&self) {
        info!("[dry-run] volume up");
    }

    fn volume_down(&self) {
        info!("[dry-run] volume down");
    }

    fn backend_name(&self) -> &'static str {
        "dry-run"
    }
}

/// Pick the actuator for this machine.
///
/// Falls back to the dry-run backend when the platform backend cannot be
/// opened (e.g. no access to /dev/uinput), so the engine keeps running.
pub fn create_actuator(dry_run: bool) -> Box<dyn VolumeActuator> {
    if dry_run {
        return Box::new(LoggingActuator);
    }

    #[cfg(any(target_os = "macos", target_os = "windows", target_os = "linux"))]
    {
        match PlatformVolumeActuator::new() {
            Ok(actuator) => {
                info!("Volume actuator initialized ({})", actuator.backend_name());
                return Box::new(actuator);
            }
            Err(e) => {
                warn!("Failed to initialize volume actuator: {}", e);
                warn!("Volume actions will only be logged");
            }
        }
    }

    Box::new(LoggingActuator)
}
