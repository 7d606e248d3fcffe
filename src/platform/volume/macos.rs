// macOS volume actuation via osascript
// AppleScript volume runs 0-100; 6 matches one media-key step (1/16 of the range)

use log::warn;
use std::process::Command;

use super::VolumeActuator;

const VOLUME_STEP: u8 = 6;

pub struct MacOSVolumeActuator;

impl MacOSVolumeActuator {
    pub fn new() -> std::io::Result<Self> {
        // Fail early if osascript is missing rather than on the first gesture
        Command::new("osascript").arg("-e").arg("return").output()?;
        Ok(Self)
    }

    fn run(&self, script: &str) {
        match Command::new("osascript").arg("-e").arg(script).output() {
            Ok(output) if !output.status.success() => {
                warn!(
                    "osascript failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to run osascript: {}", e),
        }
    }
}

impl VolumeActuator for MacOSVolumeActuator {
    fn mute(&self) {
        self.run("set volume output muted (not (output muted of (get volume settings)))");
    }

    fn volume_up(&self) {
        self.run(&format!(
            "set volume output volume ((output volume of (get volume settings)) + {})",
            VOLUME_STEP
        ));
    }

    fn volume_down(&self) {
        self.run(&format!(
            "set volume output volume ((output volume of (get volume settings)) - {})",
            VOLUME_STEP
        ));
    }

    fn backend_name(&self) -> &'static str {
        "osascript"
    }
}
