// Linux volume actuation through a uinput virtual keyboard
// Needs write access to /dev/uinput (root, or a udev rule for the input group)

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use log::warn;
use std::sync::Mutex;

use super::VolumeActuator;

pub struct LinuxVolumeActuator {
    device: Mutex<VirtualDevice>,
}

impl LinuxVolumeActuator {
    pub fn new() -> std::io::Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        keys.insert(Key::KEY_MUTE);
        keys.insert(Key::KEY_VOLUMEUP);
        keys.insert(Key::KEY_VOLUMEDOWN);

        let device = VirtualDeviceBuilder::new()?
            .name("gesture-volume media keys")
            .with_keys(&keys)?
            .build()?;

        Ok(Self {
            device: Mutex::new(device),
        })
    }

    /// Press and release one key; emit() appends the SYN_REPORT
    fn tap(&self, key: Key) {
        let events = [
            InputEvent::new(EventType::KEY, key.code(), 1),
            InputEvent::new(EventType::KEY, key.code(), 0),
        ];

        let mut device = match self.device.lock() {
            Ok(device) => device,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = device.emit(&events) {
            warn!("Failed to send {:?}: {}", key, e);
        }
    }
}

impl VolumeActuator for LinuxVolumeActuator {
    fn mute(&self) {
        self.tap(Key::KEY_MUTE);
    }

    fn volume_up(&self) {
        self.tap(Key::KEY_VOLUMEUP);
    }

    fn volume_down(&self) {
        self.tap(Key::KEY_VOLUMEDOWN);
    }

    fn backend_name(&self) -> &'static str {
        "uinput"
    }
}
