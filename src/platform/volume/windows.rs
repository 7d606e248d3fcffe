// Windows volume actuation via SendInput media virtual keys

use log::warn;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    VIRTUAL_KEY, VK_VOLUME_DOWN, VK_VOLUME_MUTE, VK_VOLUME_UP,
};

use super::VolumeActuator;

pub struct WindowsVolumeActuator;

impl WindowsVolumeActuator {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self)
    }

    fn key_input(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    fn tap(&self, vk: VIRTUAL_KEY) {
        let inputs = [
            Self::key_input(vk, KEYBD_EVENT_FLAGS(0)),
            Self::key_input(vk, KEYEVENTF_KEYUP),
        ];

        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            warn!(
                "SendInput delivered {} of {} events for virtual key {:#x}",
                sent,
                inputs.len(),
                vk.0
            );
        }
    }
}

impl VolumeActuator for WindowsVolumeActuator {
    fn mute(&self) {
        self.tap(VK_VOLUME_MUTE);
    }

    fn volume_up(&self) {
        self.tap(VK_VOLUME_UP);
    }

    fn volume_down(&self) {
        self.tap(VK_VOLUME_DOWN);
    }

    fn backend_name(&self) -> &'static str {
        "SendInput"
    }
}
