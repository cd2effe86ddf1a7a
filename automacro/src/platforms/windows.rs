use crate::sink::InputSink;
use crate::{MacroError, MouseButton, Result};
use tracing::debug;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MOVE,
    MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};

/// Injects input through `SendInput`. Needs no driver, only the rights of
/// the current desktop session.
#[derive(Debug, Default)]
pub struct WindowsSink;

impl WindowsSink {
    pub fn new() -> Result<Self> {
        debug!("Using SendInput backend");
        Ok(Self)
    }
}

fn mouse_input(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
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

/// Send a batch of events in one call so press and release stay adjacent
fn send(inputs: &[INPUT]) -> Result<()> {
    let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        return Err(MacroError::InjectionError(format!(
            "SendInput accepted {} of {} events: {}",
            sent,
            inputs.len(),
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

impl InputSink for WindowsSink {
    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<()> {
        send(&[mouse_input(dx, dy, MOUSEEVENTF_MOVE)])
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        let (down, up) = match button {
            MouseButton::Left => (MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP),
            MouseButton::Right => (MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP),
        };
        send(&[mouse_input(0, 0, down), mouse_input(0, 0, up)])
    }

    fn key(&mut self, vk: i32) -> Result<()> {
        // Virtual key codes are 16 bits wide, higher bits are dropped.
        let vk = VIRTUAL_KEY(vk as u16);
        send(&[
            key_input(vk, KEYBD_EVENT_FLAGS(0)),
            key_input(vk, KEYEVENTF_KEYUP),
        ])
    }
}
