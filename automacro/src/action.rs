use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the mouse button of a click step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
}

impl MouseButton {
    /// Interpret a button token. Only `right` selects the right button,
    /// anything else falls back to the left one.
    pub fn from_token(token: &str) -> Self {
        if token == "right" {
            MouseButton::Right
        } else {
            MouseButton::Left
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single primitive automation step.
///
/// Numeric fields hold whatever integer was parsed; no range validation
/// happens here. A negative `Delay` is kept as-is and clamped when replayed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Relative pointer displacement
    Move { dx: i32, dy: i32 },

    /// Press and release of a mouse button
    Click { button: MouseButton },

    /// Press and release of a virtual key code
    Key { vk: i32 },

    /// Pure wait in milliseconds, no input event
    Delay { ms: i32 },
}

impl Action {
    /// Whether the default inter-step delay follows this action on replay
    pub fn uses_default_delay(&self) -> bool {
        !matches!(self, Action::Delay { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { dx, dy } => write!(f, "move {dx} {dy}"),
            Action::Click { button } => write!(f, "click {button}"),
            Action::Key { vk } => write!(f, "key {vk}"),
            Action::Delay { ms } => write!(f, "delay {ms}"),
        }
    }
}
