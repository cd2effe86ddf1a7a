use crate::{MouseButton, Result};
use std::time::Duration;
use tracing::info;

/// Destination for synthetic input events.
///
/// Each method injects one logical step: clicks and keys send the press and
/// the release together. `wait` blocks the calling thread by default;
/// fakes override it to observe timing without sleeping.
pub trait InputSink {
    /// Move the pointer relative to its current position
    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<()>;

    /// Press and release a mouse button
    fn click(&mut self, button: MouseButton) -> Result<()>;

    /// Press and release a virtual key code
    fn key(&mut self, vk: i32) -> Result<()>;

    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: InputSink + ?Sized> InputSink for Box<S> {
    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<()> {
        (**self).move_relative(dx, dy)
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        (**self).click(button)
    }

    fn key(&mut self, vk: i32) -> Result<()> {
        (**self).key(vk)
    }

    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration)
    }
}

/// Sink that only logs what it would inject. Waits still block, so a dry run
/// takes as long as the real replay.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl InputSink for LoggingSink {
    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<()> {
        info!(dx, dy, "[dry-run] move");
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        info!(%button, "[dry-run] click");
        Ok(())
    }

    fn key(&mut self, vk: i32) -> Result<()> {
        info!(vk, "[dry-run] key");
        Ok(())
    }
}

/// A call observed by [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    Move { dx: i32, dy: i32 },
    Click(MouseButton),
    Key(i32),
    Wait(Duration),
}

/// Sink that records every call instead of touching the OS. Waits return
/// immediately.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,

    /// When set, every injection returns an error after being recorded
    pub fail_injections: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose injections all fail
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail_injections: true,
        }
    }

    /// Sum of all recorded waits
    pub fn total_wait(&self) -> Duration {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SinkCall::Wait(duration) => Some(*duration),
                _ => None,
            })
            .sum()
    }

    fn record(&mut self, call: SinkCall) -> Result<()> {
        self.calls.push(call);
        if self.fail_injections {
            return Err(crate::MacroError::InjectionError(format!(
                "{:?} rejected by recording sink",
                call
            )));
        }
        Ok(())
    }
}

impl InputSink for RecordingSink {
    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.record(SinkCall::Move { dx, dy })
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.record(SinkCall::Click(button))
    }

    fn key(&mut self, vk: i32) -> Result<()> {
        self.record(SinkCall::Key(vk))
    }

    fn wait(&mut self, duration: Duration) {
        self.calls.push(SinkCall::Wait(duration));
    }
}
