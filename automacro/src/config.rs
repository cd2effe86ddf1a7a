use crate::{codec, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Pause applied after every move, click and key step unless configured
pub const DEFAULT_DELAY_MS: u32 = 50;

/// Persisted replay settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Pause after every move, click and key step (milliseconds)
    pub default_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl Config {
    pub fn new(default_delay_ms: u32) -> Self {
        Self { default_delay_ms }
    }

    pub fn default_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.default_delay_ms))
    }

    /// Load from a config resource; a missing file yields the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        codec::load_config(path.as_ref())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        codec::save_config(path.as_ref(), self)
    }
}
