use crate::authoring::Prompter;
use crate::engine::{play, ReplayReport};
use crate::sink::InputSink;
use crate::{Config, Macro, MacroStore, Result};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config.txt";
pub const DEFAULT_MACROS_PATH: &str = "macros.txt";

/// Where the two text resources live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub config: PathBuf,
    pub macros: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            macros: PathBuf::from(DEFAULT_MACROS_PATH),
        }
    }
}

/// Result of writing both resources. Each write is attempted even when the
/// other one fails.
#[derive(Debug)]
pub struct SaveReport {
    pub config: Result<()>,
    pub macros: Result<()>,
}

impl SaveReport {
    pub fn is_ok(&self) -> bool {
        self.config.is_ok() && self.macros.is_ok()
    }
}

/// Process-lifetime state behind the console: the replay config and the
/// macro store, loaded at startup and flushed on save and shutdown.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub store: MacroStore,
    paths: StoragePaths,
}

impl Session {
    /// Load both resources. Missing files yield the defaults and an empty store.
    pub fn open(paths: StoragePaths) -> Self {
        let config = Config::load(&paths.config);
        let store = MacroStore::load(&paths.macros);
        info!(
            default_delay_ms = config.default_delay_ms,
            macros = store.len(),
            "Session opened"
        );
        Self {
            config,
            store,
            paths,
        }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Replace the in-memory state with what is on disk
    pub fn reload(&mut self) {
        self.config = Config::load(&self.paths.config);
        self.store = MacroStore::load(&self.paths.macros);
    }

    /// Write both resources. A failed write leaves memory untouched.
    pub fn save(&self) -> SaveReport {
        SaveReport {
            config: self.config.save(&self.paths.config),
            macros: self.store.save(&self.paths.macros),
        }
    }

    /// Set the default delay. Negative values are rejected.
    pub fn set_default_delay(&mut self, ms: i32) -> bool {
        match u32::try_from(ms) {
            Ok(ms) => {
                self.config.default_delay_ms = ms;
                info!(default_delay_ms = ms, "Default delay updated");
                true
            }
            Err(_) => false,
        }
    }

    pub fn create<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> bool {
        self.store.create(prompter)
    }

    pub fn delete(&mut self, position: usize) -> Option<Macro> {
        self.store.remove(position)
    }

    /// Replay the macro at a 1-based position, `None` if out of range
    pub fn run<S: InputSink + ?Sized>(&self, position: usize, sink: &mut S) -> Option<ReplayReport> {
        let mac = self.store.get(position)?;
        Some(play(mac, &self.config, sink))
    }

    /// Replay the first macro with the given name, `None` if there is none
    pub fn run_named<S: InputSink + ?Sized>(&self, name: &str, sink: &mut S) -> Option<ReplayReport> {
        let mac = self.store.find(name)?;
        Some(play(mac, &self.config, sink))
    }
}
