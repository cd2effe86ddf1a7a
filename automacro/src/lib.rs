//! Input macros for the desktop
//!
//! This crate provides the pieces of a driver-free macro tool: the macro data
//! model, the line-oriented text formats used to persist macros and the
//! replay config, and an engine that replays macros against an input sink
//! with per-step timing. Shells drive it through [`Session`].

pub mod action;
pub mod authoring;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod macros;
pub mod platforms;
pub mod session;
pub mod sink;

pub use action::{Action, MouseButton};
pub use authoring::{author_macro, Prompter, StepCommand};
pub use config::{Config, DEFAULT_DELAY_MS};
pub use engine::{play, ReplayReport};
pub use error::{MacroError, Result};
pub use macros::{Macro, MacroStore, MacroSummary};
pub use platforms::create_sink;
pub use session::{SaveReport, Session, StoragePaths};
pub use sink::{InputSink, LoggingSink, RecordingSink, SinkCall};
