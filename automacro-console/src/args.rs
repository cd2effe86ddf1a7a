use automacro::session::{StoragePaths, DEFAULT_CONFIG_PATH, DEFAULT_MACROS_PATH};
use clap::Parser;
use std::path::PathBuf;

/// Author, save and replay input macros from a console menu
#[derive(Debug, Parser)]
#[command(name = "automacro", version, about)]
pub struct Args {
    /// Config resource (default delay)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Macro resource
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MACROS_PATH)]
    pub macros: PathBuf,

    /// Log injected input instead of sending it to the OS
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    /// Replay the first macro with this name and exit
    #[arg(long, value_name = "NAME", conflicts_with = "export_json")]
    pub run: Option<String>,

    /// Write the macro library as JSON and exit
    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

impl Args {
    pub fn storage_paths(&self) -> StoragePaths {
        StoragePaths {
            config: self.config.clone(),
            macros: self.macros.clone(),
        }
    }
}
