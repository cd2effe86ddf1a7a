mod args;
mod shell;
#[cfg(test)]
mod tests;

use anyhow::{anyhow, Context, Result};
use args::Args;
use automacro::{create_sink, InputSink, LoggingSink, Session};
use clap::Parser;
use shell::Shell;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout belongs to the menu
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    info!(?args, "Starting");

    let session = Session::open(args.storage_paths());

    if let Some(path) = &args.export_json {
        session
            .store
            .export_json(path)
            .with_context(|| format!("Failed to export macros to {}", path.display()))?;
        println!("Exported {} macros to {}", session.store.len(), path.display());
        return Ok(());
    }

    if let Some(name) = &args.run {
        let mut sink = create_sink(args.dry_run).context("Failed to create input sink")?;
        let report = session
            .run_named(name, &mut sink)
            .ok_or_else(|| anyhow!("No macro named {:?}", name))?;
        info!(steps = report.steps, duration_ms = report.elapsed.as_millis(), "Replay done");
        return Ok(());
    }

    let sink: Box<dyn InputSink> = match create_sink(args.dry_run) {
        Ok(sink) => sink,
        Err(e) => {
            warn!("{}", e);
            eprintln!("Input injection unavailable ({}); replays will only be logged.", e);
            Box::new(LoggingSink)
        }
    };

    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock(), session, sink);
    shell.run().context("Console I/O failed")?;
    Ok(())
}
