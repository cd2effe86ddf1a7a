use crate::sink::{InputSink, LoggingSink};
use crate::Result;

#[cfg(target_os = "windows")]
pub mod windows;

/// Create the input sink for the current platform.
///
/// A dry run always gets a [`LoggingSink`]; otherwise the native backend is
/// used, or `UnsupportedPlatform` is returned where none exists.
pub fn create_sink(dry_run: bool) -> Result<Box<dyn InputSink>> {
    if dry_run {
        return Ok(Box::new(LoggingSink));
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::WindowsSink::new()?))
    }
    #[cfg(not(target_os = "windows"))]
    {
        Err(crate::MacroError::UnsupportedPlatform(
            "Input injection is only supported on Windows, use --dry-run elsewhere".to_string(),
        ))
    }
}
