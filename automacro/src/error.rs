use thiserror::Error;

/// Error types for macro persistence and replay
#[derive(Debug, Error)]
pub enum MacroError {
    /// No input-injection backend exists for the current platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The OS rejected a synthetic input event
    #[error("Failed to inject input: {0}")]
    InjectionError(String),

    /// Error when saving a resource
    #[error("Failed to save {resource}: {source}")]
    SaveError {
        resource: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Error when serializing or deserializing JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for macro operations
pub type Result<T> = std::result::Result<T, MacroError>;
