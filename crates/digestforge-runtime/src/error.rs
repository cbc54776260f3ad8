//! Runtime error types.

/// Errors from constructing runtime settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Stream reads need a buffer of at least one byte.
    #[error("buffer size must be non-zero")]
    ZeroBufferSize,
}
