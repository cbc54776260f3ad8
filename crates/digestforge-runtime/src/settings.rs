//! Read settings for file and stream inputs.
//!
//! Generated file and stream operations take a [`ReadSettings`] explicitly.
//! The public wrappers obtain it from [`ReadSettings::current`], which
//! honours a per-thread override installed with [`ReadSettings::scope`].
//! An override lives for the dynamic extent of one closure and is never
//! visible to other threads.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Default chunk size, in bytes, used when reading files and streams.
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

thread_local! {
    static SCOPED: Cell<Option<ReadSettings>> = const { Cell::new(None) };
}

/// Settings applied when a generated function reads a file or stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawReadSettings", into = "RawReadSettings")]
pub struct ReadSettings {
    buffer_size: usize,
}

impl ReadSettings {
    /// Creates settings with the given chunk size.
    pub fn with_buffer_size(buffer_size: usize) -> Result<Self, SettingsError> {
        if buffer_size == 0 {
            return Err(SettingsError::ZeroBufferSize);
        }
        Ok(Self { buffer_size })
    }

    /// Chunk size in bytes.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the innermost scoped override on this thread, or the default.
    pub fn current() -> Self {
        SCOPED.with(Cell::get).unwrap_or_default()
    }

    /// Runs `f` with `self` as the current settings on this thread.
    ///
    /// The previous value is restored when `f` returns or unwinds.
    pub fn scope<R>(self, f: impl FnOnce() -> R) -> R {
        let previous = SCOPED.with(|cell| cell.replace(Some(self)));
        let _restore = Restore(previous);
        f()
    }
}

impl Default for ReadSettings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

struct Restore(Option<ReadSettings>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        SCOPED.with(|cell| cell.set(previous));
    }
}

#[derive(Serialize, Deserialize)]
struct RawReadSettings {
    #[serde(default = "default_buffer_size")]
    buffer_size: usize,
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl TryFrom<RawReadSettings> for ReadSettings {
    type Error = SettingsError;

    fn try_from(raw: RawReadSettings) -> Result<Self, Self::Error> {
        Self::with_buffer_size(raw.buffer_size)
    }
}

impl From<ReadSettings> for RawReadSettings {
    fn from(settings: ReadSettings) -> Self {
        Self {
            buffer_size: settings.buffer_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_2048() {
        assert_eq!(ReadSettings::default().buffer_size(), 2048);
        assert_eq!(ReadSettings::current(), ReadSettings::default());
    }

    #[test]
    fn zero_buffer_rejected() {
        assert_eq!(
            ReadSettings::with_buffer_size(0),
            Err(SettingsError::ZeroBufferSize)
        );
    }

    #[test]
    fn scope_nests_and_restores() {
        let outer = ReadSettings::with_buffer_size(64).unwrap();
        let inner = ReadSettings::with_buffer_size(7).unwrap();

        outer.scope(|| {
            assert_eq!(ReadSettings::current().buffer_size(), 64);
            inner.scope(|| assert_eq!(ReadSettings::current().buffer_size(), 7));
            assert_eq!(ReadSettings::current().buffer_size(), 64);
        });
        assert_eq!(ReadSettings::current(), ReadSettings::default());
    }

    #[test]
    fn scope_restores_after_panic() {
        let settings = ReadSettings::with_buffer_size(16).unwrap();
        let result = std::panic::catch_unwind(|| settings.scope(|| panic!("boom")));
        assert!(result.is_err());
        assert_eq!(ReadSettings::current(), ReadSettings::default());
    }

    #[test]
    fn scope_is_thread_local() {
        let settings = ReadSettings::with_buffer_size(99).unwrap();
        settings.scope(|| {
            let seen = std::thread::spawn(ReadSettings::current).join().unwrap();
            assert_eq!(seen, ReadSettings::default());
        });
    }

    #[test]
    fn deserialize_validates() {
        let parsed: ReadSettings = serde_json::from_str(r#"{"buffer_size": 4096}"#).unwrap();
        assert_eq!(parsed.buffer_size(), 4096);

        let defaulted: ReadSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, ReadSettings::default());

        assert!(serde_json::from_str::<ReadSettings>(r#"{"buffer_size": 0}"#).is_err());
    }
}
