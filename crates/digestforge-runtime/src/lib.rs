//! # digestforge-runtime: support code for generated digest families
//!
//! Functions emitted by `digestforge-codegen` call into this crate for
//! everything that is not algorithm specific:
//!
//! - **Input kinds**: [`DigestInput`] (bytes or text), [`FileInput`] (paths),
//!   and `Option` forms of both for absent inputs
//! - **Key normalization**: [`ByteSource`] coerces bytes, text, files, and
//!   streams into one byte sequence
//! - **Streaming**: [`Stream`] reads in chunks sized by [`ReadSettings`]
//!
//! # Read settings
//!
//! ```
//! use digestforge_runtime::ReadSettings;
//!
//! let small = ReadSettings::with_buffer_size(512).unwrap();
//! small.scope(|| {
//!     assert_eq!(ReadSettings::current().buffer_size(), 512);
//! });
//! assert_eq!(ReadSettings::current().buffer_size(), 2048);
//! ```

mod error;
mod input;
mod settings;
mod source;
mod stream;

pub use error::SettingsError;
pub use input::{DigestInput, FileInput, Input, PresentInput, PresentPath};
pub use settings::{DEFAULT_BUFFER_SIZE, ReadSettings};
pub use source::ByteSource;
pub use stream::{Stream, open_file};

/// Re-exported for text-encoding templates in generated code.
pub use hex;
