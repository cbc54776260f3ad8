//! # digestforge: digest and HMAC function families
//!
//! Every algorithm listed in `digestforge.toml` gets a family of functions
//! generated at build time. For a base name `x`:
//!
//! | Function | Input | Output |
//! |---|---|---|
//! | `x` | bytes or text | hex `String` |
//! | `x_bytes` | bytes or text | `Vec<u8>` |
//! | `x_raw` | bytes or text | the algorithm's own digest type |
//! | `x_file` | path | `io::Result<String>` |
//! | `x_file_bytes` | path | `io::Result<Vec<u8>>` |
//! | `x_file_raw` | path | `io::Result<` native digest `>` |
//!
//! Algorithms that support HMAC (`sha1`, `sha256`, `sha512`) add the same
//! six shapes as `x_hmac*`, each taking a key as a second argument. Keys are
//! anything convertible into a [`ByteSource`]: bytes, text, a path, an open
//! file, or a stream.
//!
//! Passing `None` where an input is expected returns `None` (wrapped in
//! `Ok` for the fallible shapes) without reading a file or a key.
//!
//! ```
//! assert_eq!(digestforge::md5("abc"), "900150983cd24fb0d6963f7d28e17f72");
//! assert_eq!(digestforge::sha1(None::<&str>), None);
//!
//! let mac = digestforge::sha256_hmac("what do ya want for nothing?", "Jefe").unwrap();
//! assert!(mac.starts_with("5bdcc146"));
//! ```
//!
//! File reads are chunked; the chunk size comes from [`ReadSettings`] and
//! can be changed for a scope:
//!
//! ```no_run
//! use digestforge::ReadSettings;
//!
//! let settings = ReadSettings::with_buffer_size(64 * 1024).unwrap();
//! let digest = settings.scope(|| digestforge::sha512_file("large.bin"))?;
//! # Ok::<(), std::io::Error>(())
//! ```

#[allow(clippy::all, clippy::pedantic, missing_docs)]
mod generated {
    include!(env!("DIGESTFORGE_GENERATED"));
}

pub use digestforge_runtime::{
    ByteSource, DEFAULT_BUFFER_SIZE, DigestInput, FileInput, ReadSettings, SettingsError,
};
pub use generated::*;
