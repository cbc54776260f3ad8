//! Chunked stream reading.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::ReadSettings;

/// A readable source handed to stream templates.
///
/// Reads happen in chunks of the configured buffer size. The stream borrows
/// its reader, so whoever opened the reader still owns (and closes) it.
pub struct Stream<'a> {
    reader: &'a mut dyn Read,
    buffer_size: usize,
}

impl<'a> Stream<'a> {
    /// Wraps `reader`, reading `settings.buffer_size()` bytes at a time.
    pub fn new(reader: &'a mut dyn Read, settings: &ReadSettings) -> Self {
        Self {
            reader,
            buffer_size: settings.buffer_size(),
        }
    }

    /// Feeds every chunk to `f` until end of input.
    ///
    /// Returns the total number of bytes read. Interrupted reads are retried;
    /// any other error is returned as-is.
    pub fn for_each_chunk(&mut self, mut f: impl FnMut(&[u8])) -> io::Result<u64> {
        let mut buf = vec![0u8; self.buffer_size];
        let mut total = 0u64;
        loop {
            let n = match self.reader.read(&mut buf) {
                Ok(0) => return Ok(total),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            f(&buf[..n]);
            total += n as u64;
        }
    }

    /// Reads the remainder of the stream into memory.
    pub fn read_to_vec(&mut self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.for_each_chunk(|chunk| out.extend_from_slice(chunk))?;
        Ok(out)
    }
}

/// Opens `path` for reading.
///
/// The returned handle closes when dropped, so callers that keep it in a
/// local binding release it on every exit path.
pub fn open_file(path: &Path) -> io::Result<File> {
    tracing::trace!(path = %path.display(), "opening digest input");
    File::open(path)
}
