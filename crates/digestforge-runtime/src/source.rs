//! Byte-source normalization for HMAC keys.
//!
//! A key may arrive as bytes, text, a file path, or an open stream.
//! [`ByteSource::normalize`] turns every variant into one byte sequence:
//! bytes pass through, text is UTF-8 encoded, files and streams are read to
//! the end. Reading consumes the stream.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::{ReadSettings, Stream, open_file};

/// An auxiliary input that can be coerced to bytes.
pub enum ByteSource<'a> {
    Bytes(Cow<'a, [u8]>),
    Text(Cow<'a, str>),
    File(Cow<'a, Path>),
    Stream(Box<dyn Read + 'a>),
}

impl<'a> ByteSource<'a> {
    /// Wraps any reader; it is read to the end on normalization.
    pub fn stream(reader: impl Read + 'a) -> Self {
        Self::Stream(Box::new(reader))
    }

    /// Names a file whose full contents are the value.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(Cow::Owned(path.into()))
    }

    /// Produces the canonical byte sequence.
    ///
    /// Borrowed bytes and text are returned without copying. File and stream
    /// failures are returned unchanged.
    pub fn normalize(self, settings: &ReadSettings) -> io::Result<Cow<'a, [u8]>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Text(Cow::Borrowed(text)) => Ok(Cow::Borrowed(text.as_bytes())),
            Self::Text(Cow::Owned(text)) => Ok(Cow::Owned(text.into_bytes())),
            Self::File(path) => {
                let mut file = open_file(&path)?;
                let contents = Stream::new(&mut file, settings).read_to_vec()?;
                tracing::trace!(path = %path.display(), len = contents.len(), "read key file");
                Ok(Cow::Owned(contents))
            }
            Self::Stream(mut reader) => {
                let contents = Stream::new(&mut reader, settings).read_to_vec()?;
                tracing::trace!(len = contents.len(), "read key stream");
                Ok(Cow::Owned(contents))
            }
        }
    }
}

impl fmt::Debug for ByteSource<'_> {
    // Key material stays out of debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteSource<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Vec<u8>> for ByteSource<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a Vec<u8>> for ByteSource<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Bytes> for ByteSource<'_> {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(Cow::Owned(bytes.to_vec()))
    }
}

impl<'a> From<&'a str> for ByteSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for ByteSource<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a String> for ByteSource<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text.as_str()))
    }
}

impl<'a> From<&'a Path> for ByteSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::File(Cow::Borrowed(path))
    }
}

impl From<PathBuf> for ByteSource<'_> {
    fn from(path: PathBuf) -> Self {
        Self::File(Cow::Owned(path))
    }
}

impl<'a> From<&'a PathBuf> for ByteSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::File(Cow::Borrowed(path.as_path()))
    }
}

impl From<File> for ByteSource<'_> {
    fn from(file: File) -> Self {
        Self::stream(file)
    }
}
