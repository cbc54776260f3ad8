//! Input kinds accepted by generated functions.
//!
//! Direct operations accept anything implementing [`DigestInput`] (byte
//! sequences and text); file operations accept anything implementing
//! [`FileInput`]. Both are also implemented for `Option<T>`: a `None` input
//! is routed to the generated absent variant and yields `None` instead of
//! failing. Present inputs yield the bare value, so `sha256("abc")` is a
//! `String` while `sha256(Some("abc"))` is an `Option<String>`.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;

/// A present direct input, borrowed for the duration of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

mod sealed {
    pub trait Sealed {}
}

/// A value that is always present as a direct input.
pub trait PresentInput: sealed::Sealed {
    fn as_input(&self) -> Input<'_>;
}

/// Direct input for generated operations: present or absent.
pub trait DigestInput {
    /// The result shape: `T` for present inputs, `Option<T>` for optional ones.
    type Output<T>;

    /// Routes a present value to `present` and an absent one to `absent`.
    fn dispatch<T>(
        self,
        present: impl FnOnce(Input<'_>) -> T,
        absent: impl FnOnce() -> Option<T>,
    ) -> Self::Output<T>;

    /// Fallible form of [`dispatch`](Self::dispatch).
    fn try_dispatch<T, E>(
        self,
        present: impl FnOnce(Input<'_>) -> Result<T, E>,
        absent: impl FnOnce() -> Option<T>,
    ) -> Result<Self::Output<T>, E>;
}

impl<P: PresentInput> DigestInput for P {
    type Output<T> = T;

    fn dispatch<T>(
        self,
        present: impl FnOnce(Input<'_>) -> T,
        _absent: impl FnOnce() -> Option<T>,
    ) -> T {
        present(self.as_input())
    }

    fn try_dispatch<T, E>(
        self,
        present: impl FnOnce(Input<'_>) -> Result<T, E>,
        _absent: impl FnOnce() -> Option<T>,
    ) -> Result<T, E> {
        present(self.as_input())
    }
}

impl<P: PresentInput> DigestInput for Option<P> {
    type Output<T> = Option<T>;

    fn dispatch<T>(
        self,
        present: impl FnOnce(Input<'_>) -> T,
        absent: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        match self {
            Some(value) => Some(present(value.as_input())),
            None => absent(),
        }
    }

    fn try_dispatch<T, E>(
        self,
        present: impl FnOnce(Input<'_>) -> Result<T, E>,
        absent: impl FnOnce() -> Option<T>,
    ) -> Result<Option<T>, E> {
        match self {
            Some(value) => present(value.as_input()).map(Some),
            None => Ok(absent()),
        }
    }
}

macro_rules! present_bytes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl PresentInput for $ty {
                fn as_input(&self) -> Input<'_> {
                    Input::Bytes(AsRef::<[u8]>::as_ref(self))
                }
            }
        )*
    };
}

macro_rules! present_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl PresentInput for $ty {
                fn as_input(&self) -> Input<'_> {
                    Input::Text(self.as_str())
                }
            }
        )*
    };
}

present_bytes!(&[u8], Vec<u8>, &Vec<u8>, Bytes);
present_text!(String, &String);

impl sealed::Sealed for &str {}
impl PresentInput for &str {
    fn as_input(&self) -> Input<'_> {
        Input::Text(self)
    }
}

impl<const N: usize> sealed::Sealed for &[u8; N] {}
impl<const N: usize> PresentInput for &[u8; N] {
    fn as_input(&self) -> Input<'_> {
        Input::Bytes(self.as_slice())
    }
}

/// A value that always names a file.
pub trait PresentPath: sealed::Sealed {
    fn as_path(&self) -> &Path;
}

/// File input for generated `-file` operations: present or absent.
pub trait FileInput {
    /// The result shape: `T` for present paths, `Option<T>` for optional ones.
    type Output<T>;

    /// Routes a present path to `present` and an absent one to `absent`.
    ///
    /// Errors from `present` are returned unchanged.
    fn dispatch_path<T>(
        self,
        present: impl FnOnce(&Path) -> io::Result<T>,
        absent: impl FnOnce() -> Option<T>,
    ) -> io::Result<Self::Output<T>>;
}

impl<P: PresentPath> FileInput for P {
    type Output<T> = T;

    fn dispatch_path<T>(
        self,
        present: impl FnOnce(&Path) -> io::Result<T>,
        _absent: impl FnOnce() -> Option<T>,
    ) -> io::Result<T> {
        present(self.as_path())
    }
}

impl<P: PresentPath> FileInput for Option<P> {
    type Output<T> = Option<T>;

    fn dispatch_path<T>(
        self,
        present: impl FnOnce(&Path) -> io::Result<T>,
        absent: impl FnOnce() -> Option<T>,
    ) -> io::Result<Option<T>> {
        match self {
            Some(path) => present(path.as_path()).map(Some),
            None => Ok(absent()),
        }
    }
}

macro_rules! present_path {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl PresentPath for $ty {
                fn as_path(&self) -> &Path {
                    Path::new(self)
                }
            }
        )*
    };
}

// `&str` and `String` are already sealed through their direct-input impls.
present_path!(&Path, PathBuf, &PathBuf);

impl PresentPath for &str {
    fn as_path(&self) -> &Path {
        Path::new(self)
    }
}

impl PresentPath for String {
    fn as_path(&self) -> &Path {
        Path::new(self)
    }
}

impl PresentPath for &String {
    fn as_path(&self) -> &Path {
        Path::new(self.as_str())
    }
}
