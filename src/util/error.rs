use std::io;
use std::os::raw::c_int;
use std::path::PathBuf;

use thiserror::Error;

type ErrorNum = c_int;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("content mismatch on {}: wrote {written} bytes, read {read} bytes, first difference at offset {first_difference}", .path.display())]
    Mismatch {
        path: PathBuf,
        written: usize,
        read: usize,
        first_difference: usize,
    },

    #[error("{request} request failed: {source}")]
    Request { request: &'static str, source: io::Error },

    #[error("record must be {expected} bytes, got {actual}")]
    Decode { expected: usize, actual: usize },

    #[error("cannot read input: {0}")]
    Input(io::Error),
}

impl Error {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Open { path: path.into(), source }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io { path: path.into(), source }
    }

    /// The errno behind this error, `EIO` when there is none.
    pub fn error_num(&self) -> ErrorNum {
        let source = match self {
            Error::Open { source, .. } | Error::Io { source, .. } | Error::Request { source, .. } => source,
            Error::Input(source) => source,
            Error::Mismatch { .. } | Error::Decode { .. } => return libc::EIO,
        };
        source.raw_os_error().unwrap_or(libc::EIO)
    }
}
