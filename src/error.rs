//! Error handling for the jsonc-norm crate.

use std::{error, fmt, io, path::PathBuf};

/// The error type used in this crate.
///
/// Normalization itself never rejects input; malformed JSON is passed through
/// and reported by the decoder as [Error::Decode].
#[derive(Debug)]
pub enum Error {
    /// The source file could not be read. Nothing was normalized.
    Read { path: PathBuf, source: io::Error },
    /// The normalized text was rejected by the strict JSON decoder.
    Decode(serde_json::Error),
    /// Error writing normalized JSON to the provided std::io::Write.
    Write(io::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Read { source, .. } => Some(source),
            Error::Decode(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "reading {}: {source}", path.display())
            }
            Self::Decode(err) => write!(f, "decoding json: {err}"),
            Self::Write(err) => write!(f, "writing: {err}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Write(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Decode(value)
    }
}
