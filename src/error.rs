use std::path::PathBuf;

/// An error that can occur when constructing, serialising, or loading an
/// [`FMIndex`](crate::FMIndex).
#[derive(Debug)]
pub enum Error {
    /// Allocating one of the index's backing arrays failed.
    ///
    /// Never retried; the caller gets it back immediately.
    OutOfMemory,

    /// The input text contains the sentinel byte (`$`, `0x24`) that the
    /// index reserves for itself.
    InputContainsSentinel,

    /// Construction was asked to index the empty text.
    EmptyInput,

    /// An I/O failure while reading or writing a serialised index.
    IoError {
        path: Option<PathBuf>,
        kind: std::io::ErrorKind,
    },

    /// The byte stream being loaded is not a valid serialised index.
    MalformedIndex { offset: u64, reason: String },

    /// A query pattern contained a symbol absent from the index's alphabet.
    ///
    /// This variant exists for documentation purposes only: queries never
    /// return it as an error, they surface it as an empty result interval
    /// (see [`FMIndex::count`](crate::FMIndex::count)).
    AlphabetMismatch,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OutOfMemory => write!(f, "failed to allocate memory for the index"),
            Error::InputContainsSentinel => {
                write!(f, "input text contains the reserved sentinel byte '$'")
            }
            Error::EmptyInput => write!(f, "cannot build an index over the empty text"),
            Error::IoError { path, kind } => match path {
                Some(path) => write!(f, "I/O error on {}: {}", path.display(), kind),
                None => write!(f, "I/O error: {}", kind),
            },
            Error::MalformedIndex { offset, reason } => {
                write!(f, "malformed index at byte offset {}: {}", offset, reason)
            }
            Error::AlphabetMismatch => write!(f, "pattern symbol not present in the alphabet"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError {
            path: None,
            kind: err.kind(),
        }
    }
}
