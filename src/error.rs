use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input ran out before the required number of entries was read.
    #[error("expected {expected} entries, but the input ended after {found}")]
    EndOfInput { expected: usize, found: usize },

    /// A line that the current options refuse to accept.
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: &'static str },

    /// Opening, creating or persisting a named file failed.
    #[error("could not {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to an already open stream failed.
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
