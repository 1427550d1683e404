use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Read,
    Parse,
    Write,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Read => "read",
            Stage::Parse => "parse",
            Stage::Write => "write",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("read failed: cannot read input {path:?}: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed: input {path:?} is not valid UTF-8: {source}")]
    InputNotUtf8 {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `position` is the 1-based number of the block in the input.
    #[error("parse failed: block {position} is malformed, expected a name and a date line but found {line_count} line(s)")]
    MalformedBlock { position: usize, line_count: usize },

    #[error("parse failed: block {position} has helpful count {value:?} which is out of range")]
    InvalidHelpfulCount { position: usize, value: String },

    #[error("write failed: cannot write output {path:?}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::InputNotFound { .. } | ConvertError::InputNotUtf8 { .. } => Stage::Read,
            ConvertError::MalformedBlock { .. } | ConvertError::InvalidHelpfulCount { .. } => {
                Stage::Parse
            }
            ConvertError::WriteFailure { .. } => Stage::Write,
        }
    }
}
