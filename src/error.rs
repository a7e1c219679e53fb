use std::path::PathBuf;

use thiserror::Error;

use crate::document::Format;

/// A malformed command-line argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The argument does not start with `-` or `--`.
    #[error("argument invalid: \"{0}\"")]
    Invalid(String),

    /// `-key` was the last argument, so there is nothing to read its value from.
    #[error("no value specified for key: \"{0}\"")]
    MissingValue(String),
}

#[derive(Debug, Error)]
pub enum ArgfigError {
    #[error("parse argument #{position} fail: {source}")]
    Commandline {
        position: usize,
        #[source]
        source: ArgumentError,
    },

    #[error("open file fail: {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read fail: {0}")]
    Read(#[source] std::io::Error),

    #[error("cannot detect document format of {0}")]
    UnknownFormat(PathBuf),

    #[error("decode fail ({format}): {source}")]
    Decode {
        format: Format,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("value not found")]
    Absent,

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("marshal fail: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unmarshal fail: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
}

impl ArgfigError {
    pub(crate) fn decode(
        format: Format,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Decode {
            format,
            source: source.into(),
        }
    }
}
