// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors reported by the notification core and its ambient layers.
///
/// Duplicate queues and dismissals of unknown messages are policy no-ops
/// and never show up here.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A caller handed over a value the operation cannot accept.
    InvalidArgument(String),
    /// A container was asked to use an external items source while mirroring
    /// a manager (or the other way around).
    ItemsSourceConflict,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::InvalidArgument(e) => write!(f, "Invalid Argument: {}", e),
            Error::ItemsSourceConflict => write!(
                f,
                "Can't use both an items source and a manager at the same time"
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
