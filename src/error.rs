// SPDX-License-Identifier: MPL-2.0
use crate::stack::Lifecycle;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    I18n(String),
    /// Work area or notice size cannot be laid out.
    Geometry(String),
    /// A lifecycle transition was requested from a state that forbids it.
    InvalidTransition {
        notice: u64,
        from: Lifecycle,
        action: &'static str,
    },
    /// The notice is not (or no longer) in the registry.
    UnknownNotice(u64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::I18n(e) => write!(f, "I18n Error: {}", e),
            Error::Geometry(e) => write!(f, "Geometry Error: {}", e),
            Error::InvalidTransition {
                notice,
                from,
                action,
            } => write!(f, "Notice {} cannot {} while {:?}", notice, action, from),
            Error::UnknownNotice(id) => write!(f, "Unknown notice {}", id),
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
