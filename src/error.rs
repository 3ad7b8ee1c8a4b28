//! Crate-level error types.

use std::fmt;

/// Errors produced by the unicam crate.
///
/// The interactive core itself has no recoverable I/O failures; its
/// numerical degeneracies are expressed as `Option` returns and documented
/// fallback values. These variants cover the options/preset layer only.
#[derive(Debug)]
pub enum UnicamError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for UnicamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for UnicamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for UnicamError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
