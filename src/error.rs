//! Crate-level error types.

use std::fmt;

use crate::batch::slots::PoolFull;

/// Errors produced by the glade crate.
#[derive(Debug)]
pub enum GladeError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A fixed-capacity pool refused a registration.
    Pool(PoolFull),
}

impl fmt::Display for GladeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Pool(e) => write!(f, "pool error: {e}"),
        }
    }
}

impl std::error::Error for GladeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Pool(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for GladeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<PoolFull> for GladeError {
    fn from(e: PoolFull) -> Self {
        Self::Pool(e)
    }
}
