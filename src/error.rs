//! Error types used across the crate. No `thiserror`/`anyhow` — hand-rolled
//! `std::error::Error` impls.

use std::fmt::Display;

/// Malformed Standard TM Text Format (TNF) input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::error::Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Catch-all error for I/O and runtime failures (enumerator file output,
/// reporter, config.toml handling).
#[derive(Debug)]
pub struct GenericError {
    message: String,
}

impl GenericError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::error::Error for GenericError {}

impl From<std::io::Error> for GenericError {
    fn from(error: std::io::Error) -> Self {
        GenericError {
            message: error.to_string(),
        }
    }
}

impl From<ParseError> for GenericError {
    fn from(error: ParseError) -> Self {
        GenericError {
            message: error.to_string(),
        }
    }
}

impl Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
