use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaErrorCode {
    Io,
    Parse,
    NoMatchingWeapons,
    InvalidStatValues,
    InvalidSelection,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaError {
    pub code: MetaErrorCode,
    pub message: String,
}

impl MetaError {
    pub fn new(code: MetaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(MetaErrorCode::Cancelled, "session cancelled by operator")
    }
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for MetaError {}
