use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `QuarantineError` and maps other errors to
/// convert to a `QuarantineError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum QuarantineError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CSVError(csv::Error),
    ReportError(String),
    /// An upgrade asked for more role reassignments than there are
    /// agents without a privileged role.
    InsufficientEligibleAgents {
        requested: usize,
        eligible: usize,
    },
    QuarantineError(String),
}

impl From<io::Error> for QuarantineError {
    fn from(error: io::Error) -> Self {
        QuarantineError::IoError(error)
    }
}

impl From<serde_json::Error> for QuarantineError {
    fn from(error: serde_json::Error) -> Self {
        QuarantineError::JsonError(error)
    }
}

impl From<csv::Error> for QuarantineError {
    fn from(error: csv::Error) -> Self {
        QuarantineError::CSVError(error)
    }
}

impl From<String> for QuarantineError {
    fn from(error: String) -> Self {
        QuarantineError::QuarantineError(error)
    }
}

impl From<&str> for QuarantineError {
    fn from(error: &str) -> Self {
        QuarantineError::QuarantineError(error.to_string())
    }
}

impl std::error::Error for QuarantineError {}

impl Display for QuarantineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {self:?}")?;
        Ok(())
    }
}
