//! Verification error taxonomy.
//!
//! Every failure is terminal for the check that raised it. The `Display`
//! text is the diagnostic printed to the console.

use std::fmt;

use thiserror::Error;

/// Result type alias for verification steps
pub type VerifyResult<T> = Result<T, VerifyError>;

/// The HTTP call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Save,
    Read,
    List,
    CreateRun,
    RunStatus,
    Cancel,
    Timeout,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save => write!(f, "Save"),
            Self::Read => write!(f, "Read"),
            Self::List => write!(f, "List"),
            Self::CreateRun => write!(f, "Create run"),
            Self::RunStatus => write!(f, "Get status"),
            Self::Cancel => write!(f, "Cancel"),
            Self::Timeout => write!(f, "Timeout"),
        }
    }
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Invalid base URL '{url}': {detail}")]
    InvalidBaseUrl { url: String, detail: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Service unreachable, refused, or the exchange broke mid-flight.
    #[error("Connection failed: {source}")]
    Connection {
        step: Step,
        #[source]
        source: reqwest::Error,
    },

    #[error("{step} failed: {status} - {body}")]
    UnexpectedStatus { step: Step, status: u16, body: String },

    #[error("{step} returned an unreadable body: {detail}")]
    MalformedBody { step: Step, detail: String },

    #[error("Content verification failed! expected {expected:?}, got {actual:?}")]
    ContentMismatch { expected: String, actual: String },

    #[error("File '{file_id}' NOT found in listing!")]
    NotListed { file_id: String, listing: String },

    #[error("Expected '{expected}', got '{actual}' for run {run_id}")]
    UnexpectedRunStatus {
        run_id: String,
        expected: String,
        actual: String,
    },
}

impl VerifyError {
    /// The step a network-level failure happened in, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Connection { step, .. }
            | Self::UnexpectedStatus { step, .. }
            | Self::MalformedBody { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_carries_code_and_body() {
        let err = VerifyError::UnexpectedStatus {
            step: Step::Save,
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "Save failed: 500 - boom");
        assert_eq!(err.step(), Some(Step::Save));
        assert!(!err.is_connection());
    }

    #[test]
    fn test_mismatch_has_no_step() {
        let err = VerifyError::ContentMismatch {
            expected: "a".into(),
            actual: "b".into(),
        };
        assert!(err.to_string().starts_with("Content verification failed!"));
        assert_eq!(err.step(), None);
    }
}
