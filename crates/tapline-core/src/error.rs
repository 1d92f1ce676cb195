//! Error type shared by every designer and utility in this crate.

use thiserror::Error;

/// Errors raised when a precondition on a design parameter is violated.
///
/// Failures are deterministic: the same inputs always fail the same way, so
/// callers decide how to surface them (reject an edit, print, exit).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument is outside its valid domain.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
