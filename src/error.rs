use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Profile operation rejected: {0}")]
    Rejected(String),
    #[error("Parsing error: {0}")]
    Parse(String),
}

impl ProfileError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// True when the failure is an authorization or validation refusal rather
    /// than an I/O or decoding problem.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Message used whenever a gated mutation is attempted with the wrong password.
pub(crate) const PASSWORD_CHECK_FAILED: &str = "password check failed";
