//! Error types for the prepared pool

use proven_common::{Dtid, ErrorCode};
use std::fmt;
use thiserror::Error;

/// Reason a connection could not be registered as prepared
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    /// The DTID is already prepared. Two concurrent PREPAREs for one
    /// transaction is a coordinator bug, never a load condition.
    #[error("duplicate DTID in Prepare: {0}")]
    DuplicateDtid(Dtid),

    /// The pool is at its configured limit
    #[error("prepared transactions exceeded limit: {0}")]
    CapacityExceeded(usize),
}

impl PrepareError {
    /// Error code reported to the client for the failed PREPARE
    pub fn code(&self) -> ErrorCode {
        match self {
            PrepareError::DuplicateDtid(_) => ErrorCode::InternalError,
            PrepareError::CapacityExceeded(_) => ErrorCode::ResourceExhausted,
        }
    }

    /// Only capacity rejections clear up on their own
    pub fn is_retryable(&self) -> bool {
        matches!(self, PrepareError::CapacityExceeded(_))
    }
}

/// A rejected insertion
///
/// Ownership of the connection moves into [`crate::PreparedPool::insert`], so a
/// rejection hands it back; the caller still has to roll it back.
pub struct Rejected<C> {
    pub error: PrepareError,
    pub conn: C,
}

impl<C> Rejected<C> {
    pub fn error(&self) -> &PrepareError {
        &self.error
    }

    /// Recover the connection, discarding the error
    pub fn into_conn(self) -> C {
        self.conn
    }

    pub fn into_parts(self) -> (PrepareError, C) {
        (self.error, self.conn)
    }
}

// Connections are rarely Debug, so only the error is shown
impl<C> fmt::Debug for Rejected<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<C> fmt::Display for Rejected<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<C> std::error::Error for Rejected<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<C> From<Rejected<C>> for PrepareError {
    fn from(rejected: Rejected<C>) -> Self {
        rejected.error
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for pool insertions
pub type Result<T, C> = std::result::Result<T, Rejected<C>>;
