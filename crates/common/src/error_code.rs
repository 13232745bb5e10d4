//! RPC error codes
//!
//! Coarse error classes reported to clients of a tablet. Numeric values are
//! part of the wire contract and must not be renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    Cancelled = 1,
    UnknownError = 2,
    BadInput = 3,
    DeadlineExceeded = 4,
    IntegrityError = 5,
    PermissionDenied = 6,
    /// A resource limit was hit; the request may succeed later
    ResourceExhausted = 7,
    QueryNotServed = 8,
    NotInTx = 9,
    /// Server-side invariant violation
    InternalError = 10,
    TransientError = 11,
    Unauthenticated = 12,
}

impl ErrorCode {
    /// Numeric wire value
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Look up a code by its wire value
    pub fn from_i32(value: i32) -> Option<Self> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Cancelled,
            2 => ErrorCode::UnknownError,
            3 => ErrorCode::BadInput,
            4 => ErrorCode::DeadlineExceeded,
            5 => ErrorCode::IntegrityError,
            6 => ErrorCode::PermissionDenied,
            7 => ErrorCode::ResourceExhausted,
            8 => ErrorCode::QueryNotServed,
            9 => ErrorCode::NotInTx,
            10 => ErrorCode::InternalError,
            11 => ErrorCode::TransientError,
            12 => ErrorCode::Unauthenticated,
            _ => return None,
        };
        Some(code)
    }

    /// Whether a client may retry the request unchanged
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorCode::ResourceExhausted | ErrorCode::TransientError | ErrorCode::QueryNotServed
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Success => "SUCCESS",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::BadInput => "BAD_INPUT",
            ErrorCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            ErrorCode::IntegrityError => "INTEGRITY_ERROR",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            ErrorCode::QueryNotServed => "QUERY_NOT_SERVED",
            ErrorCode::NotInTx => "NOT_IN_TX",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::TransientError => "TRANSIENT_ERROR",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
