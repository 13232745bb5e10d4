//! Common types for Proven two-phase commit participants
//!
//! This crate defines:
//! - Distributed transaction identifiers (DTIDs)
//! - RPC error codes shared between tablets and their clients

mod dtid;
mod error_code;

pub use dtid::Dtid;
pub use error_code::ErrorCode;
