//! Prepared transaction pool for two-phase commit participants
//!
//! After a participant PREPAREs a distributed transaction, the connection
//! holding it is parked in a [`PreparedPool`] under the transaction's DTID
//! until the coordinator's decision arrives:
//! - `insert` registers it, enforcing DTID uniqueness and a capacity limit
//! - `take` hands it out exactly once for COMMIT or ROLLBACK
//! - `drain` empties the pool for shutdown or recovery
//!
//! The pool does no I/O and persists nothing; durability of the prepare
//! decision belongs to the caller's transaction log.

pub mod config;
pub mod error;
mod pool;
mod stats;

pub use config::PreparedPoolConfig;
pub use error::{ConfigError, PrepareError, Rejected, Result};
pub use pool::PreparedPool;
pub use stats::PoolStats;

// Re-export so callers need not depend on proven-common directly
pub use proven_common::{Dtid, ErrorCode};
