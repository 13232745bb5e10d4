//! Registry of connections holding prepared transactions
//!
//! The pool is the hand-off point between PREPARE and the later COMMIT or
//! ROLLBACK of a distributed transaction. Every operation runs under one
//! mutex, so the duplicate check, the capacity check and the insertion are a
//! single atomic step, and a connection is handed out at most once.

use crate::config::PreparedPoolConfig;
use crate::error::{PrepareError, Rejected, Result};
use crate::stats::{Counters, PoolStats};
use parking_lot::Mutex;
use proven_common::Dtid;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Upper bound on the slots reserved up front for a large capacity
const MAX_PREALLOCATED: usize = 1024;

struct Inner<C> {
    conns: HashMap<Dtid, C>,
    counters: Counters,
}

/// Bounded map from DTID to the connection holding that prepared transaction
///
/// The pool never inspects connections. Callers that need to keep a handle
/// themselves can store `Arc<Conn>`.
pub struct PreparedPool<C> {
    inner: Mutex<Inner<C>>,
    capacity: usize,
}

impl<C> PreparedPool<C> {
    /// Create an empty pool holding at most `capacity` prepared transactions
    pub fn new(capacity: usize) -> Self {
        tracing::info!("Creating prepared pool with capacity {}", capacity);
        Self {
            inner: Mutex::new(Inner {
                conns: Self::empty_map(capacity),
                counters: Counters::default(),
            }),
            capacity,
        }
    }

    pub fn from_config(config: &PreparedPoolConfig) -> Self {
        Self::new(config.capacity)
    }

    fn empty_map(capacity: usize) -> HashMap<Dtid, C> {
        HashMap::with_capacity(capacity.min(MAX_PREALLOCATED))
    }

    /// Register `conn` as holding the prepared transaction `dtid`
    ///
    /// A duplicate DTID is reported before a full pool. On rejection the pool
    /// is unchanged and the connection is returned inside the error.
    pub fn insert(&self, conn: C, dtid: impl Into<Dtid>) -> Result<(), C> {
        let dtid = dtid.into();
        let mut inner = self.inner.lock();
        let Inner { conns, counters } = &mut *inner;

        let prepared = conns.len();
        match conns.entry(dtid) {
            Entry::Occupied(entry) => {
                counters.record_duplicate();
                let dtid = entry.key().clone();
                tracing::error!("Duplicate DTID in Prepare: {}", dtid);
                Err(Rejected {
                    error: PrepareError::DuplicateDtid(dtid),
                    conn,
                })
            }
            Entry::Vacant(_) if prepared >= self.capacity => {
                counters.record_capacity();
                tracing::debug!(
                    "Prepared pool full ({} of {}), rejecting Prepare",
                    prepared,
                    self.capacity
                );
                Err(Rejected {
                    error: PrepareError::CapacityExceeded(self.capacity),
                    conn,
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(conn);
                counters.record_insert();
                Ok(())
            }
        }
    }

    /// Remove and return the connection prepared under `dtid`
    ///
    /// Returns `None` both for a DTID that was never prepared and for one
    /// that has already been taken or drained.
    pub fn take(&self, dtid: &str) -> Option<C> {
        let mut inner = self.inner.lock();
        let conn = inner.conns.remove(dtid);
        if conn.is_some() {
            inner.counters.record_take();
        }
        conn
    }

    /// Remove every entry and return the connections in no particular order
    pub fn drain(&self) -> Vec<C> {
        let fresh = Self::empty_map(self.capacity);
        let drained = {
            let mut inner = self.inner.lock();
            let drained = std::mem::replace(&mut inner.conns, fresh);
            inner.counters.record_drain(drained.len());
            drained
        };

        tracing::debug!("Drained {} prepared connections", drained.len());
        drained.into_values().collect()
    }

    /// Whether a transaction is currently prepared under `dtid`
    pub fn contains(&self, dtid: &str) -> bool {
        self.inner.lock().conns.contains_key(dtid)
    }

    /// Snapshot of the DTIDs currently prepared, unordered
    pub fn dtids(&self) -> Vec<Dtid> {
        self.inner.lock().conns.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> PoolStats {
        let inner = self.inner.lock();
        inner.counters.snapshot(inner.conns.len(), self.capacity)
    }
}

impl<C> Default for PreparedPool<C> {
    fn default() -> Self {
        Self::from_config(&PreparedPoolConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct Conn(&'static str);

    fn rejection<C>(result: Result<(), C>) -> PrepareError {
        match result {
            Ok(()) => panic!("Expected insert to be rejected"),
            Err(rejected) => rejected.error,
        }
    }

    #[test]
    fn test_two_phase_walkthrough() {
        let pool = PreparedPool::new(2);

        // Duplicate is rejected and leaves the first entry in place
        pool.insert(Conn("a"), "dtid1").unwrap();
        let rejected = pool.insert(Conn("b"), "dtid1").unwrap_err();
        assert_eq!(rejected.error, PrepareError::DuplicateDtid(Dtid::new("dtid1")));
        assert_eq!(rejected.conn, Conn("b"));
        assert_eq!(pool.len(), 1);

        // Full pool rejects and is unchanged
        pool.insert(Conn("c"), "dtid2").unwrap();
        assert_eq!(
            rejection(pool.insert(Conn("d"), "dtid3")),
            PrepareError::CapacityExceeded(2)
        );
        let mut dtids = pool.dtids();
        dtids.sort();
        assert_eq!(dtids, vec![Dtid::new("dtid1"), Dtid::new("dtid2")]);

        // Take is exactly once
        assert_eq!(pool.take("dtid1"), Some(Conn("a")));
        assert_eq!(pool.take("dtid1"), None);
        assert!(pool.contains("dtid2"));

        // Freed slot is reusable
        pool.insert(Conn("e"), "dtid3").unwrap();

        let mut drained = pool.drain();
        drained.sort();
        assert_eq!(drained, vec![Conn("c"), Conn("e")]);
        assert!(pool.is_empty());
        assert!(pool.drain().is_empty());
    }

    #[test]
    fn test_duplicate_reported_before_capacity() {
        let pool = PreparedPool::new(1);
        pool.insert(Conn("a"), "dtid1").unwrap();

        // Pool is full and the DTID is taken; duplicate wins
        assert_eq!(
            rejection(pool.insert(Conn("b"), "dtid1")),
            PrepareError::DuplicateDtid(Dtid::new("dtid1"))
        );
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let pool = PreparedPool::new(0);
        assert_eq!(
            rejection(pool.insert(Conn("a"), "dtid1")),
            PrepareError::CapacityExceeded(0)
        );
        assert!(pool.is_empty());
        assert!(pool.drain().is_empty());
    }

    #[test]
    fn test_take_unknown_dtid() {
        let pool: PreparedPool<Conn> = PreparedPool::new(4);
        assert_eq!(pool.take("missing"), None);
        assert_eq!(pool.stats().taken, 0);
    }

    #[test]
    fn test_empty_dtid_is_a_key() {
        let pool = PreparedPool::new(2);
        pool.insert(Conn("a"), "").unwrap();
        assert!(pool.contains(""));
        assert_eq!(pool.take(""), Some(Conn("a")));
    }

    #[test]
    fn test_dtid_reusable_after_take_and_drain() {
        let pool = PreparedPool::new(1);
        pool.insert(Conn("a"), "dtid1").unwrap();
        pool.take("dtid1").unwrap();
        pool.insert(Conn("b"), "dtid1").unwrap();
        assert_eq!(pool.drain(), vec![Conn("b")]);
        pool.insert(Conn("c"), "dtid1").unwrap();
        assert_eq!(pool.take("dtid1"), Some(Conn("c")));
    }

    #[test]
    fn test_stats() {
        let pool = PreparedPool::new(2);
        pool.insert(Conn("a"), "dtid1").unwrap();
        let _ = pool.insert(Conn("b"), "dtid1");
        pool.insert(Conn("c"), "dtid2").unwrap();
        let _ = pool.insert(Conn("d"), "dtid3");
        pool.take("dtid1");
        pool.take("dtid1");

        let stats = pool.stats();
        assert_eq!(stats.prepared, 1);
        assert_eq!(stats.capacity, 2);
        assert_eq!(stats.inserted, 2);
        assert_eq!(stats.taken, 1);
        assert_eq!(stats.duplicate_rejections, 1);
        assert_eq!(stats.capacity_rejections, 1);

        pool.drain();
        let stats = pool.stats();
        assert_eq!(stats.prepared, 0);
        assert_eq!(stats.drained, 1);
    }

    #[test]
    fn test_from_config() {
        let pool: PreparedPool<Conn> =
            PreparedPool::from_config(&PreparedPoolConfig::default().with_capacity(3));
        assert_eq!(pool.capacity(), 3);

        let pool: PreparedPool<Conn> = PreparedPool::default();
        assert_eq!(pool.capacity(), crate::config::DEFAULT_CAPACITY);
    }
}
