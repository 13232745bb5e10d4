//! Pool counters

use serde::{Deserialize, Serialize};

/// Point-in-time view of the pool counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Transactions currently prepared
    pub prepared: usize,
    pub capacity: usize,
    /// Successful insertions
    pub inserted: u64,
    /// Connections handed out by take
    pub taken: u64,
    /// Connections handed out by drain
    pub drained: u64,
    /// Duplicate DTID rejections; any nonzero value points at a coordinator bug
    pub duplicate_rejections: u64,
    pub capacity_rejections: u64,
}

/// Counters living next to the entries, guarded by the same lock
#[derive(Debug, Default)]
pub(crate) struct Counters {
    inserted: u64,
    taken: u64,
    drained: u64,
    duplicate_rejections: u64,
    capacity_rejections: u64,
}

impl Counters {
    pub(crate) fn record_insert(&mut self) {
        self.inserted += 1;
    }

    pub(crate) fn record_take(&mut self) {
        self.taken += 1;
    }

    pub(crate) fn record_drain(&mut self, count: usize) {
        self.drained += count as u64;
    }

    pub(crate) fn record_duplicate(&mut self) {
        self.duplicate_rejections += 1;
    }

    pub(crate) fn record_capacity(&mut self) {
        self.capacity_rejections += 1;
    }

    pub(crate) fn snapshot(&self, prepared: usize, capacity: usize) -> PoolStats {
        PoolStats {
            prepared,
            capacity,
            inserted: self.inserted,
            taken: self.taken,
            drained: self.drained,
            duplicate_rejections: self.duplicate_rejections,
            capacity_rejections: self.capacity_rejections,
        }
    }
}
