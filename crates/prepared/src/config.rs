//! Prepared pool configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default limit on concurrently prepared transactions
pub const DEFAULT_CAPACITY: usize = 20;

/// Configuration for the prepared pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreparedPoolConfig {
    /// Maximum number of transactions held in the prepared state
    pub capacity: usize,
}

impl Default for PreparedPoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl PreparedPoolConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
