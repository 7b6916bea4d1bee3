//! Table configuration: initial capacity, load-factor cap and growth policy.

use crate::error::ConfigError;
use crate::growth::{Doubling, GrowthPolicy};
use log::warn;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_CHAINING_CAPACITY: usize = 4;
pub const DEFAULT_CHAINING_LOAD_FACTOR: f64 = 0.75;
pub const DEFAULT_OPEN_ADDRESSING_CAPACITY: usize = 8;
pub const DEFAULT_OPEN_ADDRESSING_LOAD_FACTOR: f64 = 0.6;

/// Builder-style configuration shared by both table variants.
///
/// ```
/// use assoc_table::{ChainingTable, Incremental, TableConfig};
///
/// let config = TableConfig::chaining()
///     .with_initial_capacity(16)
///     .with_max_load_factor(1.5)
///     .with_growth(Incremental::new(8));
/// let table: ChainingTable<u64, &str> = ChainingTable::with_config(config).unwrap();
/// assert_eq!(table.capacity(), 16);
/// ```
#[derive(Clone)]
pub struct TableConfig {
    initial_capacity: usize,
    max_load_factor: f64,
    growth: Arc<dyn GrowthPolicy>,
}

impl TableConfig {
    /// Defaults for [`crate::ChainingTable`]: 4 buckets, load factor 0.75, doubling.
    pub fn chaining() -> Self {
        Self {
            initial_capacity: DEFAULT_CHAINING_CAPACITY,
            max_load_factor: DEFAULT_CHAINING_LOAD_FACTOR,
            growth: Arc::new(Doubling),
        }
    }

    /// Defaults for [`crate::OpenAddressingTable`]: 8 slots, load factor 0.6, doubling.
    pub fn open_addressing() -> Self {
        Self {
            initial_capacity: DEFAULT_OPEN_ADDRESSING_CAPACITY,
            max_load_factor: DEFAULT_OPEN_ADDRESSING_LOAD_FACTOR,
            growth: Arc::new(Doubling),
        }
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub fn with_growth<G: GrowthPolicy + 'static>(mut self, policy: G) -> Self {
        self.growth = Arc::new(policy);
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.max_load_factor));
        }
        Ok(())
    }

    /// Open addressing must always leave a free slot after growth.
    pub(crate) fn validate_open_addressing(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.max_load_factor >= 1.0 {
            return Err(ConfigError::LoadFactorTooHigh(self.max_load_factor));
        }
        Ok(())
    }

    pub(crate) fn exceeds(&self, len: usize, capacity: usize) -> bool {
        len as f64 / capacity as f64 > self.max_load_factor
    }

    /// Smallest capacity reachable from `current` through the growth policy
    /// that holds `len` entries within the load-factor cap. Always greater
    /// than `current`.
    pub(crate) fn grown_capacity(&self, current: usize, len: usize) -> usize {
        self.grow_until(current, len, self.max_load_factor)
    }

    /// Capacity to rebuild at when tombstones alone push occupancy over the
    /// cap. Live load after the rebuild is at most half the cap, so the next
    /// rebuild is at least `capacity * max_load_factor / 2` inserts away.
    pub(crate) fn purge_capacity(&self, current: usize, len: usize) -> usize {
        let target = self.max_load_factor / 2.0;
        if len as f64 / current as f64 <= target {
            current
        } else {
            self.grow_until(current, len, target)
        }
    }

    fn grow_until(&self, current: usize, len: usize, load_factor: f64) -> usize {
        let mut capacity = current;
        loop {
            let proposed = self.growth.next_capacity(capacity);
            capacity = if proposed > capacity {
                proposed
            } else {
                warn!(
                    "growth policy proposed {} from capacity {}; doubling instead",
                    proposed, capacity
                );
                capacity.saturating_mul(2).max(capacity.saturating_add(1))
            };
            if len as f64 / capacity as f64 <= load_factor || capacity == usize::MAX {
                return capacity;
            }
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::chaining()
    }
}

impl fmt::Debug for TableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("initial_capacity", &self.initial_capacity)
            .field("max_load_factor", &self.max_load_factor)
            .finish_non_exhaustive()
    }
}
