//! Capacity growth policies.
//!
//! A policy only proposes the next slot-array length; the tables decide
//! when to grow and keep applying the policy until the load factor fits.

/// Proposes the slot-array length to grow to. Implementations must return a
/// value strictly greater than `current`; tables log and fall back to
/// doubling for any step that does not.
pub trait GrowthPolicy: Send + Sync {
    fn next_capacity(&self, current: usize) -> usize;
}

/// Double the capacity on every growth step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Doubling;

impl GrowthPolicy for Doubling {
    fn next_capacity(&self, current: usize) -> usize {
        current.saturating_mul(2)
    }
}

/// Add a fixed number of slots on every growth step.
///
/// Cheap on memory, but a table filled one key at a time rehashes every
/// `step` inserts, so total insert cost becomes quadratic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incremental {
    step: usize,
}

impl Incremental {
    pub const DEFAULT_STEP: usize = 2;

    /// A zero step is raised to 1.
    pub fn new(step: usize) -> Self {
        Self { step: step.max(1) }
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

impl Default for Incremental {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

impl GrowthPolicy for Incremental {
    fn next_capacity(&self, current: usize) -> usize {
        current.saturating_add(self.step)
    }
}

impl<F> GrowthPolicy for F
where
    F: Fn(usize) -> usize + Send + Sync,
{
    fn next_capacity(&self, current: usize) -> usize {
        self(current)
    }
}
