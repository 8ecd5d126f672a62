//! Process-wide monotonic document identifiers.
//!
//! The counter is process-global (§9 "Global mutable state" design note) but its lifecycle
//! is scoped to whichever [`crate::document::Corpus`] is being built: callers obtain a
//! [`DocIdGenerator`] explicitly and thread it through construction rather than reaching for
//! a bare global inside `Document::new`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::IrError;

/// An opaque, totally ordered wrapper over a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(u64);

impl DocId {
    /// Only for tests that need to construct a specific identifier directly.
    #[cfg(test)]
    pub(crate) fn from_raw(value: u64) -> Self {
        DocId(value)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Factory for fresh, unique [`DocId`]s. Thread-safe: `next()` takes `&self`.
#[derive(Debug)]
pub struct DocIdGenerator {
    counter: AtomicU64,
}

impl DocIdGenerator {
    pub fn new() -> Self {
        DocIdGenerator {
            counter: AtomicU64::new(0),
        }
    }

    /// Construct a generator already seeded at `start`. Exposed for overflow tests, which
    /// would otherwise need to call `next()` 2^64 times to observe `NoMoreIdentifiers`.
    #[cfg(test)]
    pub(crate) fn starting_at(start: u64) -> Self {
        DocIdGenerator {
            counter: AtomicU64::new(start),
        }
    }

    /// Allocate the next identifier. Fails once the counter space is exhausted.
    pub fn next(&self) -> Result<DocId, IrError> {
        let mut current = self.counter.load(Ordering::Relaxed);
        loop {
            let next = current.checked_add(1).ok_or(IrError::NoMoreIdentifiers)?;
            match self.counter.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(DocId(current)),
                Err(observed) => current = observed,
            }
        }
    }
}

impl Default for DocIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
