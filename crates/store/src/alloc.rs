//! Record identifier allocation
//!
//! A lock-free counter seeded from the last identifier recovered out of the
//! primary log. The store calls `next` while holding its file lock, so an
//! identifier and its log line are assigned in the same order; `rollback`
//! frees an identifier whose record could not be written.

use std::sync::atomic::{AtomicI64, Ordering};

/// Allocates monotonically increasing record identifiers
#[derive(Debug)]
pub struct IdAllocator {
    counter: AtomicI64,
}

impl IdAllocator {
    /// Create an allocator that will hand out `last + 1` next
    pub fn new(last: i64) -> Self {
        Self {
            counter: AtomicI64::new(last),
        }
    }

    /// Allocate the next identifier
    pub fn next(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Free the most recently allocated identifier
    ///
    /// Only prevents holes from growing without bound after a failed write;
    /// a racer that already observed the allocated value will see it again.
    pub fn rollback(&self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }

    /// The last identifier handed out (or the seed, if none were)
    pub fn last(&self) -> i64 {
        self.counter.load(Ordering::SeqCst)
    }
}
