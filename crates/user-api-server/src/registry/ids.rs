use std::sync::atomic::{AtomicU64, Ordering};

/// Issues unique, strictly increasing identifiers starting at 1.
///
/// Backed by a single atomic counter, so no two calls can ever observe
/// the same value. Deleting a record never rewinds the counter.
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Next identifier, strictly greater than every id issued before.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
