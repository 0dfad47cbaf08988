use crate::{base62, Generator};
use shortest_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator that base62-encodes a counter.
///
/// Codes never repeat within one instance, which makes the output
/// reproducible for tests and single-node deployments that want
/// predictable codes.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    /// Creates a generator that starts at 1, so the first code is `"1"`.
    pub fn new() -> Self {
        Self::with_offset(1)
    }

    /// Creates a generator starting from a specific counter value.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(base62::encode(count))
    }
}
