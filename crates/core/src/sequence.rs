//! Process-wide declaration ordering.
//!
//! Every field descriptor, declared rule, and schema instance draws a number
//! from the same counter at construction time. Ordering by that number
//! reproduces construction order across the whole process.

use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Claim the next sequence number.
///
/// Values start at 0 and strictly increase for the lifetime of the process
/// (or since the last [`reset`]). Safe to call from any number of threads.
pub fn next() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::SeqCst)
}

/// The number the next call to [`next`] will return.
pub fn peek() -> u64 {
    SEQUENCE.load(Ordering::SeqCst)
}

/// Rewind the counter to zero.
///
/// Only available to test harnesses. Anything declared before the reset keeps
/// its old number, so callers must serialize tests that use this.
#[cfg(any(test, feature = "test-hooks"))]
pub fn reset() {
    SEQUENCE.store(0, Ordering::SeqCst);
}
