//! Time and randomness sources, injectable so output can be pinned in tests.

use rand::Rng;

/// Source of the freshness seed for image-generation URLs.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Chooses which canned message a fallback envelope carries.
pub trait FallbackPicker: Send + Sync {
    /// Index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random choice.
pub struct RandomPicker;

impl FallbackPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }
}

/// Always the same index (wrapped into range).
pub struct FixedPicker(pub usize);

impl FallbackPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}
