use crate::ports::Clock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

/// Signed seconds between the unix epoch and `time`, clamped to `i64`.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or_else(|_| {
            warn!(seconds = elapsed.as_secs(), "System time exceeds i64 seconds, clamping");
            i64::MAX
        }),
        Err(e) => {
            let before = e.duration().as_secs();
            warn!(seconds_before_epoch = before, "System clock is before the unix epoch");
            i64::try_from(before).map(|s| -s).unwrap_or(i64::MIN)
        }
    }
}

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        unix_seconds(SystemTime::now())
    }
}

/// Settable clock for tests.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
