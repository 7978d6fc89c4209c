use crate::TimeSource;
use core::time::Duration;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicI64, Ordering},
    },
    thread::{self, JoinHandle},
    time::Instant,
};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    elapsed: AtomicI64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source reporting Unix milliseconds that never go
/// backward.
///
/// The wall clock is sampled once at construction. After that, a background
/// thread advances a shared counter once per millisecond using [`Instant`], so
/// later NTP or manual clock adjustments do not affect the returned values.
///
/// Clones share the same ticker thread. The thread exits once every clone has
/// been dropped.
///
/// # Example
///
/// ```
/// use snowgen::{MonotonicClock, SnowflakeGenerator};
///
/// let generator = SnowflakeGenerator::with_time(1, 1, MonotonicClock::new()).unwrap();
/// let id = generator.next_val().unwrap();
/// assert_eq!(id.device_id(), (1, 1));
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    offset: i64, // wall clock at construction, in milliseconds
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock anchored at the current wall-clock time.
    pub fn new() -> Self {
        let start = Instant::now();
        let offset = chrono::Utc::now().timestamp_millis();

        let inner = Arc::new(SharedTickerInner {
            elapsed: AtomicI64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = start.elapsed().as_millis() as u64;
                inner_ref.elapsed.store(now_ms as i64, Ordering::Relaxed);

                tick = now_ms + 1;
            }
        });

        // Freshly created, so the cell is always empty here.
        let _ = inner._handle.set(handle);

        Self { inner, offset }
    }
}

impl TimeSource<i64> for MonotonicClock {
    fn current_millis(&self) -> i64 {
        self.offset + self.inner.elapsed.load(Ordering::Relaxed)
    }
}
