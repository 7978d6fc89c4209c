use std::sync::Arc;
use core::cmp::Ordering;

use tracing::instrument;

use crate::{
    EPOCH_MILLIS, SnowflakeId, SystemClock, TimeSource,
    generator::{Error, Mutex, MutexGuard, Poll, Result},
};

/// A lock-based Snowflake ID generator for one `(datacenter_id, worker_id)`
/// pair, safe to share across threads.
///
/// The last issued ID is kept in an [`Arc<Mutex<_>>`]; its timestamp and
/// sequence fields are the generator's entire mutable state. Clones share that
/// state, so cloning a generator and moving the clone to another thread is
/// equivalent to sharing a reference.
///
/// ## Guarantees
/// - IDs from one generator never repeat and never decrease.
/// - Up to 4096 IDs per millisecond; further calls wait for the next
///   millisecond.
/// - A clock that moves backward is waited out rather than reused.
///
/// Uniqueness across generators relies on every running instance using a
/// distinct `(datacenter_id, worker_id)` pair.
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource<i64>,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<SnowflakeId>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<SnowflakeId>>,
    pub(crate) datacenter_id: i64,
    pub(crate) worker_id: i64,
    pub(crate) time: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator reading the system wall clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatacenterIdOutOfRange`] or
    /// [`Error::WorkerIdOutOfRange`] if either ID is negative or greater than
    /// 31.
    ///
    /// # Example
    /// ```
    /// use snowgen::SnowflakeGenerator;
    ///
    /// let generator = SnowflakeGenerator::new(28, 11).unwrap();
    /// let id = generator.next_val().unwrap();
    /// assert_eq!(id.device_id(), (28, 11));
    ///
    /// assert!(SnowflakeGenerator::new(32, 0).is_err());
    /// ```
    pub fn new(datacenter_id: i64, worker_id: i64) -> Result<Self> {
        Self::with_time(datacenter_id, worker_id, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource<i64>,
{
    /// Creates a generator with a custom [`TimeSource`], starting from a zero
    /// timestamp and sequence.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    pub fn with_time(datacenter_id: i64, worker_id: i64, time: T) -> Result<Self> {
        Self::from_components(0, datacenter_id, worker_id, 0, time)
    }

    /// Creates a generator from explicit component values.
    ///
    /// This constructor is primarily useful for advanced use cases such as
    /// resuming from a known timestamp or controlling the starting sequence
    /// in tests. `timestamp` is relative to [`EPOCH_MILLIS`]; `timestamp` and
    /// `sequence` are masked to their field widths.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    pub fn from_components(
        timestamp: i64,
        datacenter_id: i64,
        worker_id: i64,
        sequence: i64,
        time: T,
    ) -> Result<Self> {
        let datacenter_id = Error::check_datacenter_id(datacenter_id)?;
        let worker_id = Error::check_worker_id(worker_id)?;
        let id = SnowflakeId::from_components(timestamp, datacenter_id, worker_id, sequence);
        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(id))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(id)),
            datacenter_id,
            worker_id,
            time,
        })
    }

    /// The datacenter ID stamped into every ID.
    pub const fn datacenter_id(&self) -> i64 {
        self.datacenter_id
    }

    /// The worker ID stamped into every ID.
    pub const fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// Generates the next ID, blocking until one is available.
    ///
    /// The lock is held for the whole call. When the 4096 sequence values of
    /// the current millisecond are used up, or the clock reads earlier than
    /// the last issued timestamp, the call spins until the clock moves past
    /// that point; concurrent callers queue on the lock meanwhile.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockExhausted`] once the 41-bit timestamp window has
    ///   elapsed. This is permanent and is also logged at `error` level.
    /// - [`Error::ClockBeforeEpoch`] if the time source reads before the
    ///   epoch.
    /// - [`Error::LockPoisoned`] if another thread panicked while holding the
    ///   lock (not with `parking-lot`).
    ///
    /// # Example
    /// ```
    /// use snowgen::SnowflakeGenerator;
    ///
    /// let generator = SnowflakeGenerator::new(1, 1).unwrap();
    /// let a = generator.next_val().unwrap();
    /// let b = generator.next_val().unwrap();
    /// assert!(a < b);
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn next_val(&self) -> Result<SnowflakeId> {
        let mut state = self.lock()?;
        let mut warned = false;

        loop {
            let now = self.time.current_millis();
            match Self::poll_at(&mut state, now)? {
                Poll::Ready { id } => return Ok(id),
                Poll::Pending { yield_for } => {
                    if !warned && now - EPOCH_MILLIS < state.timestamp() {
                        tracing::warn!(
                            behind_ms = yield_for,
                            last_timestamp = state.gen_timestamp(),
                            "clock moved backwards, waiting for it to catch up"
                        );
                        warned = true;
                    }
                    core::hint::spin_loop();
                }
            }
        }
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { id })`: a new ID is available
    /// - `Ok(Poll::Pending { yield_for })`: milliseconds to wait before trying
    ///   again
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_val`].
    ///
    /// # Example
    /// ```
    /// use snowgen::{Poll, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(0, 1).unwrap();
    /// let id = loop {
    ///     match generator.try_poll_id().unwrap() {
    ///         Poll::Ready { id } => break id,
    ///         Poll::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// assert_eq!(id.worker_id(), 1);
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn try_poll_id(&self) -> Result<Poll<SnowflakeId>> {
        let now = self.time.current_millis();
        let mut state = self.lock()?;
        Self::poll_at(&mut state, now)
    }

    fn lock(&self) -> Result<MutexGuard<'_, SnowflakeId>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }

    /// Advances `state` to `now` (Unix milliseconds). Leaves it untouched
    /// unless an ID is returned.
    fn poll_at(state: &mut SnowflakeId, now: i64) -> Result<Poll<SnowflakeId>> {
        let elapsed = now.saturating_sub(EPOCH_MILLIS);
        if elapsed < 0 {
            return Err(Self::cold_before_epoch(now));
        }
        if elapsed > SnowflakeId::max_timestamp() {
            return Err(Self::cold_exhausted(elapsed));
        }

        let current_ts = state.timestamp();
        match elapsed.cmp(&current_ts) {
            Ordering::Equal => {
                if state.has_sequence_room() {
                    *state = state.increment_sequence();
                    Ok(Poll::Ready { id: *state })
                } else {
                    Ok(Poll::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                *state = state.rollover_to_timestamp(elapsed);
                Ok(Poll::Ready { id: *state })
            }
            Ordering::Less => Ok(Self::cold_clock_behind(elapsed, current_ts)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(elapsed: i64, current_ts: i64) -> Poll<SnowflakeId> {
        let yield_for = current_ts - elapsed;
        debug_assert!(yield_for > 0);
        Poll::Pending { yield_for }
    }

    #[cold]
    #[inline(never)]
    fn cold_exhausted(elapsed: i64) -> Error {
        let max = SnowflakeId::max_timestamp();
        tracing::error!(elapsed, max, "timestamp window exhausted, cannot generate ids");
        Error::ClockExhausted { elapsed, max }
    }

    #[cold]
    #[inline(never)]
    fn cold_before_epoch(now: i64) -> Error {
        tracing::error!(now, epoch = EPOCH_MILLIS, "clock reads before the epoch");
        Error::ClockBeforeEpoch {
            now,
            epoch: EPOCH_MILLIS,
        }
    }
}

impl<T> Clone for SnowflakeGenerator<T>
where
    T: TimeSource<i64> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            datacenter_id: self.datacenter_id,
            worker_id: self.worker_id,
            time: self.time.clone(),
        }
    }
}

impl<T> core::fmt::Debug for SnowflakeGenerator<T>
where
    T: TimeSource<i64>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("datacenter_id", &self.datacenter_id)
            .field("worker_id", &self.worker_id)
            .finish_non_exhaustive()
    }
}
