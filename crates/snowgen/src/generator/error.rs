use crate::SnowflakeId;

/// A result type defaulting to the generator [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while constructing a generator or generating IDs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The datacenter ID does not fit in its 5-bit field.
    #[error("datacenter id must be between 0 and {max}, got {datacenter_id}")]
    DatacenterIdOutOfRange {
        /// The rejected value.
        datacenter_id: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// The worker ID does not fit in its 5-bit field.
    #[error("worker id must be between 0 and {max}, got {worker_id}")]
    WorkerIdOutOfRange {
        /// The rejected value.
        worker_id: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// The time since the epoch no longer fits in the 41-bit timestamp field.
    ///
    /// Every later call fails the same way; the generator cannot produce valid
    /// IDs again without a new epoch.
    #[error("timestamp exhausted: {elapsed}ms since epoch exceeds the maximum of {max}ms")]
    ClockExhausted {
        /// Milliseconds elapsed since the epoch.
        elapsed: i64,
        /// Largest representable timestamp.
        max: i64,
    },

    /// The time source reports a time earlier than the epoch.
    #[error("clock reads {now}ms, before the epoch at {epoch}ms")]
    ClockBeforeEpoch {
        /// Unix milliseconds reported by the time source.
        now: i64,
        /// The epoch, in Unix milliseconds.
        epoch: i64,
    },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub(crate) const fn check_datacenter_id(datacenter_id: i64) -> Result<i64> {
        if datacenter_id < 0 || datacenter_id > SnowflakeId::max_datacenter_id() {
            return Err(Self::DatacenterIdOutOfRange {
                datacenter_id,
                max: SnowflakeId::max_datacenter_id(),
            });
        }
        Ok(datacenter_id)
    }

    pub(crate) const fn check_worker_id(worker_id: i64) -> Result<i64> {
        if worker_id < 0 || worker_id > SnowflakeId::max_worker_id() {
            return Err(Self::WorkerIdOutOfRange {
                worker_id,
                max: SnowflakeId::max_worker_id(),
            });
        }
        Ok(worker_id)
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
