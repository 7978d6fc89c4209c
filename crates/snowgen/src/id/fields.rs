//! Bit-field helpers that work on bare values, with no generator instance.

use crate::{EPOCH_MILLIS, SnowflakeId, SystemClock, TimeSource};

/// Extracts `(datacenter_id, worker_id)` from a raw 64-bit value.
///
/// ```
/// use snowgen::{SnowflakeId, device_id};
///
/// let id = SnowflakeId::from_components(1_000, 28, 11, 0);
/// assert_eq!(device_id(id.to_raw()), (28, 11));
/// ```
pub const fn device_id(raw: i64) -> (i64, i64) {
    SnowflakeId::from_raw(raw).device_id()
}

/// Milliseconds between [`EPOCH_MILLIS`] and the generation of `id`.
pub const fn timestamp(id: SnowflakeId) -> i64 {
    id.timestamp()
}

/// Unix timestamp in milliseconds at which `id` was generated.
pub const fn gen_timestamp(id: SnowflakeId) -> i64 {
    id.gen_timestamp()
}

/// Generation time of `id` as `YYYY-MM-DD HH:MM:SS` (local time, second
/// precision).
pub fn gen_time(id: SnowflakeId) -> String {
    id.gen_time()
}

/// Fraction of the 41-bit timestamp window already used, read from the system
/// clock.
///
/// Values approach `1.0` as the epoch window nears exhaustion, after which
/// generation fails with [`Error::ClockExhausted`].
///
/// [`Error::ClockExhausted`]: crate::Error::ClockExhausted
pub fn timestamp_usage_ratio() -> f64 {
    timestamp_usage_ratio_at(&SystemClock)
}

/// Same as [`timestamp_usage_ratio`] with an explicit time source.
pub fn timestamp_usage_ratio_at<T>(time: &T) -> f64
where
    T: TimeSource<i64>,
{
    (time.current_millis() - EPOCH_MILLIS) as f64 / SnowflakeId::max_timestamp() as f64
}
