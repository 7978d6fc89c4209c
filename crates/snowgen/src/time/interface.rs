use core::time::Duration;

/// Epoch of every [`SnowflakeId`]: Wednesday, January 1, 2020 00:00:00 UTC+8
/// (`2019-12-31T16:00:00Z`), in milliseconds since the Unix epoch.
///
/// The 41-bit timestamp field covers roughly 69 years from this point.
///
/// [`SnowflakeId`]: crate::SnowflakeId
pub const EPOCH_MILLIS: i64 = 1_577_808_000_000;

/// [`EPOCH_MILLIS`] as a [`Duration`] since 1970-01-01 UTC.
pub const EPOCH: Duration = Duration::from_millis(EPOCH_MILLIS as u64);

/// A trait for time sources that return a wall-clock or monotonic timestamp.
///
/// This abstraction allows you to plug in the system clock, a monotonic
/// ticker, or a mocked time source in tests.
///
/// The generator reads `TimeSource<i64>` and expects **milliseconds since the
/// Unix epoch**; it subtracts [`EPOCH_MILLIS`] itself.
///
/// # Example
///
/// ```
/// use snowgen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<i64> for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1_700_000_000_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_700_000_000_000);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

impl<T, S> TimeSource<T> for &S
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}
