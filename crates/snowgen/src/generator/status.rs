/// Result of a single, non-blocking generation attempt.
///
/// Returned by [`SnowflakeGenerator::try_poll_id`]:
///
/// - [`Poll::Ready`] carries a newly generated ID.
/// - [`Poll::Pending`] means no ID can be produced until the clock advances by
///   `yield_for` milliseconds, either because all 4096 sequence values of the
///   current millisecond are used or because the clock is behind the last
///   issued timestamp.
///
/// [`SnowflakeGenerator::try_poll_id`]: crate::SnowflakeGenerator::try_poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll<ID> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: ID,
    },
    /// Wait this many milliseconds before trying again.
    Pending {
        /// Milliseconds until the generator can make progress.
        yield_for: i64,
    },
}
