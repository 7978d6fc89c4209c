use crate::TimeSource;

/// The default time source: reads the system wall clock on every call.
///
/// Wall-clock time can jump backward (NTP corrections, manual changes). The
/// generator detects that and waits for the clock to catch up, but if you need
/// a source that never regresses use [`MonotonicClock`] instead.
///
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource<i64> for SystemClock {
    fn current_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_chrono_utc() {
        let before = chrono::Utc::now().timestamp_millis();
        let now = SystemClock.current_millis();
        let after = chrono::Utc::now().timestamp_millis();
        assert!(before <= now && now <= after);
    }
}
