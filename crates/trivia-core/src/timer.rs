//! Elapsed-time helpers for the game clock.
//!
//! The session never polls a clock. Callers pass the current [`Instant`]
//! in, and any display refresh is just the presentation layer calling
//! [`elapsed_between`] and [`format_elapsed`] when it redraws.

use std::time::{Duration, Instant};

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Time elapsed between `start` and `now`.
///
/// Saturates to zero if `now` is earlier than `start`.
pub fn elapsed_between(start: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(start)
}

/// Convert a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Format milliseconds as `MM:SS.mmm`.
///
/// Minutes are not wrapped at 60, so an hour-long run reads `60:00.000`.
pub fn format_millis(ms: u64) -> String {
    let minutes = ms.checked_div(MS_PER_MINUTE).unwrap_or(0);
    let seconds = ms
        .checked_rem(MS_PER_MINUTE)
        .and_then(|rest| rest.checked_div(MS_PER_SECOND))
        .unwrap_or(0);
    let millis = ms.checked_rem(MS_PER_SECOND).unwrap_or(0);
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}

/// Format a duration as `MM:SS.mmm`.
pub fn format_elapsed(duration: Duration) -> String {
    format_millis(duration_to_millis(duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_millis(0), "00:00.000");
    }

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_millis(83_456), "01:23.456");
        assert_eq!(format_elapsed(Duration::from_millis(9_007)), "00:09.007");
    }

    #[test]
    fn minutes_do_not_wrap() {
        assert_eq!(format_millis(3_600_000), "60:00.000");
    }

    #[test]
    fn elapsed_saturates_when_now_precedes_start() {
        let start = Instant::now();
        let later = start + Duration::from_secs(2);
        assert_eq!(elapsed_between(later, start), Duration::ZERO);
        assert_eq!(elapsed_between(start, later), Duration::from_secs(2));
    }
}
