//! Ordering windows.
//!
//! Both windows are closed on the early side: an order placed exactly at the
//! deadline is accepted, anything later is not. Times are compared in the
//! configured offset, not in UTC.

use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Timelike, Utc};

use crate::config::WeeklyCutoff;
use crate::error::CanteenError;

/// Which deadline, if any, an order is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderWindow {
    Open,
    Weekly,
    Daily,
}

/// Position within the Monday-based week, ordered for comparison.
fn week_position(day_from_monday: u32, time: NaiveTime) -> (u32, u32, u32) {
    (
        day_from_monday,
        time.num_seconds_from_midnight(),
        time.nanosecond(),
    )
}

/// Fails once `now` is past the weekday and time of `cutoff` in the current week.
pub fn check_weekly(
    now: DateTime<Utc>,
    cutoff: &WeeklyCutoff,
    offset: FixedOffset,
) -> Result<(), CanteenError> {
    let local = now.with_timezone(&offset);
    let current = week_position(local.weekday().num_days_from_monday(), local.time());
    let deadline = week_position(cutoff.weekday.num_days_from_monday(), cutoff.time);
    if current <= deadline {
        Ok(())
    } else {
        Err(CanteenError::deadline_exceeded(format!(
            "weekly ordering closed at {cutoff} ({offset}), it is now {}",
            local.format("%a %H:%M:%S")
        )))
    }
}

/// Fails once the time of day of `now` is past `cutoff`.
pub fn check_daily(
    now: DateTime<Utc>,
    cutoff: NaiveTime,
    offset: FixedOffset,
) -> Result<(), CanteenError> {
    let local = now.with_timezone(&offset);
    if local.time() <= cutoff {
        Ok(())
    } else {
        Err(CanteenError::deadline_exceeded(format!(
            "daily ordering closed at {} ({offset}), it is now {}",
            cutoff.format("%H:%M"),
            local.format("%H:%M:%S")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::{Duration, TimeZone, Weekday};
    use rstest::rstest;

    fn friday_five() -> WeeklyCutoff {
        WeeklyCutoff {
            weekday: Weekday::Fri,
            time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // 2024-01-05 is a Friday.
    #[rstest]
    #[case(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), true)]
    #[case(Utc.with_ymd_and_hms(2024, 1, 4, 23, 59, 59).unwrap(), true)]
    #[case(Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap(), true)]
    #[case(Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 1).unwrap(), false)]
    #[case(Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap(), false)]
    #[case(Utc.with_ymd_and_hms(2024, 1, 7, 23, 59, 59).unwrap(), false)]
    fn test_weekly_window(#[case] now: DateTime<Utc>, #[case] open: bool) {
        assert_eq!(check_weekly(now, &friday_five(), utc()).is_ok(), open);
    }

    #[test]
    fn test_weekly_window_one_tick_late() {
        let deadline = Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap();
        let late = deadline + Duration::nanoseconds(1);
        let err = check_weekly(late, &friday_five(), utc()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
    }

    #[test]
    fn test_weekly_window_uses_configured_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 15:30 UTC on Friday is 17:30 at +02:00.
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 15, 30, 0).unwrap();
        assert!(check_weekly(now, &friday_five(), utc()).is_ok());
        assert!(check_weekly(now, &friday_five(), plus_two).is_err());
    }

    #[test]
    fn test_daily_window() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap();
        assert!(check_daily(at, ten, utc()).is_ok());
        assert_eq!(
            check_daily(at + Duration::seconds(1), ten, utc())
                .unwrap_err()
                .kind(),
            ErrorKind::DeadlineExceeded
        );
    }
}
