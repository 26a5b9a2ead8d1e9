//! Wall-clock helpers for the open-now evaluator.

use chrono::{DateTime, Datelike, Local, Offset, Timelike, Utc};
use eatsavvy_domain::to_local;

/// A local weekday and minute of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalInstant {
    /// 0 = Sunday
    pub weekday: u8,
    /// Minutes since local midnight
    pub minute_of_day: u16,
}

impl LocalInstant {
    /// Shift a UTC instant by `utc_offset_minutes` (positive east)
    pub fn from_utc(now: DateTime<Utc>, utc_offset_minutes: i32) -> Self {
        let weekday = now.weekday().num_days_from_sunday() as u8;
        let local = to_local(weekday, now.hour() as u8, now.minute() as u8, utc_offset_minutes);
        Self {
            weekday: local.weekday,
            minute_of_day: local.minute_of_day(),
        }
    }

    /// The current instant at the given offset
    pub fn now(utc_offset_minutes: i32) -> Self {
        Self::from_utc(Utc::now(), utc_offset_minutes)
    }
}

/// Offset of the host's local time zone, in minutes east of UTC
pub fn host_utc_offset_minutes() -> i32 {
    Local::now().offset().fix().local_minus_utc() / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_utc_without_offset() {
        // 2024-01-01 was a Monday
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let instant = LocalInstant::from_utc(now, 0);
        assert_eq!(instant, LocalInstant { weekday: 1, minute_of_day: 23 * 60 + 30 });
    }

    #[test]
    fn test_from_utc_crosses_midnight_east() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let instant = LocalInstant::from_utc(now, 120);
        assert_eq!(instant, LocalInstant { weekday: 2, minute_of_day: 90 });
    }

    #[test]
    fn test_from_utc_wraps_week_west() {
        // Sunday 01:00 UTC is Saturday 20:00 at UTC-5
        let now = Utc.with_ymd_and_hms(2023, 12, 31, 1, 0, 0).unwrap();
        let instant = LocalInstant::from_utc(now, -300);
        assert_eq!(instant, LocalInstant { weekday: 6, minute_of_day: 20 * 60 });
    }

    #[test]
    fn test_host_offset_is_plausible() {
        let offset = host_utc_offset_minutes();
        assert!((-720..=840).contains(&offset));
    }
}
