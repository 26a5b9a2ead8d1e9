//! Time module - UTC weekday clock points and their local-time conversion

use std::fmt;

/// Minutes in one day
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Minutes in one reference week
pub const MINUTES_PER_WEEK: i32 = 7 * MINUTES_PER_DAY;

/// A clock point within the UTC reference week
///
/// Weekdays are numbered from Sunday: `0 = Sunday` through `6 = Saturday`.
/// Values are assumed to be pre-validated (`weekday < 7`, `hour < 24`, `minute < 60`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimePoint {
    /// Day of week, 0 = Sunday
    pub weekday: u8,

    /// Hour of day, 0..=23
    pub hour: u8,

    /// Minute of hour, 0..=59
    pub minute: u8,
}

impl TimePoint {
    /// Create a new time point
    pub fn new(weekday: u8, hour: u8, minute: u8) -> Self {
        Self {
            weekday,
            hour,
            minute,
        }
    }

    /// Convert this UTC point into the observer's local week
    ///
    /// # Examples
    ///
    /// ```
    /// use eatsavvy_domain::TimePoint;
    ///
    /// // Sunday 23:30 UTC is Monday 01:30 at UTC+2
    /// let local = TimePoint::new(0, 23, 30).to_local(120);
    /// assert_eq!((local.weekday, local.hour, local.minute), (1, 1, 30));
    /// ```
    pub fn to_local(&self, utc_offset_minutes: i32) -> LocalTime {
        to_local(self.weekday, self.hour, self.minute, utc_offset_minutes)
    }
}

/// One continuous open interval, expressed in UTC
///
/// `open` is not guaranteed to precede `close` within the same day: ranges that
/// run past midnight close on the following weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// When the interval starts
    pub open: TimePoint,

    /// When the interval ends
    pub close: TimePoint,
}

impl TimeRange {
    /// Create a new time range
    pub fn new(open: TimePoint, close: TimePoint) -> Self {
        Self { open, close }
    }
}

/// A weekday/hour/minute triple in the observer's local week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalTime {
    /// Day of week, 0 = Sunday
    pub weekday: u8,

    /// Hour of day, 0..=23
    pub hour: u8,

    /// Minute of hour, 0..=59
    pub minute: u8,
}

impl LocalTime {
    /// Minutes elapsed since local midnight
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            weekday_name(self.weekday),
            format_clock(self.hour, self.minute)
        )
    }
}

/// Shift a UTC weekday/hour/minute by `utc_offset_minutes`
///
/// The offset is the number of minutes to add to UTC to obtain local time
/// (positive east of Greenwich). The weekday wraps modulo 7, so it moves by at
/// most one day for offsets within ±24h. Larger offsets are not a supported input.
///
/// # Examples
///
/// ```
/// use eatsavvy_domain::to_local;
///
/// // Sunday 02:00 UTC in New York (UTC-5) is Saturday 21:00
/// let local = to_local(0, 2, 0, -300);
/// assert_eq!((local.weekday, local.hour, local.minute), (6, 21, 0));
/// ```
pub fn to_local(weekday: u8, hour: u8, minute: u8, utc_offset_minutes: i32) -> LocalTime {
    let utc_minute_of_week =
        weekday as i32 * MINUTES_PER_DAY + hour as i32 * 60 + minute as i32;
    let local = (utc_minute_of_week + utc_offset_minutes).rem_euclid(MINUTES_PER_WEEK);

    LocalTime {
        weekday: (local / MINUTES_PER_DAY) as u8,
        hour: ((local % MINUTES_PER_DAY) / 60) as u8,
        minute: (local % 60) as u8,
    }
}

/// Format a local clock time as `H:MM AM|PM`
///
/// # Examples
///
/// ```
/// use eatsavvy_domain::format_clock;
///
/// assert_eq!(format_clock(0, 0), "12:00 AM");
/// assert_eq!(format_clock(13, 5), "1:05 PM");
/// ```
pub fn format_clock(hour: u8, minute: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, period)
}

/// English name of a weekday number (0 = Sunday)
pub fn weekday_name(weekday: u8) -> &'static str {
    match weekday % 7 {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        _ => "Saturday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_boundaries() {
        assert_eq!(format_clock(0, 0), "12:00 AM");
        assert_eq!(format_clock(12, 0), "12:00 PM");
        assert_eq!(format_clock(13, 5), "1:05 PM");
        assert_eq!(format_clock(23, 59), "11:59 PM");
        assert_eq!(format_clock(11, 59), "11:59 AM");
        assert_eq!(format_clock(1, 0), "1:00 AM");
    }

    #[test]
    fn test_to_local_zero_offset_is_identity() {
        let local = to_local(3, 14, 45, 0);
        assert_eq!(local, LocalTime { weekday: 3, hour: 14, minute: 45 });
    }

    #[test]
    fn test_to_local_shifts_forward_across_week_end() {
        // Saturday 23:00 UTC at UTC+2 wraps to Sunday 01:00
        let local = to_local(6, 23, 0, 120);
        assert_eq!(local, LocalTime { weekday: 0, hour: 1, minute: 0 });
    }

    #[test]
    fn test_to_local_shifts_backward_across_week_start() {
        // Sunday 00:15 UTC at UTC-8 is Saturday 16:15
        let local = to_local(0, 0, 15, -480);
        assert_eq!(local, LocalTime { weekday: 6, hour: 16, minute: 15 });
    }

    #[test]
    fn test_to_local_partial_hour_offset() {
        // India is UTC+5:30
        let local = to_local(2, 20, 45, 330);
        assert_eq!(local, LocalTime { weekday: 3, hour: 2, minute: 15 });
    }

    #[test]
    fn test_minute_of_day() {
        let local = LocalTime { weekday: 1, hour: 22, minute: 0 };
        assert_eq!(local.minute_of_day(), 1320);
    }

    #[test]
    fn test_local_time_display() {
        let local = LocalTime { weekday: 5, hour: 18, minute: 30 };
        assert_eq!(local.to_string(), "Friday 6:30 PM");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(6), "Saturday");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: converting with an offset and back with its negation is lossless
        #[test]
        fn test_offset_roundtrip(
            weekday in 0u8..7,
            hour in 0u8..24,
            minute in 0u8..60,
            offset in -720i32..=840,
        ) {
            let local = to_local(weekday, hour, minute, offset);
            let back = to_local(local.weekday, local.hour, local.minute, -offset);

            prop_assert_eq!((back.weekday, back.hour, back.minute), (weekday, hour, minute));
        }

        /// Property: the weekday moves by at most one day for practical offsets
        #[test]
        fn test_weekday_shift_bounded(
            weekday in 0u8..7,
            hour in 0u8..24,
            minute in 0u8..60,
            offset in -720i32..=840,
        ) {
            let local = to_local(weekday, hour, minute, offset);
            let shift = (local.weekday as i32 - weekday as i32).rem_euclid(7);

            prop_assert!(shift == 0 || shift == 1 || shift == 6);
        }

        /// Property: formatted clocks always carry a two-digit minute and a period
        #[test]
        fn test_format_clock_shape(hour in 0u8..24, minute in 0u8..60) {
            let text = format_clock(hour, minute);
            let (clock, period) = text.split_once(' ').unwrap();
            let (h, m) = clock.split_once(':').unwrap();

            prop_assert_eq!(m.len(), 2);
            prop_assert!(period == "AM" || period == "PM");
            let h: u8 = h.parse().unwrap();
            prop_assert!((1..=12).contains(&h));
        }
    }
}
