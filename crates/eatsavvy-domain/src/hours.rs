//! Hours module - grouping UTC opening ranges into local per-weekday intervals

use crate::time::{format_clock, TimeRange};
use std::collections::BTreeMap;

/// One opening interval as seen from the observer's local day
///
/// A close minute lower than the open minute means the interval runs past
/// midnight and `close_label` refers to the following day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalDayInterval {
    /// Display label for the opening time, e.g. `"10:00 AM"`
    pub open_label: String,

    /// Display label for the closing time
    pub close_label: String,

    /// Local minute of day the interval opens, 0..=1439
    pub open_minute_of_day: u16,

    /// Local minute of day the interval closes, 0..=1439
    pub close_minute_of_day: u16,
}

impl LocalDayInterval {
    /// Whether the interval crosses local midnight
    pub fn is_overnight(&self) -> bool {
        self.close_minute_of_day < self.open_minute_of_day
    }

    /// Whether `minute_of_day` falls inside the interval
    ///
    /// Same-day intervals are half-open `[open, close)`. Overnight intervals
    /// match from `open` until midnight and from midnight until `close`.
    pub fn contains(&self, minute_of_day: u16) -> bool {
        if self.is_overnight() {
            minute_of_day >= self.open_minute_of_day || minute_of_day < self.close_minute_of_day
        } else {
            self.open_minute_of_day <= minute_of_day && minute_of_day < self.close_minute_of_day
        }
    }

    /// `"open - close"` display string
    pub fn label(&self) -> String {
        format!("{} - {}", self.open_label, self.close_label)
    }
}

/// Local opening hours keyed by weekday (0 = Sunday)
///
/// A weekday without an entry is closed all day. Intervals within a day keep
/// the order of the source ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupedHours {
    days: BTreeMap<u8, Vec<LocalDayInterval>>,
}

impl GroupedHours {
    /// Create an empty mapping (closed every day)
    pub fn new() -> Self {
        Self::default()
    }

    /// Intervals for a weekday, empty when closed
    pub fn day(&self, weekday: u8) -> &[LocalDayInterval] {
        self.days.get(&weekday).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the weekday has any interval
    pub fn has_day(&self, weekday: u8) -> bool {
        self.days.contains_key(&weekday)
    }

    /// Whether no weekday has any interval
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterate the open weekdays in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[LocalDayInterval])> {
        self.days.iter().map(|(day, intervals)| (*day, intervals.as_slice()))
    }

    fn push(&mut self, weekday: u8, interval: LocalDayInterval) {
        self.days.entry(weekday).or_default().push(interval);
    }
}

/// Group UTC opening ranges into local weekdays
///
/// Both endpoints of every range are localized independently. The resulting
/// interval is keyed under the weekday of its *localized open endpoint*; the
/// close endpoint's weekday is never used for keying, so an interval that
/// crosses midnight is only reachable from the day it opened.
///
/// Output is a pure function of the inputs, which lets callers cache it by the
/// content of `ranges`.
///
/// # Examples
///
/// ```
/// use eatsavvy_domain::{group_hours, TimePoint, TimeRange};
///
/// let ranges = vec![TimeRange::new(TimePoint::new(1, 22, 0), TimePoint::new(2, 2, 0))];
/// let grouped = group_hours(&ranges, 0);
///
/// let monday = grouped.day(1);
/// assert_eq!(monday.len(), 1);
/// assert_eq!(monday[0].open_minute_of_day, 1320);
/// assert_eq!(monday[0].close_minute_of_day, 120);
/// assert!(grouped.day(2).is_empty());
/// ```
pub fn group_hours(ranges: &[TimeRange], utc_offset_minutes: i32) -> GroupedHours {
    let mut grouped = GroupedHours::new();

    for range in ranges {
        let open = range.open.to_local(utc_offset_minutes);
        let close = range.close.to_local(utc_offset_minutes);

        grouped.push(
            open.weekday,
            LocalDayInterval {
                open_label: format_clock(open.hour, open.minute),
                close_label: format_clock(close.hour, close.minute),
                open_minute_of_day: open.minute_of_day(),
                close_minute_of_day: close.minute_of_day(),
            },
        );
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimePoint;

    fn range(open: (u8, u8, u8), close: (u8, u8, u8)) -> TimeRange {
        TimeRange::new(
            TimePoint::new(open.0, open.1, open.2),
            TimePoint::new(close.0, close.1, close.2),
        )
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        let grouped = group_hours(&[], 0);
        assert!(grouped.is_empty());
        assert!(grouped.day(3).is_empty());
    }

    #[test]
    fn test_overnight_range_keyed_under_open_day() {
        let grouped = group_hours(&[range((1, 22, 0), (2, 2, 0))], 0);

        assert!(grouped.has_day(1));
        assert!(!grouped.has_day(2));

        let interval = &grouped.day(1)[0];
        assert_eq!(interval.open_label, "10:00 PM");
        assert_eq!(interval.close_label, "2:00 AM");
        assert_eq!(interval.open_minute_of_day, 1320);
        assert_eq!(interval.close_minute_of_day, 120);
        assert!(interval.is_overnight());
    }

    #[test]
    fn test_insertion_order_preserved_within_day() {
        // Dinner listed before lunch stays in that order
        let ranges = vec![
            range((3, 17, 0), (3, 22, 0)),
            range((3, 11, 0), (3, 14, 0)),
        ];
        let grouped = group_hours(&ranges, 0);

        let labels: Vec<String> = grouped.day(3).iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["5:00 PM - 10:00 PM", "11:00 AM - 2:00 PM"]);
    }

    #[test]
    fn test_offset_moves_interval_to_previous_day() {
        // Tuesday 01:00-05:00 UTC in UTC-5 opens Monday 20:00
        let grouped = group_hours(&[range((2, 1, 0), (2, 5, 0))], -300);

        assert!(!grouped.has_day(2));
        let interval = &grouped.day(1)[0];
        assert_eq!(interval.open_label, "8:00 PM");
        assert_eq!(interval.close_label, "12:00 AM");
        assert_eq!(interval.close_minute_of_day, 0);
    }

    #[test]
    fn test_offset_moves_saturday_into_sunday() {
        let grouped = group_hours(&[range((6, 23, 0), (0, 3, 0))], 60);
        assert!(grouped.has_day(0));
        assert_eq!(grouped.day(0)[0].open_minute_of_day, 0);
    }

    #[test]
    fn test_iter_ascending_weekdays() {
        let ranges = vec![
            range((5, 9, 0), (5, 17, 0)),
            range((1, 9, 0), (1, 17, 0)),
        ];
        let grouped = group_hours(&ranges, 0);
        let days: Vec<u8> = grouped.iter().map(|(d, _)| d).collect();
        assert_eq!(days, vec![1, 5]);
    }

    #[test]
    fn test_same_day_contains_is_half_open() {
        let grouped = group_hours(&[range((2, 9, 0), (2, 17, 0))], 0);
        let interval = &grouped.day(2)[0];
        assert!(interval.contains(9 * 60));
        assert!(interval.contains(17 * 60 - 1));
        assert!(!interval.contains(17 * 60));
        assert!(!interval.contains(8 * 60 + 59));
    }
}
