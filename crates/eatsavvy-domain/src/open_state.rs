//! Open-state module - deciding whether a restaurant is open at a local instant

use crate::hours::GroupedHours;

/// Whether "now" falls inside any interval of the current local weekday
///
/// Only the bucket for `now_local_weekday` is consulted. An interval that
/// opened on the previous day and runs past midnight is *not* found from the
/// following day's lookup; it counts as open only for the late part of its
/// opening day (and, through the overnight rule, the early minutes of that
/// same weekday).
///
/// The caller supplies "now" explicitly; nothing here reads the wall clock.
///
/// # Examples
///
/// ```
/// use eatsavvy_domain::{group_hours, is_open_now, TimePoint, TimeRange};
///
/// let lunch = TimeRange::new(TimePoint::new(3, 11, 0), TimePoint::new(3, 14, 0));
/// let dinner = TimeRange::new(TimePoint::new(3, 17, 0), TimePoint::new(3, 22, 0));
/// let grouped = group_hours(&[lunch, dinner], 0);
///
/// assert!(is_open_now(&grouped, 3, 12 * 60));
/// assert!(!is_open_now(&grouped, 3, 15 * 60));
/// assert!(is_open_now(&grouped, 3, 18 * 60));
/// ```
pub fn is_open_now(grouped: &GroupedHours, now_local_weekday: u8, now_minute_of_day: u16) -> bool {
    grouped
        .day(now_local_weekday)
        .iter()
        .any(|interval| interval.contains(now_minute_of_day))
}
