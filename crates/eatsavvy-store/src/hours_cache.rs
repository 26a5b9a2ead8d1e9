//! Memoized per-record hours views.

use eatsavvy_domain::{group_hours, GroupedHours, Restaurant, RestaurantId};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct CacheEntry {
    key: u64,
    grouped: Arc<GroupedHours>,
}

/// Cache of grouped hours keyed by record id
///
/// An entry is reused only while the content hash of the record's
/// `open_hours` together with the UTC offset is unchanged; any change in
/// either recomputes the view.
#[derive(Debug, Default)]
pub struct HoursCache {
    entries: HashMap<RestaurantId, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl HoursCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Grouped hours for a record, computing them on a miss
    pub fn get_or_compute(&mut self, record: &Restaurant, utc_offset_minutes: i32) -> Arc<GroupedHours> {
        let key = content_key(record, utc_offset_minutes);

        if let Some(entry) = self.entries.get(&record.id) {
            if entry.key == key {
                self.hits += 1;
                return Arc::clone(&entry.grouped);
            }
        }

        self.misses += 1;
        let grouped = Arc::new(group_hours(record.hours(), utc_offset_minutes));
        self.entries.insert(
            record.id.clone(),
            CacheEntry {
                key,
                grouped: Arc::clone(&grouped),
            },
        );
        grouped
    }

    /// Drop the entry for one record
    pub fn invalidate(&mut self, id: &RestaurantId) {
        self.entries.remove(id);
    }

    /// Keep only entries for the given ids
    pub fn retain_ids(&mut self, live: &HashSet<RestaurantId>) {
        self.entries.retain(|id, _| live.contains(id));
    }

    /// Number of cached views
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

fn content_key(record: &Restaurant, utc_offset_minutes: i32) -> u64 {
    let mut hasher = DefaultHasher::new();
    record.open_hours.hash(&mut hasher);
    utc_offset_minutes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatsavvy_domain::{TimePoint, TimeRange};

    fn record_with_hours(id: &str, open_hour: u8) -> Restaurant {
        let mut r = Restaurant::new(RestaurantId::new(id).unwrap(), "Diner");
        r.open_hours = Some(vec![TimeRange::new(
            TimePoint::new(2, open_hour, 0),
            TimePoint::new(2, 20, 0),
        )]);
        r
    }

    #[test]
    fn test_second_lookup_hits() {
        let mut cache = HoursCache::new();
        let record = record_with_hours("1", 9);

        let first = cache.get_or_compute(&record, 0);
        let second = cache.get_or_compute(&record, 0);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_changed_hours_recompute() {
        let mut cache = HoursCache::new();
        let before = cache.get_or_compute(&record_with_hours("1", 9), 0);
        let after = cache.get_or_compute(&record_with_hours("1", 10), 0);

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.day(2)[0].open_label, "10:00 AM");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_offset_recompute() {
        let mut cache = HoursCache::new();
        let record = record_with_hours("1", 9);
        cache.get_or_compute(&record, 0);
        let shifted = cache.get_or_compute(&record, 60);

        assert_eq!(shifted.day(2)[0].open_label, "10:00 AM");
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn test_retain_ids() {
        let mut cache = HoursCache::new();
        cache.get_or_compute(&record_with_hours("1", 9), 0);
        cache.get_or_compute(&record_with_hours("2", 9), 0);

        let live: HashSet<RestaurantId> = [RestaurantId::new("2").unwrap()].into_iter().collect();
        cache.retain_ids(&live);
        assert_eq!(cache.len(), 1);
    }
}
