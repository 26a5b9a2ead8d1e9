//! Local (keystroke) filtering over the loaded record set.

use eatsavvy_domain::Restaurant;

/// Records whose name, phone or address contains `query`, ignoring case
///
/// This is a projection, not a mutation: the input order is preserved and an
/// empty query returns every record. Server-side search is a separate path
/// that replaces the record set instead.
///
/// # Examples
///
/// ```
/// use eatsavvy_domain::{Restaurant, RestaurantId};
/// use eatsavvy_store::local_filter;
///
/// let mut uno = Restaurant::new(RestaurantId::new("1").unwrap(), "Pizzeria Uno");
/// uno.phone = "555-0199".to_string();
/// let records = vec![uno];
///
/// assert_eq!(local_filter(&records, "PIZ").len(), 1);
/// assert_eq!(local_filter(&records, "sushi").len(), 0);
/// ```
pub fn local_filter<'a>(records: &'a [Restaurant], query: &str) -> Vec<&'a Restaurant> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_query(record, &needle))
        .collect()
}

/// Whether a record matches an already lower-cased needle
pub(crate) fn matches_query(record: &Restaurant, needle: &str) -> bool {
    [&record.name, &record.phone, &record.address]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
