//! Command implementations.
//!
//! Each command returns its rendered output; the caller decides where it goes.

pub mod enrich;
pub mod hours;
pub mod list;
pub mod ping;
pub mod profile;
pub mod search;

pub use self::enrich::execute_enrich;
pub use self::hours::execute_hours;
pub use self::list::execute_list;
pub use self::ping::execute_ping;
pub use self::profile::execute_profile;
pub use self::search::execute_search;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{Formatter, RestaurantRow};
use eatsavvy_domain::RestaurantId;
use eatsavvy_sdk::LocalInstant;
use eatsavvy_store::DirectoryStore;

/// Rows for the visible records, with open state at `now`.
pub fn visible_rows(store: &mut DirectoryStore, utc_offset_minutes: i32, now: LocalInstant) -> Vec<RestaurantRow<'_>> {
    let open: Vec<(RestaurantId, Option<bool>)> = store
        .visible_ids()
        .into_iter()
        .map(|id| {
            let known = store.get(&id).is_some_and(|r| r.hours_known());
            let open_now = if known {
                store.is_open_now(&id, utc_offset_minutes, now.weekday, now.minute_of_day)
            } else {
                None
            };
            (id, open_now)
        })
        .collect();

    let store: &DirectoryStore = store;
    open.into_iter()
        .filter_map(|(id, open_now)| {
            store.get(&id).map(|record| RestaurantRow {
                record,
                selected: store.is_selected(&id),
                open_now,
            })
        })
        .collect()
}

/// Listing of the visible records, followed by the summary line in table mode.
pub fn render_listing(store: &mut DirectoryStore, utc_offset_minutes: i32, formatter: &Formatter) -> Result<String> {
    let summary = store.summary();
    let rows = visible_rows(store, utc_offset_minutes, LocalInstant::now(utc_offset_minutes));
    let mut output = formatter.format_restaurants(&rows)?;

    if formatter.format() == OutputFormat::Table {
        output.push('\n');
        output.push_str(&formatter.summary(&summary));
    }
    Ok(output)
}

/// Parse user-supplied ids.
pub fn parse_ids<'a>(raw: impl IntoIterator<Item = &'a str>) -> Result<Vec<RestaurantId>> {
    raw.into_iter()
        .map(|s| RestaurantId::new(s).map_err(crate::error::CliError::InvalidInput))
        .collect()
}
