//! Hours command implementation.

use crate::cli::HoursArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eatsavvy_domain::{is_open_now, RestaurantId};
use eatsavvy_sdk::{DirectoryService, DirectorySession, LocalInstant};

/// Execute the hours command.
pub async fn execute_hours<S: DirectoryService>(
    args: HoursArgs,
    session: &mut DirectorySession<S>,
    utc_offset_minutes: i32,
    formatter: &Formatter,
) -> Result<String> {
    let offset = args.offset.unwrap_or(utc_offset_minutes);
    let id = RestaurantId::new(args.id).map_err(CliError::InvalidInput)?;

    session.reload().await?;
    render_hours(session, &id, offset, LocalInstant::now(offset), formatter)
}

/// Hours of one loaded record as seen at `now`.
pub fn render_hours<S>(
    session: &mut DirectorySession<S>,
    id: &RestaurantId,
    utc_offset_minutes: i32,
    now: LocalInstant,
    formatter: &Formatter,
) -> Result<String>
where
    S: DirectoryService,
{
    let store = session.store_mut();
    let grouped = store
        .hours_view(id, utc_offset_minutes)
        .ok_or_else(|| CliError::NotLoaded(id.to_string()))?;
    let record = store.get(id).ok_or_else(|| CliError::NotLoaded(id.to_string()))?;
    let open = record
        .hours_known()
        .then(|| is_open_now(&grouped, now.weekday, now.minute_of_day));

    formatter.format_hours(record, &grouped, open)
}
