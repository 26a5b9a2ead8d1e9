//! Enrich command implementation.

use crate::cli::EnrichArgs;
use crate::commands::{parse_ids, visible_rows};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use eatsavvy_sdk::{DirectoryService, DirectorySession, LocalInstant};

/// Execute the enrich command.
///
/// Loads the directory, selects the given ids and enriches them, then shows
/// the records that came back.
pub async fn execute_enrich<S: DirectoryService>(
    args: EnrichArgs,
    session: &mut DirectorySession<S>,
    utc_offset_minutes: i32,
    formatter: &Formatter,
) -> Result<String> {
    let ids = parse_ids(args.ids.iter().map(String::as_str))?;

    session.reload().await?;
    for id in ids {
        session.store_mut().select(id);
    }

    let Some(report) = session.enrich_selected().await? else {
        return Ok(formatter.info("Nothing to enrich"));
    };

    let now = LocalInstant::now(utc_offset_minutes);
    let rows: Vec<_> = visible_rows(session.store_mut(), utc_offset_minutes, now)
        .into_iter()
        .filter(|row| report.updated.contains(&row.record.id))
        .collect();

    let mut output = formatter.format_restaurants(&rows)?;
    if formatter.format() == OutputFormat::Table {
        output.push('\n');
        output.push_str(&formatter.merge_report(&report));
    }
    Ok(output)
}
