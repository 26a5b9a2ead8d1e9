//! Search command implementation.

use crate::cli::SearchArgs;
use crate::commands::render_listing;
use crate::error::Result;
use crate::output::Formatter;
use eatsavvy_sdk::{DirectoryService, DirectorySession};

/// Execute the search command.
pub async fn execute_search<S: DirectoryService>(
    args: SearchArgs,
    session: &mut DirectorySession<S>,
    utc_offset_minutes: i32,
    formatter: &Formatter,
) -> Result<String> {
    session.submit_search(&args.query_text()).await?;
    render_listing(session.store_mut(), utc_offset_minutes, formatter)
}
