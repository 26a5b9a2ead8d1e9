//! List command implementation.

use crate::cli::ListArgs;
use crate::commands::render_listing;
use crate::error::Result;
use crate::output::Formatter;
use eatsavvy_sdk::{DirectoryService, DirectorySession};

/// Execute the list command.
pub async fn execute_list<S: DirectoryService>(
    args: ListArgs,
    session: &mut DirectorySession<S>,
    utc_offset_minutes: i32,
    formatter: &Formatter,
) -> Result<String> {
    session.reload().await?;

    if let Some(filter) = args.filter {
        session.store_mut().set_query(filter);
    }

    render_listing(session.store_mut(), utc_offset_minutes, formatter)
}
