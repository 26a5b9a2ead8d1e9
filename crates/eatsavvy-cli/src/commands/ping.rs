//! Ping command implementation.

use crate::error::Result;
use crate::output::Formatter;
use eatsavvy_sdk::DirectoryClient;

/// Execute the ping command.
pub async fn execute_ping(client: &DirectoryClient, formatter: &Formatter) -> Result<String> {
    let health = client.health().await?;
    let url = &client.config().base_url;

    if health.status == "ok" {
        Ok(formatter.success(&format!("{} is healthy", url)))
    } else {
        Ok(formatter.warning(&format!("{} reported status '{}'", url, health.status)))
    }
}
