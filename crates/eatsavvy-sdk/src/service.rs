//! Directory service abstraction.

use crate::error::Result;
use async_trait::async_trait;
use eatsavvy_domain::{Restaurant, RestaurantId};

/// Remote operations a directory session depends on
///
/// [`DirectoryClient`](crate::DirectoryClient) is the HTTP implementation;
/// tests drive sessions with in-memory fakes.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch every known restaurant
    async fn list_all(&self) -> Result<Vec<Restaurant>>;

    /// Server-side search by free text
    async fn search(&self, query: &str) -> Result<Vec<Restaurant>>;

    /// Request enrichment and return the updated records
    async fn enrich(&self, ids: &[RestaurantId]) -> Result<Vec<Restaurant>>;
}
