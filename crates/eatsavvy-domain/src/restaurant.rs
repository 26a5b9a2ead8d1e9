//! Restaurant module - directory records and their enrichment lifecycle

use crate::time::TimeRange;
use std::fmt;

/// Stable restaurant identifier assigned by the directory service
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RestaurantId(String);

impl RestaurantId {
    /// Create an identifier, rejecting blank values
    ///
    /// # Examples
    ///
    /// ```
    /// use eatsavvy_domain::RestaurantId;
    ///
    /// assert!(RestaurantId::new("ChIJ-place-5").is_ok());
    /// assert!(RestaurantId::new("  ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Restaurant id cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a record is in the asynchronous enrichment pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnrichmentStatus {
    /// Never submitted for enrichment
    #[default]
    Pending,

    /// Accepted and waiting for a worker
    Queued,

    /// A worker is gathering data
    InProgress,

    /// Enrichment data is available
    Completed,

    /// Enrichment gave up
    Failed,
}

impl EnrichmentStatus {
    /// Wire/display name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentStatus::Pending => "pending",
            EnrichmentStatus::Queued => "queued",
            EnrichmentStatus::InProgress => "in_progress",
            EnrichmentStatus::Completed => "completed",
            EnrichmentStatus::Failed => "failed",
        }
    }

    /// Parse a status from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(EnrichmentStatus::Pending),
            "queued" => Some(EnrichmentStatus::Queued),
            "in_progress" => Some(EnrichmentStatus::InProgress),
            "completed" => Some(EnrichmentStatus::Completed),
            "failed" => Some(EnrichmentStatus::Failed),
            _ => None,
        }
    }

    /// Whether the record is still moving through the pipeline
    pub fn is_active(&self) -> bool {
        matches!(self, EnrichmentStatus::Queued | EnrichmentStatus::InProgress)
    }
}

impl std::str::FromStr for EnrichmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid enrichment status: {}", s))
    }
}

impl fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrition details gathered by enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionInfo {
    /// Cooking oil used
    pub oil: String,

    /// Whether the kitchen is nut free
    pub nut_free: bool,

    /// Dietary accommodations offered
    pub accommodations: String,

    /// Description of vegetables used
    pub vegetables: String,
}

impl Default for NutritionInfo {
    /// Placeholder values shown before enrichment
    fn default() -> Self {
        Self {
            oil: "Unknown".to_string(),
            nut_free: false,
            accommodations: "None".to_string(),
            vegetables: "Unknown".to_string(),
        }
    }
}

/// A restaurant as held by the directory client
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Stable identity
    pub id: RestaurantId,

    /// Display name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Street address
    pub address: String,

    /// Average rating, if known
    pub rating: Option<f64>,

    /// UTC opening ranges; `None` or empty means hours are unknown
    pub open_hours: Option<Vec<TimeRange>>,

    /// Nutrition details
    pub nutrition: NutritionInfo,

    /// Enrichment pipeline status
    pub enrichment_status: EnrichmentStatus,
}

impl Restaurant {
    /// Create a record with placeholder contact and nutrition data
    pub fn new(id: RestaurantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: "N/A".to_string(),
            address: String::new(),
            rating: None,
            open_hours: None,
            nutrition: NutritionInfo::default(),
            enrichment_status: EnrichmentStatus::Pending,
        }
    }

    /// Whether opening hours are known
    ///
    /// Unknown hours are distinct from a schedule that is closed every day.
    pub fn hours_known(&self) -> bool {
        self.open_hours.as_ref().is_some_and(|ranges| !ranges.is_empty())
    }

    /// Opening ranges, empty when unknown
    pub fn hours(&self) -> &[TimeRange] {
        self.open_hours.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimePoint;

    #[test]
    fn test_status_roundtrip_names() {
        for status in [
            EnrichmentStatus::Pending,
            EnrichmentStatus::Queued,
            EnrichmentStatus::InProgress,
            EnrichmentStatus::Completed,
            EnrichmentStatus::Failed,
        ] {
            assert_eq!(EnrichmentStatus::parse(status.as_str()), Some(status));
        }
        assert!("bogus".parse::<EnrichmentStatus>().is_err());
    }

    #[test]
    fn test_status_active() {
        assert!(EnrichmentStatus::Queued.is_active());
        assert!(EnrichmentStatus::InProgress.is_active());
        assert!(!EnrichmentStatus::Completed.is_active());
        assert!(!EnrichmentStatus::Pending.is_active());
    }

    #[test]
    fn test_blank_id_rejected() {
        assert!(RestaurantId::new("").is_err());
        assert_eq!(RestaurantId::new("5").unwrap().as_str(), "5");
    }

    #[test]
    fn test_hours_known_distinguishes_unknown_from_closed() {
        let id = RestaurantId::new("1").unwrap();
        let mut restaurant = Restaurant::new(id, "Cafe");
        assert!(!restaurant.hours_known());

        restaurant.open_hours = Some(vec![]);
        assert!(!restaurant.hours_known());
        assert!(restaurant.hours().is_empty());

        restaurant.open_hours = Some(vec![TimeRange::new(
            TimePoint::new(1, 9, 0),
            TimePoint::new(1, 17, 0),
        )]);
        assert!(restaurant.hours_known());
    }

    #[test]
    fn test_nutrition_placeholders() {
        let nutrition = NutritionInfo::default();
        assert_eq!(nutrition.oil, "Unknown");
        assert!(!nutrition.nut_free);
        assert_eq!(nutrition.accommodations, "None");
    }
}
