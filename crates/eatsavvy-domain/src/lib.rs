//! EatSavvy Domain Layer
//!
//! This crate contains the pure logic of the restaurant directory client.
//! It has no runtime dependencies and defines the value objects and
//! computations that the store, SDK and CLI build upon.
//!
//! ## Key Concepts
//!
//! - **TimePoint / TimeRange**: UTC opening hours as delivered by the directory API
//! - **Local conversion**: shifting a UTC weekday/hour/minute into the observer's week
//! - **GroupedHours**: local weekday → ordered display intervals
//! - **Open state**: overnight-aware "is it open right now" evaluation
//! - **Restaurant**: a directory record with nutrition data and enrichment status
//!
//! ## Example
//!
//! ```
//! use eatsavvy_domain::{group_hours, is_open_now, TimePoint, TimeRange};
//!
//! // Monday 22:00 UTC until Tuesday 02:00 UTC
//! let ranges = vec![TimeRange::new(TimePoint::new(1, 22, 0), TimePoint::new(2, 2, 0))];
//! let grouped = group_hours(&ranges, 0);
//!
//! assert!(is_open_now(&grouped, 1, 23 * 60 + 30));
//! assert!(!is_open_now(&grouped, 2, 60));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hours;
pub mod open_state;
pub mod restaurant;
pub mod time;

// Re-exports for convenience
pub use hours::{group_hours, GroupedHours, LocalDayInterval};
pub use open_state::is_open_now;
pub use restaurant::{EnrichmentStatus, NutritionInfo, Restaurant, RestaurantId};
pub use time::{format_clock, to_local, weekday_name, LocalTime, TimePoint, TimeRange};
