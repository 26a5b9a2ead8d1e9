//! JSON shapes exchanged with the directory service.
//!
//! The service is lenient about what it leaves out, so decoding is done one
//! record at a time: a record that cannot be understood is dropped with a
//! warning and the rest of the response is kept.

use crate::error::{Result, SdkError};
use eatsavvy_domain::{EnrichmentStatus, NutritionInfo, Restaurant, RestaurantId, TimePoint, TimeRange};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Body of `POST /search`
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    /// Free-text query
    pub query: &'a str,
}

/// Body of `POST /enrich`
#[derive(Debug, Serialize)]
pub struct EnrichRequest<'a> {
    /// Ids to enrich
    pub ids: Vec<&'a str>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Human readable message
    pub error: String,
}

/// Weekday, hour and minute in UTC
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiTimePoint {
    /// 0 = Sunday
    pub weekday: i64,
    /// 0-23
    pub hour: i64,
    /// 0-59
    pub minute: i64,
}

/// Open/close pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiTimeRange {
    /// Opening time
    pub open: ApiTimePoint,
    /// Closing time
    pub close: ApiTimePoint,
}

/// Nutrition block as sent by the service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ApiNutritionInfo {
    #[serde(default)]
    pub oil: Option<String>,
    #[serde(default)]
    pub nut_free: Option<bool>,
    #[serde(default)]
    pub accommodations: Option<String>,
    /// A string, or a list of vegetable names
    #[serde(default)]
    pub vegetables: Option<Value>,
}

/// Restaurant record as sent by the service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ApiRestaurant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub open_hours: Option<Vec<ApiTimeRange>>,
    #[serde(default)]
    pub nutrition_info: Option<ApiNutritionInfo>,
    #[serde(default)]
    pub enrichment_status: Option<String>,
}

/// Why a record was dropped at the wire boundary
#[derive(Debug, Error, PartialEq)]
pub enum MalformedRecord {
    /// The record has no usable identifier
    #[error("record has a missing or empty id")]
    MissingId,

    /// The record is not an object of the expected shape
    #[error("record does not match the restaurant shape: {0}")]
    Shape(String),
}

impl ApiRestaurant {
    /// Convert into a domain record, applying display defaults
    pub fn into_domain(self) -> std::result::Result<Restaurant, MalformedRecord> {
        let id = self
            .id
            .and_then(|raw| RestaurantId::new(raw).ok())
            .ok_or(MalformedRecord::MissingId)?;

        let mut record = Restaurant::new(id, self.name.unwrap_or_default());

        if let Some(phone) = self.phone_number.filter(|p| !p.trim().is_empty()) {
            record.phone = phone;
        }
        record.address = self.address.unwrap_or_default();
        record.rating = self.rating;
        record.open_hours = self
            .open_hours
            .map(|ranges| valid_ranges(&record.id, ranges));
        record.nutrition = self
            .nutrition_info
            .map(ApiNutritionInfo::into_domain)
            .unwrap_or_default();
        record.enrichment_status = match self.enrichment_status.as_deref() {
            None | Some("") => EnrichmentStatus::Pending,
            Some(raw) => EnrichmentStatus::parse(raw).unwrap_or_else(|| {
                warn!(id = %record.id, status = raw, "Unknown enrichment status, treating as pending");
                EnrichmentStatus::Pending
            }),
        };

        Ok(record)
    }
}

impl From<&Restaurant> for ApiRestaurant {
    fn from(record: &Restaurant) -> Self {
        Self {
            id: Some(record.id.to_string()),
            name: Some(record.name.clone()),
            address: Some(record.address.clone()),
            phone_number: Some(record.phone.clone()),
            rating: record.rating,
            open_hours: record.open_hours.as_ref().map(|ranges| {
                ranges
                    .iter()
                    .map(|r| ApiTimeRange {
                        open: ApiTimePoint::from(r.open),
                        close: ApiTimePoint::from(r.close),
                    })
                    .collect()
            }),
            nutrition_info: Some(ApiNutritionInfo {
                oil: Some(record.nutrition.oil.clone()),
                nut_free: Some(record.nutrition.nut_free),
                accommodations: Some(record.nutrition.accommodations.clone()),
                vegetables: Some(Value::String(record.nutrition.vegetables.clone())),
            }),
            enrichment_status: Some(record.enrichment_status.as_str().to_string()),
        }
    }
}

impl From<TimePoint> for ApiTimePoint {
    fn from(point: TimePoint) -> Self {
        Self {
            weekday: point.weekday.into(),
            hour: point.hour.into(),
            minute: point.minute.into(),
        }
    }
}

impl ApiTimePoint {
    fn to_domain(self) -> Option<TimePoint> {
        let weekday = u8::try_from(self.weekday).ok().filter(|d| *d <= 6)?;
        let hour = u8::try_from(self.hour).ok().filter(|h| *h <= 23)?;
        let minute = u8::try_from(self.minute).ok().filter(|m| *m <= 59)?;
        Some(TimePoint::new(weekday, hour, minute))
    }
}

impl ApiNutritionInfo {
    fn into_domain(self) -> NutritionInfo {
        let defaults = NutritionInfo::default();
        NutritionInfo {
            oil: non_empty(self.oil).unwrap_or(defaults.oil),
            nut_free: self.nut_free.unwrap_or(defaults.nut_free),
            accommodations: non_empty(self.accommodations).unwrap_or(defaults.accommodations),
            vegetables: self
                .vegetables
                .and_then(vegetables_text)
                .unwrap_or(defaults.vegetables),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn vegetables_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Array(items) => {
            let names: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        _ => None,
    }
}

fn valid_ranges(id: &RestaurantId, ranges: Vec<ApiTimeRange>) -> Vec<TimeRange> {
    ranges
        .into_iter()
        .filter_map(|range| match (range.open.to_domain(), range.close.to_domain()) {
            (Some(open), Some(close)) => Some(TimeRange::new(open, close)),
            _ => {
                warn!(%id, ?range, "Dropping out-of-range opening hours");
                None
            }
        })
        .collect()
}

/// Decode a list response into domain records
///
/// The body must be a JSON array (`null` is read as empty). Elements that
/// fail to decode are dropped and logged.
pub fn decode_restaurants(body: &[u8]) -> Result<Vec<Restaurant>> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            return Err(SdkError::Decode(format!(
                "expected a list of restaurants, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let records: Vec<Restaurant> = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match decode_record(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(position, error = %e, "Dropping malformed restaurant record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(kept = records.len(), total, "Some restaurant records were dropped");
    }
    Ok(records)
}

fn decode_record(item: Value) -> std::result::Result<Restaurant, MalformedRecord> {
    let api: ApiRestaurant =
        serde_json::from_value(item).map_err(|e| MalformedRecord::Shape(e.to_string()))?;
    api.into_domain()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_applies_defaults() {
        let body = br#"[{"id": "5", "name": "Pizzeria Uno"}]"#;
        let records = decode_restaurants(body).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.phone, "N/A");
        assert_eq!(r.address, "");
        assert_eq!(r.nutrition, NutritionInfo::default());
        assert_eq!(r.enrichment_status, EnrichmentStatus::Pending);
        assert!(r.open_hours.is_none());
    }

    #[test]
    fn test_decode_full_record() {
        let body = br#"[{
            "id": "ChIJ5",
            "name": "Golden Wok",
            "address": "1 Main St",
            "phoneNumber": "(555) 010-0000",
            "rating": 4.5,
            "openHours": [{"open": {"weekday": 1, "hour": 22, "minute": 0},
                           "close": {"weekday": 2, "hour": 2, "minute": 0}}],
            "nutritionInfo": {"oil": "Peanut", "nutFree": false,
                              "accommodations": "Vegan", "vegetables": ["bok choy", "carrot"]},
            "enrichmentStatus": "in_progress"
        }]"#;
        let records = decode_restaurants(body).unwrap();
        let r = &records[0];

        assert_eq!(r.phone, "(555) 010-0000");
        assert_eq!(r.rating, Some(4.5));
        assert_eq!(r.hours().len(), 1);
        assert_eq!(r.nutrition.oil, "Peanut");
        assert_eq!(r.nutrition.vegetables, "bok choy, carrot");
        assert_eq!(r.enrichment_status, EnrichmentStatus::InProgress);
    }

    #[test]
    fn test_empty_phone_and_nutrition_fields_use_placeholders() {
        let body = br#"[{"id": "1", "name": "A", "phoneNumber": "",
                         "nutritionInfo": {"oil": "", "vegetables": ""}}]"#;
        let r = &decode_restaurants(body).unwrap()[0];
        assert_eq!(r.phone, "N/A");
        assert_eq!(r.nutrition.oil, "Unknown");
        assert_eq!(r.nutrition.accommodations, "None");
        assert_eq!(r.nutrition.vegetables, "Unknown");
    }

    #[test]
    fn test_missing_id_is_dropped() {
        let body = br#"[{"name": "No Id"}, {"id": "", "name": "Blank"}, {"id": "2", "name": "Kept"}]"#;
        let records = decode_restaurants(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Kept");
    }

    #[test]
    fn test_null_name_keeps_record() {
        let body = br#"[{"id": "7", "name": null}, {"id": "8", "name": "Kept"}]"#;
        let records = decode_restaurants(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "7");
        assert_eq!(records[0].name, "");
    }

    #[test]
    fn test_wrong_shape_is_dropped() {
        let body = br#"[42, {"id": "2", "name": "Kept"}]"#;
        assert_eq!(decode_restaurants(body).unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_range_hours_dropped() {
        let body = br#"[{"id": "1", "name": "A", "openHours": [
            {"open": {"weekday": 9, "hour": 8, "minute": 0}, "close": {"weekday": 1, "hour": 9, "minute": 0}},
            {"open": {"weekday": 1, "hour": 8, "minute": 0}, "close": {"weekday": 1, "hour": 17, "minute": 0}}
        ]}]"#;
        let r = &decode_restaurants(body).unwrap()[0];
        assert_eq!(r.hours().len(), 1);
        assert_eq!(r.hours()[0].open.hour, 8);
    }

    #[test]
    fn test_unknown_status_is_pending() {
        let body = br#"[{"id": "1", "name": "A", "enrichmentStatus": "exploded"}]"#;
        let r = &decode_restaurants(body).unwrap()[0];
        assert_eq!(r.enrichment_status, EnrichmentStatus::Pending);
    }

    #[test]
    fn test_null_body_is_empty() {
        assert!(decode_restaurants(b"null").unwrap().is_empty());
    }

    #[test]
    fn test_object_body_is_decode_error() {
        let err = decode_restaurants(br#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(err, SdkError::Decode(_)));
    }

    #[test]
    fn test_request_bodies() {
        let search = serde_json::to_string(&SearchRequest { query: "wok" }).unwrap();
        assert_eq!(search, r#"{"query":"wok"}"#);

        let enrich = serde_json::to_string(&EnrichRequest { ids: vec!["1", "2"] }).unwrap();
        assert_eq!(enrich, r#"{"ids":["1","2"]}"#);
    }

    #[test]
    fn test_domain_back_to_wire() {
        let mut r = Restaurant::new(RestaurantId::new("7").unwrap(), "Seven");
        r.open_hours = Some(vec![TimeRange::new(TimePoint::new(1, 9, 0), TimePoint::new(1, 17, 30))]);
        let api = ApiRestaurant::from(&r);

        assert_eq!(api.id.as_deref(), Some("7"));
        assert_eq!(api.enrichment_status.as_deref(), Some("pending"));
        assert_eq!(api.clone().into_domain().unwrap(), r);
    }
}
