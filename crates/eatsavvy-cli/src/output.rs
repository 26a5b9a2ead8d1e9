//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use eatsavvy_domain::{weekday_name, GroupedHours, Restaurant};
use eatsavvy_sdk::wire::ApiRestaurant;
use eatsavvy_store::{MergeReport, Summary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// One line of the restaurant listing.
#[derive(Debug, Clone, Copy)]
pub struct RestaurantRow<'a> {
    /// The record shown
    pub record: &'a Restaurant,
    /// Whether the record is in the selection
    pub selected: bool,
    /// Open state at the display instant, `None` when hours are unknown
    pub open_now: Option<bool>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a restaurant listing.
    pub fn format_restaurants(&self, rows: &[RestaurantRow<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_restaurants_json(rows),
            OutputFormat::Table => Ok(self.format_restaurants_table(rows)),
            OutputFormat::Quiet => Ok(Self::format_restaurants_quiet(rows)),
        }
    }

    fn format_restaurants_json(&self, rows: &[RestaurantRow<'_>]) -> Result<String> {
        let records: Vec<ApiRestaurant> = rows.iter().map(|row| ApiRestaurant::from(row.record)).collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    fn format_restaurants_table(&self, rows: &[RestaurantRow<'_>]) -> String {
        if rows.is_empty() {
            return self.colorize("No restaurants found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["", "ID", "Name", "Phone", "Address", "Rating", "Open", "Status"]);

        for row in rows {
            let r = row.record;
            let marker = if row.selected { "[x]" } else { "[ ]" };
            let rating = r
                .rating
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "—".to_string());
            let open = match row.open_now {
                Some(true) => "Open",
                Some(false) => "Closed",
                None => "—",
            };
            builder.push_record([
                marker,
                r.id.as_str(),
                &r.name,
                &r.phone,
                &r.address,
                &rating,
                open,
                r.enrichment_status.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_restaurants_quiet(rows: &[RestaurantRow<'_>]) -> String {
        let ids: Vec<&str> = rows.iter().map(|row| row.record.id.as_str()).collect();
        ids.join("\n")
    }

    /// Format a record's detail view with nutrition data.
    pub fn format_detail(&self, record: &Restaurant) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&ApiRestaurant::from(record))?);
        }
        if self.format == OutputFormat::Quiet {
            return Ok(record.id.to_string());
        }

        let n = &record.nutrition;
        let nut_free = if n.nut_free { "Yes" } else { "No" };
        Ok([
            self.colorize(&record.name, "cyan"),
            format!("  ID:             {}", record.id),
            format!("  Phone:          {}", record.phone),
            format!("  Address:        {}", record.address),
            format!("  Status:         {}", record.enrichment_status),
            format!("  Oil:            {}", n.oil),
            format!("  Nut free:       {}", nut_free),
            format!("  Accommodations: {}", n.accommodations),
            format!("  Vegetables:     {}", n.vegetables),
        ]
        .join("\n"))
    }

    /// Format grouped local hours and the current open state.
    ///
    /// `open_now` is `None` when the record's hours are unknown.
    pub fn format_hours(
        &self,
        record: &Restaurant,
        grouped: &GroupedHours,
        open_now: Option<bool>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let days: serde_json::Map<String, serde_json::Value> = grouped
                    .iter()
                    .map(|(day, intervals)| {
                        let labels: Vec<String> = intervals.iter().map(|i| i.label()).collect();
                        (weekday_name(day).to_string(), serde_json::json!(labels))
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "id": record.id.as_str(),
                    "hoursKnown": record.hours_known(),
                    "openNow": open_now,
                    "days": days,
                }))?)
            }
            OutputFormat::Quiet => Ok(match open_now {
                Some(true) => "open",
                Some(false) => "closed",
                None => "unknown",
            }
            .to_string()),
            OutputFormat::Table => {
                let mut lines = vec![self.colorize(&record.name, "cyan")];
                if !record.hours_known() {
                    lines.push("  Hours not available".to_string());
                } else {
                    for (day, intervals) in grouped.iter() {
                        let labels: Vec<String> = intervals.iter().map(|i| i.label()).collect();
                        lines.push(format!("  {:<10} {}", weekday_name(day), labels.join(", ")));
                    }
                }
                match open_now {
                    Some(true) => lines.push(self.success("Open now")),
                    Some(false) => lines.push(self.colorize("Closed now", "red")),
                    None => {}
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the outcome of an enrichment merge.
    pub fn merge_report(&self, report: &MergeReport) -> String {
        let mut msg = self.success(&format!("Enriched {} restaurant(s)", report.updated.len()));
        if !report.ignored.is_empty() {
            msg.push('\n');
            msg.push_str(&self.warning(&format!(
                "{} returned record(s) were not loaded and were ignored",
                report.ignored.len()
            )));
        }
        msg
    }

    /// Format the header counts.
    pub fn summary(&self, summary: &Summary) -> String {
        self.colorize(&summary.to_string(), "blue")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatsavvy_domain::{group_hours, RestaurantId, TimePoint, TimeRange};

    fn create_test_restaurant() -> Restaurant {
        let mut r = Restaurant::new(RestaurantId::new("ChIJ5").unwrap(), "Late Diner");
        r.rating = Some(4.25);
        r.open_hours = Some(vec![TimeRange::new(TimePoint::new(1, 22, 0), TimePoint::new(2, 2, 0))]);
        r
    }

    fn row(record: &Restaurant) -> RestaurantRow<'_> {
        RestaurantRow {
            record,
            selected: true,
            open_now: Some(true),
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let r = create_test_restaurant();
        let output = formatter.format_restaurants(&[row(&r)]).unwrap();
        assert!(output.contains("Late Diner"));
        assert!(output.contains("[x]"));
        assert!(output.contains("4.2") || output.contains("4.3"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let r = create_test_restaurant();
        let output = formatter.format_restaurants(&[row(&r)]).unwrap();
        assert!(output.contains("\"phoneNumber\""));
        assert!(output.contains("\"enrichmentStatus\": \"pending\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let r = create_test_restaurant();
        assert_eq!(formatter.format_restaurants(&[row(&r)]).unwrap(), "ChIJ5");
    }

    #[test]
    fn test_empty_listing() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_restaurants(&[]).unwrap();
        assert!(output.contains("No restaurants found"));
    }

    #[test]
    fn test_hours_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let r = create_test_restaurant();
        let grouped = group_hours(r.hours(), 0);
        let output = formatter.format_hours(&r, &grouped, Some(true)).unwrap();
        assert!(output.contains("Monday"));
        assert!(output.contains("10:00 PM - 2:00 AM"));
        assert!(output.contains("Open now"));
    }

    #[test]
    fn test_hours_unknown_is_not_closed() {
        let r = Restaurant::new(RestaurantId::new("1").unwrap(), "Mystery");
        let grouped = GroupedHours::default();

        let table = Formatter::new(OutputFormat::Table, false)
            .format_hours(&r, &grouped, None)
            .unwrap();
        assert!(table.contains("Hours not available"));
        assert!(!table.contains("Closed now"));
        assert!(!table.contains("Open now"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_hours(&r, &grouped, None)
            .unwrap();
        assert_eq!(quiet, "unknown");

        let json = Formatter::new(OutputFormat::Json, false)
            .format_hours(&r, &grouped, None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["openNow"].is_null());
        assert_eq!(value["hoursKnown"], serde_json::json!(false));
    }

    #[test]
    fn test_hours_closed_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let r = create_test_restaurant();
        let grouped = group_hours(r.hours(), 0);
        assert_eq!(formatter.format_hours(&r, &grouped, Some(false)).unwrap(), "closed");
    }

    #[test]
    fn test_detail_shows_nutrition_placeholders() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_detail(&create_test_restaurant()).unwrap();
        assert!(output.contains("Oil:            Unknown"));
        assert!(output.contains("Accommodations: None"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
