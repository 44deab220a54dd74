//! Downloadable itinerary payload.
//!
//! A one-way export: dates are rendered as readable strings and the payload
//! is never parsed back by the planner.

use serde::Serialize;

use crate::dates::TripDate;
use crate::error::CoreError;
use crate::itinerary::Itinerary;
use crate::types::DayCount;

/// File name prefix for saved itineraries.
pub const EXPORT_FILE_PREFIX: &str = "Philippine_Itinerary_";

/// One leg of the saved itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub destination: String,
    pub days: DayCount,
    pub start_date: String,
    pub end_date: String,
}

/// Flatten an itinerary into export records, one per leg, in leg order.
pub fn export_records(itinerary: &Itinerary) -> Vec<ExportRecord> {
    itinerary
        .legs
        .iter()
        .map(|leg| ExportRecord {
            destination: leg.destination.name.clone(),
            days: leg.destination.duration_days,
            start_date: leg.arrival_date.readable(),
            end_date: leg.departure_date.readable(),
        })
        .collect()
}

/// Serialize the export payload as pretty-printed JSON.
pub fn export_json(itinerary: &Itinerary) -> Result<String, CoreError> {
    serde_json::to_string_pretty(&export_records(itinerary))
        .map_err(|e| CoreError::Internal(format!("Failed to serialize itinerary export: {e}")))
}

/// Download name for an export created on `today`.
pub fn export_file_name(today: TripDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{today}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::itinerary::plan;

    fn sample_itinerary() -> Itinerary {
        let catalog = Catalog::builtin();
        let picks = vec![
            catalog.get(2).expect("Bohol").clone(),
            catalog.get(1).expect("Baguio").clone(),
        ];
        plan(Some("2025-01-01"), Some("2025-01-06"), &picks).expect("fits")
    }

    #[test]
    fn records_follow_leg_order_with_readable_dates() {
        let records = export_records(&sample_itinerary());
        assert_eq!(
            records,
            vec![
                ExportRecord {
                    destination: "Baguio City".to_string(),
                    days: 2,
                    start_date: "January 1, 2025".to_string(),
                    end_date: "January 2, 2025".to_string(),
                },
                ExportRecord {
                    destination: "Bohol Island".to_string(),
                    days: 3,
                    start_date: "January 4, 2025".to_string(),
                    end_date: "January 6, 2025".to_string(),
                },
            ]
        );
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = export_json(&sample_itinerary()).expect("serialize");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        let first = &parsed[0];
        assert_eq!(first["destination"], "Baguio City");
        assert_eq!(first["days"], 2);
        assert_eq!(first["startDate"], "January 1, 2025");
        assert_eq!(first["endDate"], "January 2, 2025");
        assert!(first.get("start_date").is_none());
    }

    #[test]
    fn file_name_embeds_iso_date() {
        let today = TripDate::from_ymd(2025, 7, 9).expect("valid date");
        assert_eq!(export_file_name(today), "Philippine_Itinerary_2025-07-09.json");
    }
}
