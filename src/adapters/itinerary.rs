use crate::domain::model::{Itinerary, ItineraryDay, ItineraryDaySummary};
use crate::utils::error::{Result, SiteError};
use serde::Serialize;
use std::path::Path;

/// Read-only itinerary data, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ItineraryStore {
    itinerary: Itinerary,
}

#[derive(Debug, Serialize)]
pub struct ItineraryOverview<'a> {
    pub title: &'a str,
    pub days: Vec<ItineraryDaySummary>,
}

impl ItineraryStore {
    pub fn empty() -> Self {
        Self {
            itinerary: Itinerary {
                title: String::new(),
                days: Vec::new(),
            },
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut itinerary: Itinerary = serde_json::from_str(content)?;
        itinerary.days.sort_by_key(|d| d.day);

        if let Some(pair) = itinerary.days.windows(2).find(|w| w[0].day == w[1].day) {
            return Err(SiteError::ConfigError {
                message: format!("itinerary lists day {} more than once", pair[0].day),
            });
        }

        tracing::debug!("Loaded itinerary '{}' with {} days", itinerary.title, itinerary.days.len());
        Ok(Self { itinerary })
    }

    pub fn overview(&self) -> ItineraryOverview<'_> {
        ItineraryOverview {
            title: &self.itinerary.title,
            days: self.itinerary.days.iter().map(ItineraryDaySummary::from).collect(),
        }
    }

    pub fn day(&self, day: u32) -> Option<&ItineraryDay> {
        self.itinerary.days.iter().find(|d| d.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Japan Study Tour",
        "days": [
            { "day": 2, "title": "Kyoto", "location": "Kyoto", "summary": "Temples", "activities": ["Fushimi Inari"] },
            { "day": 1, "title": "Arrival", "summary": "Land in Tokyo" }
        ]
    }"#;

    #[test]
    fn test_days_sorted_and_summarized() {
        let store = ItineraryStore::from_json_str(SAMPLE).unwrap();
        let overview = store.overview();
        assert_eq!(overview.title, "Japan Study Tour");
        assert_eq!(overview.days[0].day, 1);
        assert_eq!(overview.days[1].location.as_deref(), Some("Kyoto"));
    }

    #[test]
    fn test_day_lookup() {
        let store = ItineraryStore::from_json_str(SAMPLE).unwrap();
        assert_eq!(store.day(2).unwrap().activities, vec!["Fushimi Inari"]);
        assert!(store.day(17).is_none());
    }

    #[test]
    fn test_duplicate_days_rejected() {
        let dup = r#"{ "title": "x", "days": [
            { "day": 1, "title": "a" }, { "day": 1, "title": "b" }
        ] }"#;
        assert!(ItineraryStore::from_json_str(dup).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("itinerary.json");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(ItineraryStore::from_file(&path).unwrap().overview().days.len(), 2);
    }
}
