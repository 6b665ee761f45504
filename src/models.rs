use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RateError;

/// Units of each target currency bought by one unit of the base currency,
/// for a single (date, base) pair. Keys are lowercase currency codes.
pub type RateSnapshot = HashMap<String, f64>;

/// Wire shape of an upstream snapshot document: a `date` field plus one
/// field named exactly after the requested base currency, holding the rate
/// table. The base key is dynamic, so the tables are kept as raw values and
/// extracted by the client.
#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotDocument {
    /// Publication date reported by the upstream, e.g. "2025-08-05".
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub tables: HashMap<String, Value>,
}

/// A historical range bound, given either as a parsed date or as a
/// `YYYY-MM-DD` string.
#[derive(Debug, Clone)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl DateInput {
    pub(crate) fn resolve(&self) -> Result<NaiveDate, RateError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Text(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| RateError::InvalidDate { value: text.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_iso_string() {
        let input = DateInput::from("2024-03-06");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(input.resolve().unwrap(), expected);
    }

    #[test]
    fn test_resolve_passes_dates_through() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
        assert_eq!(DateInput::from(date).resolve().unwrap(), date);
    }

    #[test]
    fn test_resolve_rejects_other_formats() {
        for bad in ["06/03/2024", "2024-3", "yesterday", ""] {
            match DateInput::from(bad).resolve() {
                Err(RateError::InvalidDate { value }) => assert_eq!(value, bad),
                other => panic!("expected InvalidDate for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_snapshot_document_splits_date_and_tables() {
        let document: SnapshotDocument = serde_json::from_value(serde_json::json!({
            "date": "2025-08-05",
            "usd": { "eur": 0.92 }
        }))
        .unwrap();
        assert_eq!(document.date.as_deref(), Some("2025-08-05"));
        assert!(document.tables.contains_key("usd"));
        assert!(!document.tables.contains_key("date"));
    }
}
