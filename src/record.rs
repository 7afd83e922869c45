use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{RaceError, RaceResult};

/// One categorical event as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(rename = "DateCreated", alias = "timestamp")]
    pub timestamp: String,
    #[serde(rename = "Category", alias = "category")]
    pub category: String,
}

impl Record {
    pub fn new(timestamp: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            category: category.into(),
        }
    }

    /// Calendar date of the record. `index` is the record's position in its batch and is only
    /// used to report a malformed timestamp.
    pub fn date(&self, index: usize) -> RaceResult<NaiveDate> {
        parse_record_date(&self.timestamp).ok_or_else(|| RaceError::MalformedTimestamp {
            index,
            timestamp: self.timestamp.clone(),
        })
    }
}

/// Extract the leading `YYYY-MM-DD` component of an ISO 8601 date-time.
///
/// The date ends at the first `T` (or a space, as SQLite's `datetime()` writes it). A value with
/// neither separator must be a bare date.
pub fn parse_record_date(timestamp: &str) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();
    let date_part = timestamp.split(['T', ' ']).next().unwrap_or(timestamp);
    if date_part.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
