//! Search query types and the form's native date/time strings.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::station::StationPair;

/// Date format expected by the search form.
const DATE_FORMAT: &str = "%Y.%m.%d";

/// Time format expected by the search form.
const TIME_FORMAT: &str = "%H:%M";

/// Error returned when a date or time string doesn't match the form format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} `{input}`: expected {format}")]
pub struct InvalidSearchTime {
    kind: &'static str,
    input: String,
    format: &'static str,
}

/// A travel date in the form's `YYYY.MM.DD` format.
///
/// Validity is format matching only: the string must parse as a calendar
/// date with [`DATE_FORMAT`]. The input string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelDate(String);

impl TravelDate {
    /// Parse a date string, keeping it verbatim on success.
    pub fn parse(s: &str) -> Result<Self, InvalidSearchTime> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(|_| Self(s.to_string()))
            .map_err(|_| InvalidSearchTime {
                kind: "date",
                input: s.to_string(),
                format: "YYYY.MM.DD",
            })
    }

    /// Format a date for the form.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    /// Use `input` when present and valid, otherwise the date part of `now`.
    pub fn parse_or_now(input: Option<&str>, now: NaiveDateTime) -> Self {
        input
            .and_then(|s| Self::parse(s).ok())
            .unwrap_or_else(|| Self::from_date(now.date()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A departure time in the form's `HH:MM` format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureTime(String);

impl DepartureTime {
    /// Parse a time string, keeping it verbatim on success.
    pub fn parse(s: &str) -> Result<Self, InvalidSearchTime> {
        NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map(|_| Self(s.to_string()))
            .map_err(|_| InvalidSearchTime {
                kind: "time",
                input: s.to_string(),
                format: "HH:MM",
            })
    }

    /// Format a time for the form.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.format(TIME_FORMAT).to_string())
    }

    /// Use `input` when present and valid, otherwise the time part of `now`.
    pub fn parse_or_now(input: Option<&str>, now: NaiveDateTime) -> Self {
        input
            .and_then(|s| Self::parse(s).ok())
            .unwrap_or_else(|| Self::from_time(now.time()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search to run against the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub pair: StationPair,
    pub date: TravelDate,
    pub time: DepartureTime,
}

impl SearchQuery {
    pub fn new(pair: StationPair, date: TravelDate, time: DepartureTime) -> Self {
        Self { pair, date, time }
    }

    pub fn departure(&self) -> &str {
        &self.pair.departure
    }

    pub fn arrival(&self) -> &str {
        &self.pair.arrival
    }
}
