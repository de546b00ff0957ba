// src/types/time.rs
//! Date-or-datetime values as they appear on the wire.
//!
//! Notion emits both full RFC 3339 timestamps (`2020-12-08T12:00:00Z`) and
//! bare calendar dates (`2020-12-08`) in the same fields, and `null` where a
//! value is absent. [`NotionTime`] accepts all three. Encoding always emits
//! RFC 3339, so a date-only input re-encodes as midnight UTC.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Raised when a string is neither RFC 3339 nor `YYYY-MM-DD`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date or datetime '{input}': expected RFC 3339 or YYYY-MM-DD")]
pub struct TimeFormatError {
    pub input: String,
}

/// A timestamp that may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NotionTime(Option<DateTime<Utc>>);

impl NotionTime {
    pub fn new(value: DateTime<Utc>) -> Self {
        Self(Some(value))
    }

    pub fn unset() -> Self {
        Self(None)
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        self.0.as_ref()
    }

    /// Parses RFC 3339 first, then a bare calendar date at midnight UTC.
    pub fn parse(input: &str) -> Result<Self, TimeFormatError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::new(dt.with_timezone(&Utc)));
        }

        NaiveDate::parse_from_str(input, DATE_ONLY_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self::new(naive.and_utc()))
            .ok_or_else(|| TimeFormatError {
                input: input.to_string(),
            })
    }

    /// RFC 3339 rendering, or `None` when unset.
    pub fn to_rfc3339(&self) -> Option<String> {
        self.0
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl From<DateTime<Utc>> for NotionTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value)
    }
}

impl FromStr for NotionTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NotionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "unset"),
        }
    }
}

impl Serialize for NotionTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_rfc3339() {
            Some(s) => serializer.serialize_str(&s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NotionTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NotionTime::parse(&s).map_err(serde::de::Error::custom),
            None => Ok(NotionTime::unset()),
        }
    }
}
