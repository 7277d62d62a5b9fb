#![forbid(unsafe_code)]

//! Guide expiry dates.
//!
//! Accepts RFC 3339 timestamps (`2024-06-01T12:00:00+08:00`) or bare
//! calendar dates (`2024-06-01`, meaning midnight UTC). A guide expires at
//! the instant itself: `now >= expire` hides it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryParseError {
    input: String,
}

impl ExpiryParseError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ExpiryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid expire date {:?}: expected RFC 3339 or YYYY-MM-DD",
            self.input
        )
    }
}

impl std::error::Error for ExpiryParseError {}

/// Instant after which a guide is never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpireDate(DateTime<Utc>);

impl ExpireDate {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn parse(input: &str) -> Result<Self, ExpiryParseError> {
        let trimmed = input.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(at.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
            .ok_or_else(|| ExpiryParseError {
                input: input.to_owned(),
            })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.0
    }
}

impl FromStr for ExpireDate {
    type Err = ExpiryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ExpireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for ExpireDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}
