//! Price point representations.
//!
//! A [`RawPricePoint`] is one interval as published in the source document and
//! may cover several resolution slots. A [`PricePoint`] always covers exactly one
//! slot of the target [`IntervalMinutes`].

use crate::domain::error::SpotprisError;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct RawPricePoint {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// EUR/MWh as published.
    pub price: f64,
}

impl RawPricePoint {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Length of a uniform sub-interval, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalMinutes(u32);

impl IntervalMinutes {
    pub fn new(minutes: u32) -> Option<Self> {
        (minutes > 0).then_some(Self(minutes))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }

    /// Parse an ISO 8601 resolution of the exact form `PT<digits>M`.
    pub fn parse_resolution(resolution: &str) -> Result<Self, SpotprisError> {
        let unsupported = || SpotprisError::UnsupportedResolution {
            resolution: resolution.to_string(),
        };

        let digits = resolution
            .trim()
            .strip_prefix("PT")
            .and_then(|s| s.strip_suffix('M'))
            .ok_or_else(unsupported)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unsupported());
        }

        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(unsupported)
    }
}

impl fmt::Display for IntervalMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PT{}M", self.0)
    }
}
