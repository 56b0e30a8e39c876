//! Conversion rate adapters.
//!
//! [`JsonRateAdapter`] reads the EUR rate table published by the public
//! currency API (`{"date": "...", "eur": {"sek": 11.03, ...}}`) from disk.
//! [`FixedRateAdapter`] serves a single configured rate.

use crate::domain::error::SpotprisError;
use crate::ports::rate_port::RatePort;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct EurRates {
    #[serde(default)]
    date: Option<String>,
    eur: HashMap<String, f64>,
}

#[derive(Debug)]
pub struct JsonRateAdapter {
    date: Option<String>,
    rates: HashMap<String, f64>,
}

impl JsonRateAdapter {
    pub fn from_json(content: &str) -> Result<Self, SpotprisError> {
        let parsed: EurRates =
            serde_json::from_str(content).map_err(|e| SpotprisError::RateUnavailable {
                reason: format!("invalid rate table: {e}"),
            })?;
        Ok(Self {
            date: parsed.date,
            rates: parsed
                .eur
                .into_iter()
                .map(|(currency, rate)| (currency.to_lowercase(), rate))
                .collect(),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, SpotprisError> {
        let content = fs::read_to_string(path).map_err(|e| SpotprisError::RateUnavailable {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json(&content)
    }

    /// Publication date of the table, if present.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

impl RatePort for JsonRateAdapter {
    fn eur_rate(&self, currency: &str) -> Result<f64, SpotprisError> {
        let rate = self
            .rates
            .get(&currency.to_lowercase())
            .copied()
            .ok_or_else(|| SpotprisError::RateUnavailable {
                reason: format!("no EUR rate for {currency}"),
            })?;
        if rate <= 0.0 || !rate.is_finite() {
            return Err(SpotprisError::RateUnavailable {
                reason: format!("EUR rate for {currency} is not positive: {rate}"),
            });
        }
        Ok(rate)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedRateAdapter {
    rate: f64,
}

impl FixedRateAdapter {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl RatePort for FixedRateAdapter {
    fn eur_rate(&self, _currency: &str) -> Result<f64, SpotprisError> {
        Ok(self.rate)
    }
}
