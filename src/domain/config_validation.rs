//! Configuration validation.
//!
//! Validates all report settings before any document is read.

use crate::domain::bidding_zone::BiddingZone;
use crate::domain::error::SpotprisError;
use crate::ports::config_port::ConfigPort;
use chrono_tz::Tz;

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    validate_area(config)?;
    validate_timezone(config)?;
    validate_interval(config)?;
    validate_expected_points(config)?;
    validate_window(config)?;
    validate_pricing(config)?;
    validate_eur_rate(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SpotprisError {
    SpotprisError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_area(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    if let Some(area) = config.get_string("report", "area") {
        area.parse::<BiddingZone>()
            .map_err(|reason| invalid("report", "area", reason))?;
    }
    Ok(())
}

fn validate_timezone(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    if let Some(name) = config.get_string("report", "timezone") {
        name.trim()
            .parse::<Tz>()
            .map_err(|_| invalid("report", "timezone", format!("unknown time zone \"{name}\"")))?;
    }
    Ok(())
}

fn validate_interval(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    let Some(value) = config.get_opt_int("report", "interval_minutes")? else {
        return Ok(());
    };
    if value <= 0 || value > 1440 {
        return Err(invalid(
            "report",
            "interval_minutes",
            "interval_minutes must be between 1 and 1440",
        ));
    }
    if 1440 % value != 0 {
        return Err(invalid(
            "report",
            "interval_minutes",
            "interval_minutes must divide a day evenly",
        ));
    }
    Ok(())
}

fn validate_expected_points(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    match config.get_opt_int("report", "expected_points")? {
        Some(value) if value <= 0 => Err(invalid(
            "report",
            "expected_points",
            "expected_points must be positive",
        )),
        _ => Ok(()),
    }
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    match config.get_opt_int("report", "window")? {
        Some(value) if value < 1 => Err(invalid("report", "window", "window must be at least 1")),
        _ => Ok(()),
    }
}

fn validate_pricing(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    if let Some(overhead) = config.get_opt_double("pricing", "overhead")? {
        if overhead < 0.0 || !overhead.is_finite() {
            return Err(invalid("pricing", "overhead", "overhead must be non-negative"));
        }
    }
    if let Some(cutoff) = config.get_opt_double("pricing", "cheap_cutoff")? {
        if !cutoff.is_finite() {
            return Err(invalid("pricing", "cheap_cutoff", "cheap_cutoff must be finite"));
        }
    }
    Ok(())
}

fn validate_eur_rate(config: &dyn ConfigPort) -> Result<(), SpotprisError> {
    match config.get_opt_double("currency", "eur_rate")? {
        Some(value) if value <= 0.0 || !value.is_finite() => Err(invalid(
            "currency",
            "eur_rate",
            "eur_rate must be a positive number",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockConfig {
        values: HashMap<(String, String), String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                values: HashMap::new(),
            }
        }

        fn set(mut self, section: &str, key: &str, value: &str) -> Self {
            self.values
                .insert((section.to_string(), key.to_string()), value.to_string());
            self
        }
    }

    impl ConfigPort for MockConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.values
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
    }

    fn assert_invalid(config: &MockConfig, section: &str, key: &str) {
        match validate_report_config(config) {
            Err(SpotprisError::ConfigInvalid {
                section: s, key: k, ..
            }) => {
                assert_eq!(s, section);
                assert_eq!(k, key);
            }
            other => panic!("expected ConfigInvalid [{section}] {key}, got {other:?}"),
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(validate_report_config(&MockConfig::new()).is_ok());
    }

    #[test]
    fn full_config_is_valid() {
        let config = MockConfig::new()
            .set("report", "area", "SE3")
            .set("report", "timezone", "Europe/Stockholm")
            .set("report", "interval_minutes", "15")
            .set("report", "expected_points", "96")
            .set("report", "window", "4")
            .set("pricing", "overhead", "132")
            .set("pricing", "cheap_cutoff", "20")
            .set("currency", "eur_rate", "11.03");
        assert!(validate_report_config(&config).is_ok());
    }

    #[test]
    fn unknown_area() {
        let config = MockConfig::new().set("report", "area", "DK1");
        assert_invalid(&config, "report", "area");
    }

    #[test]
    fn unknown_timezone() {
        let config = MockConfig::new().set("report", "timezone", "Europe/Atlantis");
        assert_invalid(&config, "report", "timezone");
    }

    #[test]
    fn zero_interval() {
        let config = MockConfig::new().set("report", "interval_minutes", "0");
        assert_invalid(&config, "report", "interval_minutes");
    }

    #[test]
    fn interval_not_dividing_day() {
        let config = MockConfig::new().set("report", "interval_minutes", "7");
        assert_invalid(&config, "report", "interval_minutes");
    }

    #[test]
    fn negative_expected_points() {
        let config = MockConfig::new().set("report", "expected_points", "-96");
        assert_invalid(&config, "report", "expected_points");
    }

    #[test]
    fn zero_window() {
        let config = MockConfig::new().set("report", "window", "0");
        assert_invalid(&config, "report", "window");
    }

    #[test]
    fn non_numeric_interval() {
        let config = MockConfig::new().set("report", "interval_minutes", "quarter");
        assert_invalid(&config, "report", "interval_minutes");
    }

    #[test]
    fn infinite_cutoff() {
        let config = MockConfig::new().set("pricing", "cheap_cutoff", "inf");
        assert_invalid(&config, "pricing", "cheap_cutoff");
    }

    #[test]
    fn negative_overhead() {
        let config = MockConfig::new().set("pricing", "overhead", "-1");
        assert_invalid(&config, "pricing", "overhead");
    }

    #[test]
    fn non_positive_rate() {
        let config = MockConfig::new().set("currency", "eur_rate", "0");
        assert_invalid(&config, "currency", "eur_rate");

        let config = MockConfig::new().set("currency", "eur_rate", "eleven");
        assert_invalid(&config, "currency", "eur_rate");
    }
}
