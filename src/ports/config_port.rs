//! Configuration access port trait.
//!
//! Values are addressed by INI-style `[section] key` pairs. Numbers are read
//! strictly: the `get_opt_*` getters tell a missing key apart from a malformed
//! one. `get_bool` falls back to `default`.

use crate::domain::error::SpotprisError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// `Ok(None)` when absent, `ConfigInvalid` when present but not an integer.
    fn get_opt_int(&self, section: &str, key: &str) -> Result<Option<i64>, SpotprisError> {
        self.get_string(section, key)
            .map(|v| {
                v.trim()
                    .parse()
                    .map_err(|_| not_a_number(section, key, &v))
            })
            .transpose()
    }

    fn get_opt_double(&self, section: &str, key: &str) -> Result<Option<f64>, SpotprisError> {
        self.get_string(section, key)
            .map(|v| {
                v.trim()
                    .parse()
                    .map_err(|_| not_a_number(section, key, &v))
            })
            .transpose()
    }
}

fn not_a_number(section: &str, key: &str, value: &str) -> SpotprisError {
    SpotprisError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("\"{}\" is not a number", value.trim()),
    }
}
