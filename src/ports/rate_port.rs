//! Currency conversion rate port trait.

use crate::domain::error::SpotprisError;

pub trait RatePort {
    /// Units of `currency` per euro.
    fn eur_rate(&self, currency: &str) -> Result<f64, SpotprisError>;
}
