//! Price document access port trait.

use crate::domain::bidding_zone::BiddingZone;
use crate::domain::error::SpotprisError;
use chrono::NaiveDate;

/// Source of raw day-ahead price documents (XML text).
pub trait DocumentPort {
    fn fetch_document(&self, zone: BiddingZone, date: NaiveDate) -> Result<String, SpotprisError>;
}
