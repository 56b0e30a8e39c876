//! Report publishing port trait.

use crate::domain::error::SpotprisError;

/// Destination for a finished day message.
pub trait ReportPort {
    fn publish(&self, message: &str) -> Result<(), SpotprisError>;
}
