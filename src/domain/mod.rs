//! Core domain types and logic.
//!
//! Flow: [`document`] parses raw points, [`resample`] normalizes them to
//! uniform slots, [`period`] finds high and low stretches, and [`report`]
//! turns the result into a message.

pub mod bidding_zone;
pub mod config_validation;
pub mod document;
pub mod error;
pub mod locale;
pub mod period;
pub mod price_level;
pub mod price_point;
pub mod report;
pub mod resample;
