//! Port traits the domain depends on; adapters implement them.

pub mod config_port;
pub mod document_port;
pub mod rate_port;
pub mod report_port;
