//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod file_document_adapter;
#[cfg(feature = "html")]
pub mod html_report_adapter;
pub mod rate_adapter;
pub mod text_report_adapter;
