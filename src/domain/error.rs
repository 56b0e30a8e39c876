//! Domain error types.

use chrono::{DateTime, Utc};

/// Top-level error type for spotpris.
#[derive(Debug, thiserror::Error)]
pub enum SpotprisError {
    #[error("malformed price document: {reason}")]
    MalformedDocument { reason: String },

    #[error("unsupported resolution \"{resolution}\" (expected PT<minutes>M)")]
    UnsupportedResolution { resolution: String },

    #[error(
        "price point starting {start} spans {minutes} minutes, not a multiple of {interval} minutes"
    )]
    NonUniformInterval {
        start: DateTime<Utc>,
        minutes: i64,
        interval: u32,
    },

    #[error("unexpected series length: have {actual} points, expected {expected}")]
    UnexpectedSeriesLength { expected: usize, actual: usize },

    #[error("no price points to report on")]
    EmptySeries,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price document unavailable: {reason}")]
    DocumentUnavailable { reason: String },

    #[error("conversion rate unavailable: {reason}")]
    RateUnavailable { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SpotprisError> for std::process::ExitCode {
    fn from(err: &SpotprisError) -> Self {
        let code: u8 = match err {
            SpotprisError::Io(_) => 1,
            SpotprisError::ConfigParse { .. }
            | SpotprisError::ConfigMissing { .. }
            | SpotprisError::ConfigInvalid { .. } => 2,
            SpotprisError::DocumentUnavailable { .. } | SpotprisError::RateUnavailable { .. } => 3,
            SpotprisError::MalformedDocument { .. }
            | SpotprisError::UnsupportedResolution { .. } => 4,
            SpotprisError::NonUniformInterval { .. }
            | SpotprisError::UnexpectedSeriesLength { .. }
            | SpotprisError::EmptySeries => 5,
        };
        std::process::ExitCode::from(code)
    }
}
