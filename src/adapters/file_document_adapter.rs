//! Price documents stored on disk as `<ZONE>_<YYYY-MM-DD>.xml`.

use crate::domain::bidding_zone::BiddingZone;
use crate::domain::error::SpotprisError;
use crate::ports::document_port::DocumentPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileDocumentAdapter {
    base_path: PathBuf,
}

impl FileDocumentAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn document_path(&self, zone: BiddingZone, date: NaiveDate) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.xml", zone, date.format("%Y-%m-%d")))
    }
}

/// Read a single document from an explicit path.
pub fn read_document(path: &Path) -> Result<String, SpotprisError> {
    fs::read_to_string(path).map_err(|e| SpotprisError::DocumentUnavailable {
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

impl DocumentPort for FileDocumentAdapter {
    fn fetch_document(&self, zone: BiddingZone, date: NaiveDate) -> Result<String, SpotprisError> {
        let path = self.document_path(zone, date);
        tracing::debug!(path = %path.display(), "reading price document");
        read_document(&path)
    }
}
