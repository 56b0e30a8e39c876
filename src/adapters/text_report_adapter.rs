//! Plain text report adapter implementing ReportPort.

use crate::domain::error::SpotprisError;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Writes the message as-is to a file, or to stdout when no path is set.
pub struct TextReportAdapter {
    output: Option<PathBuf>,
}

impl TextReportAdapter {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}

impl ReportPort for TextReportAdapter {
    fn publish(&self, message: &str) -> Result<(), SpotprisError> {
        match &self.output {
            Some(path) => fs::write(path, message)?,
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", message.trim_end())?;
            }
        }
        Ok(())
    }
}
