//! HTML report adapter implementing ReportPort.
//!
//! Renders each message line as a list item of a standalone page using an
//! Askama template, for screenshots or a kiosk display.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::domain::error::SpotprisError;
use crate::ports::report_port::ReportPort;

use askama::Template;

#[derive(Template)]
#[template(path = "message.html")]
struct MessageTemplate<'a> {
    title: &'a str,
    lines: Vec<&'a str>,
}

pub fn render_html(message: &str) -> Result<String, SpotprisError> {
    let lines: Vec<&str> = message.lines().collect();
    let title = lines
        .first()
        .map(|l| l.trim_end_matches(':'))
        .unwrap_or_default();
    MessageTemplate { title, lines }
        .render()
        .map_err(|e| SpotprisError::Io(io::Error::other(e)))
}

/// Writes the rendered page to a file, or to stdout when no path is set.
pub struct HtmlReportAdapter {
    output: Option<PathBuf>,
}

impl HtmlReportAdapter {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }
}

impl ReportPort for HtmlReportAdapter {
    fn publish(&self, message: &str) -> Result<(), SpotprisError> {
        let html = render_html(message)?;
        match &self.output {
            Some(path) => fs::write(path, html)?,
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{html}")?;
            }
        }
        Ok(())
    }
}
