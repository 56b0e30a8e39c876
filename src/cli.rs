//! CLI definition and dispatch.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_document_adapter::{FileDocumentAdapter, read_document};
use crate::adapters::rate_adapter::{FixedRateAdapter, JsonRateAdapter};
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::bidding_zone::{BiddingZone, delivery_date};
use crate::domain::config_validation::validate_report_config;
use crate::domain::document::PriceDocument;
use crate::domain::error::SpotprisError;
use crate::domain::period::{DEFAULT_WINDOW, detect_low_periods, detect_peak_periods};
use crate::domain::price_point::{IntervalMinutes, PricePoint};
use crate::domain::report::{
    DEFAULT_CHEAP_CUTOFF, DEFAULT_OVERHEAD_ORE_PER_KWH, DEFAULT_TIMEZONE, ReportSettings,
    convert_prices, day_message,
};
use crate::domain::resample::{ensure_series_length, resample};
use crate::ports::config_port::ConfigPort;
use crate::ports::document_port::DocumentPort;
use crate::ports::rate_port::RatePort;
use crate::ports::report_port::ReportPort;

const DEFAULT_CURRENCY: &str = "sek";

#[derive(Parser, Debug)]
#[command(name = "spotpris", about = "Day-ahead electricity price reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the day report
    Report {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Price document to read instead of looking one up in [data] document_dir
        #[arg(short, long)]
        document: Option<PathBuf>,
        #[arg(long)]
        area: Option<String>,
        /// Delivery day (YYYY-MM-DD), defaults to the latest published day
        #[arg(long)]
        date: Option<NaiveDate>,
        /// SEK per EUR, overrides the configured rate
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        html: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the normalized series with detected periods
    Periods {
        #[arg(short, long)]
        document: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Everything needed to turn a price document into a message.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportJob {
    pub settings: ReportSettings,
    /// Target slot length; the document's own resolution when unset.
    pub interval: Option<IntervalMinutes>,
    /// Required number of slots, if the caller enforces one.
    pub expected_points: Option<usize>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Report {
            config,
            document,
            area,
            date,
            rate,
            html,
            output,
        } => run_report(
            config.as_deref(),
            document.as_deref(),
            area.as_deref(),
            date,
            rate,
            html,
            output,
        ),
        Command::Periods {
            document,
            config,
            rate,
        } => run_periods(&document, config.as_deref(), rate),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ExitCode> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    eprintln!("Loading config from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;
    if let Err(err) = validate_report_config(&adapter) {
        eprintln!("error: {err}");
        return Err((&err).into());
    }
    Ok(adapter)
}

pub fn resolve_timezone(config: &dyn ConfigPort) -> Result<Tz, SpotprisError> {
    match config.get_string("report", "timezone") {
        Some(name) => name.trim().parse().map_err(|_| SpotprisError::ConfigInvalid {
            section: "report".into(),
            key: "timezone".into(),
            reason: format!("unknown time zone \"{name}\""),
        }),
        None => Ok(DEFAULT_TIMEZONE),
    }
}

pub fn resolve_zone(
    area_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<BiddingZone, SpotprisError> {
    let area = area_override
        .map(str::to_string)
        .or_else(|| config.get_string("report", "area"))
        .ok_or_else(|| SpotprisError::ConfigMissing {
            section: "report".into(),
            key: "area".into(),
        })?;
    area.parse().map_err(|reason| SpotprisError::ConfigInvalid {
        section: "report".into(),
        key: "area".into(),
        reason,
    })
}

/// Rate precedence: explicit override, `[currency] eur_rate`, then the table
/// in `[currency] rates_file`.
pub fn resolve_rate(
    rate_override: Option<f64>,
    config: &FileConfigAdapter,
) -> Result<f64, SpotprisError> {
    let currency = config
        .get_string("currency", "code")
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let rate = if let Some(rate) = rate_override {
        FixedRateAdapter::new(rate).eur_rate(&currency)?
    } else if let Some(rate) = config.get_opt_double("currency", "eur_rate")? {
        FixedRateAdapter::new(rate).eur_rate(&currency)?
    } else if let Some(path) = config.get_path("currency", "rates_file") {
        let table = JsonRateAdapter::from_file(&path)?;
        tracing::debug!(date = table.date(), %currency, "using rate table");
        table.eur_rate(&currency)?
    } else {
        return Err(SpotprisError::ConfigMissing {
            section: "currency".into(),
            key: "eur_rate".into(),
        });
    };

    if rate <= 0.0 || !rate.is_finite() {
        return Err(SpotprisError::RateUnavailable {
            reason: format!("rate must be positive, got {rate}"),
        });
    }
    Ok(rate)
}

pub fn build_report_job(
    rate_override: Option<f64>,
    config: &FileConfigAdapter,
) -> Result<ReportJob, SpotprisError> {
    let settings = ReportSettings {
        eur_rate: resolve_rate(rate_override, config)?,
        overhead: config
            .get_opt_double("pricing", "overhead")?
            .unwrap_or(DEFAULT_OVERHEAD_ORE_PER_KWH),
        cheap_cutoff: config
            .get_opt_double("pricing", "cheap_cutoff")?
            .unwrap_or(DEFAULT_CHEAP_CUTOFF),
        window: positive(config, "window")?.unwrap_or(DEFAULT_WINDOW),
        timezone: resolve_timezone(config)?,
    };

    let interval = positive(config, "interval_minutes")?
        .map(|minutes| {
            u32::try_from(minutes)
                .ok()
                .and_then(IntervalMinutes::new)
                .ok_or_else(|| SpotprisError::ConfigInvalid {
                    section: "report".into(),
                    key: "interval_minutes".into(),
                    reason: format!("{minutes} minutes is out of range"),
                })
        })
        .transpose()?;
    let expected_points = positive(config, "expected_points")?;

    Ok(ReportJob {
        settings,
        interval,
        expected_points,
    })
}

/// An optional `[report]` count that must be at least 1.
fn positive(config: &dyn ConfigPort, key: &str) -> Result<Option<usize>, SpotprisError> {
    config
        .get_opt_int("report", key)?
        .map(|n| {
            usize::try_from(n)
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| SpotprisError::ConfigInvalid {
                    section: "report".into(),
                    key: key.into(),
                    reason: format!("{key} must be positive"),
                })
        })
        .transpose()
}

/// Parse a price document and resample it to uniform slots.
pub fn load_price_points(
    xml: &str,
    interval: Option<IntervalMinutes>,
) -> Result<Vec<PricePoint>, SpotprisError> {
    let document = PriceDocument::parse(xml)?;
    let raw = document.raw_price_points()?;
    let interval = match interval {
        Some(interval) => interval,
        None => document.interval_minutes()?,
    };
    resample(&raw, interval)
}

/// Document text to finished message.
pub fn compose_report(xml: &str, job: &ReportJob) -> Result<String, SpotprisError> {
    let points = load_price_points(xml, job.interval)?;
    if let Some(expected) = job.expected_points {
        ensure_series_length(&points, expected)?;
    }
    day_message(&points, &job.settings)
}

fn resolve_document(
    document: Option<&Path>,
    area: Option<&str>,
    date: Option<NaiveDate>,
    config: &FileConfigAdapter,
    tz: Tz,
) -> Result<String, SpotprisError> {
    if let Some(path) = document {
        eprintln!("Reading price document {}", path.display());
        return read_document(path);
    }

    let zone = resolve_zone(area, config)?;
    let date = date.unwrap_or_else(|| delivery_date(Utc::now(), tz));
    let dir = config
        .get_path("data", "document_dir")
        .ok_or_else(|| SpotprisError::ConfigMissing {
            section: "data".into(),
            key: "document_dir".into(),
        })?;
    eprintln!("Reading {} prices for {}", zone, date);
    FileDocumentAdapter::new(dir).fetch_document(zone, date)
}

fn report_port(html: bool, output: Option<PathBuf>) -> Result<Box<dyn ReportPort>, SpotprisError> {
    if !html {
        return Ok(Box::new(TextReportAdapter::new(output)));
    }

    #[cfg(feature = "html")]
    {
        use crate::adapters::html_report_adapter::HtmlReportAdapter;
        Ok(Box::new(HtmlReportAdapter::new(output)))
    }

    #[cfg(not(feature = "html"))]
    {
        let _ = output;
        Err(SpotprisError::ConfigInvalid {
            section: "output".into(),
            key: "html".into(),
            reason: "html feature is required for --html".into(),
        })
    }
}

fn run_report(
    config_path: Option<&Path>,
    document: Option<&Path>,
    area: Option<&str>,
    date: Option<NaiveDate>,
    rate: Option<f64>,
    html: bool,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = build_report_job(rate, &config).and_then(|job| {
        let xml = resolve_document(document, area, date, &config, job.settings.timezone)?;
        let message = compose_report(&xml, &job)?;
        let html = html || config.get_bool("output", "html", false);
        let output = output.or_else(|| config.get_path("output", "path"));
        report_port(html, output)?.publish(&message)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_periods(document: &Path, config_path: Option<&Path>, rate: Option<f64>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = build_report_job(rate, &config).and_then(|job| {
        let xml = read_document(document)?;
        let points = load_price_points(&xml, job.interval)?;
        Ok((job, points))
    });
    let (job, points) = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let settings = &job.settings;
    let prices = convert_prices(&points, settings.eur_rate);
    let peaks = detect_peak_periods(&prices, settings.window);
    let lows = detect_low_periods(&prices, settings.window);

    for (i, (point, price)) in points.iter().zip(&prices).enumerate() {
        let marker = if peaks.iter().any(|p| p.contains(i)) {
            "peak"
        } else if lows.iter().any(|p| p.contains(i)) {
            "low"
        } else {
            ""
        };
        println!(
            "{:>3}  {}  {:>8.2}  {}",
            i,
            point.start.with_timezone(&settings.timezone).format("%Y-%m-%d %H:%M"),
            price,
            marker
        );
    }

    eprintln!("\n{} points, {} peak periods, {} low periods", points.len(), peaks.len(), lows.len());
    for period in &peaks {
        eprintln!("  peak {}..={}", period.start, period.end);
    }
    for period in &lows {
        eprintln!("  low  {}..={}", period.start, period.end);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(Some(config_path)) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match resolve_zone(None, &config) {
        Ok(zone) => eprintln!("  area:     {} ({})", zone, zone.eic_code()),
        Err(_) => eprintln!("  area:     not set"),
    }
    match resolve_timezone(&config) {
        Ok(tz) => eprintln!("  timezone: {}", tz.name()),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }
    match resolve_rate(None, &config) {
        Ok(rate) => eprintln!("  rate:     {rate} per EUR"),
        Err(e) => eprintln!("  rate:     {e} (pass --rate when reporting)"),
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
