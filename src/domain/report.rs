//! Human-readable day report.
//!
//! Prices arrive in EUR/MWh and are reported in öre/kWh. The message names the
//! day, a qualitative level for the mean price, the cost of a shower at that
//! price, and the hours to avoid or prefer.

use crate::domain::error::SpotprisError;
use crate::domain::locale::{capitalize, human_list, weekday_name};
use crate::domain::period::{DEFAULT_WINDOW, Period, detect_low_periods, detect_peak_periods};
use crate::domain::price_level::price_description;
use crate::domain::price_point::PricePoint;
use chrono::{Datelike, Timelike};
use chrono_tz::Tz;

/// Energy tax and grid fee added on top of the spot price, öre/kWh.
pub const DEFAULT_OVERHEAD_ORE_PER_KWH: f64 = 132.0;
/// Below this mean (öre/kWh) a day without peaks or dips is simply cheap.
pub const DEFAULT_CHEAP_CUTOFF: f64 = 20.0;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Stockholm;

// Ten minutes at 25 kW.
const SHOWER_HOURS: f64 = 10.0 / 60.0;
const SHOWER_KW: f64 = 25.0;

const CHEAP_ALL_DAY: &str = "🥰 Billigt hela dagen, kör på.";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// SEK per EUR.
    pub eur_rate: f64,
    pub overhead: f64,
    pub cheap_cutoff: f64,
    pub window: usize,
    pub timezone: Tz,
}

impl ReportSettings {
    pub fn new(eur_rate: f64) -> Self {
        Self {
            eur_rate,
            overhead: DEFAULT_OVERHEAD_ORE_PER_KWH,
            cheap_cutoff: DEFAULT_CHEAP_CUTOFF,
            window: DEFAULT_WINDOW,
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

/// EUR/MWh to öre/kWh.
pub fn to_ore_per_kwh(eur_per_mwh: f64, eur_rate: f64) -> f64 {
    eur_per_mwh * eur_rate / 1000.0 * 100.0
}

pub fn convert_prices(points: &[PricePoint], eur_rate: f64) -> Vec<f64> {
    points
        .iter()
        .map(|p| to_ore_per_kwh(p.price, eur_rate))
        .collect()
}

/// Cost in öre of one shower at `ore_per_kwh` plus `overhead`.
pub fn shower_cost(ore_per_kwh: f64, overhead: f64) -> f64 {
    SHOWER_HOURS * SHOWER_KW * (ore_per_kwh + overhead)
}

/// Render a period as local hours, e.g. "16-20".
///
/// The start hour is the hour of the first slot's start. The end hour is the
/// hour of the last slot's end, with midnight written as 24. Returns `None`
/// if the period does not index into `points`.
pub fn period_to_hours(points: &[PricePoint], period: Period, tz: Tz) -> Option<String> {
    let first = points.get(period.start)?;
    let last = points.get(period.end)?;
    let start_hour = first.start.with_timezone(&tz).hour();
    let end_hour = match last.end.with_timezone(&tz).hour() {
        0 => 24,
        h => h,
    };
    Some(format!("{start_hour:02}-{end_hour:02}"))
}

/// Compose the day message from already detected periods.
pub fn format_message(
    points: &[PricePoint],
    peaks: &[Period],
    lows: &[Period],
    settings: &ReportSettings,
) -> Result<String, SpotprisError> {
    let first = points.first().ok_or(SpotprisError::EmptySeries)?;
    let prices = convert_prices(points, settings.eur_rate);
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;

    let local = first.start.with_timezone(&settings.timezone);
    let header = format!(
        "{} {}:\n\n",
        capitalize(weekday_name(local.weekday())),
        local.format("%Y-%m-%d")
    );

    if mean < settings.cheap_cutoff && peaks.is_empty() && lows.is_empty() {
        return Ok(header + CHEAP_ALL_DAY);
    }

    let hours = |periods: &[Period]| -> Vec<String> {
        periods
            .iter()
            .filter_map(|&p| period_to_hours(points, p, settings.timezone))
            .collect()
    };

    let mut sections = vec![format!(
        "{}, {} öre/kWh (ca {} kr för en dusch)",
        price_description(mean),
        whole(mean),
        whole(shower_cost(mean, settings.overhead) / 100.0)
    )];
    if !peaks.is_empty() {
        sections.push(format!("🚫 Undvik klockan {}", human_list(&hours(peaks))));
    }
    if !lows.is_empty() {
        sections.push(format!("✅ Föredra klockan {}", human_list(&hours(lows))));
    }

    Ok(header + &sections.join("\n\n") + "\n")
}

/// Convert, detect high and low periods, and compose the day message.
pub fn day_message(points: &[PricePoint], settings: &ReportSettings) -> Result<String, SpotprisError> {
    let prices = convert_prices(points, settings.eur_rate);
    let peaks = detect_peak_periods(&prices, settings.window);
    let lows = detect_low_periods(&prices, settings.window);
    tracing::info!(
        points = points.len(),
        peaks = peaks.len(),
        lows = lows.len(),
        "composed day report"
    );
    format_message(points, &peaks, &lows, settings)
}

/// Round half away from zero to a whole number.
///
/// A mean in (-0.5, 0) prints as "0", never "-0".
fn whole(value: f64) -> String {
    format!("{:.0}", value.round() + 0.0)
}
