//! High/low price period detection.
//!
//! The series is smoothed with a trailing rolling mean, then every sample whose
//! smoothed value exceeds `min + max(0.8 * mean, 2 * stddev)` of the smoothed
//! series is active. Maximal runs of active samples form periods. Low periods
//! are the high periods of the negated series.

pub const DEFAULT_WINDOW: usize = 4;

const MEAN_FACTOR: f64 = 0.8;
const STDDEV_FACTOR: f64 = 2.0;

/// Inclusive, 0-based index range into the detected series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: usize,
    pub end: usize,
}

impl Period {
    pub fn sample_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Summary statistics of a smoothed series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl SeriesStats {
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let average = mean(values);
        let squared: Vec<f64> = values
            .iter()
            .map(|v| {
                let diff = v - average;
                diff * diff
            })
            .collect();
        let variance = mean(&squared);
        Some(Self {
            min,
            mean: average,
            std_dev: variance.sqrt(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.min + (MEAN_FACTOR * self.mean).max(STDDEV_FACTOR * self.std_dev)
    }
}

/// Trailing mean over at most `window` samples; the first `window - 1`
/// entries average over the samples seen so far.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.clamp(1, values.len().max(1));
    (0..values.len())
        .map(|i| mean(&values[(i + 1).saturating_sub(window)..=i]))
        .collect()
}

/// Incremental mean; a constant slice yields exactly that constant.
fn mean(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |acc, (k, &v)| acc + (v - acc) / (k + 1) as f64)
}

enum ScanState {
    Idle,
    InPeriod(Period),
}

/// Find maximal runs where the smoothed series is above its threshold.
///
/// Periods are ordered by start and never overlap or touch.
pub fn detect_peak_periods(values: &[f64], window: usize) -> Vec<Period> {
    let smoothed = rolling_mean(values, window);
    let Some(stats) = SeriesStats::compute(&smoothed) else {
        return Vec::new();
    };
    let threshold = stats.threshold();

    let mut periods = Vec::new();
    let mut state = ScanState::Idle;

    for (i, &value) in smoothed.iter().enumerate() {
        let active = value > threshold;
        state = match (state, active) {
            (ScanState::Idle, false) => ScanState::Idle,
            (ScanState::Idle, true) => ScanState::InPeriod(Period { start: i, end: i }),
            (ScanState::InPeriod(period), true) => ScanState::InPeriod(Period { end: i, ..period }),
            (ScanState::InPeriod(period), false) => {
                periods.push(period);
                ScanState::Idle
            }
        };
    }
    if let ScanState::InPeriod(period) = state {
        periods.push(period);
    }

    tracing::trace!(
        samples = values.len(),
        threshold,
        periods = periods.len(),
        "detected periods"
    );
    periods
}

/// Low periods: the peak periods of the negated series.
pub fn detect_low_periods(values: &[f64], window: usize) -> Vec<Period> {
    let negated: Vec<f64> = values.iter().map(|v| -v).collect();
    detect_peak_periods(&negated, window)
}
