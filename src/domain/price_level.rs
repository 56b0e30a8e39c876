//! Qualitative price levels for a day's mean price (öre/kWh).

/// Ascending upper bounds with their label. The last bound is `f64::MAX`, so
/// every finite value has a level.
pub const PRICE_LEVELS: &[(f64, &str)] = &[
    (10.0, "🥰 Extremt billigt"),
    (20.0, "😊 Mycket billigt"),
    (40.0, "🙂 Billigt"),
    (80.0, "Ok pris"),
    (120.0, "🙁 Ganska dyrt"),
    (160.0, "😟 Dyrt"),
    (200.0, "😞 Mycket dyrt"),
    (500.0, "😭 Extremt dyrt"),
    (f64::MAX, "🤯 Katastrofdyrt"),
];

/// Index of the first level whose bound is strictly greater than `value`.
///
/// Values at or above the sentinel bound map to the last level.
pub fn level_index(value: f64) -> usize {
    PRICE_LEVELS
        .iter()
        .position(|&(bound, _)| value < bound)
        .unwrap_or(PRICE_LEVELS.len() - 1)
}

pub fn price_description(value: f64) -> &'static str {
    PRICE_LEVELS[level_index(value)].1
}
