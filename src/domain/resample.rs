//! Resampling raw price points to a uniform slot length.

use crate::domain::error::SpotprisError;
use crate::domain::price_point::{IntervalMinutes, PricePoint, RawPricePoint};

/// Split every raw point into `duration / interval` equal slots carrying the
/// raw point's price.
///
/// Fails with [`SpotprisError::NonUniformInterval`] when a raw point's duration
/// is not an exact multiple of `interval`.
pub fn resample(
    points: &[RawPricePoint],
    interval: IntervalMinutes,
) -> Result<Vec<PricePoint>, SpotprisError> {
    let slot = interval.as_duration();
    let slot_seconds = slot.num_seconds();
    let mut out = Vec::with_capacity(points.len());

    for point in points {
        let seconds = point.duration().num_seconds();
        if seconds < 0 || seconds % slot_seconds != 0 {
            return Err(SpotprisError::NonUniformInterval {
                start: point.start,
                minutes: point.duration().num_minutes(),
                interval: interval.get(),
            });
        }

        let slices = seconds / slot_seconds;
        let mut start = point.start;
        for _ in 0..slices {
            let end = start + slot;
            out.push(PricePoint {
                start,
                end,
                price: point.price,
            });
            start = end;
        }
    }

    tracing::debug!(
        raw = points.len(),
        resampled = out.len(),
        %interval,
        "resampled price points"
    );
    Ok(out)
}

/// Reject a series whose length differs from what the caller requires, e.g. 96
/// quarter-hours for a regular day.
pub fn ensure_series_length(points: &[PricePoint], expected: usize) -> Result<(), SpotprisError> {
    if points.len() != expected {
        return Err(SpotprisError::UnexpectedSeriesLength {
            expected,
            actual: points.len(),
        });
    }
    Ok(())
}
