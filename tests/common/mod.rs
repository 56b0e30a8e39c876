#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use spotpris::domain::price_point::{PricePoint, RawPricePoint};
use std::path::PathBuf;

pub const FIXTURE: &str = "day_ahead_se3_2025-12-28.xml";
pub const FIXTURE_RATE: f64 = 11.03;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Hourly points starting at `start`, one per price.
pub fn hourly(start: DateTime<Utc>, prices: &[f64]) -> Vec<PricePoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            start: start + Duration::hours(i as i64),
            end: start + Duration::hours(i as i64 + 1),
            price,
        })
        .collect()
}

/// Back-to-back raw points with the given lengths in minutes.
pub fn raw_run(start: DateTime<Utc>, spans: &[(i64, f64)]) -> Vec<RawPricePoint> {
    let mut cursor = start;
    spans
        .iter()
        .map(|&(minutes, price)| {
            let point = RawPricePoint {
                start: cursor,
                end: cursor + Duration::minutes(minutes),
                price,
            };
            cursor = point.end;
            point
        })
        .collect()
}

/// A minimal document with the given resolution and `(position, price)` points.
pub fn document_xml(start: &str, end: &str, resolution: &str, points: &[(u32, f64)]) -> String {
    let points: String = points
        .iter()
        .map(|(position, price)| {
            format!(
                "<Point><position>{position}</position><price.amount>{price}</price.amount></Point>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Publication_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-3:publicationdocument:7:3">
  <TimeSeries>
    <Period>
      <timeInterval><start>{start}</start><end>{end}</end></timeInterval>
      <resolution>{resolution}</resolution>
      {points}
    </Period>
  </TimeSeries>
</Publication_MarketDocument>"#
    )
}
