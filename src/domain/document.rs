//! Day-ahead price document parsing.
//!
//! Reads the publication market document (XML) served by the transparency
//! platform and turns it into [`RawPricePoint`]s. Only the first time series
//! period is considered; one document covers one bidding zone and one day.
//!
//! Sources omit trailing points that repeat the previous price, so a point's
//! end is taken from the next point's position, or from the period end for the
//! last point. Callers must not assume one point per resolution slot.

use crate::domain::error::SpotprisError;
use crate::domain::price_point::{IntervalMinutes, RawPricePoint};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use roxmltree::Node;

/// One `<Point>` as declared in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPoint {
    /// 1-based slot position within the period.
    pub position: u32,
    pub price: f64,
}

/// The parts of a price document the engine depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDocument {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub resolution: String,
    pub points: Vec<DocumentPoint>,
}

impl PriceDocument {
    pub fn parse(xml: &str) -> Result<Self, SpotprisError> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| malformed(format!("invalid XML: {e}")))?;
        let root = doc.root_element();

        if root.tag_name().name() == "Acknowledgement_MarketDocument" {
            let reason = descendant(root, "Reason")
                .and_then(|r| child_text(r, "text"))
                .unwrap_or("no reason given");
            return Err(malformed(format!("document was rejected: {reason}")));
        }

        let time_interval = descendant(root, "timeInterval")
            .ok_or_else(|| malformed("could not find timeInterval element".into()))?;
        let start = required_timestamp(time_interval, "start")?;
        let end = required_timestamp(time_interval, "end")?;
        if end <= start {
            return Err(malformed(format!(
                "timeInterval end {end} is not after start {start}"
            )));
        }

        let resolutions: Vec<Node> = root
            .descendants()
            .filter(|n| n.has_tag_name("resolution"))
            .collect();
        let resolution = match resolutions.as_slice() {
            [only] => only.text().unwrap_or_default().trim().to_string(),
            other => {
                return Err(malformed(format!(
                    "ambiguous or missing <resolution>, found {}, expected exactly 1",
                    other.len()
                )));
            }
        };

        let scope = time_interval.parent_element().unwrap_or(root);
        let points = scope
            .children()
            .filter(|n| n.has_tag_name("Point"))
            .map(parse_point)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            %start,
            %end,
            resolution = %resolution,
            points = points.len(),
            "parsed price document"
        );

        Ok(Self {
            start,
            end,
            resolution,
            points,
        })
    }

    /// The declared resolution as a slot length.
    pub fn interval_minutes(&self) -> Result<IntervalMinutes, SpotprisError> {
        IntervalMinutes::parse_resolution(&self.resolution)
    }

    /// Build raw price points, inferring each point's end from its successor.
    pub fn raw_price_points(&self) -> Result<Vec<RawPricePoint>, SpotprisError> {
        let minutes = self.interval_minutes()?;
        let slot_start = |position: u32| {
            i64::from(minutes.get())
                .checked_mul(i64::from(position) - 1)
                .and_then(TimeDelta::try_minutes)
                .and_then(|offset| self.start.checked_add_signed(offset))
                .ok_or_else(|| {
                    malformed(format!(
                        "point at position {position} with resolution {minutes} is out of range"
                    ))
                })
        };

        let mut raw = Vec::with_capacity(self.points.len());
        for (i, point) in self.points.iter().enumerate() {
            let start = slot_start(point.position)?;
            let end = match self.points.get(i + 1) {
                Some(next) => {
                    if next.position <= point.position {
                        return Err(malformed(format!(
                            "point positions out of order: {} follows {}",
                            next.position, point.position
                        )));
                    }
                    slot_start(next.position)?
                }
                None => self.end,
            };
            if end <= start {
                return Err(malformed(format!(
                    "point at position {} starts at {start}, past the period end {end}",
                    point.position
                )));
            }
            raw.push(RawPricePoint {
                start,
                end,
                price: point.price,
            });
        }
        Ok(raw)
    }
}

/// Parse a document and produce its raw price points in one step.
pub fn parse_price_points(xml: &str) -> Result<Vec<RawPricePoint>, SpotprisError> {
    PriceDocument::parse(xml)?.raw_price_points()
}

/// Parse a timestamp as written in price documents.
///
/// The platform writes minute precision (`2025-12-27T23:00Z`), which RFC 3339
/// does not allow, so that form is tried after RFC 3339.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn malformed(reason: String) -> SpotprisError {
    SpotprisError::MalformedDocument { reason }
}

fn descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| n.has_tag_name(name))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
        .map(str::trim)
}

fn required_timestamp(time_interval: Node, name: &str) -> Result<DateTime<Utc>, SpotprisError> {
    let text = child_text(time_interval, name)
        .ok_or_else(|| malformed(format!("timeInterval has no <{name}>")))?;
    parse_timestamp(text).ok_or_else(|| malformed(format!("invalid timeInterval {name} \"{text}\"")))
}

fn parse_point(node: Node) -> Result<DocumentPoint, SpotprisError> {
    let position_text =
        child_text(node, "position").ok_or_else(|| malformed("Point has no <position>".into()))?;
    let position = position_text
        .parse::<u32>()
        .ok()
        .filter(|&p| p >= 1)
        .ok_or_else(|| malformed(format!("invalid Point position \"{position_text}\"")))?;

    let price_text = child_text(node, "price.amount")
        .ok_or_else(|| malformed(format!("Point {position} has no <price.amount>")))?;
    let price = price_text
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| malformed(format!("invalid price \"{price_text}\" at position {position}")))?;

    Ok(DocumentPoint { position, price })
}
