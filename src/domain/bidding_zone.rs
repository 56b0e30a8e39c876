//! Swedish bidding zones and delivery day selection.

use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Day-ahead results are published shortly after noon UTC; before this hour
/// the latest available day is today.
const PUBLICATION_HOUR_UTC: u32 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiddingZone {
    Se1,
    Se2,
    Se3,
    Se4,
}

impl BiddingZone {
    pub const ALL: [BiddingZone; 4] = [Self::Se1, Self::Se2, Self::Se3, Self::Se4];

    /// Energy Identification Code used as in/out domain in price documents.
    pub fn eic_code(self) -> &'static str {
        match self {
            Self::Se1 => "10Y1001A1001A44P",
            Self::Se2 => "10Y1001A1001A45N",
            Self::Se3 => "10Y1001A1001A46L",
            Self::Se4 => "10Y1001A1001A47J",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Se1 => "SE1",
            Self::Se2 => "SE2",
            Self::Se3 => "SE3",
            Self::Se4 => "SE4",
        }
    }
}

impl fmt::Display for BiddingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BiddingZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|zone| zone.name().eq_ignore_ascii_case(wanted) || zone.eic_code() == wanted)
            .ok_or_else(|| format!("unknown bidding zone \"{wanted}\" (expected SE1-SE4)"))
    }
}

/// The delivery day a report should cover at `now`: today until the next
/// day's prices are published, tomorrow after that.
pub fn delivery_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let today = now.with_timezone(&tz).date_naive();
    if now.hour() < PUBLICATION_HOUR_UTC {
        today
    } else {
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Stockholm;

    #[test]
    fn parse_zone_names() {
        assert_eq!("SE3".parse::<BiddingZone>().unwrap(), BiddingZone::Se3);
        assert_eq!(" se4 ".parse::<BiddingZone>().unwrap(), BiddingZone::Se4);
        assert_eq!(
            "10Y1001A1001A44P".parse::<BiddingZone>().unwrap(),
            BiddingZone::Se1
        );
    }

    #[test]
    fn parse_unknown_zone_fails() {
        let err = "NO1".parse::<BiddingZone>().unwrap_err();
        assert!(err.contains("NO1"));
    }

    #[test]
    fn eic_codes() {
        assert_eq!(BiddingZone::Se3.eic_code(), "10Y1001A1001A46L");
        assert_eq!(BiddingZone::Se2.to_string(), "SE2");
    }

    #[test]
    fn morning_reports_today() {
        let now = Utc.with_ymd_and_hms(2025, 12, 27, 8, 30, 0).unwrap();
        assert_eq!(
            delivery_date(now, Stockholm),
            NaiveDate::from_ymd_opt(2025, 12, 27).unwrap()
        );
    }

    #[test]
    fn afternoon_reports_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 12, 27, 13, 0, 0).unwrap();
        assert_eq!(
            delivery_date(now, Stockholm),
            NaiveDate::from_ymd_opt(2025, 12, 28).unwrap()
        );
    }

    #[test]
    fn local_date_after_midnight() {
        // 23:30 UTC is already the next day in Stockholm.
        let now = Utc.with_ymd_and_hms(2025, 12, 27, 23, 30, 0).unwrap();
        assert_eq!(
            delivery_date(now, Stockholm),
            NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
        );
    }
}
