// =============================================================================
// Shared types used across the indicator service
// =============================================================================
//
// A price series is an ordered `Vec<PricePoint>`.  Timestamps live on a
// numeric axis (seconds) so that fixed label offsets such as the Ichimoku
// Chikou shift stay meaningful after serialisation.
// =============================================================================

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Seconds on the chart's x-axis.
pub type Timestamp = i64;

/// One sampled close price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub time: Timestamp,
    pub value: f64,
}

impl PricePoint {
    pub fn new(time: Timestamp, value: f64) -> Self {
        Self { time, value }
    }
}

/// Sort a series ascending by time.  The sort is stable so points sharing a
/// timestamp keep their provider order.
pub fn sort_series(series: &mut [PricePoint]) {
    series.sort_by_key(|p| p.time);
}

/// Highest and lowest value of a series, or `None` when it is empty.
pub fn value_range(series: &[PricePoint]) -> Option<(f64, f64)> {
    let first = series.first()?.value;
    let range = series.iter().fold((first, first), |(hi, lo), p| {
        (hi.max(p.value), lo.min(p.value))
    });
    Some(range)
}

// =============================================================================
// Timestamp decoding
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Fractional(f64),
    Text(String),
}

/// Accept Unix seconds, `YYYY-MM-DD` dates (UTC midnight) or RFC 3339 strings.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Seconds(secs) => Ok(secs),
        RawTimestamp::Fractional(secs) if secs.is_finite() => Ok(secs as i64),
        RawTimestamp::Fractional(secs) => Err(serde::de::Error::custom(format!(
            "non-finite timestamp {secs}"
        ))),
        RawTimestamp::Text(text) => parse_timestamp(&text).map_err(serde::de::Error::custom),
    }
}

/// Parse a textual timestamp into Unix seconds.
pub fn parse_timestamp(text: &str) -> Result<Timestamp, String> {
    let text = text.trim();
    if let Ok(secs) = text.parse::<i64>() {
        return Ok(secs);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.timestamp())
        .map_err(|e| format!("unrecognised timestamp {text:?}: {e}"))
}

// =============================================================================
// Interval
// =============================================================================

/// Sampling interval of a provider time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Interval {
    fn default() -> Self {
        Self::Daily
    }
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Provider path segment, e.g. `time_series_weekly`.
    pub fn path_segment(&self) -> String {
        format!("time_series_{}", self.as_str())
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("unknown interval {other:?} (expected daily, weekly or monthly)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_integer_and_date_timestamps() {
        let json = r#"[
            {"time": 1700000000, "value": 1.5},
            {"time": "2024-01-02", "value": 2.0},
            {"time": "2024-01-02T00:00:00Z", "value": 2.5}
        ]"#;
        let series: Vec<PricePoint> = serde_json::from_str(json).unwrap();
        assert_eq!(series[0].time, 1_700_000_000);
        assert_eq!(series[1].time, 1_704_153_600);
        assert_eq!(series[2].time, series[1].time);
        assert!((series[2].value - 2.5).abs() < 1e-12);
    }

    #[test]
    fn decode_rejects_garbage_time() {
        let json = r#"[{"time": "yesterday", "value": 1.0}]"#;
        assert!(serde_json::from_str::<Vec<PricePoint>>(json).is_err());
    }

    #[test]
    fn timestamps_serialise_as_integers() {
        let json = serde_json::to_string(&PricePoint::new(42, 1.0)).unwrap();
        assert_eq!(json, r#"{"time":42,"value":1.0}"#);
    }

    #[test]
    fn sort_is_stable_and_ascending() {
        let mut series = vec![
            PricePoint::new(3, 1.0),
            PricePoint::new(1, 2.0),
            PricePoint::new(3, 3.0),
            PricePoint::new(2, 4.0),
        ];
        sort_series(&mut series);
        let times: Vec<_> = series.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![1, 2, 3, 3]);
        assert_eq!(series[2].value, 1.0);
        assert_eq!(series[3].value, 3.0);
    }

    #[test]
    fn value_range_of_empty_is_none() {
        assert!(value_range(&[]).is_none());
        let series = vec![PricePoint::new(1, 5.0), PricePoint::new(2, -1.0)];
        assert_eq!(value_range(&series), Some((5.0, -1.0)));
    }

    #[test]
    fn interval_parsing_is_case_insensitive() {
        assert_eq!("WEEKLY".parse::<Interval>().unwrap(), Interval::Weekly);
        assert_eq!(" daily ".parse::<Interval>().unwrap(), Interval::Daily);
        assert!("hourly".parse::<Interval>().is_err());
        assert_eq!(Interval::Monthly.path_segment(), "time_series_monthly");
    }
}
