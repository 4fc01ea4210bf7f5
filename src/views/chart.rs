// =============================================================================
// Chart Series — the data contract handed to the chart renderer
// =============================================================================
//
// A view produces an ordered list of named series.  Each series says which
// pane it belongs to (the price chart or a separate indicator chart), how it
// is drawn, and carries `{time, value, color?}` points.  Per-point colour is
// only set where it encodes meaning (gap sign, oscillator sign).
// =============================================================================

use serde::Serialize;

use crate::types::{PricePoint, Timestamp};

pub const POSITIVE_COLOR: &str = "green";
pub const NEGATIVE_COLOR: &str = "red";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    Price,
    Indicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Histogram,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: Timestamp,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

impl From<&PricePoint> for ChartPoint {
    fn from(p: &PricePoint) -> Self {
        Self {
            time: p.time,
            value: p.value,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub pane: Pane,
    pub kind: SeriesKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, pane: Pane, kind: SeriesKind, series: &[PricePoint]) -> Self {
        Self {
            name: name.into(),
            pane,
            kind,
            points: series.iter().map(ChartPoint::from).collect(),
        }
    }

    pub fn line(name: impl Into<String>, pane: Pane, series: &[PricePoint]) -> Self {
        Self::new(name, pane, SeriesKind::Line, series)
    }

    pub fn histogram(name: impl Into<String>, pane: Pane, series: &[PricePoint]) -> Self {
        Self::new(name, pane, SeriesKind::Histogram, series)
    }

    pub fn area(name: impl Into<String>, pane: Pane, series: &[PricePoint]) -> Self {
        Self::new(name, pane, SeriesKind::Area, series)
    }

    /// Colour every point green or red depending on `is_positive(value)`.
    pub fn colored_by_sign(mut self, is_positive: impl Fn(f64) -> bool) -> Self {
        for point in &mut self.points {
            point.color = Some(if is_positive(point.value) {
                POSITIVE_COLOR
            } else {
                NEGATIVE_COLOR
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
