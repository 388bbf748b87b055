use crate::config::DisplayMode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

//what produced a chart point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    Funding,
    Trade,
}

//a point in the equity curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub timestamp: NaiveDateTime,
    pub kind: PointKind,
    pub equity_usd: f64,
    pub equity_pct: f64,
}

impl ChartPoint {
    pub fn new(
        timestamp: NaiveDateTime,
        kind: PointKind,
        equity_usd: f64,
        equity_pct: f64,
    ) -> Self {
        ChartPoint {
            label: format_label(timestamp, kind),
            timestamp,
            kind,
            equity_usd,
            equity_pct,
        }
    }

    //value shown for the given display mode
    pub fn value(&self, mode: DisplayMode) -> f64 {
        match mode {
            DisplayMode::Usd => self.equity_usd,
            DisplayMode::Percent => self.equity_pct,
        }
    }
}

//chart label, eg "Jan 5, 24" or "Jan 1, 24 (Dep)"
pub fn format_label(timestamp: NaiveDateTime, kind: PointKind) -> String {
    let date = timestamp.format("%b %-d, %y");
    match kind {
        PointKind::Funding => format!("{} (Dep)", date),
        PointKind::Trade => date.to_string(),
    }
}

//append-only equity curve carrying both usd and percentage values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquitySeries {
    points: Vec<ChartPoint>,
}

impl EquitySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: ChartPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn usd(&self) -> Vec<f64> {
        self.values(DisplayMode::Usd)
    }

    pub fn pct(&self) -> Vec<f64> {
        self.values(DisplayMode::Percent)
    }

    //selects one of the two parallel series, nothing is recomputed
    pub fn values(&self, mode: DisplayMode) -> Vec<f64> {
        self.points.iter().map(|p| p.value(mode)).collect()
    }

    pub fn last(&self) -> Option<&ChartPoint> {
        self.points.last()
    }
}
