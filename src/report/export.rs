use crate::engine::AnalysisResult;
use crate::metrics::{EquitySeries, PointKind};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct EquityRow<'a> {
    timestamp: String,
    label: &'a str,
    kind: &'static str,
    equity_usd: f64,
    equity_pct: f64,
}

//writes the equity curve as csv: timestamp,label,kind,equity_usd,equity_pct
pub fn write_equity_csv<P: AsRef<Path>>(path: P, series: &EquitySeries) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    for point in series.points() {
        writer.serialize(EquityRow {
            timestamp: point.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            label: &point.label,
            kind: match point.kind {
                PointKind::Funding => "funding",
                PointKind::Trade => "trade",
            },
            equity_usd: point.equity_usd,
            equity_pct: point.equity_pct,
        })?;
    }

    writer.flush()?;
    Ok(())
}

//writes the full analysis result as pretty json
pub fn write_result_json<P: AsRef<Path>>(path: P, result: &AnalysisResult) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
