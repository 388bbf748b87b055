//a Rust-based equity curve and performance analyzer for broker trade-history exports

pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod portfolio;
pub mod report;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AnalysisConfig, CostPolicy, DatePolicy, DisplayMode};
    pub use crate::data::{load_csv, read_records, IngestError, TradeRecord};
    pub use crate::engine::{analyze, classify, AnalysisResult, EquityAggregator, RecordKind};
    pub use crate::metrics::{
        ChartPoint, EquitySeries, MonthBucket, MonthlyMatrix, PointKind, SummaryMetrics,
        TradeTally, YearTotal, PROFIT_FACTOR_CAP,
    };
    pub use crate::portfolio::EquityState;
    pub use crate::report::{write_equity_csv, write_result_json};
}
