pub mod monthly;
pub mod summary;
pub mod timeseries;

pub use monthly::{MonthBucket, MonthlyMatrix, YearTotal};
pub use summary::{SummaryMetrics, TradeTally, PROFIT_FACTOR_CAP};
pub use timeseries::{format_label, ChartPoint, EquitySeries, PointKind};
