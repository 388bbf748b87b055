pub mod aggregator;
pub mod classifier;

pub use aggregator::{analyze, AnalysisResult, EquityAggregator};
pub use classifier::{classify, RecordKind};
