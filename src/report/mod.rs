pub mod export;
pub mod format;

pub use export::{write_equity_csv, write_result_json};
pub use format::{format_signed_pct, format_signed_usd, format_usd};
