pub mod dates;
pub mod loader;
pub mod record;

pub use dates::parse_close_time;
pub use loader::{load_csv, read_records, IngestError};
pub use record::TradeRecord;
