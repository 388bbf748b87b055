pub mod equity;

pub use equity::EquityState;
