use crate::config::CostPolicy;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

//represents a single row of a broker trade-history export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    //free text as exported, eg "Buy", "Sell", "Deposit", "Op Balance"
    pub action: String,
    pub close_time: NaiveDateTime,
    pub profit: f64,
    pub commission: f64,
    pub swap: f64,

    //1-based line in the source file (0 when built in memory)
    #[serde(default)]
    pub line: usize,
}

impl TradeRecord {
    //creates a record with zero commission and swap
    pub fn new(action: impl Into<String>, close_time: NaiveDateTime, profit: f64) -> Self {
        TradeRecord {
            action: action.into(),
            close_time,
            profit,
            commission: 0.0,
            swap: 0.0,
            line: 0,
        }
    }

    pub fn with_costs(mut self, commission: f64, swap: f64) -> Self {
        self.commission = commission;
        self.swap = swap;
        self
    }

    //net result of the row under the given cost policy
    pub fn net_pnl(&self, policy: CostPolicy) -> f64 {
        match policy {
            CostPolicy::ProfitOnly => self.profit,
            CostPolicy::IncludeCosts => self.profit + self.commission + self.swap,
        }
    }
}
