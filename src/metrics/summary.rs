use crate::config::DisplayMode;
use crate::portfolio::EquityState;
use crate::report::format::{format_signed_pct, format_signed_usd, format_usd};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//profit factor reported when there are winners but no losers
//display convention for "infinite", not a real ratio
pub const PROFIT_FACTOR_CAP: f64 = 99.99;

//win/loss accumulators over executed trades
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeTally {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
}

impl TradeTally {
    pub fn new() -> Self {
        Self::default()
    }

    //records one trade result, break-even trades count as losses
    pub fn record(&mut self, net_pnl: f64) {
        if net_pnl > 0.0 {
            self.gross_profit += net_pnl;
            self.winning_trades += 1;
        } else {
            self.gross_loss += net_pnl.abs();
        }
        self.total_trades += 1;
    }

    pub fn win_rate_pct(&self) -> f64 {
        if self.total_trades > 0 {
            self.winning_trades as f64 / self.total_trades as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn profit_factor(&self) -> f64 {
        if self.gross_loss > 0.0 {
            self.gross_profit / self.gross_loss
        } else if self.gross_profit > 0.0 {
            PROFIT_FACTOR_CAP
        } else {
            0.0
        }
    }
}

//summary metrics for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub return_pct: f64,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    //non-positive, drawdown is a loss from peak
    pub max_drawdown_pct: f64,

    pub total_trades: usize,
    pub winning_trades: usize,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub net_deposits: f64,
    pub final_equity: f64,
    pub ignored_records: usize,
}

impl SummaryMetrics {
    //finalizes metrics once the pass is complete
    pub fn finalize(state: &EquityState, tally: &TradeTally, ignored_records: usize) -> Self {
        let max_drawdown_pct = if state.max_drawdown_pct > 0.0 {
            -state.max_drawdown_pct
        } else {
            0.0
        };

        SummaryMetrics {
            return_pct: state.equity_pct(),
            win_rate_pct: tally.win_rate_pct(),
            profit_factor: tally.profit_factor(),
            max_drawdown_pct,
            total_trades: tally.total_trades,
            winning_trades: tally.winning_trades,
            gross_profit: tally.gross_profit,
            gross_loss: tally.gross_loss,
            net_deposits: state.net_deposits,
            final_equity: state.current_equity,
            ignored_records,
        }
    }

    pub fn losing_trades(&self) -> usize {
        self.total_trades - self.winning_trades
    }

    //total pnl on top of deposited capital
    pub fn net_profit(&self) -> f64 {
        self.final_equity - self.net_deposits
    }

    //builds the metric table, headline figures follow the display mode
    pub fn to_table(&self, mode: DisplayMode) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        let total_return = match mode {
            DisplayMode::Usd => format_signed_usd(self.net_profit()),
            DisplayMode::Percent => format_signed_pct(self.return_pct),
        };
        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&total_return),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&format!("{:.2}%", self.win_rate_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Profit Factor"),
            Cell::new(&format!("{:.2}", self.profit_factor)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.max_drawdown_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Trades (W/L)"),
            Cell::new(&format!(
                "{} ({}/{})",
                self.total_trades,
                self.winning_trades,
                self.losing_trades()
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Net Deposits"),
            Cell::new(&format_usd(self.net_deposits)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Equity"),
            Cell::new(&format_usd(self.final_equity)),
        ]));

        table
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self, mode: DisplayMode) {
        self.to_table(mode).printstd();
    }
}
