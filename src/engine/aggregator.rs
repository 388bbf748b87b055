use crate::config::{AnalysisConfig, CostPolicy};
use crate::data::TradeRecord;
use crate::engine::classifier::{classify, RecordKind};
use crate::metrics::{
    ChartPoint, EquitySeries, MonthlyMatrix, PointKind, SummaryMetrics, TradeTally,
};
use crate::portfolio::EquityState;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

//result of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub series: EquitySeries,
    pub summary: SummaryMetrics,
    pub monthly: MonthlyMatrix,
}

//single-pass equity aggregator
//holds all accumulators for one run; `run` consumes it so nothing carries over
pub struct EquityAggregator {
    cost_policy: CostPolicy,
    state: EquityState,
    tally: TradeTally,
    series: EquitySeries,
    monthly: MonthlyMatrix,
    ignored_records: usize,
}

impl EquityAggregator {
    //creates an aggregator with zeroed state
    pub fn new(config: &AnalysisConfig) -> Self {
        EquityAggregator {
            cost_policy: config.cost_policy,
            state: EquityState::new(),
            tally: TradeTally::new(),
            series: EquitySeries::new(),
            monthly: MonthlyMatrix::new(),
            ignored_records: 0,
        }
    }

    //runs the aggregation over the given records
    pub fn run(mut self, records: &[TradeRecord]) -> AnalysisResult {
        //stable sort, ties keep input order
        let mut ordered: Vec<&TradeRecord> = records.iter().collect();
        ordered.sort_by(|a, b| a.close_time.cmp(&b.close_time));

        for record in ordered {
            match classify(&record.action) {
                RecordKind::Funding => self.on_funding(record),
                RecordKind::Trade => self.on_trade(record),
                RecordKind::Ignored => {
                    debug!(line = record.line, action = %record.action, "ignoring row");
                    self.ignored_records += 1;
                }
            }
        }

        self.build_result()
    }

    fn on_funding(&mut self, record: &TradeRecord) {
        //funding amounts live in the profit column
        self.state.apply_funding(record.profit);
        self.push_point(record, PointKind::Funding);
    }

    fn on_trade(&mut self, record: &TradeRecord) {
        let net_pnl = record.net_pnl(self.cost_policy);

        self.tally.record(net_pnl);

        //bucket baseline is the equity before this trade
        let date = record.close_time.date();
        self.monthly
            .record_trade(date.year(), date.month(), self.state.current_equity, net_pnl);

        self.state.apply_trade(net_pnl);
        self.push_point(record, PointKind::Trade);
    }

    fn push_point(&mut self, record: &TradeRecord, kind: PointKind) {
        self.series.push(ChartPoint::new(
            record.close_time,
            kind,
            self.state.current_equity,
            self.state.equity_pct(),
        ));
    }

    fn build_result(self) -> AnalysisResult {
        let summary = SummaryMetrics::finalize(&self.state, &self.tally, self.ignored_records);

        info!(
            points = self.series.len(),
            trades = summary.total_trades,
            ignored = summary.ignored_records,
            return_pct = summary.return_pct,
            max_drawdown_pct = summary.max_drawdown_pct,
            "analysis complete"
        );

        AnalysisResult {
            series: self.series,
            summary,
            monthly: self.monthly,
        }
    }
}

//analyzes records with a fresh aggregator
pub fn analyze(records: &[TradeRecord], config: &AnalysisConfig) -> AnalysisResult {
    EquityAggregator::new(config).run(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayMode;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sample_records() -> Vec<TradeRecord> {
        vec![
            TradeRecord::new("Deposit", at(1, 1), 10_000.0),
            TradeRecord::new("Buy", at(1, 5), 500.0),
            TradeRecord::new("Sell", at(1, 10), -200.0),
            TradeRecord::new("Buy", at(2, 1), 300.0),
        ]
    }

    #[test]
    fn worked_example() {
        let result = analyze(&sample_records(), &AnalysisConfig::default());

        assert_eq!(result.series.usd(), vec![10_000.0, 10_500.0, 10_300.0, 10_600.0]);
        assert_eq!(
            result.series.labels(),
            vec!["Jan 1, 24 (Dep)", "Jan 5, 24", "Jan 10, 24", "Feb 1, 24"]
        );

        let summary = &result.summary;
        assert_eq!(summary.net_deposits, 10_000.0);
        assert_eq!(summary.gross_profit, 800.0);
        assert_eq!(summary.gross_loss, 200.0);
        assert_eq!(summary.total_trades, 3);
        assert_eq!(summary.winning_trades, 2);
        assert!((summary.win_rate_pct - 200.0 / 3.0).abs() < 1e-9);
        assert!((summary.profit_factor - 4.0).abs() < 1e-9);
        assert!((summary.return_pct - 6.0).abs() < 1e-9);
        assert!((summary.max_drawdown_pct + 200.0 / 10_500.0 * 100.0).abs() < 1e-9);

        let january = result.monthly.get(2024, 1).unwrap();
        assert_eq!(january.profit_usd, 300.0);
        assert_eq!(january.start_equity, 10_000.0);

        let february = result.monthly.get(2024, 2).unwrap();
        assert_eq!(february.profit_usd, 300.0);
        assert_eq!(february.start_equity, 10_300.0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut shuffled = sample_records();
        shuffled.reverse();
        shuffled.swap(0, 2);

        let config = AnalysisConfig::default();
        assert_eq!(analyze(&shuffled, &config), analyze(&sample_records(), &config));
    }

    #[test]
    fn ignored_rows_leave_no_trace() {
        let mut records = sample_records();
        records.push(TradeRecord::new("Credit", at(1, 7), 5_000.0));
        records.push(TradeRecord::new("", at(1, 8), 1.0));
        records.push(TradeRecord::new("buy", at(1, 9), 1.0));

        let result = analyze(&records, &AnalysisConfig::default());
        assert_eq!(result.series.len(), 4);
        assert_eq!(result.summary.ignored_records, 3);
        assert_eq!(result.summary.final_equity, 10_600.0);
    }

    #[test]
    fn funding_after_loss_resets_reference() {
        let records = vec![
            TradeRecord::new("Deposit", at(1, 1), 1_000.0),
            TradeRecord::new("Sell", at(1, 2), -100.0),
            TradeRecord::new("Deposit", at(1, 3), 1_000.0),
            TradeRecord::new("Buy", at(1, 4), -1_000.0),
        ];
        let result = analyze(&records, &AnalysisConfig::default());

        //peak 1900 after the second deposit, then 900
        let expected = (1_900.0 - 900.0) / 1_900.0 * 100.0;
        assert!((result.summary.max_drawdown_pct + expected).abs() < 1e-9);
        assert_eq!(result.series.points()[2].kind, PointKind::Funding);
    }

    #[test]
    fn percentage_series_uses_net_deposits() {
        let result = analyze(&sample_records(), &AnalysisConfig::default());
        let pct = result.series.values(DisplayMode::Percent);
        assert_eq!(pct[0], 0.0);
        assert!((pct[3] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn trades_without_deposits_report_zero_percentages() {
        let records = vec![
            TradeRecord::new("Buy", at(3, 1), 100.0),
            TradeRecord::new("Sell", at(3, 2), -40.0),
        ];
        let result = analyze(&records, &AnalysisConfig::default());

        assert_eq!(result.summary.return_pct, 0.0);
        assert!(result.series.pct().iter().all(|&p| p == 0.0));
        assert!((result.summary.max_drawdown_pct + 40.0).abs() < 1e-9);
        assert_eq!(result.monthly.get(2024, 3).unwrap().start_equity, 0.0);
    }

    #[test]
    fn cost_policy_changes_net_pnl() {
        let records = vec![
            TradeRecord::new("Deposit", at(1, 1), 1_000.0),
            TradeRecord::new("Buy", at(1, 2), 10.0).with_costs(-4.0, -1.0),
        ];

        let default = analyze(&records, &AnalysisConfig::default());
        assert_eq!(default.summary.final_equity, 1_010.0);

        let config = AnalysisConfig {
            cost_policy: CostPolicy::IncludeCosts,
            ..AnalysisConfig::default()
        };
        let net = analyze(&records, &config);
        assert_eq!(net.summary.final_equity, 1_005.0);
        assert_eq!(net.monthly.get(2024, 1).unwrap().profit_usd, 5.0);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = analyze(&[], &AnalysisConfig::default());
        assert!(result.series.is_empty());
        assert!(result.monthly.is_empty());
        assert_eq!(result.summary.profit_factor, 0.0);
        assert_eq!(result.summary.win_rate_pct, 0.0);
    }
}
