use serde::{Deserialize, Serialize};

//running account state for one analysis pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityState {
    //deposits plus realized pnl so far
    pub current_equity: f64,

    //capital added through funding events (withdrawals reduce it)
    pub net_deposits: f64,

    //highest equity seen so far
    pub peak_equity: f64,

    //largest decline from peak, as a positive percentage
    pub max_drawdown_pct: f64,
}

impl EquityState {
    //creates a zeroed state
    pub fn new() -> Self {
        Self::default()
    }

    //applies a deposit, withdrawal or balance adjustment
    //a funding event only ever lifts the peak, it is never counted as drawdown
    pub fn apply_funding(&mut self, amount: f64) {
        self.current_equity += amount;
        self.net_deposits += amount;

        if self.current_equity > self.peak_equity {
            self.peak_equity = self.current_equity;
        }
    }

    //applies the net result of a closed trade and updates drawdown
    pub fn apply_trade(&mut self, net_pnl: f64) {
        self.current_equity += net_pnl;

        if self.current_equity > self.peak_equity {
            self.peak_equity = self.current_equity;
        } else if self.peak_equity > 0.0 {
            let drawdown = self.current_drawdown_pct();
            if drawdown > self.max_drawdown_pct {
                self.max_drawdown_pct = drawdown;
            }
        }
    }

    //decline of current equity from the peak, as a positive percentage
    pub fn current_drawdown_pct(&self) -> f64 {
        if self.peak_equity > 0.0 {
            (self.peak_equity - self.current_equity) / self.peak_equity * 100.0
        } else {
            0.0
        }
    }

    //return on deposited capital, in percent
    pub fn equity_pct(&self) -> f64 {
        if self.net_deposits > 0.0 {
            (self.current_equity - self.net_deposits) / self.net_deposits * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funding_lifts_peak_without_drawdown() {
        let mut state = EquityState::new();
        state.apply_funding(10_000.0);
        assert_eq!(state.current_equity, 10_000.0);
        assert_eq!(state.net_deposits, 10_000.0);
        assert_eq!(state.peak_equity, 10_000.0);
        assert_eq!(state.max_drawdown_pct, 0.0);
    }

    #[test]
    fn withdrawal_does_not_register_drawdown() {
        let mut state = EquityState::new();
        state.apply_funding(10_000.0);
        state.apply_funding(-4_000.0);
        assert_eq!(state.current_equity, 6_000.0);
        assert_eq!(state.peak_equity, 10_000.0);
        assert_eq!(state.max_drawdown_pct, 0.0);
    }

    #[test]
    fn drawdown_is_anchored_to_peak() {
        let mut state = EquityState::new();
        state.apply_funding(1_000.0);
        state.apply_trade(100.0);
        state.apply_trade(-220.0);
        state.apply_trade(50.0);

        assert_eq!(state.peak_equity, 1_100.0);
        assert!((state.max_drawdown_pct - 20.0).abs() < 1e-9);
        assert!((state.current_drawdown_pct() - (170.0 / 1_100.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn losses_before_any_funding_are_not_measured() {
        let mut state = EquityState::new();
        state.apply_trade(-50.0);
        assert_eq!(state.peak_equity, 0.0);
        assert_eq!(state.max_drawdown_pct, 0.0);
        assert_eq!(state.equity_pct(), 0.0);
    }

    #[test]
    fn equity_pct_tracks_return_on_deposits() {
        let mut state = EquityState::new();
        state.apply_funding(10_000.0);
        state.apply_trade(600.0);
        assert!((state.equity_pct() - 6.0).abs() < 1e-9);
    }
}
