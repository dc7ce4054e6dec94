use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const RISK_FREE_RATE: f64 = 0.02;

//aggregate performance of one capital trajectory
//all values are fractions (0.05 = 5%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub annual_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub final_capital: f64,
}

impl PerformanceMetrics {
    pub fn from_capitals(capitals: &[f64], initial_capital: f64) -> Self {
        let final_capital = capitals.last().copied().unwrap_or(initial_capital);
        let total = total_return(final_capital, initial_capital);

        PerformanceMetrics {
            total_return: total,
            annual_return: annualized_return(total, capitals.len()),
            max_drawdown: max_drawdown(capitals),
            sharpe_ratio: sharpe_ratio(&step_returns(capitals)),
            final_capital,
        }
    }
}

pub fn total_return(final_capital: f64, initial_capital: f64) -> f64 {
    (final_capital - initial_capital) / initial_capital
}

//compounds over steps / 252 years; zero when there is no time span
pub fn annualized_return(total_return: f64, steps: usize) -> f64 {
    let years = steps as f64 / TRADING_DAYS_PER_YEAR;
    if years <= 0.0 {
        return 0.0;
    }
    (1.0 + total_return).powf(1.0 / years) - 1.0
}

//(running peak - capital) / running peak, peak includes the current step
pub fn drawdown_series(capitals: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;

    capitals
        .iter()
        .map(|&capital| {
            if capital > peak {
                peak = capital;
            }
            if peak > 0.0 {
                (peak - capital) / peak
            } else {
                0.0
            }
        })
        .collect()
}

pub fn max_drawdown(capitals: &[f64]) -> f64 {
    drawdown_series(capitals).into_iter().fold(0.0, f64::max)
}

//simple per-step returns dC / C_prev
pub fn step_returns(capitals: &[f64]) -> Vec<f64> {
    capitals
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

//annualized excess mean over annualized volatility
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.population_std_dev();

    if !std_dev.is_finite() || std_dev == 0.0 {
        return 0.0;
    }

    (mean * TRADING_DAYS_PER_YEAR - RISK_FREE_RATE) / (std_dev * TRADING_DAYS_PER_YEAR.sqrt())
}

//counts and volumes of the signed per-step trade sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub total_buy_volume: i64,
    pub total_sell_volume: i64,
}

impl TradeStats {
    //at most one trade per step, so a nonzero step is one trade
    pub fn from_trades(trades: &[i64]) -> Self {
        trades.iter().fold(TradeStats::default(), |mut stats, &bs| {
            if bs != 0 {
                stats.total_trades += 1;
            }
            if bs > 0 {
                stats.total_buy_volume += bs;
            } else {
                stats.total_sell_volume += -bs;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawdown_is_zero_on_new_peak() {
        let dd = drawdown_series(&[100.0, 120.0, 90.0, 130.0]);
        assert_eq!(dd[1], 0.0);
        assert!((dd[2] - 0.25).abs() < 1e-12);
        assert_eq!(dd[3], 0.0);
        assert!((max_drawdown(&[100.0, 120.0, 90.0, 130.0]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_zero_for_flat_capital() {
        let returns = step_returns(&[100.0, 100.0, 100.0]);
        assert_eq!(sharpe_ratio(&returns), 0.0);
        assert_eq!(sharpe_ratio(&[]), 0.0);
    }

    #[test]
    fn test_annualized_return_full_year() {
        let annual = annualized_return(0.1, 252);
        assert!((annual - 0.1).abs() < 1e-12);
        assert_eq!(annualized_return(0.1, 0), 0.0);
    }

    #[test]
    fn test_trade_stats() {
        let stats = TradeStats::from_trades(&[10, 0, 3, -4, 0, -1]);
        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.total_buy_volume, 13);
        assert_eq!(stats.total_sell_volume, 5);
    }
}
