pub mod performance;
pub mod summary;

pub use performance::{
    annualized_return, drawdown_series, max_drawdown, sharpe_ratio, step_returns, total_return,
    PerformanceMetrics, TradeStats, RISK_FREE_RATE, TRADING_DAYS_PER_YEAR,
};
pub use summary::SummaryMetrics;
