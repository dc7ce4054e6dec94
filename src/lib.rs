//a Rust-based fixed-leverage ("spider web") rebalancing backtester

pub mod config;
pub mod data;
pub mod engine;
pub mod logging;
pub mod metrics;
pub mod report;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        ComparisonConfig, ConfigError, FeeSchedule, InstrumentMode, RebalanceCadence,
        StrategyConfig,
    };
    pub use crate::data::{load_csv, DataError, PricePoint, PriceSeries};
    pub use crate::engine::{
        is_rebalance_due, position_size, SimulationResult, SimulationState, SpiderWebEngine,
        TradeRationale,
    };
    pub use crate::metrics::{PerformanceMetrics, SummaryMetrics, TradeStats};
    pub use crate::report::{
        save_json, save_steps_csv, ComparisonReport, ErrorReport, LeverageSweep, RunCache,
        StrategyReport, TradeDetail,
    };
}
