pub mod strategy_config;

pub use strategy_config::{
    ComparisonConfig, ConfigError, FeeSchedule, InstrumentMode, RebalanceCadence, StrategyConfig,
};
