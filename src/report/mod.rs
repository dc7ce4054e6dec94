pub mod cache;
pub mod export;
pub mod response;
pub mod sweep;

pub use cache::{ConfigKey, RunCache};
pub use export::{save_json, save_steps_csv};
pub use response::{ComparisonReport, ErrorReport, StrategyReport, TradeDetail};
pub use sweep::{LeverageBehaviour, LeverageSweep, SweepRow};
