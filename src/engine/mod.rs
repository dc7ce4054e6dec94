pub mod cadence;
pub mod rationale;
pub mod result;
pub mod spider;
pub mod state;

pub use cadence::is_rebalance_due;
pub use rationale::TradeRationale;
pub use result::SimulationResult;
pub use spider::SpiderWebEngine;
pub use state::{position_size, SimulationState};
