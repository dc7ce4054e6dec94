use crate::engine::rationale::TradeRationale;
use crate::metrics::{PerformanceMetrics, TradeStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//output of one simulation run; every per-step vector has one entry per price point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub initial_capital: f64,
    pub leverage: f64,

    //target strategy
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub capitals: Vec<f64>,
    pub positions: Vec<i64>,
    pub trades: Vec<i64>, //signed: positive = buy
    pub costs: Vec<f64>,
    pub carry: Vec<f64>,
    pub rationales: Vec<TradeRationale>,

    //monthly re-levered baseline (frictionless)
    pub monthly_capitals: Vec<f64>,
    pub monthly_positions: Vec<i64>,

    //buy and hold baseline, position frozen after entry
    pub static_capitals: Vec<f64>,
    pub static_positions: Vec<i64>,

    pub performance: PerformanceMetrics,
    pub monthly_performance: PerformanceMetrics,
    pub static_performance: PerformanceMetrics,
    pub trade_stats: TradeStats,
    pub total_cost: f64,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn final_capital(&self) -> f64 {
        self.performance.final_capital
    }

    //"first ~ last" date span
    pub fn date_range(&self) -> String {
        match (self.dates.first(), self.dates.last()) {
            (Some(first), Some(last)) => format!("{} ~ {}", first, last),
            _ => String::new(),
        }
    }

    //indices of steps where the target strategy traded
    pub fn trade_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.trades
            .iter()
            .enumerate()
            .filter(|(_, bs)| **bs != 0)
            .map(|(i, _)| i)
    }
}
