use crate::config::ComparisonConfig;
use crate::engine::SimulationResult;
use crate::report::cache::RunCache;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

//every n-th step is kept for chart transport
pub const DOWNSAMPLE_STEP: usize = 5;

//one executed rebalance, as shown in trade tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDetail {
    pub date: String,
    pub price: f64,
    pub volume: f64,
    pub trade: i64,
    pub capital: f64,
    pub reason: String,
}

//per-strategy JSON payload; return metrics are fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    #[serde(rename = "return")]
    pub total_return: f64,
    pub annual_return: f64,
    pub mdd: f64,
    pub final_capital: f64,
    pub dates: Vec<String>,
    pub capitals: Vec<f64>,
    pub params: String,
    pub trades_detail: Vec<TradeDetail>,
    pub total_trades: usize,
    pub total_buy: i64,
    pub total_sell: i64,
}

impl StrategyReport {
    //report of the rebalanced target strategy
    pub fn from_target(result: &SimulationResult, params: String) -> Self {
        let trades_detail = result
            .trade_indices()
            .map(|i| TradeDetail {
                date: result.dates[i].to_string(),
                price: result.prices[i].round(),
                volume: result.positions[i] as f64,
                trade: result.trades[i],
                capital: result.capitals[i].round(),
                reason: result.rationales[i].to_string(),
            })
            .collect();

        StrategyReport {
            total_return: result.performance.total_return,
            annual_return: result.performance.annual_return,
            mdd: result.performance.max_drawdown,
            final_capital: result.performance.final_capital,
            dates: downsample_dates(result),
            capitals: downsample_rounded(&result.capitals),
            params,
            trades_detail,
            total_trades: result.trade_stats.total_trades,
            total_buy: result.trade_stats.total_buy_volume,
            total_sell: result.trade_stats.total_sell_volume,
        }
    }

    //report of the static baseline: one entry trade, never adjusted
    pub fn from_static_baseline(result: &SimulationResult, params: String) -> Self {
        let entry = result.static_positions.first().copied().unwrap_or(0);
        let trades_detail = match (result.dates.first(), result.prices.first()) {
            (Some(date), Some(price)) => vec![TradeDetail {
                date: date.to_string(),
                price: price.round(),
                volume: entry as f64,
                trade: entry,
                capital: result.initial_capital.round(),
                reason: "initial entry, never adjusted (buy and hold)".to_string(),
            }],
            _ => Vec::new(),
        };

        StrategyReport {
            total_return: result.static_performance.total_return,
            annual_return: result.static_performance.annual_return,
            mdd: result.static_performance.max_drawdown,
            final_capital: result.static_performance.final_capital,
            dates: downsample_dates(result),
            capitals: downsample_rounded(&result.static_capitals),
            params,
            trades_detail,
            total_trades: 1,
            total_buy: entry.max(0),
            total_sell: 0,
        }
    }
}

fn downsample_dates(result: &SimulationResult) -> Vec<String> {
    result
        .dates
        .iter()
        .step_by(DOWNSAMPLE_STEP)
        .map(|d| d.to_string())
        .collect()
}

fn downsample_rounded(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .step_by(DOWNSAMPLE_STEP)
        .map(|v| v.round())
        .collect()
}

//three-strategy comparison payload, strategies serialized in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub success: bool,
    #[serde(flatten)]
    pub strategies: IndexMap<String, StrategyReport>,
    pub data_range: String,
}

impl ComparisonReport {
    //runs (or reuses) the three scenarios of `config`
    pub fn run(cache: &mut RunCache, config: &ComparisonConfig) -> Self {
        let results = cache.get_or_run_all(&[config.spider(), config.forever(), config.buyhold()]);
        Self::build(&results[0], &results[1], &results[2])
    }

    //spider and forever report their target strategy, buyhold its static baseline
    pub fn build(
        spider: &Arc<SimulationResult>,
        forever: &Arc<SimulationResult>,
        buyhold: &Arc<SimulationResult>,
    ) -> Self {
        let mut strategies = IndexMap::new();
        strategies.insert(
            "spider".to_string(),
            StrategyReport::from_target(spider, format!("f={}, daily rebalance", spider.leverage)),
        );
        strategies.insert(
            "forever".to_string(),
            StrategyReport::from_target(
                forever,
                format!("f={}, monthly rebalance", forever.leverage),
            ),
        );
        strategies.insert(
            "buyhold".to_string(),
            StrategyReport::from_static_baseline(
                buyhold,
                format!("initial {}x leverage", buyhold.leverage),
            ),
        );

        ComparisonReport {
            success: true,
            strategies,
            data_range: spider.date_range(),
        }
    }
}

//structured failure for callers of the JSON surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub success: bool,
    pub error: String,
}

impl ErrorReport {
    pub fn from_error(err: &anyhow::Error) -> Self {
        ErrorReport {
            success: false,
            error: format!("{:#}", err),
        }
    }
}
