use crate::config::{FeeSchedule, InstrumentMode, RebalanceCadence, StrategyConfig};
use crate::data::PriceSeries;
use crate::engine::{SimulationResult, SpiderWebEngine};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

//hashable identity of a configuration; floats are compared by bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    leverage: u64,
    initial_capital: u64,
    cadence: RebalanceCadence,
    multiplier: Option<u64>,
    fees: (u8, u64, u64),
    carry_rate: u64,
}

impl From<&StrategyConfig> for ConfigKey {
    fn from(config: &StrategyConfig) -> Self {
        let multiplier = match config.instrument {
            InstrumentMode::Cash => None,
            InstrumentMode::Contract { multiplier } => Some(multiplier.to_bits()),
        };
        let fees = match config.fees {
            FeeSchedule::Proportional { fee_rate, tax_rate } => {
                (0, fee_rate.to_bits(), tax_rate.to_bits())
            }
            FeeSchedule::PerContract { fee } => (1, fee.to_bits(), 0),
        };

        ConfigKey {
            leverage: config.leverage.to_bits(),
            initial_capital: config.initial_capital.to_bits(),
            cadence: config.cadence,
            multiplier,
            fees,
            carry_rate: config.carry_rate.to_bits(),
        }
    }
}

//results of previous runs over one price series, keyed by configuration
//owned by the presentation side, the engine itself keeps no state between runs
pub struct RunCache {
    series: Arc<PriceSeries>,
    results: HashMap<ConfigKey, Arc<SimulationResult>>,
}

impl RunCache {
    pub fn new(series: Arc<PriceSeries>) -> Self {
        RunCache {
            series,
            results: HashMap::new(),
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, config: &StrategyConfig) -> Option<Arc<SimulationResult>> {
        self.results.get(&ConfigKey::from(config)).cloned()
    }

    pub fn get_or_run(&mut self, config: &StrategyConfig) -> Arc<SimulationResult> {
        let key = ConfigKey::from(config);
        let series = &self.series;
        self.results
            .entry(key)
            .or_insert_with(|| Arc::new(SpiderWebEngine::new(config.clone()).run(series)))
            .clone()
    }

    //runs every configuration not cached yet, in parallel, and returns results in input order
    pub fn get_or_run_all(&mut self, configs: &[StrategyConfig]) -> Vec<Arc<SimulationResult>> {
        let mut missing: IndexMap<ConfigKey, &StrategyConfig> = IndexMap::new();
        for config in configs {
            let key = ConfigKey::from(config);
            if !self.results.contains_key(&key) {
                missing.entry(key).or_insert(config);
            }
        }

        debug!(
            requested = configs.len(),
            cached = configs.len() - missing.len(),
            "running uncached scenarios"
        );

        let series = &self.series;
        let fresh: Vec<(ConfigKey, Arc<SimulationResult>)> = missing
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(key, config)| {
                let result = SpiderWebEngine::new(config.clone()).run(series);
                (key, Arc::new(result))
            })
            .collect();

        self.results.extend(fresh);

        configs
            .iter()
            .map(|config| self.results[&ConfigKey::from(config)].clone())
            .collect()
    }
}
