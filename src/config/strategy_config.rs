use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown rebalance cadence: {0} (expected daily, weekly or monthly)")]
    UnknownCadence(String),
    #[error("Unknown instrument mode: {0} (expected cash or contract)")]
    UnknownMode(String),
}

//how often the target strategy re-sizes its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceCadence {
    Daily,
    Weekly,
    Monthly,
}

impl RebalanceCadence {
    //parse cadence from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "bar" | "per-bar" => Ok(RebalanceCadence::Daily),
            "weekly" | "week" => Ok(RebalanceCadence::Weekly),
            "monthly" | "month" => Ok(RebalanceCadence::Monthly),
            _ => Err(ConfigError::UnknownCadence(s.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RebalanceCadence::Daily => "daily",
            RebalanceCadence::Weekly => "weekly",
            RebalanceCadence::Monthly => "monthly",
        }
    }
}

//cash/unit instruments versus leveraged contracts with a point multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InstrumentMode {
    Cash,
    Contract { multiplier: f64 },
}

impl InstrumentMode {
    //currency value of a one point move for one unit
    pub fn multiplier(&self) -> f64 {
        match self {
            InstrumentMode::Cash => 1.0,
            InstrumentMode::Contract { multiplier } => *multiplier,
        }
    }

    pub fn is_contract(&self) -> bool {
        matches!(self, InstrumentMode::Contract { .. })
    }
}

//trading cost schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeeSchedule {
    //fee on traded value, tax on sells only
    Proportional { fee_rate: f64, tax_rate: f64 },
    PerContract { fee: f64 },
}

impl FeeSchedule {
    //cost of trading `quantity` units (signed, negative = sell) at `price`
    pub fn cost(&self, quantity: i64, price: f64, multiplier: f64) -> f64 {
        match self {
            FeeSchedule::PerContract { fee } => quantity.unsigned_abs() as f64 * fee,
            FeeSchedule::Proportional { fee_rate, tax_rate } => {
                let traded_value = (quantity as f64 * price * multiplier).abs();
                let mut cost = traded_value * fee_rate;
                if quantity < 0 {
                    cost += traded_value * tax_rate;
                }
                cost
            }
        }
    }

    pub fn free() -> Self {
        FeeSchedule::Proportional {
            fee_rate: 0.0,
            tax_rate: 0.0,
        }
    }
}

//configuration of a single simulation run, immutable once the engine holds it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    //target notional / capital
    pub leverage: f64,
    pub initial_capital: f64,
    pub cadence: RebalanceCadence,
    pub instrument: InstrumentMode,
    pub fees: FeeSchedule,
    //annualized carry (backwardation) yield, only accrued in contract mode
    #[serde(default)]
    pub carry_rate: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            leverage: 0.5,
            initial_capital: 1_000_000.0,
            cadence: RebalanceCadence::Daily,
            instrument: InstrumentMode::Cash,
            fees: FeeSchedule::Proportional {
                fee_rate: 0.001425,
                tax_rate: 0.003,
            },
            carry_rate: 0.0,
        }
    }
}

impl StrategyConfig {
    //cash mode with proportional fee and sell-side tax
    pub fn cash(
        leverage: f64,
        initial_capital: f64,
        cadence: RebalanceCadence,
        fee_rate: f64,
        tax_rate: f64,
    ) -> Self {
        StrategyConfig {
            leverage,
            initial_capital,
            cadence,
            instrument: InstrumentMode::Cash,
            fees: FeeSchedule::Proportional { fee_rate, tax_rate },
            carry_rate: 0.0,
        }
    }

    //contract mode with a fixed fee per contract
    pub fn contract(
        leverage: f64,
        initial_capital: f64,
        cadence: RebalanceCadence,
        multiplier: f64,
        fee_per_contract: f64,
        carry_rate: f64,
    ) -> Self {
        StrategyConfig {
            leverage,
            initial_capital,
            cadence,
            instrument: InstrumentMode::Contract { multiplier },
            fees: FeeSchedule::PerContract {
                fee: fee_per_contract,
            },
            carry_rate,
        }
    }

    pub fn with_leverage(&self, leverage: f64) -> Self {
        StrategyConfig {
            leverage,
            ..self.clone()
        }
    }

    //short description used in reports, eg "f=0.5, daily rebalance"
    pub fn describe(&self) -> String {
        format!("f={}, {} rebalance", self.leverage, self.cadence.label())
    }

    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: StrategyConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

//the three-way contract-mode comparison served to dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub initial_capital: f64,
    pub carry_rate: f64,
    pub spider_leverage: f64,
    pub forever_leverage: f64,
    pub buyhold_leverage: f64,
    pub multiplier: f64,
    pub fee_per_contract: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            initial_capital: 1_000_000.0,
            carry_rate: 0.04,
            spider_leverage: 0.5,
            forever_leverage: 3.0,
            buyhold_leverage: 3.0,
            multiplier: 10.0,
            fee_per_contract: 22.0,
        }
    }
}

impl ComparisonConfig {
    fn scenario(&self, leverage: f64, cadence: RebalanceCadence) -> StrategyConfig {
        StrategyConfig::contract(
            leverage,
            self.initial_capital,
            cadence,
            self.multiplier,
            self.fee_per_contract,
            self.carry_rate,
        )
    }

    //daily rebalanced spider web
    pub fn spider(&self) -> StrategyConfig {
        self.scenario(self.spider_leverage, RebalanceCadence::Daily)
    }

    //always-long, re-levered monthly
    pub fn forever(&self) -> StrategyConfig {
        self.scenario(self.forever_leverage, RebalanceCadence::Monthly)
    }

    //run whose static baseline is reported as buy-and-hold
    pub fn buyhold(&self) -> StrategyConfig {
        self.scenario(self.buyhold_leverage, RebalanceCadence::Daily)
    }
}
