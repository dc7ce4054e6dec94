use chrono::NaiveDate;
use crate::config::StrategyConfig;
use crate::data::{PricePoint, PriceSeries};
use crate::engine::cadence::{is_new_month, is_rebalance_due};
use crate::engine::rationale::TradeRationale;
use crate::engine::result::SimulationResult;
use crate::engine::state::{position_size, SimulationState};
use crate::metrics::{PerformanceMetrics, TradeStats, TRADING_DAYS_PER_YEAR};
use tracing::{debug, trace};

//fixed-leverage rebalancing engine
//tracks the target strategy, a monthly re-levered baseline and a static baseline in lockstep
#[derive(Debug, Clone)]
pub struct SpiderWebEngine {
    config: StrategyConfig,
    carry_per_step: f64,
}

//per-step columns collected while the loop runs
struct Recorder {
    initial_capital: f64,
    leverage: f64,
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
    capitals: Vec<f64>,
    positions: Vec<i64>,
    trades: Vec<i64>,
    costs: Vec<f64>,
    carry: Vec<f64>,
    rationales: Vec<TradeRationale>,
    monthly_capitals: Vec<f64>,
    monthly_positions: Vec<i64>,
    static_capitals: Vec<f64>,
    static_positions: Vec<i64>,
}

impl Recorder {
    fn with_capacity(config: &StrategyConfig, n: usize) -> Self {
        Recorder {
            initial_capital: config.initial_capital,
            leverage: config.leverage,
            dates: Vec::with_capacity(n),
            prices: Vec::with_capacity(n),
            capitals: Vec::with_capacity(n),
            positions: Vec::with_capacity(n),
            trades: Vec::with_capacity(n),
            costs: Vec::with_capacity(n),
            carry: Vec::with_capacity(n),
            rationales: Vec::with_capacity(n),
            monthly_capitals: Vec::with_capacity(n),
            monthly_positions: Vec::with_capacity(n),
            static_capitals: Vec::with_capacity(n),
            static_positions: Vec::with_capacity(n),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        point: &PricePoint,
        target: &SimulationState,
        trade: i64,
        cost: f64,
        carry: f64,
        rationale: TradeRationale,
        monthly: &SimulationState,
        fixed: &SimulationState,
    ) {
        self.dates.push(point.date);
        self.prices.push(point.close);
        self.capitals.push(target.capital);
        self.positions.push(target.position);
        self.trades.push(trade);
        self.costs.push(cost);
        self.carry.push(carry);
        self.rationales.push(rationale);
        self.monthly_capitals.push(monthly.capital);
        self.monthly_positions.push(monthly.position);
        self.static_capitals.push(fixed.capital);
        self.static_positions.push(fixed.position);
    }

    //metrics are computed once, over the complete trajectories
    fn finish(self, total_cost: f64) -> SimulationResult {
        let initial = self.initial_capital;
        SimulationResult {
            performance: PerformanceMetrics::from_capitals(&self.capitals, initial),
            monthly_performance: PerformanceMetrics::from_capitals(&self.monthly_capitals, initial),
            static_performance: PerformanceMetrics::from_capitals(&self.static_capitals, initial),
            trade_stats: TradeStats::from_trades(&self.trades),
            total_cost,
            initial_capital: initial,
            leverage: self.leverage,
            dates: self.dates,
            prices: self.prices,
            capitals: self.capitals,
            positions: self.positions,
            trades: self.trades,
            costs: self.costs,
            carry: self.carry,
            rationales: self.rationales,
            monthly_capitals: self.monthly_capitals,
            monthly_positions: self.monthly_positions,
            static_capitals: self.static_capitals,
            static_positions: self.static_positions,
        }
    }
}

impl SpiderWebEngine {
    pub fn new(config: StrategyConfig) -> Self {
        let carry_per_step = config.carry_rate / TRADING_DAYS_PER_YEAR;
        SpiderWebEngine {
            config,
            carry_per_step,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    //carry credited per step; zero outside contract mode
    pub fn carry_per_step(&self) -> f64 {
        if self.config.instrument.is_contract() {
            self.carry_per_step
        } else {
            0.0
        }
    }

    //runs the simulation over the whole series
    //deterministic: identical inputs give identical results
    pub fn run(&self, series: &PriceSeries) -> SimulationResult {
        let config = &self.config;
        let f = config.leverage;
        let multiplier = config.instrument.multiplier();
        let carry_rate = self.carry_per_step();

        debug!(
            leverage = f,
            cadence = config.cadence.label(),
            contract = config.instrument.is_contract(),
            steps = series.len(),
            "starting simulation"
        );

        let points = series.points();
        let mut recorder = Recorder::with_capacity(config, points.len());

        //step 0: full entry for all three trajectories, no cost charged
        let first = points[0];
        let mut target = SimulationState::enter(
            config.initial_capital,
            f,
            first.date,
            first.close,
            multiplier,
        );
        let mut monthly = SimulationState {
            last_rebalance: None,
            ..target.clone()
        };
        let mut fixed = SimulationState {
            last_rebalance: None,
            ..target.clone()
        };

        recorder.push(
            &first,
            &target,
            target.position,
            0.0,
            0.0,
            TradeRationale::InitialEntry {
                capital: config.initial_capital,
                leverage: f,
            },
            &monthly,
            &fixed,
        );

        let mut previous_date = first.date;

        for point in &points[1..] {
            let price = point.close;
            let price_delta = price - target.last_price;

            //mark to market on positions held coming into the step
            let (_, carry) = target.mark_to_market(price, multiplier, carry_rate);
            monthly.mark_to_market(price, multiplier, carry_rate);
            fixed.mark_to_market(price, multiplier, carry_rate);

            //monthly baseline re-levers on a new month, frictionless
            let monthly_due = monthly
                .last_rebalance
                .map_or(true, |last| is_new_month(point.date, last));
            if monthly_due {
                let sized = position_size(monthly.capital, f, price, multiplier);
                monthly.rebalance_to(sized, 0.0, point.date);
            }

            let due = is_rebalance_due(config.cadence, point.date, Some(previous_date));
            let (trade, cost) = if due {
                let sized = position_size(target.capital, f, price, multiplier);
                let cost = config
                    .fees
                    .cost(sized - target.position, price, multiplier);
                let trade = target.rebalance_to(sized, cost, point.date);
                if trade != 0 {
                    trace!(date = %point.date, price, trade, cost, position = sized, "rebalanced");
                }
                (trade, cost)
            } else {
                (0, 0.0)
            };

            let rationale =
                TradeRationale::classify(trade, price_delta, target.leverage(multiplier));

            recorder.push(point, &target, trade, cost, carry, rationale, &monthly, &fixed);
            previous_date = point.date;
        }

        let result = recorder.finish(target.cost);

        debug!(
            final_capital = result.performance.final_capital,
            total_return = result.performance.total_return,
            trades = result.trade_stats.total_trades,
            "simulation finished"
        );

        result
    }
}
