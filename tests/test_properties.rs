use chrono::NaiveDate;
use proptest::prelude::*;
use spiderweb::metrics::drawdown_series;
use spiderweb::prelude::*;

fn closes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10u32..1000u32, 1..80)
        .prop_map(|v| v.into_iter().map(f64::from).collect())
}

fn cadence_strategy() -> impl Strategy<Value = RebalanceCadence> {
    prop_oneof![
        Just(RebalanceCadence::Daily),
        Just(RebalanceCadence::Weekly),
        Just(RebalanceCadence::Monthly),
    ]
}

fn run(closes: &[f64], config: StrategyConfig) -> SimulationResult {
    let start = NaiveDate::from_ymd_opt(2023, 12, 20).unwrap();
    let series = PriceSeries::from_closes(start, closes).unwrap();
    SpiderWebEngine::new(config).run(&series)
}

proptest! {
    #[test]
    fn prop_position_is_floor_of_target_at_rebalance(
        closes in closes_strategy(),
        leverage in 0.1f64..1.0,
    ) {
        let config = StrategyConfig::cash(leverage, 1_000_000.0, RebalanceCadence::Daily, 0.0, 0.0);
        let result = run(&closes, config);

        for i in 0..result.len() {
            prop_assert_eq!(
                result.positions[i],
                position_size(result.capitals[i], leverage, result.prices[i], 1.0)
            );
        }
    }

    #[test]
    fn prop_capital_continuity(
        closes in closes_strategy(),
        leverage in 0.1f64..1.0,
        cadence in cadence_strategy(),
    ) {
        let config = StrategyConfig::contract(leverage, 2_000_000.0, cadence, 10.0, 22.0, 0.04);
        let result = run(&closes, config);

        for i in 1..result.len() {
            let pnl = result.positions[i - 1] as f64 * (result.prices[i] - result.prices[i - 1]) * 10.0;
            let expected = result.capitals[i - 1] + pnl + result.carry[i] - result.costs[i];
            prop_assert!((result.capitals[i] - expected).abs() < 1e-6 * expected.abs().max(1.0));
            if result.trades[i] == 0 {
                prop_assert_eq!(result.costs[i], 0.0);
            }
        }
    }

    #[test]
    fn prop_static_baseline_is_frozen(
        closes in closes_strategy(),
        leverage in 0.1f64..3.0,
    ) {
        let result = run(&closes, StrategyConfig { leverage, ..StrategyConfig::default() });
        let entry = result.static_positions[0];
        prop_assert!(result.static_positions.iter().all(|p| *p == entry));
    }

    #[test]
    fn prop_drawdown_bounds(
        closes in closes_strategy(),
        leverage in 0.1f64..1.0,
    ) {
        let result = run(&closes, StrategyConfig { leverage, ..StrategyConfig::default() });
        let dd = result.performance.max_drawdown;
        prop_assert!((0.0..=1.0).contains(&dd));

        let mut peak = f64::NEG_INFINITY;
        for (capital, drawdown) in result.capitals.iter().zip(drawdown_series(&result.capitals)) {
            if *capital >= peak {
                peak = *capital;
                prop_assert_eq!(drawdown, 0.0);
            }
        }
    }

    #[test]
    fn prop_runs_are_deterministic(
        closes in closes_strategy(),
        leverage in 0.1f64..1.0,
        cadence in cadence_strategy(),
    ) {
        let config = StrategyConfig { leverage, cadence, ..StrategyConfig::default() };
        prop_assert_eq!(run(&closes, config.clone()), run(&closes, config));
    }
}
