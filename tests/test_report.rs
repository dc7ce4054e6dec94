use chrono::NaiveDate;
use spiderweb::prelude::*;
use spiderweb::report::LeverageBehaviour;
use std::sync::Arc;

fn sample_series(n: usize) -> Arc<PriceSeries> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let closes: Vec<f64> = (0..n)
        .map(|i| 15000.0 + 800.0 * ((i as f64) * 0.15).sin() + 5.0 * i as f64)
        .collect();
    Arc::new(PriceSeries::from_closes(start, &closes).unwrap())
}

#[test]
fn test_comparison_report_shape() {
    let mut cache = RunCache::new(sample_series(60));
    let report = ComparisonReport::run(&mut cache, &ComparisonConfig::default());

    assert!(report.success);
    let names: Vec<&str> = report.strategies.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["spider", "forever", "buyhold"]);
    assert_eq!(report.data_range, "2023-01-02 ~ 2023-03-02");

    let spider = &report.strategies["spider"];
    assert_eq!(spider.dates.len(), 12);
    assert_eq!(spider.capitals.len(), 12);
    assert_eq!(spider.params, "f=0.5, daily rebalance");
    assert_eq!(spider.trades_detail.len(), spider.total_trades);
    assert!(spider.trades_detail.iter().all(|d| d.trade != 0));
    assert!(spider.trades_detail[0].reason.starts_with("initial entry"));

    let buyhold = &report.strategies["buyhold"];
    assert_eq!(buyhold.trades_detail.len(), 1);
    assert_eq!(buyhold.total_trades, 1);
    assert_eq!(buyhold.total_sell, 0);
    assert_eq!(buyhold.total_buy, buyhold.trades_detail[0].trade);
}

#[test]
fn test_comparison_json_keys() {
    let mut cache = RunCache::new(sample_series(20));
    let report = ComparisonReport::run(&mut cache, &ComparisonConfig::default());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["success"], serde_json::Value::Bool(true));
    for name in ["spider", "forever", "buyhold"] {
        let strategy = &json[name];
        assert!(strategy["return"].is_f64());
        assert!(strategy["annual_return"].is_f64());
        assert!(strategy["mdd"].is_f64());
        assert!(strategy["trades_detail"].is_array());
    }
    assert!(json["data_range"].is_string());
}

#[test]
fn test_cache_reuses_identical_configurations() {
    let mut cache = RunCache::new(sample_series(40));
    let config = ComparisonConfig {
        buyhold_leverage: 0.5,
        ..ComparisonConfig::default()
    };

    //spider and buyhold are the same daily scenario here
    let _ = ComparisonReport::run(&mut cache, &config);
    assert_eq!(cache.len(), 2);

    let first = cache.get(&config.spider()).unwrap();
    let again = cache.get_or_run(&config.spider());
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cache_results_match_direct_runs() {
    let series = sample_series(30);
    let mut cache = RunCache::new(series.clone());
    let config = StrategyConfig::default();

    let cached = cache.get_or_run(&config);
    let direct = SpiderWebEngine::new(config).run(&series);
    assert_eq!(*cached, direct);
}

#[test]
fn test_leverage_sweep() {
    let mut cache = RunCache::new(sample_series(50));
    let base = StrategyConfig::default();
    let sweep = LeverageSweep::run(&mut cache, &base, &[0.5, 1.0, 2.0]);

    assert_eq!(sweep.rows.len(), 3);
    assert_eq!(sweep.rows[0].behaviour, LeverageBehaviour::BuyDipsSellRips);
    assert_eq!(sweep.rows[1].behaviour, LeverageBehaviour::Static);
    assert_eq!(sweep.rows[2].behaviour, LeverageBehaviour::ChaseMomentum);
    assert_eq!(sweep.rows[2].leverage, 2.0);
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_error_report() {
    let err = anyhow::Error::new(DataError::Empty).context("Failed to load data");
    let report = ErrorReport::from_error(&err);

    assert!(!report.success);
    assert_eq!(report.error, "Failed to load data: Price series is empty");
}

#[test]
fn test_steps_csv_export() {
    let series = sample_series(10);
    let result = SpiderWebEngine::new(StrategyConfig::default()).run(&series);
    let file = tempfile::NamedTempFile::new().unwrap();

    save_steps_csv(&result, file.path()).unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let mut lines = contents.lines();
    assert!(lines.next().unwrap().starts_with("date,price,capital,position,trade"));
    assert_eq!(lines.count(), 10);
}
