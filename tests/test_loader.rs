use chrono::NaiveDate;
use spiderweb::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_sorts_and_normalises_headers() {
    let file = write_csv(
        " date ,Open, close\n2024/01/03,1,\"17,000.5\"\n2024/01/02,1,16990\n2024-01-04,1,17010.25\n",
    );

    let series = load_csv(file.path()).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.first().date, ymd(2024, 1, 2));
    assert_eq!(series.points()[1].close, 17000.5);
    assert_eq!(series.last().close, 17010.25);
}

#[test]
fn test_load_falls_back_to_price_column() {
    let file = write_csv("日期,收盤價\n2024-02-01,100\n2024-02-02,101\n");

    let series = load_csv(file.path()).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.last().close, 101.0);
}

#[test]
fn test_missing_close_column() {
    let file = write_csv("DATE,VOLUME\n2024-02-01,100\n");

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(
        err.root_cause().downcast_ref::<DataError>(),
        Some(DataError::MissingColumn(_))
    ));
}

#[test]
fn test_non_positive_price_is_data_error() {
    let file = write_csv("DATE,CLOSE\n2024-02-01,100\n2024-02-02,-5\n");

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(
        err.root_cause().downcast_ref::<DataError>(),
        Some(DataError::NonPositivePrice { .. })
    ));
}

#[test]
fn test_unparseable_date() {
    let file = write_csv("DATE,CLOSE\nnot-a-date,100\n");

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(
        err.root_cause().downcast_ref::<DataError>(),
        Some(DataError::InvalidDate { line: 2, .. })
    ));
}

#[test]
fn test_duplicate_dates_rejected() {
    let file = write_csv("DATE,CLOSE\n2024-02-01,100\n2024-02-01,101\n");
    assert!(load_csv(file.path()).is_err());
}

#[test]
fn test_empty_file_is_data_error() {
    let file = write_csv("DATE,CLOSE\n");

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(
        err.root_cause().downcast_ref::<DataError>(),
        Some(DataError::Empty)
    ));
}

#[test]
fn test_config_json_round_trip_file() {
    let config = StrategyConfig::contract(
        0.5,
        500_000.0,
        RebalanceCadence::Monthly,
        50.0,
        30.0,
        0.04,
    );
    let file = NamedTempFile::new().unwrap();
    config.to_json_file(file.path()).unwrap();

    let loaded = StrategyConfig::from_json_file(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_cadence_parse() {
    assert_eq!(
        RebalanceCadence::parse("Weekly").unwrap(),
        RebalanceCadence::Weekly
    );
    assert_eq!(
        RebalanceCadence::parse("per-bar").unwrap(),
        RebalanceCadence::Daily
    );
    assert!(matches!(
        RebalanceCadence::parse("hourly"),
        Err(ConfigError::UnknownCadence(_))
    ));
}
