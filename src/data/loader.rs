use crate::data::price::{DataError, PricePoint, PriceSeries};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use tracing::debug;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

//loads a (date, close) series from a csv file
//header names vary between sources, so they are normalised before lookup
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let headers = reader
        .headers()
        .context(format!("Failed to read CSV header of {:?}", path))?
        .clone();
    let (date_col, close_col) = locate_columns(&headers)?;

    let mut points = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let line = index + 2;
        let record = result.context(format!("Failed to parse CSV record at line {}", line))?;

        let raw_date = record.get(date_col).unwrap_or_default();
        let raw_close = record.get(close_col).unwrap_or_default();

        //skip fully blank trailing rows
        if raw_date.is_empty() && raw_close.is_empty() {
            continue;
        }

        let date = parse_date(raw_date).ok_or_else(|| DataError::InvalidDate {
            value: raw_date.to_string(),
            line,
        })?;
        let close = parse_price(raw_close).ok_or_else(|| DataError::InvalidPrice {
            value: raw_close.to_string(),
            line,
        })?;

        points.push(PricePoint::new(date, close));
    }

    debug!(rows = points.len(), path = ?path, "loaded price rows");

    let series = PriceSeries::from_unsorted(points)
        .context(format!("Invalid price series in {:?}", path))?;
    Ok(series)
}

//returns (date column, close column) indices
fn locate_columns(headers: &StringRecord) -> Result<(usize, usize), DataError> {
    let normalised: Vec<String> = headers.iter().map(|h| h.trim().to_uppercase()).collect();

    let date_col = normalised
        .iter()
        .position(|h| h == "DATE" || h == "日期")
        .ok_or_else(|| DataError::MissingColumn("DATE".to_string()))?;

    let close_col = normalised
        .iter()
        .position(|h| h == "CLOSE")
        .or_else(|| {
            normalised
                .iter()
                .position(|h| h.contains("收盤") || h.contains("PRICE"))
        })
        .ok_or_else(|| DataError::MissingColumn("CLOSE".to_string()))?;

    Ok((date_col, close_col))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    //timestamps such as "2024-01-02 00:00:00"
    if let Some((day, _)) = value.split_once(' ') {
        if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.date_naive())
}

//accepts thousands separators, eg "17,935.5"
pub fn parse_price(value: &str) -> Option<f64> {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    cleaned.trim().parse::<f64>().ok()
}
