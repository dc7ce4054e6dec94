use crate::engine::SimulationResult;
use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StepRow<'a> {
    date: String,
    price: f64,
    capital: f64,
    position: i64,
    trade: i64,
    cost: f64,
    drawdown: f64,
    monthly_capital: f64,
    static_capital: f64,
    reason: &'a str,
}

//writes the per-step series of a run as csv
pub fn save_steps_csv<P: AsRef<Path>>(result: &SimulationResult, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        Writer::from_path(path).context(format!("Failed to create CSV file: {:?}", path))?;
    let drawdowns = crate::metrics::drawdown_series(&result.capitals);

    for i in 0..result.len() {
        let reason = result.rationales[i].to_string();
        writer.serialize(StepRow {
            date: result.dates[i].to_string(),
            price: result.prices[i],
            capital: result.capitals[i],
            position: result.positions[i],
            trade: result.trades[i],
            cost: result.costs[i],
            drawdown: drawdowns[i],
            monthly_capital: result.monthly_capitals[i],
            static_capital: result.static_capitals[i],
            reason: &reason,
        })?;
    }

    writer.flush()?;
    Ok(())
}

//writes any serializable report as pretty JSON
pub fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).context(format!("Failed to write JSON file: {:?}", path))?;
    Ok(())
}
