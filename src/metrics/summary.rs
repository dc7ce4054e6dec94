use crate::engine::SimulationResult;
use crate::metrics::performance::{PerformanceMetrics, TradeStats};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//summary of a run, the target strategy next to both baselines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub initial_capital: f64,
    pub leverage: f64,
    pub date_range: String,
    pub strategy: PerformanceMetrics,
    pub monthly_baseline: PerformanceMetrics,
    pub static_baseline: PerformanceMetrics,
    pub trade_stats: TradeStats,
    pub total_cost: f64,
}

impl SummaryMetrics {
    pub fn from_result(result: &SimulationResult) -> Self {
        SummaryMetrics {
            initial_capital: result.initial_capital,
            leverage: result.leverage,
            date_range: result.date_range(),
            strategy: result.performance,
            monthly_baseline: result.monthly_performance,
            static_baseline: result.static_performance,
            trade_stats: result.trade_stats,
            total_cost: result.total_cost,
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Metric"),
            Cell::new("Spider Web"),
            Cell::new("Monthly Rebalance"),
            Cell::new("Buy & Hold"),
        ]));

        let columns = [self.strategy, self.monthly_baseline, self.static_baseline];

        add_metric_row(&mut table, "Final Capital", &columns, |m| {
            format!("${:.0}", m.final_capital)
        });
        add_metric_row(&mut table, "Total Return", &columns, |m| {
            format!("{:+.2}%", m.total_return * 100.0)
        });
        add_metric_row(&mut table, "Annual Return", &columns, |m| {
            format!("{:+.2}%", m.annual_return * 100.0)
        });
        add_metric_row(&mut table, "Max Drawdown", &columns, |m| {
            format!("{:.2}%", m.max_drawdown * 100.0)
        });
        add_metric_row(&mut table, "Sharpe Ratio", &columns, |m| {
            format!("{:.3}", m.sharpe_ratio)
        });

        table.printstd();

        let mut trades = Table::new();
        trades.add_row(Row::new(vec![Cell::new("Trades"), Cell::new("Value")]));
        trades.add_row(Row::new(vec![
            Cell::new("Number of Trades"),
            Cell::new(&format!("{}", self.trade_stats.total_trades)),
        ]));
        trades.add_row(Row::new(vec![
            Cell::new("Total Bought"),
            Cell::new(&format!("{}", self.trade_stats.total_buy_volume)),
        ]));
        trades.add_row(Row::new(vec![
            Cell::new("Total Sold"),
            Cell::new(&format!("{}", self.trade_stats.total_sell_volume)),
        ]));
        trades.add_row(Row::new(vec![
            Cell::new("Trading Cost"),
            Cell::new(&format!("${:.2}", self.total_cost)),
        ]));

        trades.printstd();
    }
}

fn add_metric_row<F>(table: &mut Table, name: &str, columns: &[PerformanceMetrics], fmt: F)
where
    F: Fn(&PerformanceMetrics) -> String,
{
    let mut cells = vec![Cell::new(name)];
    cells.extend(columns.iter().map(|m| Cell::new(&fmt(m))));
    table.add_row(Row::new(cells));
}
