use crate::config::StrategyConfig;
use crate::report::cache::RunCache;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//what a leverage factor does when prices move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverageBehaviour {
    //f < 1: buy declines, sell rallies
    BuyDipsSellRips,
    //f == 1: position never needs adjusting
    Static,
    //f > 1: buy rallies, sell declines
    ChaseMomentum,
}

impl LeverageBehaviour {
    pub fn of(leverage: f64) -> Self {
        if leverage < 1.0 {
            LeverageBehaviour::BuyDipsSellRips
        } else if leverage == 1.0 {
            LeverageBehaviour::Static
        } else {
            LeverageBehaviour::ChaseMomentum
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            LeverageBehaviour::BuyDipsSellRips => "buy dips, sell rips",
            LeverageBehaviour::Static => "static",
            LeverageBehaviour::ChaseMomentum => "chase momentum",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRow {
    pub leverage: f64,
    pub total_return: f64,
    pub buy_hold_return: f64,
    pub max_drawdown: f64,
    pub behaviour: LeverageBehaviour,
}

//one base scenario evaluated across several leverage factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeverageSweep {
    pub rows: Vec<SweepRow>,
}

impl LeverageSweep {
    pub fn run(cache: &mut RunCache, base: &StrategyConfig, leverages: &[f64]) -> Self {
        let configs: Vec<StrategyConfig> =
            leverages.iter().map(|&f| base.with_leverage(f)).collect();
        let results = cache.get_or_run_all(&configs);

        let rows = results
            .iter()
            .map(|r| SweepRow {
                leverage: r.leverage,
                total_return: r.performance.total_return,
                buy_hold_return: r.static_performance.total_return,
                max_drawdown: r.performance.max_drawdown,
                behaviour: LeverageBehaviour::of(r.leverage),
            })
            .collect();

        LeverageSweep { rows }
    }

    pub fn pretty_print_table(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("f"),
            Cell::new("Strategy Return"),
            Cell::new("Buy & Hold"),
            Cell::new("MDD"),
            Cell::new("Behaviour"),
        ]));

        for row in &self.rows {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{:.1}", row.leverage)),
                Cell::new(&format!("{:+.2}%", row.total_return * 100.0)),
                Cell::new(&format!("{:+.2}%", row.buy_hold_return * 100.0)),
                Cell::new(&format!("{:.2}%", row.max_drawdown * 100.0)),
                Cell::new(row.behaviour.describe()),
            ]));
        }

        table.printstd();
    }
}
