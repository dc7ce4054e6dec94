use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use spiderweb::logging::setup_logging;
use spiderweb::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "spiderweb")]
#[command(about = "A fixed-leverage rebalancing backtester with buy-and-hold baselines", long_about = None)]
struct Cli {
    //log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    //emit logs as json
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

//instrument and cost settings shared by run and sweep
#[derive(Args, Clone)]
struct ScenarioArgs {
    //json configuration file; command line flags below are ignored when given
    #[arg(long)]
    config: Option<PathBuf>,

    //leverage factor f
    #[arg(long, default_value = "0.5")]
    leverage: f64,

    //initial capital
    #[arg(long, default_value = "1000000")]
    capital: f64,

    //rebalance cadence (daily, weekly, monthly)
    #[arg(long, default_value = "daily")]
    cadence: String,

    //instrument mode (cash, contract)
    #[arg(long, default_value = "cash")]
    mode: String,

    //contract point multiplier (contract mode)
    #[arg(long, default_value = "10")]
    multiplier: f64,

    //fee per contract (contract mode)
    #[arg(long, default_value = "22")]
    fee_per_contract: f64,

    //proportional fee rate (cash mode)
    #[arg(long, default_value = "0.001425")]
    fee_rate: f64,

    //sell-side tax rate (cash mode)
    #[arg(long, default_value = "0.003")]
    tax_rate: f64,

    //annualized carry rate, eg 0.04 (contract mode)
    #[arg(long, default_value = "0")]
    carry: f64,
}

impl ScenarioArgs {
    fn to_config(&self) -> Result<StrategyConfig> {
        if let Some(path) = &self.config {
            return StrategyConfig::from_json_file(path)
                .context(format!("Failed to load configuration from {:?}", path));
        }

        let cadence = RebalanceCadence::parse(&self.cadence)?;
        let config = match self.mode.trim().to_lowercase().as_str() {
            "cash" | "stock" => StrategyConfig::cash(
                self.leverage,
                self.capital,
                cadence,
                self.fee_rate,
                self.tax_rate,
            ),
            "contract" | "futures" => StrategyConfig::contract(
                self.leverage,
                self.capital,
                cadence,
                self.multiplier,
                self.fee_per_contract,
                self.carry,
            ),
            other => return Err(ConfigError::UnknownMode(other.to_string()).into()),
        };
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    //run one strategy against both baselines
    Run {
        //path to csv with date and close columns
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        scenario: ScenarioArgs,

        //output path for the full result as json
        #[arg(long)]
        output_json: Option<PathBuf>,

        //output path for the per-step series as csv
        #[arg(long)]
        output_csv: Option<PathBuf>,

        //print every trade
        #[arg(long)]
        show_trades: bool,
    },

    //spider web vs always-long vs buy-and-hold, contract mode
    Compare {
        #[arg(long)]
        data: PathBuf,

        #[arg(long, default_value = "1000000")]
        capital: f64,

        //annualized carry rate
        #[arg(long, default_value = "0.04")]
        carry: f64,

        #[arg(long, default_value = "0.5")]
        spider_f: f64,

        #[arg(long, default_value = "3.0")]
        forever_f: f64,

        #[arg(long, default_value = "3.0")]
        buyhold_f: f64,

        #[arg(long, default_value = "10")]
        multiplier: f64,

        #[arg(long, default_value = "22")]
        fee_per_contract: f64,

        //print the json payload to stdout instead of tables
        #[arg(long)]
        json: bool,
    },

    //same scenario across several leverage factors
    Sweep {
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        scenario: ScenarioArgs,

        //comma separated leverage factors
        #[arg(long, value_delimiter = ',', default_value = "0.5,1.0,2.0")]
        leverages: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, cli.log_json);

    match cli.command {
        Commands::Run {
            data,
            scenario,
            output_json,
            output_csv,
            show_trades,
        } => run_single(data, scenario, output_json, output_csv, show_trades),
        Commands::Compare {
            data,
            capital,
            carry,
            spider_f,
            forever_f,
            buyhold_f,
            multiplier,
            fee_per_contract,
            json,
        } => {
            let config = ComparisonConfig {
                initial_capital: capital,
                carry_rate: carry,
                spider_leverage: spider_f,
                forever_leverage: forever_f,
                buyhold_leverage: buyhold_f,
                multiplier,
                fee_per_contract,
            };
            match run_compare(data, &config, json) {
                Err(err) if json => {
                    println!("{}", serde_json::to_string_pretty(&ErrorReport::from_error(&err))?);
                    std::process::exit(1);
                }
                other => other,
            }
        }
        Commands::Sweep {
            data,
            scenario,
            leverages,
        } => run_sweep(data, scenario, leverages),
    }
}

fn load_series(path: &PathBuf) -> Result<PriceSeries> {
    let series = load_csv(path).context(format!("Failed to load data from {:?}", path))?;
    info!(
        rows = series.len(),
        first = %series.first().date,
        last = %series.last().date,
        "price series loaded"
    );
    Ok(series)
}

fn run_single(
    data_path: PathBuf,
    scenario: ScenarioArgs,
    output_json: Option<PathBuf>,
    output_csv: Option<PathBuf>,
    show_trades: bool,
) -> Result<()> {
    println!("Spider Web Rebalancing Backtest");
    println!("===============================\n");

    let config = scenario.to_config()?;
    let series = load_series(&data_path)?;

    println!("Loaded {} closes", series.len());
    println!(
        "Date range: {} to {}\n",
        series.first().date,
        series.last().date
    );
    println!("Leverage: {}x ({})", config.leverage, config.describe());
    println!("Initial capital: ${:.0}", config.initial_capital);
    match config.instrument {
        InstrumentMode::Cash => println!("Instrument: cash"),
        InstrumentMode::Contract { multiplier } => println!(
            "Instrument: contract (multiplier {}, carry {:.2}%)",
            multiplier,
            config.carry_rate * 100.0
        ),
    }
    println!();

    let engine = SpiderWebEngine::new(config);
    let result = engine.run(&series);

    println!("Backtest Results");
    println!("================\n");
    SummaryMetrics::from_result(&result).pretty_print_table();

    if show_trades {
        println!();
        for i in result.trade_indices() {
            println!(
                "{}  {:>10.2}  {:>+8}  {:>8}  {:>14.0}  {}",
                result.dates[i],
                result.prices[i],
                result.trades[i],
                result.positions[i],
                result.capitals[i],
                result.rationales[i]
            );
        }
    }

    if let Some(path) = output_json {
        save_json(&result, &path)?;
        println!("\nResult saved to {:?}", path);
    }

    if let Some(path) = output_csv {
        save_steps_csv(&result, &path)?;
        println!("Per-step series saved to {:?}", path);
    }

    Ok(())
}

fn run_compare(data_path: PathBuf, config: &ComparisonConfig, json: bool) -> Result<()> {
    let series = Arc::new(load_series(&data_path)?);
    let mut cache = RunCache::new(series);
    let report = ComparisonReport::run(&mut cache, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Strategy Comparison ({})", report.data_range);
    println!("====================\n");
    for (name, strategy) in &report.strategies {
        println!(
            "{:<8} {:<28} return {:>+9.2}%  annual {:>+7.2}%  mdd {:>6.2}%  final ${:.0}  trades {}",
            name,
            strategy.params,
            strategy.total_return * 100.0,
            strategy.annual_return * 100.0,
            strategy.mdd * 100.0,
            strategy.final_capital,
            strategy.total_trades
        );
    }

    Ok(())
}

fn run_sweep(data_path: PathBuf, scenario: ScenarioArgs, leverages: Vec<f64>) -> Result<()> {
    let base = scenario.to_config()?;
    let series = Arc::new(load_series(&data_path)?);
    let mut cache = RunCache::new(series);

    println!("Leverage Sweep ({})", base.cadence.label());
    println!("==============\n");
    LeverageSweep::run(&mut cache, &base, &leverages).pretty_print_table();

    Ok(())
}
