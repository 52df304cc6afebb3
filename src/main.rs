use anyhow::{Context, Result};
use barback::prelude::*;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barback")]
#[command(about = "An event-driven market backtesting engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest
    Run {
        //directory containing <SYMBOL>.csv bar files
        #[arg(long)]
        data_dir: PathBuf,

        //symbols to trade (comma separated, eg SPY,QQQ)
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,

        //starting capital
        #[arg(long, default_value = "100000")]
        capital: f64,

        //simulation start timestamp (rfc3339)
        #[arg(long, default_value = "2020-01-01T00:00:00Z")]
        start_date: DateTime<Utc>,

        //pacing delay between steps in milliseconds (cosmetic)
        #[arg(long, default_value = "0")]
        heartbeat_ms: u64,

        //fixed lot size for the naive sizing policy
        #[arg(long, default_value = "100")]
        lot_size: u32,

        //bar periods per year (252 daily, 98280 minutely)
        #[arg(long, default_value = "252")]
        periods: f64,

        //short sma window
        #[arg(long, default_value = "10")]
        short: usize,

        //long sma window
        #[arg(long, default_value = "30")]
        long: usize,

        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data_dir,
            symbols,
            capital,
            start_date,
            heartbeat_ms,
            lot_size,
            periods,
            short,
            long,
            output_equity_csv,
        } => {
            let config = BacktestConfiguration {
                data_dir,
                symbols,
                initial_capital: capital,
                start_date,
                heartbeat_ms,
                lot_size,
                periods_per_year: periods,
                strategy: MaCrossParams {
                    short_window: short,
                    long_window: long,
                },
                output_equity_csv,
            };

            run_backtest(&config)?;
        }
    }

    Ok(())
}

fn run_backtest(config: &BacktestConfiguration) -> Result<()> {
    println!("Barback Backtesting Engine");
    println!("==========================\n");

    config.validate()?;

    //load data
    println!("Loading bars from {:?}...", config.data_dir);
    let data = HistoricCsvDataSource::new(&config.data_dir, &config.symbols)
        .context("Failed to build the historical data source")?;

    println!("Universe: {}", config.symbols.join(", "));
    println!("Initial capital: ${:.2}", config.initial_capital);
    println!(
        "Strategy: MA Crossover (short={}, long={})\n",
        config.strategy.short_window, config.strategy.long_window
    );

    let strategy = Box::new(MovingAverageCrossStrategy::new(
        &config.symbols,
        config.strategy.short_window,
        config.strategy.long_window,
    ));
    let executor = Box::new(SimulatedExecutor::new());

    //run backtest
    println!("Running backtest...\n");
    let mut backtest = Backtest::new(config, data, strategy, executor)?;
    let result = backtest.run()?;

    //display results
    println!("Backtest Results");
    println!("================\n");
    result.summary.pretty_print_table();

    println!("\nMarket events: {}", result.counts.market);
    println!("Signals: {}", result.counts.signals);
    println!("Orders: {}", result.counts.orders);
    println!("Fills: {}", result.counts.fills);

    //save equity curve if requested
    if let Some(path) = &config.output_equity_csv {
        result.equity_curve.write_csv(path)?;
        println!("\nEquity curve saved to {:?}", path);
    }

    Ok(())
}
