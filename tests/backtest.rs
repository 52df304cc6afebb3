use barback::prelude::*;
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

fn ts(day: u32) -> DateTime<Utc> {
    (NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(u64::from(day - 1)))
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn flat_bar(day: u32, price: f64) -> Bar {
    Bar::new_unchecked(
        ts(day),
        price,
        price,
        price,
        price,
        1000.0,
        price,
        "X".to_string(),
    )
}

fn source_from_closes(closes: &[f64]) -> HistoricCsvDataSource {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &price)| flat_bar(i as u32 + 1, price))
        .collect();
    let mut map = IndexMap::new();
    map.insert("X".to_string(), bars);
    HistoricCsvDataSource::from_bars(map)
}

fn config() -> BacktestConfiguration {
    BacktestConfiguration {
        symbols: vec!["X".to_string()],
        start_date: ts(1),
        ..Default::default()
    }
}

//emits a long signal on one tick and an exit signal on a later tick,
//counting ticks itself
struct ScriptedStrategy {
    tick: usize,
    long_on: usize,
    exit_on: usize,
}

impl SignalGenerator for ScriptedStrategy {
    fn calculate_signals(
        &mut self,
        data: &dyn DataSource,
        queue: &mut EventQueue,
    ) -> Result<(), DataError> {
        self.tick += 1;
        let timestamp = data.latest_bar_timestamp("X")?;

        if self.tick == self.long_on {
            queue.push(Event::Signal(SignalEvent::new(
                1,
                "X".to_string(),
                timestamp,
                SignalDirection::Long,
                1.0,
            )));
        } else if self.tick == self.exit_on {
            queue.push(Event::Signal(SignalEvent::new(
                1,
                "X".to_string(),
                timestamp,
                SignalDirection::Exit,
                1.0,
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

//never signals
struct IdleStrategy;

impl SignalGenerator for IdleStrategy {
    fn calculate_signals(
        &mut self,
        _data: &dyn DataSource,
        _queue: &mut EventQueue,
    ) -> Result<(), DataError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "Idle"
    }
}

#[test]
fn three_bars_means_three_market_events_then_termination() {
    let data = source_from_closes(&[10.0, 11.0, 12.0]);
    let mut backtest = Backtest::new(
        &config(),
        data,
        Box::new(IdleStrategy),
        Box::new(SimulatedExecutor::new()),
    )
    .unwrap();

    let result = backtest.run().unwrap();

    assert_eq!(result.counts.market, 3);
    assert_eq!(result.counts.signals, 0);
    assert_eq!(result.counts.orders, 0);
    assert_eq!(result.counts.fills, 0);
    //seed row plus one snapshot per market event
    assert_eq!(result.equity_curve.len(), 4);
}

#[test]
fn long_then_exit_round_trip_returns_to_flat() {
    let data = source_from_closes(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
    let strategy = ScriptedStrategy {
        tick: 0,
        long_on: 2,
        exit_on: 4,
    };
    let mut backtest = Backtest::new(
        &config(),
        data,
        Box::new(strategy),
        Box::new(SimulatedExecutor::new()),
    )
    .unwrap();

    let result = backtest.run().unwrap();

    assert_eq!(result.counts.signals, 2);
    assert_eq!(result.counts.orders, 2);
    assert_eq!(result.counts.fills, 2);
    assert_eq!(backtest.portfolio().position("X"), Some(0));

    //buy 100 @ 11 and sell 100 @ 13, commission 1.3 per side
    let expected_cash = 100_000.0 - 1_100.0 - 1.3 + 1_300.0 - 1.3;
    assert!((backtest.portfolio().cash() - expected_cash).abs() < 1e-9);
    assert!((backtest.portfolio().commission_paid() - 2.6).abs() < 1e-12);
}

#[test]
fn every_holdings_snapshot_reconciles() {
    let data = source_from_closes(&[10.0, 11.0, 9.0, 13.0, 8.0, 15.0]);
    let strategy = ScriptedStrategy {
        tick: 0,
        long_on: 1,
        exit_on: 5,
    };
    let mut backtest = Backtest::new(
        &config(),
        data,
        Box::new(strategy),
        Box::new(SimulatedExecutor::new()),
    )
    .unwrap();

    backtest.run().unwrap();

    for snapshot in backtest.portfolio().all_holdings() {
        assert!(
            snapshot.reconciles(),
            "snapshot at {} does not reconcile",
            snapshot.timestamp
        );
    }
}

#[test]
fn signals_on_a_tick_are_reflected_in_that_ticks_snapshot() {
    //the fill lands before the next market event, so the position shows up
    //in the snapshot of the tick that raised the signal
    let data = source_from_closes(&[10.0, 11.0, 12.0]);
    let strategy = ScriptedStrategy {
        tick: 0,
        long_on: 2,
        exit_on: 99,
    };
    let mut backtest = Backtest::new(
        &config(),
        data,
        Box::new(strategy),
        Box::new(SimulatedExecutor::new()),
    )
    .unwrap();

    backtest.run().unwrap();

    let positions = backtest.portfolio().all_positions();
    //seed, tick1, tick2, tick3
    assert_eq!(positions[1].positions["X"], 0);
    //the tick-2 snapshot is taken before the signal's fill applies; the
    //position appears from the following snapshot onward
    assert_eq!(positions[3].positions["X"], 100);
}

#[test]
fn summary_is_identical_when_recomputed() {
    let data = source_from_closes(&[10.0, 11.0, 9.0, 13.0, 8.0, 15.0]);
    let strategy = ScriptedStrategy {
        tick: 0,
        long_on: 1,
        exit_on: 5,
    };
    let mut backtest = Backtest::new(
        &config(),
        data,
        Box::new(strategy),
        Box::new(SimulatedExecutor::new()),
    )
    .unwrap();

    let result = backtest.run().unwrap();

    let mut curve = backtest.portfolio().create_equity_curve();
    let recomputed = curve.summary(252.0);

    assert_eq!(result.summary.total_return, recomputed.total_return);
    assert_eq!(result.summary.max_drawdown, recomputed.max_drawdown);
    assert_eq!(
        result.summary.max_drawdown_duration,
        recomputed.max_drawdown_duration
    );
}

#[test]
fn invalid_configuration_never_starts_a_run() {
    let data = source_from_closes(&[10.0]);
    let bad_config = BacktestConfiguration {
        symbols: vec![],
        ..Default::default()
    };

    let backtest = Backtest::new(
        &bad_config,
        data,
        Box::new(IdleStrategy),
        Box::new(SimulatedExecutor::new()),
    );

    assert!(matches!(backtest, Err(ConfigError::EmptySymbols)));
}

#[test]
fn ma_cross_strategy_runs_end_to_end() {
    let closes: Vec<f64> = (0..40)
        .map(|i| {
            if i < 20 {
                100.0 + i as f64
            } else {
                120.0 - (i - 20) as f64 * 1.5
            }
        })
        .collect();
    let data = source_from_closes(&closes);

    let symbols = vec!["X".to_string()];
    let strategy = Box::new(MovingAverageCrossStrategy::new(&symbols, 3, 10));
    let mut backtest = Backtest::new(
        &config(),
        data,
        strategy,
        Box::new(SimulatedExecutor::new()),
    )
    .unwrap();

    let result = backtest.run().unwrap();

    //the trend reversal forces at least one full round trip
    assert!(result.counts.signals >= 2);
    assert_eq!(result.counts.orders, result.counts.fills);
    assert_eq!(backtest.portfolio().position("X"), Some(0));
    assert_eq!(result.counts.market, 40);
    assert!(result.summary.max_drawdown >= 0.0);
}
