use crate::config::{BacktestConfiguration, ConfigError};
use crate::data::{DataError, DataSource};
use crate::event::{Event, EventQueue};
use crate::execution::OrderExecutor;
use crate::metrics::{EquityCurve, SummaryStats};
use crate::portfolio::Portfolio;
use crate::strategy::SignalGenerator;
use std::time::Duration;

//number of events processed per kind over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub market: usize,
    pub signals: usize,
    pub orders: usize,
    pub fills: usize,
}

//result of a completed backtest
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub summary: SummaryStats,
    pub equity_curve: EquityCurve,
    pub counts: EventCounts,
}

//event-driven backtest driver
//advances the data source one step at a time and drains the queue fully
//between steps, so every signal, order and fill caused by a market event
//is applied before the next bar is released (no look-ahead)
pub struct Backtest<D: DataSource> {
    data: D,
    strategy: Box<dyn SignalGenerator>,
    executor: Box<dyn OrderExecutor>,
    portfolio: Portfolio,
    events: EventQueue,
    heartbeat: Duration,
    periods_per_year: f64,
    counts: EventCounts,
}

impl<D: DataSource> Backtest<D> {
    //wires the components together; configuration errors are fatal here,
    //before any simulation step runs
    pub fn new(
        config: &BacktestConfiguration,
        data: D,
        strategy: Box<dyn SignalGenerator>,
        executor: Box<dyn OrderExecutor>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let portfolio = Portfolio::with_lot_size(
            &config.symbols,
            config.start_date,
            config.initial_capital,
            config.lot_size,
        );

        Ok(Backtest {
            data,
            strategy,
            executor,
            portfolio,
            events: EventQueue::new(),
            heartbeat: Duration::from_millis(config.heartbeat_ms),
            periods_per_year: config.periods_per_year,
            counts: EventCounts::default(),
        })
    }

    //runs the simulation to data exhaustion, then builds the final report
    //exactly once
    pub fn run(&mut self) -> Result<BacktestResult, DataError> {
        self.run_loop()?;

        let mut equity_curve = self.portfolio.create_equity_curve();
        let summary = equity_curve.summary(self.periods_per_year);

        Ok(BacktestResult {
            summary,
            equity_curve,
            counts: self.counts,
        })
    }

    fn run_loop(&mut self) -> Result<(), DataError> {
        loop {
            //advance: the source pushes exactly one market event, or the
            //run is over
            if !self.data.advance(&mut self.events) {
                break;
            }

            //drain: an empty queue ends the sub-loop, not the run
            while let Some(event) = self.events.pop() {
                match event {
                    Event::Market => {
                        self.counts.market += 1;
                        //signals for this tick are enqueued before holdings
                        //are revalued
                        self.strategy
                            .calculate_signals(&self.data, &mut self.events)?;
                        self.portfolio.update_timeindex(&self.data)?;
                    }
                    Event::Signal(signal) => {
                        self.counts.signals += 1;
                        self.portfolio.update_signal(&signal, &mut self.events)?;
                    }
                    Event::Order(order) => {
                        self.counts.orders += 1;
                        self.executor
                            .execute_order(&order, &self.data, &mut self.events)?;
                    }
                    Event::Fill(fill) => {
                        self.counts.fills += 1;
                        self.portfolio.update_fill(&fill, &self.data)?;
                    }
                }
            }

            //pacing only, no semantic effect
            if !self.heartbeat.is_zero() {
                std::thread::sleep(self.heartbeat);
            }
        }

        Ok(())
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn counts(&self) -> EventCounts {
        self.counts
    }
}
