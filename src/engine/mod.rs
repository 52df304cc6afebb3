pub mod backtest;

pub use backtest::{Backtest, BacktestResult, EventCounts};
