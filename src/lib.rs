//an event-driven market backtesting engine

pub mod config;
pub mod data;
pub mod engine;
pub mod event;
pub mod execution;
pub mod metrics;
pub mod portfolio;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BacktestConfiguration, ConfigError, MaCrossParams};
    pub use crate::data::{Bar, BarField, DataError, DataSource, HistoricCsvDataSource};
    pub use crate::engine::{Backtest, BacktestResult, EventCounts};
    pub use crate::event::{
        Event, EventQueue, FillEvent, OrderDirection, OrderEvent, OrderType, SignalDirection,
        SignalEvent,
    };
    pub use crate::execution::{CommissionModel, OrderExecutor, SimulatedExecutor, TieredCommission};
    pub use crate::metrics::{drawdowns, sharpe_ratio, EquityCurve, EquityPoint, SummaryStats};
    pub use crate::portfolio::{HoldingsSnapshot, Portfolio, PositionSnapshot};
    pub use crate::strategy::{MovingAverageCrossStrategy, SignalGenerator};
}
