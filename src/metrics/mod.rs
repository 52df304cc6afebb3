pub mod equity;
pub mod performance;
pub mod summary;

pub use equity::{EquityCurve, EquityPoint};
pub use performance::{drawdowns, sharpe_ratio, DrawdownSeries};
pub use summary::SummaryStats;
