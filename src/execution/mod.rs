pub mod commission;
pub mod simulated;

pub use commission::{CommissionModel, TieredCommission};
pub use simulated::{OrderExecutor, SimulatedExecutor};
