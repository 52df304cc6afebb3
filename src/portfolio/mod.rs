pub mod ledger;
pub mod snapshot;

pub use ledger::Portfolio;
pub use snapshot::{HoldingsSnapshot, PositionSnapshot};
