use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

//signed position per symbol at one market event, append-only once recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub timestamp: DateTime<Utc>,
    //positive = long, negative = short, zero = flat
    pub positions: IndexMap<String, i64>,
}

//mark-to-market value per symbol plus cash at one market event
//invariant: total == cash + sum of symbol values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub values: IndexMap<String, f64>,
    pub cash: f64,
    //cumulative commission paid
    pub commission: f64,
    pub total: f64,
}

impl HoldingsSnapshot {
    //verifies the reconciliation invariant within float tolerance
    pub fn reconciles(&self) -> bool {
        let market_value: f64 = self.values.values().sum();
        (self.total - (self.cash + market_value)).abs() < 1e-9 * self.total.abs().max(1.0)
    }
}
