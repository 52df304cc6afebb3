use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//advisory direction carried by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Long,
    Short,
    Exit,
}

//order direction (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Buy,
    Sell,
}

impl OrderDirection {
    //converts to quantity sign (Buy = +1, Sell = -1)
    pub fn qty_sign(&self) -> i64 {
        match self {
            OrderDirection::Buy => 1,
            OrderDirection::Sell => -1,
        }
    }
}

//order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
}

//advisory emitted by a strategy when its rules trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub strategy_id: u32,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub direction: SignalDirection,
    //conviction weight in 0..1+, unused by the naive sizing policy
    pub strength: f64,
}

impl SignalEvent {
    pub fn new(
        strategy_id: u32,
        symbol: String,
        timestamp: DateTime<Utc>,
        direction: SignalDirection,
        strength: f64,
    ) -> Self {
        SignalEvent {
            strategy_id,
            symbol,
            timestamp,
            direction,
            strength,
        }
    }
}

//instruction for the execution handler, sized by the portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    pub symbol: String,
    pub order_type: OrderType,
    pub quantity: u32,
    pub direction: OrderDirection,
}

impl OrderEvent {
    //creates a market order
    pub fn market(symbol: String, quantity: u32, direction: OrderDirection) -> Self {
        OrderEvent {
            symbol,
            order_type: OrderType::Market,
            quantity,
            direction,
        }
    }
}

//result of an executed order as reported by the execution handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillEvent {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub venue: String,
    pub quantity: u32,
    pub direction: OrderDirection,
    //per-unit fill price; the ledger marks at the latest close when absent
    pub fill_cost: Option<f64>,
    pub commission: f64,
}

impl FillEvent {
    //returns the signed quantity (positive for buy, negative for sell)
    pub fn signed_quantity(&self) -> i64 {
        self.quantity as i64 * self.direction.qty_sign()
    }
}

//the four event kinds flowing through the queue
//dispatch over this enum is exhaustive, so an unknown kind cannot reach
//the driver at runtime
#[derive(Debug, Clone)]
pub enum Event {
    Market,
    Signal(SignalEvent),
    Order(OrderEvent),
    Fill(FillEvent),
}
