pub mod queue;
pub mod types;

pub use queue::EventQueue;
pub use types::{
    Event, FillEvent, OrderDirection, OrderEvent, OrderType, SignalDirection, SignalEvent,
};
