pub mod ma_cross;

pub use ma_cross::MovingAverageCrossStrategy;

use crate::data::{DataError, DataSource};
use crate::event::EventQueue;

//signal-generation contract
//a strategy reads released bars from the data source and pushes zero or
//more signal events synchronously; any internal state (e.g. currently
//long) is strategy-owned and never inspected by the driver
pub trait SignalGenerator {
    fn calculate_signals(
        &mut self,
        data: &dyn DataSource,
        queue: &mut EventQueue,
    ) -> Result<(), DataError>;

    //returns the strategy name
    fn name(&self) -> &str;
}

//helper function to calculate simple moving average
pub fn sma(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}
