use crate::data::{BarField, DataError, DataSource};
use crate::event::{Event, EventQueue, FillEvent, OrderEvent};
use crate::execution::commission::{CommissionModel, TieredCommission};

//execution contract: every order produces exactly one fill on the queue
pub trait OrderExecutor {
    fn execute_order(
        &mut self,
        order: &OrderEvent,
        data: &dyn DataSource,
        queue: &mut EventQueue,
    ) -> Result<(), DataError>;
}

//naive fill-at-market simulator: fills immediately at the latest adjusted
//close with no slippage or latency, stamping the fill with the simulated
//time of the latest bar
pub struct SimulatedExecutor {
    venue: String,
    commission_model: Box<dyn CommissionModel>,
}

impl SimulatedExecutor {
    pub fn new() -> Self {
        Self::with_commission_model(Box::new(TieredCommission::default()))
    }

    pub fn with_commission_model(commission_model: Box<dyn CommissionModel>) -> Self {
        SimulatedExecutor {
            venue: "SIM".to_string(),
            commission_model,
        }
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderExecutor for SimulatedExecutor {
    fn execute_order(
        &mut self,
        order: &OrderEvent,
        data: &dyn DataSource,
        queue: &mut EventQueue,
    ) -> Result<(), DataError> {
        let timestamp = data.latest_bar_timestamp(&order.symbol)?;
        let price = data.latest_bar_value(&order.symbol, BarField::AdjClose)?;
        let commission = self.commission_model.commission(order.quantity);

        queue.push(Event::Fill(FillEvent {
            timestamp,
            symbol: order.symbol.clone(),
            venue: self.venue.clone(),
            quantity: order.quantity,
            direction: order.direction,
            fill_cost: Some(price),
            commission,
        }));

        Ok(())
    }
}
