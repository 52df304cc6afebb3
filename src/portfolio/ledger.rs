use crate::data::{BarField, DataError, DataSource};
use crate::event::{Event, EventQueue, FillEvent, OrderEvent, SignalDirection, SignalEvent};
use crate::metrics::EquityCurve;
use crate::portfolio::snapshot::{HoldingsSnapshot, PositionSnapshot};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

//ledger of positions, holdings and cash, driven exclusively by market and
//fill events dispatched from the backtest driver
pub struct Portfolio {
    symbols: Vec<String>,
    initial_capital: f64,
    //fixed lot for the naive sizing policy
    lot_size: u32,

    //live state
    current_positions: IndexMap<String, i64>,
    current_values: IndexMap<String, f64>,
    current_cash: f64,
    current_commission: f64,
    current_total: f64,

    //append-only per-step logs, one entry per market event plus the seed row
    all_positions: Vec<PositionSnapshot>,
    all_holdings: Vec<HoldingsSnapshot>,
}

impl Portfolio {
    //seeds the ledger at start_date with flat positions and all capital in cash
    pub fn new(symbols: &[String], start_date: DateTime<Utc>, initial_capital: f64) -> Self {
        Self::with_lot_size(symbols, start_date, initial_capital, 100)
    }

    pub fn with_lot_size(
        symbols: &[String],
        start_date: DateTime<Utc>,
        initial_capital: f64,
        lot_size: u32,
    ) -> Self {
        let current_positions: IndexMap<String, i64> =
            symbols.iter().map(|s| (s.clone(), 0)).collect();
        let current_values: IndexMap<String, f64> =
            symbols.iter().map(|s| (s.clone(), 0.0)).collect();

        let all_positions = vec![PositionSnapshot {
            timestamp: start_date,
            positions: current_positions.clone(),
        }];
        let all_holdings = vec![HoldingsSnapshot {
            timestamp: start_date,
            values: current_values.clone(),
            cash: initial_capital,
            commission: 0.0,
            total: initial_capital,
        }];

        Portfolio {
            symbols: symbols.to_vec(),
            initial_capital,
            lot_size,
            current_positions,
            current_values,
            current_cash: initial_capital,
            current_commission: 0.0,
            current_total: initial_capital,
            all_positions,
            all_holdings,
        }
    }

    //marks every position to the latest adjusted close and appends one
    //position snapshot and one holdings snapshot
    //called exactly once per market event, after signal generation
    pub fn update_timeindex(&mut self, data: &dyn DataSource) -> Result<(), DataError> {
        let timestamp = data.latest_bar_timestamp(&self.symbols[0])?;

        //revalue the live holdings first so the snapshot is a pure copy
        let mut total = self.current_cash;
        for symbol in &self.symbols {
            let price = data.latest_bar_value(symbol, BarField::AdjClose)?;
            let value = self.current_positions[symbol] as f64 * price;
            self.current_values[symbol] = value;
            total += value;
        }
        self.current_total = total;

        self.all_positions.push(PositionSnapshot {
            timestamp,
            positions: self.current_positions.clone(),
        });
        self.all_holdings.push(HoldingsSnapshot {
            timestamp,
            values: self.current_values.clone(),
            cash: self.current_cash,
            commission: self.current_commission,
            total: self.current_total,
        });

        Ok(())
    }

    //translates a signal into at most one order via the naive fixed-lot
    //policy and pushes it onto the queue
    pub fn update_signal(
        &mut self,
        signal: &SignalEvent,
        queue: &mut EventQueue,
    ) -> Result<(), DataError> {
        match self.generate_naive_order(signal)? {
            Some(order) => queue.push(Event::Order(order)),
            None => {
                //distinct from "no signal": the requested direction is already
                //satisfied, so the policy deliberately stands pat
                println!(
                    "portfolio: {:?} signal for {} ignored, position already {}",
                    signal.direction, signal.symbol, self.current_positions[&signal.symbol]
                );
            }
        }
        Ok(())
    }

    //fixed-lot sizing: open a lot from flat, flatten on exit, never pyramid
    //or reverse in one step
    fn generate_naive_order(
        &self,
        signal: &SignalEvent,
    ) -> Result<Option<OrderEvent>, DataError> {
        use crate::event::OrderDirection::{Buy, Sell};

        let current = *self
            .current_positions
            .get(&signal.symbol)
            .ok_or_else(|| DataError::UnknownSymbol(signal.symbol.clone()))?;

        let order = match signal.direction {
            SignalDirection::Long if current == 0 => {
                Some(OrderEvent::market(signal.symbol.clone(), self.lot_size, Buy))
            }
            SignalDirection::Short if current == 0 => {
                Some(OrderEvent::market(signal.symbol.clone(), self.lot_size, Sell))
            }
            SignalDirection::Exit if current > 0 => Some(OrderEvent::market(
                signal.symbol.clone(),
                current.unsigned_abs() as u32,
                Sell,
            )),
            SignalDirection::Exit if current < 0 => Some(OrderEvent::market(
                signal.symbol.clone(),
                current.unsigned_abs() as u32,
                Buy,
            )),
            _ => None,
        };

        Ok(order)
    }

    //applies a fill to positions and holdings together
    //the price lookup happens before any mutation, so a lookup failure
    //leaves the ledger untouched
    pub fn update_fill(&mut self, fill: &FillEvent, data: &dyn DataSource) -> Result<(), DataError> {
        if !self.current_positions.contains_key(&fill.symbol) {
            return Err(DataError::UnknownSymbol(fill.symbol.clone()));
        }

        let price = match fill.fill_cost {
            Some(price) => price,
            None => data.latest_bar_value(&fill.symbol, BarField::AdjClose)?,
        };

        let signed_qty = fill.signed_quantity();
        let cost = signed_qty as f64 * price;

        self.current_positions[&fill.symbol] += signed_qty;
        self.current_values[&fill.symbol] += cost;
        self.current_commission += fill.commission;
        self.current_cash -= cost + fill.commission;
        self.current_total -= cost + fill.commission;

        Ok(())
    }

    //builds the equity curve from the full holdings log
    pub fn create_equity_curve(&self) -> EquityCurve {
        EquityCurve::from_holdings(&self.all_holdings)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn position(&self, symbol: &str) -> Option<i64> {
        self.current_positions.get(symbol).copied()
    }

    pub fn cash(&self) -> f64 {
        self.current_cash
    }

    pub fn commission_paid(&self) -> f64 {
        self.current_commission
    }

    pub fn total(&self) -> f64 {
        self.current_total
    }

    //read-only views over the per-step logs
    pub fn all_positions(&self) -> &[PositionSnapshot] {
        &self.all_positions
    }

    pub fn all_holdings(&self) -> &[HoldingsSnapshot] {
        &self.all_holdings
    }
}
