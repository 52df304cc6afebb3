use crate::data::bar::{Bar, BarField};
use crate::event::EventQueue;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol {0} is not available in the historical data set")]
    UnknownSymbol(String),
    #[error("No bars released yet for symbol {0}")]
    NoBars(String),
}

//read contract over historical bars, released one simulated step at a time
//all lookups refer only to bars already released up to the current step, so a
//consumer can never observe future data
pub trait DataSource {
    //symbols in the configured universe, in configuration order
    fn symbols(&self) -> &[String];

    //releases the next bar per symbol and pushes exactly one Market event,
    //or returns false when the data is exhausted (nothing is pushed)
    fn advance(&mut self, queue: &mut EventQueue) -> bool;

    //returns the most recently released bar for a symbol
    fn latest_bar(&self, symbol: &str) -> Result<&Bar, DataError>;

    //returns up to n of the most recently released bars, oldest first
    fn latest_bars(&self, symbol: &str, n: usize) -> Result<&[Bar], DataError>;

    //returns the timestamp of the most recently released bar
    fn latest_bar_timestamp(&self, symbol: &str) -> Result<DateTime<Utc>, DataError> {
        Ok(self.latest_bar(symbol)?.timestamp)
    }

    //returns one field of the most recently released bar
    fn latest_bar_value(&self, symbol: &str, field: BarField) -> Result<f64, DataError> {
        Ok(self.latest_bar(symbol)?.field(field))
    }

    //returns one field across up to n of the most recently released bars
    fn latest_bars_values(
        &self,
        symbol: &str,
        field: BarField,
        n: usize,
    ) -> Result<Vec<f64>, DataError> {
        Ok(self
            .latest_bars(symbol, n)?
            .iter()
            .map(|bar| bar.field(field))
            .collect())
    }
}
