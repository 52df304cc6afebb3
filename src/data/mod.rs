pub mod bar;
pub mod historic_csv;
pub mod source;

pub use bar::{Bar, BarError, BarField};
pub use historic_csv::HistoricCsvDataSource;
pub use source::{DataError, DataSource};
