use crate::data::bar::Bar;
use crate::data::source::{DataError, DataSource};
use crate::event::{Event, EventQueue};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    datetime: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    adj_close: f64,
}

//replays pre-loaded bar series, releasing one bar per symbol per advance
//the release cursor is the only mutable state, so truncating the input
//reproduces the same released prefix bar for bar
pub struct HistoricCsvDataSource {
    symbols: Vec<String>,
    //full series per symbol, sorted by timestamp
    bars: IndexMap<String, Vec<Bar>>,
    //number of bars released so far per symbol
    released: IndexMap<String, usize>,
}

impl HistoricCsvDataSource {
    //loads <dir>/<SYMBOL>.csv for every symbol in the universe
    pub fn new<P: AsRef<Path>>(csv_dir: P, symbols: &[String]) -> Result<Self> {
        let mut bars = IndexMap::new();

        for symbol in symbols {
            let path = csv_dir.as_ref().join(format!("{}.csv", symbol));
            let series = load_symbol_csv(&path, symbol)
                .context(format!("Failed to load bars for {} from {:?}", symbol, path))?;
            bars.insert(symbol.clone(), series);
        }

        Ok(Self::from_bars(bars))
    }

    //builds a source from in-memory series, keyed by symbol
    pub fn from_bars(mut bars: IndexMap<String, Vec<Bar>>) -> Self {
        for series in bars.values_mut() {
            series.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        }

        let symbols: Vec<String> = bars.keys().cloned().collect();
        let released = symbols.iter().map(|s| (s.clone(), 0)).collect();

        HistoricCsvDataSource {
            symbols,
            bars,
            released,
        }
    }

    fn released_slice(&self, symbol: &str) -> Result<&[Bar], DataError> {
        let series = self
            .bars
            .get(symbol)
            .ok_or_else(|| DataError::UnknownSymbol(symbol.to_string()))?;
        let count = self.released[symbol];
        Ok(&series[..count])
    }
}

impl DataSource for HistoricCsvDataSource {
    fn symbols(&self) -> &[String] {
        &self.symbols
    }

    fn advance(&mut self, queue: &mut EventQueue) -> bool {
        //exhausted once every symbol's series is fully released
        let exhausted = self
            .symbols
            .iter()
            .all(|s| self.released[s] >= self.bars[s].len());

        if exhausted {
            return false;
        }

        for symbol in &self.symbols {
            let count = self.released.get_mut(symbol).unwrap();
            if *count < self.bars[symbol].len() {
                *count += 1;
            }
        }

        queue.push(Event::Market);
        true
    }

    fn latest_bar(&self, symbol: &str) -> Result<&Bar, DataError> {
        self.released_slice(symbol)?
            .last()
            .ok_or_else(|| DataError::NoBars(symbol.to_string()))
    }

    fn latest_bars(&self, symbol: &str, n: usize) -> Result<&[Bar], DataError> {
        let released = self.released_slice(symbol)?;
        if released.is_empty() {
            return Err(DataError::NoBars(symbol.to_string()));
        }
        let start = released.len().saturating_sub(n);
        Ok(&released[start..])
    }
}

fn load_symbol_csv(path: &Path, symbol: &str) -> Result<Vec<Bar>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        let timestamp = parse_timestamp(&record.datetime).context(format!(
            "Failed to parse timestamp '{}' at line {}",
            record.datetime,
            index + 2
        ))?;

        bars.push(Bar::new_unchecked(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
            record.adj_close,
            symbol.to_string(),
        ));
    }

    Ok(bars)
}

//accepts rfc3339 timestamps or bare dates (daily bars)
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc())
}
