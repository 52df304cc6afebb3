use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Symbol universe is empty")]
    EmptySymbols,
    #[error("Duplicate symbol in universe: {0}")]
    DuplicateSymbol(String),
    #[error("Initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
    #[error("Lot size must be positive")]
    ZeroLotSize,
    #[error("Periods per year must be positive, got {0}")]
    NonPositivePeriods(f64),
}

//moving-average crossover parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaCrossParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for MaCrossParams {
    fn default() -> Self {
        MaCrossParams {
            short_window: 10,
            long_window: 30,
        }
    }
}

//complete backtest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfiguration {
    //data
    pub data_dir: PathBuf,
    //ordered universe of distinct ticker symbols
    pub symbols: Vec<String>,

    //simulation settings
    pub initial_capital: f64,
    pub start_date: DateTime<Utc>,
    //pacing delay between steps; cosmetic, zero for deterministic runs
    pub heartbeat_ms: u64,
    pub lot_size: u32,
    //scaling constant matching the bar frequency (252 for daily bars)
    pub periods_per_year: f64,

    //strategy
    pub strategy: MaCrossParams,

    //optional output path
    pub output_equity_csv: Option<PathBuf>,
}

impl Default for BacktestConfiguration {
    fn default() -> Self {
        BacktestConfiguration {
            data_dir: PathBuf::from("data"),
            symbols: vec!["SPY".to_string()],
            initial_capital: 100_000.0,
            start_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            heartbeat_ms: 0,
            lot_size: 100,
            periods_per_year: 252.0,
            strategy: MaCrossParams::default(),
            output_equity_csv: None,
        }
    }
}

impl BacktestConfiguration {
    //fatal at construction: an invalid configuration never starts a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::EmptySymbols);
        }

        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            if !seen.insert(symbol) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }

        if self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }

        if self.lot_size == 0 {
            return Err(ConfigError::ZeroLotSize);
        }

        if self.periods_per_year <= 0.0 {
            return Err(ConfigError::NonPositivePeriods(self.periods_per_year));
        }

        Ok(())
    }

    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BacktestConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(BacktestConfiguration::default().validate().is_ok());
    }

    #[test]
    fn empty_universe_is_rejected() {
        let config = BacktestConfiguration {
            symbols: vec![],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySymbols)));
    }

    #[test]
    fn duplicate_symbols_are_rejected() {
        let config = BacktestConfiguration {
            symbols: vec!["X".to_string(), "X".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn non_positive_capital_is_rejected() {
        let config = BacktestConfiguration {
            initial_capital: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveCapital(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_the_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = BacktestConfiguration::default();
        config.to_json_file(&path).unwrap();
        let loaded = BacktestConfiguration::from_json_file(&path).unwrap();

        assert_eq!(loaded.symbols, config.symbols);
        assert_eq!(loaded.initial_capital, config.initial_capital);
        assert_eq!(loaded.strategy.long_window, config.strategy.long_window);
    }
}
