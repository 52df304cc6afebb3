use crate::data::{BarField, DataError, DataSource};
use crate::event::{Event, EventQueue, SignalDirection, SignalEvent};
use crate::strategy::{sma, SignalGenerator};
use indexmap::IndexMap;

//per-symbol stance owned by the strategy, never read by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stance {
    Out,
    Long,
}

//moving-average crossover strategy
//emits a long signal when the short sma crosses above the long sma while
//out of the market, and an exit signal when it crosses back below
pub struct MovingAverageCrossStrategy {
    strategy_id: u32,
    short_window: usize,
    long_window: usize,
    stance: IndexMap<String, Stance>,
}

impl MovingAverageCrossStrategy {
    pub fn new(symbols: &[String], short_window: usize, long_window: usize) -> Self {
        let stance = symbols.iter().map(|s| (s.clone(), Stance::Out)).collect();
        MovingAverageCrossStrategy {
            strategy_id: 1,
            short_window,
            long_window,
            stance,
        }
    }
}

impl SignalGenerator for MovingAverageCrossStrategy {
    fn calculate_signals(
        &mut self,
        data: &dyn DataSource,
        queue: &mut EventQueue,
    ) -> Result<(), DataError> {
        for symbol in data.symbols() {
            let closes = data.latest_bars_values(symbol, BarField::AdjClose, self.long_window)?;

            //not enough history released yet
            if closes.len() < self.long_window {
                continue;
            }

            let short_sma = match sma(&closes[closes.len() - self.short_window..]) {
                Some(v) => v,
                None => continue,
            };
            let long_sma = match sma(&closes) {
                Some(v) => v,
                None => continue,
            };

            let timestamp = data.latest_bar_timestamp(symbol)?;
            let stance = self.stance.entry(symbol.clone()).or_insert(Stance::Out);

            if short_sma > long_sma && *stance == Stance::Out {
                queue.push(Event::Signal(SignalEvent::new(
                    self.strategy_id,
                    symbol.clone(),
                    timestamp,
                    SignalDirection::Long,
                    1.0,
                )));
                *stance = Stance::Long;
            } else if short_sma < long_sma && *stance == Stance::Long {
                queue.push(Event::Signal(SignalEvent::new(
                    self.strategy_id,
                    symbol.clone(),
                    timestamp,
                    SignalDirection::Exit,
                    1.0,
                )));
                *stance = Stance::Out;
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "Moving Average Crossover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, HistoricCsvDataSource};
    use chrono::NaiveDate;

    fn source_from_closes(closes: &[f64]) -> HistoricCsvDataSource {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let timestamp = NaiveDate::from_ymd_opt(2020, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
                    + chrono::Duration::days(i as i64);
                Bar::new_unchecked(
                    timestamp,
                    price,
                    price,
                    price,
                    price,
                    1000.0,
                    price,
                    "X".to_string(),
                )
            })
            .collect();

        let mut map = IndexMap::new();
        map.insert("X".to_string(), bars);
        HistoricCsvDataSource::from_bars(map)
    }

    //drives the source to exhaustion, collecting every emitted signal
    fn run_signals(closes: &[f64], short: usize, long: usize) -> Vec<SignalDirection> {
        let mut source = source_from_closes(closes);
        let symbols = vec!["X".to_string()];
        let mut strategy = MovingAverageCrossStrategy::new(&symbols, short, long);
        let mut queue = EventQueue::new();
        let mut signals = Vec::new();

        while source.advance(&mut queue) {
            queue.pop();
            strategy.calculate_signals(&source, &mut queue).unwrap();
            while let Some(event) = queue.pop() {
                if let Event::Signal(signal) = event {
                    signals.push(signal.direction);
                }
            }
        }
        signals
    }

    #[test]
    fn uptrend_goes_long_then_downtrend_exits() {
        //rise long enough to cross, then fall back
        let closes = [
            10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 18.0, 16.0, 12.0, 8.0, 6.0, 4.0,
        ];
        let signals = run_signals(&closes, 2, 4);

        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0], SignalDirection::Long);
        assert_eq!(signals[1], SignalDirection::Exit);
    }

    #[test]
    fn no_signal_before_the_long_window_fills() {
        let closes = [10.0, 11.0, 12.0];
        let signals = run_signals(&closes, 2, 4);
        assert!(signals.is_empty());
    }

    #[test]
    fn truncated_data_reproduces_the_same_prefix() {
        //no look-ahead: signals up to tick t do not depend on later bars
        let closes = [
            10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 18.0, 16.0, 12.0, 8.0, 6.0, 4.0,
        ];
        let full = run_signals(&closes, 2, 4);
        let truncated = run_signals(&closes[..8], 2, 4);

        assert!(full.starts_with(&truncated));
    }
}
