use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//summary statistics of a completed backtest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    //final growth factor minus one
    pub total_return: f64,
    //NaN when the run had zero return variance
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub max_drawdown_duration: u32,
}

impl SummaryStats {
    //prints the statistics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&format!("{:.2}%", self.total_return * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(&format!("{:.3}", self.sharpe_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.max_drawdown * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Drawdown Duration"),
            Cell::new(&format!("{}", self.max_drawdown_duration)),
        ]));

        table.printstd();
    }
}
