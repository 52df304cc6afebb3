use crate::metrics::performance::{drawdowns, sharpe_ratio};
use crate::metrics::summary::SummaryStats;
use crate::portfolio::HoldingsSnapshot;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

//one row of the derived equity curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    //portfolio total at this step
    pub total: f64,
    //per-step percentage return; zero for the seed row
    pub returns: f64,
    //cumulative compounded growth factor, starting at 1.0
    pub equity: f64,
    //filled in by summary(); zero until then
    pub drawdown: f64,
}

//read-only time series derived from the holdings log at run end
#[derive(Debug, Clone)]
pub struct EquityCurve {
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    //per-step pct change of total and the cumulative product of
    //(1 + return); the seed row carries return 0 and growth 1.0
    pub fn from_holdings(holdings: &[HoldingsSnapshot]) -> Self {
        let mut points = Vec::with_capacity(holdings.len());
        let mut equity = 1.0;
        let mut prev_total: Option<f64> = None;

        for snapshot in holdings {
            let returns = match prev_total {
                Some(prev) if prev != 0.0 => (snapshot.total - prev) / prev,
                _ => 0.0,
            };
            equity *= 1.0 + returns;

            points.push(EquityPoint {
                timestamp: snapshot.timestamp,
                total: snapshot.total,
                returns,
                equity,
                drawdown: 0.0,
            });
            prev_total = Some(snapshot.total);
        }

        EquityCurve { points }
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    //computes the summary statistics and fills the drawdown column
    //recomputing is idempotent: the same curve yields the same numbers
    pub fn summary(&mut self, periods_per_year: f64) -> SummaryStats {
        let growth: Vec<f64> = self.points.iter().map(|p| p.equity).collect();
        let returns: Vec<f64> = self.points.iter().skip(1).map(|p| p.returns).collect();

        let total_return = growth.last().map(|g| g - 1.0).unwrap_or(0.0);
        let sharpe = sharpe_ratio(&returns, periods_per_year);
        let series = drawdowns(&growth);

        for (point, &drawdown) in self.points.iter_mut().zip(series.drawdown.iter()) {
            point.drawdown = drawdown;
        }

        SummaryStats {
            total_return,
            sharpe_ratio: sharpe,
            max_drawdown: series.max_drawdown(),
            max_drawdown_duration: series.max_duration(),
        }
    }

    //writes the curve as a delimited table keyed by timestamp, with the
    //column set downstream reporting expects
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .context(format!("Failed to create equity curve file: {:?}", path))?;

        writer.write_record(["timestamp", "total", "returns", "equity_curve", "drawdown"])?;

        for point in &self.points {
            writer.write_record([
                point.timestamp.to_rfc3339(),
                point.total.to_string(),
                point.returns.to_string(),
                point.equity.to_string(),
                point.drawdown.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
