use statrs::statistics::Statistics;

//annualized risk-adjusted return against a zero benchmark
//periods_per_year matches the bar frequency: 252 for daily bars,
//252*6.5*60 for minute bars
//returns NaN when the return variance is zero; a backtest with no
//variance is a valid outcome, not an error
pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return f64::NAN;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if std_dev == 0.0 {
        return f64::NAN;
    }

    periods_per_year.sqrt() * mean / std_dev
}

//drawdown and drawdown-duration series over a cumulative growth curve
#[derive(Debug, Clone)]
pub struct DrawdownSeries {
    pub drawdown: Vec<f64>,
    pub duration: Vec<u32>,
}

impl DrawdownSeries {
    pub fn max_drawdown(&self) -> f64 {
        self.drawdown.iter().copied().fold(0.0, f64::max)
    }

    pub fn max_duration(&self) -> u32 {
        self.duration.iter().copied().max().unwrap_or(0)
    }
}

//running high-water-mark recurrence over the growth-factor series
//index 0 has no drawdown or duration defined and stays at zero
pub fn drawdowns(pnl: &[f64]) -> DrawdownSeries {
    let mut drawdown = vec![0.0; pnl.len()];
    let mut duration = vec![0u32; pnl.len()];

    if pnl.is_empty() {
        return DrawdownSeries { drawdown, duration };
    }

    let mut hwm = pnl[0];
    for t in 1..pnl.len() {
        hwm = hwm.max(pnl[t]);
        drawdown[t] = hwm - pnl[t];
        duration[t] = if drawdown[t] == 0.0 {
            0
        } else {
            duration[t - 1] + 1
        };
    }

    DrawdownSeries { drawdown, duration }
}
