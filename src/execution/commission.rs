//injectable commission policy
//any model deterministic in quantity and monotonic-in-quantity will do
pub trait CommissionModel {
    fn commission(&self, quantity: u32) -> f64;
}

//tiered per-unit schedule with a fixed minimum, lower rate above a
//quantity threshold
#[derive(Debug, Clone)]
pub struct TieredCommission {
    pub minimum: f64,
    pub small_rate: f64,
    pub large_rate: f64,
    pub threshold: u32,
}

impl Default for TieredCommission {
    fn default() -> Self {
        TieredCommission {
            minimum: 1.3,
            small_rate: 0.013,
            large_rate: 0.008,
            threshold: 500,
        }
    }
}

impl CommissionModel for TieredCommission {
    fn commission(&self, quantity: u32) -> f64 {
        let rate = if quantity <= self.threshold {
            self.small_rate
        } else {
            self.large_rate
        };
        self.minimum.max(rate * quantity as f64)
    }
}
