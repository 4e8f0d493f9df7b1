use price_estimator::dataset::{Dataset, Observation};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generator for `(mileage, price)` observations around
/// `price = base_price + depreciation × mileage`.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticMarket {
    pub base_price: f64,
    pub depreciation: f64,
    pub max_mileage: f64,
    /// Half-width of the uniform price noise.
    pub noise: f64,
    pub seed: u64,
}

impl Default for SyntheticMarket {
    fn default() -> Self {
        Self {
            base_price: 8_500.0,
            depreciation: -0.0215,
            max_mileage: 250_000.0,
            noise: 500.0,
            seed: 42,
        }
    }
}

impl SyntheticMarket {
    /// Generates `n` observations. Same seed, same data.
    pub fn observations(&self, n: usize) -> Vec<Observation> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..n)
            .map(|_| {
                let mileage = rng.random_range(0.0..self.max_mileage);
                let noise = if self.noise > 0.0 {
                    rng.random_range(-self.noise..=self.noise)
                } else {
                    0.0
                };
                Observation::new(mileage, self.base_price + self.depreciation * mileage + noise)
            })
            .collect()
    }

    /// Generates an `n`-observation [`Dataset`].
    pub fn dataset(&self, n: usize) -> Dataset {
        Dataset::new(self.observations(n)).expect("synthetic observations are finite")
    }
}
