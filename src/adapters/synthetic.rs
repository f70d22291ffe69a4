//! Synthetic dataset adapter: Seeded generation of labeled customer records.
//!
//! The churn label is drawn independently of every other field (P(Yes)=0.3).
//! That makes the learned decision boundary essentially noise, which is a
//! deliberate property of the demonstration dataset and preserved here.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{
    ChurnLabel, Contract, CustomerProfile, CustomerRecord, InternetService, TrainingSet,
};

/// Default dataset seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 500;

/// Probability a generated customer churned.
const CHURN_RATE: f64 = 0.3;

/// Seeded generator for the synthetic training set.
///
/// Pure generation, no I/O; the same seed and row count always produce the
/// same records.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticDataGenerator {
    seed: u64,
    rows: usize,
}

impl SyntheticDataGenerator {
    #[must_use]
    pub fn new(seed: u64, rows: usize) -> Self {
        Self { seed, rows }
    }

    /// Generate the labeled dataset.
    #[must_use]
    pub fn generate(&self) -> TrainingSet {
        let mut rng = ChaCha20Rng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.rows);

        for _ in 0..self.rows {
            let profile = CustomerProfile {
                tenure: rng.gen_range(1..=72),
                monthly_charges: rng.gen_range(30.0..120.0),
                contract: Contract::ALL[rng.gen_range(0..Contract::ALL.len())],
                internet_service: InternetService::ALL
                    [rng.gen_range(0..InternetService::ALL.len())],
            };
            let churn = if rng.gen_bool(CHURN_RATE) {
                ChurnLabel::Yes
            } else {
                ChurnLabel::No
            };

            records.push(CustomerRecord { profile, churn });
        }

        TrainingSet {
            records,
            seed: self.seed,
        }
    }
}

impl Default for SyntheticDataGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_ROWS)
    }
}
