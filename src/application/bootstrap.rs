//! Startup initialization: generate the dataset and fit the model once.
//!
//! The result is an immutable [`EngineContext`] threaded explicitly through
//! the services. There is no global state; re-invoking [`initialize`] builds
//! a fresh, independent context.

use std::sync::Arc;

use crate::adapters::forest::{RandomForest, DEFAULT_TREES};
use crate::adapters::synthetic::{SyntheticDataGenerator, DEFAULT_ROWS, DEFAULT_SEED};
use crate::domain::TrainingSet;
use crate::ports::ChurnClassifier;
use crate::Result;

/// Startup configuration, read from the environment.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Dataset seed (`CHURNSCOPE_SEED`)
    pub seed: u64,
    /// Dataset size (`CHURNSCOPE_ROWS`)
    pub rows: usize,
    /// Forest size (`CHURNSCOPE_TREES`)
    pub trees: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            rows: DEFAULT_ROWS,
            trees: DEFAULT_TREES,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the environment, keeping defaults for anything
    /// missing or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seed: env_parse("CHURNSCOPE_SEED", defaults.seed),
            rows: env_parse("CHURNSCOPE_ROWS", defaults.rows).max(1),
            trees: env_parse("CHURNSCOPE_TREES", defaults.trees).max(1),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// The process-wide dataset + fitted model handle.
///
/// Built once at startup and shared read-only; prediction requests and the
/// chart aggregations both borrow from it for the process lifetime.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub dataset: Arc<TrainingSet>,
    pub model: Arc<RandomForest>,
}

/// Generate the synthetic dataset and fit the forest on it.
///
/// # Errors
/// Returns an error if fitting fails; that is fatal to startup, there is no
/// fallback model.
pub fn initialize(config: &EngineConfig) -> Result<EngineContext> {
    tracing::info!(
        seed = config.seed,
        rows = config.rows,
        "generating synthetic training data"
    );
    let dataset = SyntheticDataGenerator::new(config.seed, config.rows).generate();

    let (x, y) = dataset.design_matrix();
    let mut model = RandomForest::new(config.trees);
    model.fit(&x, &y)?;

    tracing::info!(trees = config.trees, "churn risk model fitted");

    Ok(EngineContext {
        dataset: Arc::new(dataset),
        model: Arc::new(model),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EngineConfig {
        EngineConfig {
            seed: 42,
            rows: 60,
            trees: 5,
        }
    }

    #[test]
    fn test_initialize_produces_fitted_context() {
        let context = initialize(&small_config()).expect("startup should succeed");
        assert_eq!(context.dataset.len(), 60);
        assert!(context.model.is_fitted());
    }

    #[test]
    fn test_reinitialization_is_independent() {
        let config = small_config();
        let a = initialize(&config).expect("startup should succeed");
        let b = initialize(&config).expect("startup should succeed");

        // Two calls build equal but unshared state.
        assert_eq!(*a.dataset, *b.dataset);
        assert!(!Arc::ptr_eq(&a.dataset, &b.dataset));
        assert!(b.model.is_fitted());
    }
}
