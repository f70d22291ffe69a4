//! Random forest adapter: Implementation of the classifier port.
//!
//! An ensemble of CART trees, each fitted on a bootstrap sample of the
//! training data. The majority vote across trees decides the class; the
//! fraction of trees voting churn is the probability estimate.
//!
//! All randomness is seeded: each tree derives its bootstrap seed from the
//! forest seed, so a fitted forest is reproducible run to run.

mod tree;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::FeatureVector;
use crate::ports::{ChurnClassifier, ModelError};

use tree::DecisionTree;

/// Default number of trees in the forest.
pub const DEFAULT_TREES: usize = 100;

/// Default forest seed; override with [`RandomForest::with_seed`].
const DEFAULT_SEED: u64 = 7;

/// Random forest churn classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_trees: usize,
    max_depth: Option<usize>,
    seed: u64,
}

impl RandomForest {
    /// Create an unfitted forest. `n_trees` is clamped to at least 1.
    #[must_use]
    pub fn new(n_trees: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_trees: n_trees.max(1),
            max_depth: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Cap the depth of every tree. Unlimited by default.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the seed the per-tree bootstrap seeds derive from.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Whether `fit` has completed.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Number of trees the forest is configured for.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Count of trees voting churn for one sample.
    fn churn_votes(&self, vector: &FeatureVector) -> Result<usize, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }

        let mut votes = 0;
        for tree in &self.trees {
            if tree.predict(vector).ok_or(ModelError::NotFitted)? == 1 {
                votes += 1;
            }
        }
        Ok(votes)
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(DEFAULT_TREES)
    }
}

impl ChurnClassifier for RandomForest {
    fn fit(&mut self, x: &[FeatureVector], y: &[u8]) -> Result<(), ModelError> {
        if x.is_empty() {
            return Err(ModelError::InvalidTrainingSet(
                "training set is empty".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(ModelError::InvalidTrainingSet(format!(
                "{} feature rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if let Some(&bad) = y.iter().find(|&&label| label > 1) {
            return Err(ModelError::InvalidTrainingSet(format!(
                "label {bad} outside {{0, 1}}"
            )));
        }

        let n_samples = x.len();
        let mut trees = Vec::with_capacity(self.n_trees);

        for i in 0..self.n_trees {
            let indices = bootstrap_sample(n_samples, self.seed.wrapping_add(i as u64));
            let mut tree = DecisionTree::new(self.max_depth);
            tree.fit(x, y, indices);
            trees.push(tree);
        }

        self.trees = trees;
        Ok(())
    }

    fn predict(&self, vector: &FeatureVector) -> Result<u8, ModelError> {
        let votes = self.churn_votes(vector)?;
        // Strict majority; an even split predicts no churn.
        Ok(u8::from(votes * 2 > self.trees.len()))
    }

    fn predict_probability(&self, vector: &FeatureVector) -> Result<f64, ModelError> {
        let votes = self.churn_votes(vector)?;
        Ok(votes as f64 / self.trees.len() as f64)
    }
}

/// Sample `n_samples` indices with replacement, seeded.
fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_data() -> (Vec<FeatureVector>, Vec<u8>) {
        // Short-tenure month-to-month customers churn, long-tenure two-year
        // customers stay.
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..20 {
            x.push(FeatureVector([
                1.0 + i as f32,
                90.0 + i as f32,
                0.0,
                1.0,
            ]));
            y.push(1);
            x.push(FeatureVector([
                50.0 + i as f32,
                35.0 + i as f32,
                2.0,
                0.0,
            ]));
            y.push(0);
        }
        (x, y)
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let (x, y) = separable_data();
        let mut forest = RandomForest::new(25).with_seed(3);
        forest.fit(&x, &y).expect("fit should succeed");
        assert!(forest.is_fitted());

        let churner = FeatureVector([3.0, 95.0, 0.0, 1.0]);
        let stayer = FeatureVector([60.0, 40.0, 2.0, 0.0]);

        assert_eq!(forest.predict(&churner).expect("fitted"), 1);
        assert_eq!(forest.predict(&stayer).expect("fitted"), 0);
    }

    #[test]
    fn test_probability_bounds_and_vote_consistency() {
        let (x, y) = separable_data();
        let mut forest = RandomForest::new(25).with_seed(3);
        forest.fit(&x, &y).expect("fit should succeed");

        for vector in &x {
            let p = forest.predict_probability(vector).expect("fitted");
            assert!((0.0..=1.0).contains(&p));

            // The vote, not the probability threshold, is the source of
            // truth; they may only disagree on an exact tie.
            let class = forest.predict(vector).expect("fitted");
            if p > 0.5 {
                assert_eq!(class, 1);
            } else if p < 0.5 {
                assert_eq!(class, 0);
            } else {
                assert_eq!(class, 0, "tie votes predict no churn");
            }
        }
    }

    #[test]
    fn test_seeded_fit_is_reproducible() {
        let (x, y) = separable_data();

        let mut a = RandomForest::new(15).with_seed(99);
        let mut b = RandomForest::new(15).with_seed(99);
        a.fit(&x, &y).expect("fit should succeed");
        b.fit(&x, &y).expect("fit should succeed");

        for vector in &x {
            assert_eq!(
                a.predict(vector).expect("fitted"),
                b.predict(vector).expect("fitted")
            );
            let pa = a.predict_probability(vector).expect("fitted");
            let pb = b.predict_probability(vector).expect("fitted");
            assert!((pa - pb).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_predict_before_fit_errors() {
        let forest = RandomForest::new(5);
        let v = FeatureVector([1.0, 1.0, 0.0, 0.0]);
        assert!(matches!(forest.predict(&v), Err(ModelError::NotFitted)));
        assert!(matches!(
            forest.predict_probability(&v),
            Err(ModelError::NotFitted)
        ));
    }

    #[test]
    fn test_fit_rejects_bad_training_sets() {
        let mut forest = RandomForest::new(5);
        let v = FeatureVector([1.0, 1.0, 0.0, 0.0]);

        assert!(matches!(
            forest.fit(&[], &[]),
            Err(ModelError::InvalidTrainingSet(_))
        ));
        assert!(matches!(
            forest.fit(&[v], &[0, 1]),
            Err(ModelError::InvalidTrainingSet(_))
        ));
        assert!(matches!(
            forest.fit(&[v], &[2]),
            Err(ModelError::InvalidTrainingSet(_))
        ));
    }

    #[test]
    fn test_bootstrap_sample_is_seeded_and_in_range() {
        let a = bootstrap_sample(50, 11);
        let b = bootstrap_sample(50, 11);
        let c = bootstrap_sample(50, 12);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|&i| i < 50));
    }
}
