//! Classifier port: Trait for the churn risk model backend.
//!
//! This trait abstracts the concrete ensemble implementation from the
//! application logic.

use crate::domain::FeatureVector;

/// Errors that can occur in the model backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("model has not been fitted")]
    NotFitted,

    #[error("invalid training set: {0}")]
    InvalidTrainingSet(String),
}

/// Trait for the binary churn classifier.
///
/// Implementations are fitted exactly once per process lifetime and then
/// shared read-only across all prediction requests.
pub trait ChurnClassifier: Send + Sync {
    /// Fit the model on encoded feature vectors and 0/1 churn labels.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidTrainingSet` if the inputs are empty or
    /// their lengths differ.
    fn fit(&mut self, x: &[FeatureVector], y: &[u8]) -> Result<(), ModelError>;

    /// Predict the class (0 = stays, 1 = churns) for one encoded vector.
    ///
    /// # Errors
    /// Returns `ModelError::NotFitted` if called before `fit`.
    fn predict(&self, vector: &FeatureVector) -> Result<u8, ModelError>;

    /// Estimated probability of churn (class 1), in [0.0, 1.0].
    ///
    /// # Errors
    /// Returns `ModelError::NotFitted` if called before `fit`.
    fn predict_probability(&self, vector: &FeatureVector) -> Result<f64, ModelError>;
}
