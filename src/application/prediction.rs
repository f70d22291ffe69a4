//! Prediction service: The churn-risk pipeline.
//!
//! Composes the feature encoder and the fitted classifier: raw operator
//! inputs go in, a risk category and a probability percentage come out.
//! Pure request/response; the only shared state is the fitted model.

use std::sync::Arc;

use crate::domain::{CustomerProfile, RiskAssessment};
use crate::ports::ChurnClassifier;
use crate::Result;

/// Service running the prediction pipeline against a shared fitted model.
pub struct PredictionService<C>
where
    C: ChurnClassifier,
{
    model: Arc<C>,
}

impl<C> PredictionService<C>
where
    C: ChurnClassifier,
{
    /// Create a service over an already-fitted model.
    pub fn new(model: Arc<C>) -> Self {
        Self { model }
    }

    /// Assess the churn risk of one customer profile.
    ///
    /// Encodes the profile, asks the model for class and probability, and
    /// maps them to a category and a percentage. The class vote decides the
    /// category; the probability is display information.
    ///
    /// # Errors
    /// Returns an error if the model is not fitted.
    pub fn predict_risk(&self, profile: &CustomerProfile) -> Result<RiskAssessment> {
        let vector = profile.encode();

        let predicted_class = self.model.predict(&vector)?;
        let churn_probability = self.model.predict_probability(&vector)?;

        let assessment = RiskAssessment::new(predicted_class, churn_probability);

        tracing::info!(
            category = %assessment.category,
            probability_percent = format_args!("{:.1}", assessment.probability_percent),
            "risk assessed"
        );

        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bootstrap::{initialize, EngineConfig};
    use crate::domain::{Contract, FeatureVector, InternetService, RiskCategory};
    use crate::ports::ModelError;

    /// Stub classifier returning fixed outputs, for testing the pipeline
    /// through the port.
    struct FixedClassifier {
        class: u8,
        probability: f64,
    }

    impl ChurnClassifier for FixedClassifier {
        fn fit(&mut self, _x: &[FeatureVector], _y: &[u8]) -> Result<(), ModelError> {
            Ok(())
        }

        fn predict(&self, _vector: &FeatureVector) -> Result<u8, ModelError> {
            Ok(self.class)
        }

        fn predict_probability(&self, _vector: &FeatureVector) -> Result<f64, ModelError> {
            Ok(self.probability)
        }
    }

    fn sample_profile() -> CustomerProfile {
        CustomerProfile {
            tenure: 24,
            monthly_charges: 65.0,
            contract: Contract::MonthToMonth,
            internet_service: InternetService::FiberOptic,
        }
    }

    #[test]
    fn test_category_mirrors_predicted_class() {
        let high = PredictionService::new(Arc::new(FixedClassifier {
            class: 1,
            probability: 0.9,
        }));
        let safe = PredictionService::new(Arc::new(FixedClassifier {
            class: 0,
            probability: 0.1,
        }));

        let profile = sample_profile();
        assert_eq!(
            high.predict_risk(&profile).expect("stub").category,
            RiskCategory::HighRisk
        );
        assert_eq!(
            safe.predict_risk(&profile).expect("stub").category,
            RiskCategory::Safe
        );
    }

    #[test]
    fn test_tie_probability_with_safe_class_is_tolerated() {
        // An evenly split vote can report 0.5 with class 0.
        let service = PredictionService::new(Arc::new(FixedClassifier {
            class: 0,
            probability: 0.5,
        }));

        let assessment = service.predict_risk(&sample_profile()).expect("stub");
        assert_eq!(assessment.category, RiskCategory::Safe);
        assert!((assessment.probability_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_end_to_end_prediction_is_deterministic() {
        let context = initialize(&EngineConfig {
            seed: 42,
            rows: 120,
            trees: 15,
        })
        .expect("startup should succeed");
        let service = PredictionService::new(context.model.clone());

        let profile = sample_profile();
        assert_eq!(profile.encode().as_slice(), &[24.0, 65.0, 0.0, 1.0]);

        let first = service.predict_risk(&profile).expect("fitted model");
        let second = service.predict_risk(&profile).expect("fitted model");

        assert!((0.0..=100.0).contains(&first.probability_percent));
        assert_eq!(first.category, second.category);
        assert!((first.probability_percent - second.probability_percent).abs() < f64::EPSILON);
    }
}
