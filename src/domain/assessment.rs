//! Risk assessment types.
//!
//! Represents the output of the churn prediction pipeline.

use serde::{Deserialize, Serialize};

/// Binary risk decision derived from the classifier's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    /// The model predicts churn; retention action advised
    HighRisk,
    /// The model predicts the customer stays
    Safe,
}

impl RiskCategory {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::HighRisk => "High risk - customer likely to churn",
            Self::Safe => "Safe - customer unlikely to churn",
        }
    }

    /// Static retention-strategy advice. Not part of the model's output.
    #[must_use]
    pub fn retention_strategy(&self) -> &'static str {
        match self {
            Self::HighRisk => "Offer a 15% discount immediately",
            Self::Safe => "No retention action required",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::HighRisk => (244, 63, 94), // Rose (#F43F5E)
            Self::Safe => (16, 185, 129),    // Emerald (#10B981)
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighRisk => write!(f, "HIGH RISK"),
            Self::Safe => write!(f, "SAFE"),
        }
    }
}

/// Result of one prediction request. Derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk classification, decided by the ensemble's majority vote
    pub category: RiskCategory,

    /// Estimated churn probability as a percentage (0.0 to 100.0)
    pub probability_percent: f64,

    /// Timestamp of the assessment
    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Create an assessment from the model's raw outputs.
    ///
    /// The predicted class, not the probability threshold, is the source of
    /// truth for the category: with an even vote split the probability can
    /// read 0.5 while the label stays `Safe`.
    #[must_use]
    pub fn new(predicted_class: u8, churn_probability: f64) -> Self {
        let category = if predicted_class == 1 {
            RiskCategory::HighRisk
        } else {
            RiskCategory::Safe
        };

        Self {
            category,
            probability_percent: (churn_probability * 100.0).clamp(0.0, 100.0),
            assessed_at: chrono::Utc::now(),
        }
    }
}
