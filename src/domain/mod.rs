//! Domain layer: Core business types and logic.
//!
//! Pure types with strict encoding rules; the closed enums make the
//! feature encoding total by construction.

mod assessment;
mod customer;

pub use assessment::{RiskAssessment, RiskCategory};
pub use customer::{
    ChurnLabel, Contract, CustomerProfile, CustomerRecord, FeatureVector, InternetService,
    TrainingSet, FEATURE_NAMES,
};
