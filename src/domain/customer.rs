//! Customer data types and feature encoding for churn prediction.

use serde::{Deserialize, Serialize};

/// Contract length a customer has signed up for.
///
/// Closed enumeration; the encoding to model codes is total and bijective
/// over the three variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Contract {
    /// All variants, in code order. Drives closed-set selection in the UI.
    pub const ALL: [Self; 3] = [Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    /// Integer code the model was trained on.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::MonthToMonth => 0,
            Self::OneYear => 1,
            Self::TwoYear => 2,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Internet service tier on the customer's plan.
///
/// Note: `No` here encodes to 2. This is a different namespace from
/// [`ChurnLabel::No`], which encodes to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl InternetService {
    /// All variants, in code order.
    pub const ALL: [Self; 3] = [Self::Dsl, Self::FiberOptic, Self::No];

    /// Integer code the model was trained on.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Dsl => 0,
            Self::FiberOptic => 1,
            Self::No => 2,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }
}

impl std::fmt::Display for InternetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a customer discontinued service. Present only in training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChurnLabel {
    No,
    Yes,
}

impl ChurnLabel {
    /// Training target code: No = 0, Yes = 1.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

impl std::fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Encoded model input: (tenure, monthly charges, contract code, internet code).
///
/// Field order and count are fixed; they must match the training-time schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f32; 4]);

impl FeatureVector {
    /// Number of features the model accepts.
    pub const LEN: usize = 4;

    /// Value of the feature at `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> f32 {
        self.0[idx]
    }

    /// The raw feature values, in schema order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Feature names, in schema order.
pub const FEATURE_NAMES: [&str; 4] = ["tenure", "monthly_charges", "contract", "internet_service"];

/// Unlabeled customer profile as entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Subscription length in months (input range 0-72)
    pub tenure: u32,

    /// Monthly charges in dollars (input range 0-150)
    pub monthly_charges: f64,

    /// Contract type
    pub contract: Contract,

    /// Internet service tier
    pub internet_service: InternetService,
}

impl CustomerProfile {
    /// Encode the profile into the model's feature vector.
    ///
    /// Total by construction: the categorical fields are closed enums, so
    /// there is no out-of-domain input to reject.
    #[must_use]
    pub fn encode(&self) -> FeatureVector {
        FeatureVector([
            self.tenure as f32,
            self.monthly_charges as f32,
            f32::from(self.contract.code()),
            f32::from(self.internet_service.code()),
        ])
    }
}

/// One labeled training row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub profile: CustomerProfile,
    pub churn: ChurnLabel,
}

/// The synthetic labeled dataset the model is fitted on.
///
/// Generated once per process lifetime and shared read-only between the
/// model and the chart aggregations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub records: Vec<CustomerRecord>,
    /// Seed the generator was run with, kept for display.
    pub seed: u64,
}

impl TrainingSet {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encode all rows into the model's (features, labels) shape.
    #[must_use]
    pub fn design_matrix(&self) -> (Vec<FeatureVector>, Vec<u8>) {
        let x = self.records.iter().map(|r| r.profile.encode()).collect();
        let y = self.records.iter().map(|r| r.churn.code()).collect();
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_codes_are_bijective() {
        let codes: Vec<u8> = Contract::ALL.iter().map(Contract::code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert_eq!(codes.len(), Contract::ALL.len());
    }

    #[test]
    fn test_internet_codes_are_bijective() {
        let codes: Vec<u8> = InternetService::ALL.iter().map(InternetService::code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_no_values_encode_independently() {
        // "No" appears in two domains with different codes.
        assert_eq!(InternetService::No.code(), 2);
        assert_eq!(ChurnLabel::No.code(), 0);
    }

    #[test]
    fn test_profile_encoding_order() {
        let profile = CustomerProfile {
            tenure: 24,
            monthly_charges: 65.0,
            contract: Contract::MonthToMonth,
            internet_service: InternetService::FiberOptic,
        };

        let vector = profile.encode();
        assert_eq!(vector.as_slice(), &[24.0, 65.0, 0.0, 1.0]);
        assert_eq!(vector.as_slice().len(), FeatureVector::LEN);
        assert_eq!(FEATURE_NAMES.len(), FeatureVector::LEN);
    }

    #[test]
    fn test_design_matrix_shape() {
        let record = CustomerRecord {
            profile: CustomerProfile {
                tenure: 12,
                monthly_charges: 80.5,
                contract: Contract::TwoYear,
                internet_service: InternetService::No,
            },
            churn: ChurnLabel::Yes,
        };
        let set = TrainingSet {
            records: vec![record; 3],
            seed: 0,
        };

        let (x, y) = set.design_matrix();
        assert_eq!(x.len(), 3);
        assert_eq!(y, vec![1, 1, 1]);
        assert_eq!(x[0].as_slice(), &[12.0, 80.5, 2.0, 2.0]);
    }
}
