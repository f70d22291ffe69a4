//! Analytics service: Descriptive chart data over the training set.
//!
//! Two aggregations feed the insights screen: churn counts per contract
//! type, and the monthly-charges distribution partitioned by churn.

use std::sync::Arc;

use crate::domain::{ChurnLabel, Contract, TrainingSet};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// Churn counts for every (Contract, Churn) combination.
///
/// Every cell of the 3×2 domain is present; a combination that never occurs
/// counts as zero rather than going missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChurnBreakdown {
    counts: [[u32; 2]; 3],
}

impl ChurnBreakdown {
    /// Count for one (contract, churn) cell.
    #[must_use]
    pub fn count(&self, contract: Contract, churn: ChurnLabel) -> u32 {
        self.counts[contract.code() as usize][churn.code() as usize]
    }

    /// Sum over all cells; equals the dataset row count.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }
}

/// Monthly-charges distribution split by churn label.
///
/// Bins cover the observed charge range; `churned[i]` and `retained[i]`
/// count the rows of each label falling into bin `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargesHistogram {
    /// Lower edge of the first bin
    pub lo: f64,
    /// Width of each bin
    pub bin_width: f64,
    pub churned: Vec<u32>,
    pub retained: Vec<u32>,
}

impl ChargesHistogram {
    /// Number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.churned.len()
    }

    /// The [lo, hi) range of bin `idx`.
    #[must_use]
    pub fn bin_range(&self, idx: usize) -> (f64, f64) {
        let lo = self.lo + self.bin_width * idx as f64;
        (lo, lo + self.bin_width)
    }
}

/// Service computing chart aggregations over the shared dataset.
pub struct AnalyticsService {
    dataset: Arc<TrainingSet>,
}

impl AnalyticsService {
    pub fn new(dataset: Arc<TrainingSet>) -> Self {
        Self { dataset }
    }

    /// Group the dataset by (Contract, Churn) and count.
    #[must_use]
    pub fn churn_by_contract(&self) -> ChurnBreakdown {
        let mut breakdown = ChurnBreakdown::default();
        for record in &self.dataset.records {
            breakdown.counts[record.profile.contract.code() as usize]
                [record.churn.code() as usize] += 1;
        }
        breakdown
    }

    /// Histogram of monthly charges partitioned by churn label.
    ///
    /// `bins` is clamped to at least 1. Bins span the observed min..max;
    /// the maximum value lands in the last bin.
    #[must_use]
    pub fn charges_histogram(&self, bins: usize) -> ChargesHistogram {
        let bins = bins.max(1);
        let charges = self.dataset.records.iter().map(|r| r.profile.monthly_charges);

        let lo = charges.clone().fold(f64::INFINITY, f64::min);
        let hi = charges.fold(f64::NEG_INFINITY, f64::max);

        let mut histogram = ChargesHistogram {
            lo: if lo.is_finite() { lo } else { 0.0 },
            bin_width: 0.0,
            churned: vec![0; bins],
            retained: vec![0; bins],
        };
        if self.dataset.is_empty() {
            return histogram;
        }

        histogram.bin_width = (hi - lo) / bins as f64;

        for record in &self.dataset.records {
            let idx = if histogram.bin_width > 0.0 {
                let offset = (record.profile.monthly_charges - lo) / histogram.bin_width;
                (offset as usize).min(bins - 1)
            } else {
                0
            };

            match record.churn {
                ChurnLabel::Yes => histogram.churned[idx] += 1,
                ChurnLabel::No => histogram.retained[idx] += 1,
            }
        }

        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::synthetic::SyntheticDataGenerator;
    use crate::domain::{CustomerProfile, CustomerRecord, InternetService};

    fn record(contract: Contract, charges: f64, churn: ChurnLabel) -> CustomerRecord {
        CustomerRecord {
            profile: CustomerProfile {
                tenure: 12,
                monthly_charges: charges,
                contract,
                internet_service: InternetService::Dsl,
            },
            churn,
        }
    }

    fn service_over(records: Vec<CustomerRecord>) -> AnalyticsService {
        AnalyticsService::new(Arc::new(TrainingSet { records, seed: 0 }))
    }

    #[test]
    fn test_breakdown_counts_sum_to_row_count() {
        let set = SyntheticDataGenerator::default().generate();
        let rows = set.len() as u32;
        let service = AnalyticsService::new(Arc::new(set));

        let breakdown = service.churn_by_contract();
        assert_eq!(breakdown.total(), rows);
    }

    #[test]
    fn test_missing_combination_counts_as_zero() {
        // Only month-to-month churners: the other five cells read zero.
        let service = service_over(vec![
            record(Contract::MonthToMonth, 50.0, ChurnLabel::Yes),
            record(Contract::MonthToMonth, 60.0, ChurnLabel::Yes),
        ]);

        let breakdown = service.churn_by_contract();
        assert_eq!(breakdown.count(Contract::MonthToMonth, ChurnLabel::Yes), 2);
        assert_eq!(breakdown.count(Contract::MonthToMonth, ChurnLabel::No), 0);
        assert_eq!(breakdown.count(Contract::TwoYear, ChurnLabel::Yes), 0);
        assert_eq!(breakdown.total(), 2);
    }

    #[test]
    fn test_histogram_bins_partition_all_rows() {
        let set = SyntheticDataGenerator::default().generate();
        let churned_rows = set
            .records
            .iter()
            .filter(|r| r.churn == ChurnLabel::Yes)
            .count() as u32;
        let retained_rows = set.len() as u32 - churned_rows;
        let service = AnalyticsService::new(Arc::new(set));

        let histogram = service.charges_histogram(DEFAULT_BINS);
        assert_eq!(histogram.bins(), DEFAULT_BINS);
        assert_eq!(histogram.churned.iter().sum::<u32>(), churned_rows);
        assert_eq!(histogram.retained.iter().sum::<u32>(), retained_rows);
    }

    #[test]
    fn test_histogram_places_extremes() {
        let service = service_over(vec![
            record(Contract::OneYear, 30.0, ChurnLabel::No),
            record(Contract::OneYear, 75.0, ChurnLabel::Yes),
            record(Contract::OneYear, 120.0, ChurnLabel::No),
        ]);

        let histogram = service.charges_histogram(3);
        // Max lands in the last bin, not one past it.
        assert_eq!(histogram.retained, vec![1, 0, 1]);
        assert_eq!(histogram.churned, vec![0, 1, 0]);

        let (lo, _) = histogram.bin_range(0);
        assert!((lo - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_dataset_yields_zeroed_histogram() {
        let service = service_over(Vec::new());
        let histogram = service.charges_histogram(4);
        assert_eq!(histogram.bins(), 4);
        assert_eq!(histogram.churned.iter().sum::<u32>(), 0);
        assert_eq!(histogram.retained.iter().sum::<u32>(), 0);
    }
}
