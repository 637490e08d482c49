// metric.rs - Externally exposed metric result

use crate::core::aggregator::PairDistance;
use crate::core::engine::{PairOutcome, PairResult, SkippedPair};
use crate::core::matrix::DistanceMatrix;
use serde::{Deserialize, Serialize};

/// Label of the only metric this crate computes
pub const METRIC_NAME: &str = "Hamming Distance";

/// Distance matrix plus per-pair drill-down detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric: String,
    pub dist: DistanceMatrix,
    /// Computed pairs in canonical order
    #[serde(rename = "alleleInfo")]
    pub pair_details: Vec<PairDistance>,
    /// Pairs without a distance, in canonical order
    pub skipped: Vec<SkippedPair>,
}

impl MetricResult {
    pub fn from_parts(dist: DistanceMatrix, outcomes: Vec<PairResult>) -> Self {
        let mut pair_details = Vec::new();
        let mut skipped = Vec::new();
        for result in outcomes {
            match result.outcome {
                PairOutcome::Computed(pair) => pair_details.push(pair),
                PairOutcome::Skipped(pair) => skipped.push(pair),
            }
        }
        Self {
            metric: METRIC_NAME.to_string(),
            dist,
            pair_details,
            skipped,
        }
    }

    pub fn allele_info(&self) -> &[PairDistance] {
        &self.pair_details
    }

    /// Detail for one unordered pair
    pub fn pair(&self, a: &str, b: &str) -> Option<&PairDistance> {
        self.pair_details.iter().find(|p| {
            (p.sample_a == a && p.sample_b == b) || (p.sample_a == b && p.sample_b == a)
        })
    }

    /// Gene resolutions where both allele pairings tied
    pub fn ambiguous_resolutions(&self) -> usize {
        self.pair_details.iter().map(|p| p.ambiguous_genes()).sum()
    }

    pub fn gene_resolutions(&self) -> usize {
        self.pair_details.iter().map(|p| p.shared_genes()).sum()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize metric result: {}", e))
    }
}
