// engine.rs - Pairwise distance engine over a sample cohort

use crate::core::aggregator::{aggregate_pair, PairDistance};
use crate::core::matrix::DistanceMatrix;
use crate::core::metric::MetricResult;
use crate::data::{AlleleRecord, AlleleTable};
use crate::error::{DistanceError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Why a sample pair has no distance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    NoSharedGenes,
    TooFewSharedGenes { shared: usize, required: usize },
    Malformed(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoSharedGenes => write!(f, "no shared typed genes"),
            SkipReason::TooFewSharedGenes { shared, required } => {
                write!(f, "{} shared genes, {} required", shared, required)
            }
            SkipReason::Malformed(message) => write!(f, "{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPair {
    pub sample_a: String,
    pub sample_b: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairOutcome {
    Computed(PairDistance),
    Skipped(SkippedPair),
}

/// Outcome of one sample pair together with its matrix cell (`row < col`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResult {
    pub row: usize,
    pub col: usize,
    pub outcome: PairOutcome,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pairs sharing fewer typed genes are skipped (0 and 1 behave the same)
    pub min_shared_genes: usize,
    /// Show a progress bar and timing summary on stdout
    pub progress: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_shared_genes: 1,
            progress: false,
        }
    }
}

/// All unordered index pairs of `n` samples in canonical row-major order
pub fn canonical_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Pairwise distance engine
#[derive(Debug, Clone, Default)]
pub struct PairwiseDistanceEngine {
    config: EngineConfig,
}

impl PairwiseDistanceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the full metric for a cohort
    pub fn compute(&self, table: &AlleleTable) -> Result<MetricResult> {
        let (labels, outcomes) = self.evaluate_pairs(table.records())?;
        let dist = DistanceMatrix::from_outcomes(labels, &outcomes);
        Ok(MetricResult::from_parts(dist, outcomes))
    }

    /// Evaluate every sample pair.
    ///
    /// Returns the sample labels (first-appearance order) and one outcome
    /// per pair in canonical order.
    pub fn evaluate_pairs(&self, records: &[AlleleRecord]) -> Result<(Vec<String>, Vec<PairResult>)> {
        if let Some(pos) = records
            .iter()
            .position(|r| r.sample.trim().is_empty() || r.gene.trim().is_empty())
        {
            return Err(DistanceError::validation(format!(
                "record {} has an empty sample or gene name",
                pos + 1
            )));
        }

        let mut labels: Vec<String> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut by_sample: Vec<Vec<&AlleleRecord>> = Vec::new();
        for record in records {
            let idx = *index.entry(record.sample.as_str()).or_insert_with(|| {
                labels.push(record.sample.clone());
                by_sample.push(Vec::new());
                labels.len() - 1
            });
            by_sample[idx].push(record);
        }

        if labels.len() < 2 {
            return Err(DistanceError::validation(format!(
                "at least 2 distinct samples are required, found {}",
                labels.len()
            )));
        }

        let pairs = canonical_pairs(labels.len());
        let total = pairs.len();
        let start = Instant::now();

        let pb = if self.config.progress {
            println!(
                "🔄 Computing distance matrix ({} samples, {} comparisons)...",
                labels.len(),
                total
            );
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let update_interval = std::cmp::max(1, total / 100);
        let counter = AtomicUsize::new(0);

        let outcomes: Vec<PairResult> = pairs
            .par_iter()
            .map(|&(row, col)| {
                let mut pair_records = Vec::with_capacity(by_sample[row].len() + by_sample[col].len());
                pair_records.extend_from_slice(&by_sample[row]);
                pair_records.extend_from_slice(&by_sample[col]);
                let outcome = self.evaluate_pair(&labels[row], &labels[col], &pair_records);

                let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
                if count % update_interval == 0 {
                    pb.set_position(count as u64);
                }

                PairResult { row, col, outcome }
            })
            .collect();

        pb.finish_and_clear();

        if self.config.progress {
            let skipped = outcomes
                .iter()
                .filter(|r| matches!(r.outcome, PairOutcome::Skipped(_)))
                .count();
            println!(
                "✅ Distance matrix computed in {:.2}s ({} pairs, {} skipped)",
                start.elapsed().as_secs_f64(),
                total,
                skipped
            );
        }

        Ok((labels, outcomes))
    }

    fn evaluate_pair(&self, sample_a: &str, sample_b: &str, records: &[&AlleleRecord]) -> PairOutcome {
        let skipped = |reason: SkipReason| {
            PairOutcome::Skipped(SkippedPair {
                sample_a: sample_a.to_string(),
                sample_b: sample_b.to_string(),
                reason,
            })
        };

        match aggregate_pair(records) {
            Ok(pair) if pair.shared_genes() == 0 => skipped(SkipReason::NoSharedGenes),
            Ok(pair) if pair.shared_genes() < self.config.min_shared_genes => {
                skipped(SkipReason::TooFewSharedGenes {
                    shared: pair.shared_genes(),
                    required: self.config.min_shared_genes,
                })
            }
            Ok(pair) => PairOutcome::Computed(pair),
            Err(e) => skipped(SkipReason::Malformed(e.to_string())),
        }
    }
}
