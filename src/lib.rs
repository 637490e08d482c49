// lib.rs - hladist library root

//! # hladist - Pairwise HLA genotype Hamming distance
//!
//! Computes a Hamming-style distance between samples typed for HLA genes and
//! assembles the pairwise results into a labelled symmetric matrix.
//!
//! For each gene shared by two samples, the two alleles of one sample can be
//! matched to the two alleles of the other in two ways (same index or
//! crossed). The gene distance is the smaller mismatch count of the two;
//! ties are reported as [`Pairing::Ambiguous`]. A pair's distance is the sum
//! over all genes typed with both alleles in both samples.
//!
//! ## Features
//!
//! - **Ambiguity-aware**: the chosen pairing is kept per gene
//! - **Partial-failure tolerant**: incomparable pairs are reported, not fatal
//! - **Parallel**: pairs are evaluated with rayon in canonical order
//! - **Multiple formats**: TSV, CSV, PHYLIP, NEXUS and a JSON detail report
//!
//! ## Basic Usage
//!
//! ```rust
//! use hladist::prelude::*;
//!
//! let mut records = Vec::new();
//! for (sample, a1, a2) in [("s1", "01", "03"), ("s2", "01", "05")] {
//!     records.push(AlleleRecord::new(sample, "HLA-A", AlleleCopy::First, a1));
//!     records.push(AlleleRecord::new(sample, "HLA-A", AlleleCopy::Second, a2));
//! }
//!
//! let engine = PairwiseDistanceEngine::new(EngineConfig::default());
//! let result = engine.compute(&AlleleTable::new(records))?;
//! assert_eq!(result.dist.get_by_name("s1", "s2"), Some(1));
//! assert_eq!(result.pair_details[0].genes[0].pairing, Pairing::SameIndex);
//! # Ok::<(), hladist::DistanceError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, ValidationResult};
    pub use crate::core::{aggregate_pair, resolve_gene};
    pub use crate::core::{
        DistanceMatrix, EngineConfig, GeneDistance, MetricResult, PairDistance, PairOutcome,
        PairResult, Pairing, PairwiseDistanceEngine, SkipReason, SkippedPair,
    };
    pub use crate::data::{AlleleCopy, AlleleRecord, AlleleTable, TableSummary};
    pub use crate::error::DistanceError;
    pub use crate::output::{write_details, write_matrix};
}

// Re-export main types at the root level for convenience
pub use crate::core::{DistanceMatrix, MetricResult, Pairing, PairwiseDistanceEngine};
pub use crate::data::{AlleleRecord, AlleleTable};
pub use crate::error::DistanceError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("hladist v{} - Pairwise HLA Hamming distance calculator", VERSION)
}
