// mod.rs - Core logic module

pub mod aggregator;
pub mod engine;
pub mod matrix;
pub mod metric;
pub mod resolver;

// Re-export main types for convenience
pub use aggregator::{aggregate_pair, PairDistance};
pub use engine::{
    canonical_pairs, EngineConfig, PairOutcome, PairResult, PairwiseDistanceEngine, SkipReason,
    SkippedPair,
};
pub use matrix::DistanceMatrix;
pub use metric::{MetricResult, METRIC_NAME};
pub use resolver::{resolve_gene, GeneDistance, Pairing};
