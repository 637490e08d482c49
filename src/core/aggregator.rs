// aggregator.rs - Per-sample-pair aggregation across genes

use crate::core::resolver::{resolve_gene, GeneDistance};
use crate::data::AlleleRecord;
use crate::error::{DistanceError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Total distance between two samples over their shared typed genes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDistance {
    pub sample_a: String,
    pub sample_b: String,
    pub total_distance: usize,
    /// Per-gene detail, genes in order of first appearance
    pub genes: Vec<GeneDistance>,
}

impl PairDistance {
    pub fn shared_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn ambiguous_genes(&self) -> usize {
        self.genes.iter().filter(|g| g.pairing.is_ambiguous()).count()
    }
}

/// Aggregate the distance of exactly two samples.
///
/// Genes are kept only when both samples contribute exactly two records;
/// other genes are excluded silently. A pair with no surviving gene yields
/// a zero-gene, zero-distance result.
pub fn aggregate_pair(records: &[&AlleleRecord]) -> Result<PairDistance> {
    let mut samples: Vec<&str> = Vec::with_capacity(2);
    for record in records {
        if !samples.contains(&record.sample.as_str()) {
            samples.push(&record.sample);
        }
    }
    if samples.len() != 2 {
        return Err(DistanceError::InputCardinality {
            found: samples.len(),
        });
    }

    // Group by gene keeping first-appearance order
    let mut gene_order: Vec<&str> = Vec::new();
    let mut by_gene: HashMap<&str, Vec<&AlleleRecord>> = HashMap::new();
    for &record in records {
        let entry = by_gene.entry(record.gene.as_str()).or_insert_with(|| {
            gene_order.push(record.gene.as_str());
            Vec::with_capacity(4)
        });
        entry.push(record);
    }

    let mut genes = Vec::new();
    for gene in gene_order {
        let gene_records = &by_gene[gene];
        let complete = samples.iter().all(|sample| {
            gene_records.iter().filter(|r| r.sample == *sample).count() == 2
        });
        if !complete {
            continue;
        }
        genes.push(resolve_gene(gene_records)?);
    }

    Ok(PairDistance {
        sample_a: samples[0].to_string(),
        sample_b: samples[1].to_string(),
        total_distance: genes.iter().map(|g| g.distance).sum(),
        genes,
    })
}
