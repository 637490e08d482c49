// resolver.rs - Per-gene allele pairing resolution

use crate::data::{AlleleCopy, AlleleRecord};
use crate::error::{DistanceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Which cross-sample allele pairing produced the minimal distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pairing {
    /// s1A1↔s2A1, s1A2↔s2A2
    SameIndex,
    /// s1A1↔s2A2, s1A2↔s2A1
    CrossedIndex,
    /// Both pairings give the same mismatch count
    Ambiguous,
}

impl Pairing {
    /// Boolean view used by tabular reports: `None` when ambiguous
    pub fn same_allele(&self) -> Option<bool> {
        match self {
            Pairing::SameIndex => Some(true),
            Pairing::CrossedIndex => Some(false),
            Pairing::Ambiguous => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Pairing::Ambiguous)
    }
}

impl Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pairing::SameIndex => write!(f, "same-index"),
            Pairing::CrossedIndex => write!(f, "crossed-index"),
            Pairing::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Distance contribution of one gene for one sample pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneDistance {
    pub gene: String,
    pub distance: usize,
    pub pairing: Pairing,
    pub same_index_mismatches: usize,
    pub crossed_index_mismatches: usize,
}

/// Resolve the minimal Hamming distance for one gene.
///
/// `records` must hold exactly four records of a single gene: allele copies
/// 1 and 2 for each of two samples. The first sample to appear is treated
/// as s1; the result does not depend on that choice.
pub fn resolve_gene(records: &[&AlleleRecord]) -> Result<GeneDistance> {
    let gene = records.first().map(|r| r.gene.as_str()).unwrap_or("");

    if records.len() != 4 {
        return Err(DistanceError::input_shape(
            gene,
            format!("expected 4 allele records (2 samples × 2 alleles), found {}", records.len()),
        ));
    }
    if let Some(other) = records.iter().find(|r| r.gene != gene) {
        return Err(DistanceError::input_shape(
            gene,
            format!("slice also contains gene '{}'", other.gene),
        ));
    }

    let first_sample = records[0].sample.as_str();
    let second_sample = match records.iter().find(|r| r.sample != first_sample) {
        Some(r) => r.sample.as_str(),
        None => {
            return Err(DistanceError::input_shape(
                gene,
                format!("all records belong to sample '{}'", first_sample),
            ))
        }
    };

    let s1 = allele_slots(records, first_sample, gene)?;
    let s2 = allele_slots(records, second_sample, gene)?;
    if records
        .iter()
        .any(|r| r.sample != first_sample && r.sample != second_sample)
    {
        return Err(DistanceError::input_shape(gene, "records span more than 2 samples"));
    }

    let same_index_mismatches = mismatch(s1[0], s2[0]) + mismatch(s1[1], s2[1]);
    let crossed_index_mismatches = mismatch(s1[0], s2[1]) + mismatch(s1[1], s2[0]);

    let pairing = match same_index_mismatches.cmp(&crossed_index_mismatches) {
        std::cmp::Ordering::Less => Pairing::SameIndex,
        std::cmp::Ordering::Greater => Pairing::CrossedIndex,
        std::cmp::Ordering::Equal => Pairing::Ambiguous,
    };

    Ok(GeneDistance {
        gene: gene.to_string(),
        distance: same_index_mismatches.min(crossed_index_mismatches),
        pairing,
        same_index_mismatches,
        crossed_index_mismatches,
    })
}

/// Allele groups of one sample indexed by copy; each copy exactly once
fn allele_slots<'a>(records: &[&'a AlleleRecord], sample: &str, gene: &str) -> Result<[&'a str; 2]> {
    let mut slots: [Option<&str>; 2] = [None, None];
    for &record in records.iter().filter(|r| r.sample == sample) {
        let slot = &mut slots[record.allele.index()];
        if slot.is_some() {
            return Err(DistanceError::input_shape(
                gene,
                format!("sample '{}' has allele {} more than once", sample, record.allele),
            ));
        }
        *slot = Some(record.group.as_str());
    }
    match slots {
        [Some(a1), Some(a2)] => Ok([a1, a2]),
        _ => {
            let missing = if slots[0].is_none() {
                AlleleCopy::First
            } else {
                AlleleCopy::Second
            };
            Err(DistanceError::input_shape(
                gene,
                format!("sample '{}' is missing allele {}", sample, missing),
            ))
        }
    }
}

fn mismatch(a: &str, b: &str) -> usize {
    usize::from(a != b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene_records(s1: (&str, &str), s2: (&str, &str)) -> Vec<AlleleRecord> {
        vec![
            AlleleRecord::new("s1", "A", AlleleCopy::First, s1.0),
            AlleleRecord::new("s1", "A", AlleleCopy::Second, s1.1),
            AlleleRecord::new("s2", "A", AlleleCopy::First, s2.0),
            AlleleRecord::new("s2", "A", AlleleCopy::Second, s2.1),
        ]
    }

    fn resolve(records: &[AlleleRecord]) -> Result<GeneDistance> {
        let refs: Vec<&AlleleRecord> = records.iter().collect();
        resolve_gene(&refs)
    }

    #[test]
    fn test_same_index_pairing_chosen() {
        let result = resolve(&gene_records(("1", "3"), ("1", "5"))).unwrap();
        assert_eq!(result.distance, 1);
        assert_eq!(result.pairing, Pairing::SameIndex);
        assert_eq!(result.pairing.same_allele(), Some(true));
        assert_eq!(result.same_index_mismatches, 1);
        assert_eq!(result.crossed_index_mismatches, 2);
    }

    #[test]
    fn test_crossed_index_pairing_chosen() {
        let result = resolve(&gene_records(("01", "02"), ("02", "01"))).unwrap();
        assert_eq!(result.distance, 0);
        assert_eq!(result.pairing, Pairing::CrossedIndex);
        assert_eq!(result.pairing.same_allele(), Some(false));
    }

    #[test]
    fn test_tie_is_ambiguous() {
        let identical = resolve(&gene_records(("01", "01"), ("01", "01"))).unwrap();
        assert_eq!(identical.distance, 0);
        assert_eq!(identical.pairing, Pairing::Ambiguous);
        assert_eq!(identical.pairing.same_allele(), None);

        let disjoint = resolve(&gene_records(("01", "02"), ("03", "04"))).unwrap();
        assert_eq!(disjoint.distance, 2);
        assert!(disjoint.pairing.is_ambiguous());
    }

    #[test]
    fn test_distance_is_minimum_of_both_pairings() {
        let groups = ["01", "02", "03"];
        for a in groups {
            for b in groups {
                for c in groups {
                    for d in groups {
                        let r = resolve(&gene_records((a, b), (c, d))).unwrap();
                        let same = usize::from(a != c) + usize::from(b != d);
                        let crossed = usize::from(a != d) + usize::from(b != c);
                        assert_eq!(r.distance, same.min(crossed));
                        assert_eq!(r.pairing.is_ambiguous(), same == crossed);
                    }
                }
            }
        }
    }

    #[test]
    fn test_record_order_does_not_matter() {
        let mut records = gene_records(("1", "3"), ("1", "5"));
        records.reverse();
        let result = resolve(&records).unwrap();
        assert_eq!(result.distance, 1);
        assert_eq!(result.pairing, Pairing::SameIndex);
    }

    #[test]
    fn test_wrong_record_count() {
        let records = gene_records(("1", "3"), ("1", "5"));
        let err = resolve(&records[..3]).unwrap_err();
        assert!(matches!(err, DistanceError::InputShape { .. }));
        assert!(resolve(&[]).is_err());
    }

    #[test]
    fn test_duplicate_allele_copy() {
        let mut records = gene_records(("1", "3"), ("1", "5"));
        records[1].allele = AlleleCopy::First;
        let err = resolve(&records).unwrap_err();
        assert!(matches!(err, DistanceError::InputShape { ref gene, .. } if gene == "A"));
    }

    #[test]
    fn test_single_or_three_samples() {
        let mut records = gene_records(("1", "3"), ("1", "5"));
        for r in records.iter_mut() {
            r.sample = "s1".to_string();
        }
        assert!(resolve(&records).is_err());

        let mut records = gene_records(("1", "3"), ("1", "5"));
        records[3].sample = "s3".to_string();
        assert!(resolve(&records).is_err());
    }

    #[test]
    fn test_mixed_genes() {
        let mut records = gene_records(("1", "3"), ("1", "5"));
        records[2].gene = "B".to_string();
        assert!(resolve(&records).is_err());
    }
}
