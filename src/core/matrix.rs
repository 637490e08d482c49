// matrix.rs - Symmetric labelled distance matrix assembly

use crate::core::aggregator::PairDistance;
use crate::core::engine::{PairOutcome, PairResult};
use crate::error::{DistanceError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// N×N symmetric distance matrix with sample labels on both axes.
///
/// The diagonal is always `Some(0)`. Pairs that were not computed are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    labels: Vec<String>,
    values: Vec<Vec<Option<usize>>>,
}

/// Number of unordered pairs for `n` samples
pub fn triangle_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Offset of row `x` in a row-major upper triangle of an `n`×`n` matrix
pub fn row_offset(x: usize, n: usize) -> usize {
    x * n - x * (x + 1) / 2
}

impl DistanceMatrix {
    fn empty(labels: Vec<String>) -> Self {
        let n = labels.len();
        let mut values = vec![vec![None; n]; n];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = Some(0);
        }
        Self { labels, values }
    }

    fn set(&mut self, i: usize, j: usize, distance: usize) {
        self.values[i][j] = Some(distance);
        self.values[j][i] = Some(distance);
    }

    /// Build from engine outcomes using their matrix coordinates.
    ///
    /// Skipped pairs and coordinates outside the label range leave the cell
    /// as `None`.
    pub fn from_outcomes(labels: Vec<String>, outcomes: &[PairResult]) -> Self {
        let mut matrix = Self::empty(labels);
        let n = matrix.labels.len();
        for result in outcomes {
            if result.row >= n || result.col >= n || result.row == result.col {
                continue;
            }
            if let PairOutcome::Computed(pair) = &result.outcome {
                matrix.set(result.row, result.col, pair.total_distance);
            }
        }
        matrix
    }

    /// Rebuild from a complete row-major upper triangle.
    ///
    /// `values[row_offset(x, n) + (y - x - 1)]` holds the distance of
    /// samples `x < y`. Any gap is rejected.
    pub fn from_upper_triangle(labels: Vec<String>, values: &[usize]) -> Result<Self> {
        let n = labels.len();
        let expected = triangle_len(n);
        if values.len() != expected {
            return Err(DistanceError::IncompleteTriangle {
                samples: n,
                expected,
                found: values.len(),
            });
        }

        let mut matrix = Self::empty(labels);
        for x in 0..n {
            let offset = row_offset(x, n);
            for (k, &distance) in values[offset..offset + (n - x - 1)].iter().enumerate() {
                matrix.set(x, x + 1 + k, distance);
            }
        }
        Ok(matrix)
    }

    /// Rebuild from pair results in canonical enumeration order.
    ///
    /// N is the number of distinct `sample_a` values plus one, and the
    /// labels are recovered from the sequence itself. The sequence must be
    /// the complete canonical enumeration.
    pub fn from_pair_sequence(pairs: &[PairDistance]) -> Result<Self> {
        let mut labels: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        for pair in pairs {
            if seen.insert(pair.sample_a.as_str()) {
                labels.push(pair.sample_a.clone());
            }
        }
        // The last sample never appears as sample_a
        if let Some(last) = pairs.last() {
            labels.push(last.sample_b.clone());
        }
        let n = labels.len();

        let incomplete = || DistanceError::IncompleteTriangle {
            samples: n,
            expected: triangle_len(n),
            found: pairs.len(),
        };
        if pairs.len() != triangle_len(n) {
            return Err(incomplete());
        }

        let mut k = 0;
        for x in 0..n {
            for y in x + 1..n {
                let pair = &pairs[k];
                if pair.sample_a != labels[x] || pair.sample_b != labels[y] {
                    return Err(incomplete());
                }
                k += 1;
            }
        }

        let values: Vec<usize> = pairs.iter().map(|p| p.total_distance).collect();
        Self::from_upper_triangle(labels, &values)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Option<usize>>] {
        &self.values
    }

    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    pub fn index_of(&self, sample: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == sample)
    }

    pub fn get_by_name(&self, a: &str, b: &str) -> Option<usize> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.get(i, j)
    }

    /// Upper-triangle pairs without a distance
    pub fn missing_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.len();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.values[i][j].is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_pairs().is_empty()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (0..n).all(|j| self.values[i][j] == self.values[j][i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{SkipReason, SkippedPair};

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn pair(a: &str, b: &str, d: usize) -> PairDistance {
        PairDistance {
            sample_a: a.to_string(),
            sample_b: b.to_string(),
            total_distance: d,
            genes: Vec::new(),
        }
    }

    #[test]
    fn test_row_offsets() {
        // n = 4: rows start at 0, 3, 5, 6
        assert_eq!(row_offset(0, 4), 0);
        assert_eq!(row_offset(1, 4), 3);
        assert_eq!(row_offset(2, 4), 5);
        assert_eq!(row_offset(3, 4), 6);
        assert_eq!(triangle_len(4), 6);
        assert_eq!(triangle_len(1), 0);
        assert_eq!(triangle_len(0), 0);
    }

    #[test]
    fn test_three_sample_triangle() {
        let m = DistanceMatrix::from_upper_triangle(labels(&["s1", "s2", "s3"]), &[17, 18, 19]).unwrap();
        let expected = vec![
            vec![Some(0), Some(17), Some(18)],
            vec![Some(17), Some(0), Some(19)],
            vec![Some(18), Some(19), Some(0)],
        ];
        assert_eq!(m.rows(), expected.as_slice());
        assert_eq!(m.labels(), &["s1", "s2", "s3"]);
        assert!(m.is_symmetric());
        assert!(m.is_complete());
        assert_eq!(m.get_by_name("s3", "s2"), Some(19));
    }

    #[test]
    fn test_larger_triangle_is_symmetric_with_zero_diagonal() {
        let n = 6;
        let values: Vec<usize> = (1..=triangle_len(n)).collect();
        let names: Vec<String> = (0..n).map(|i| format!("s{}", i)).collect();
        let m = DistanceMatrix::from_upper_triangle(names, &values).unwrap();
        assert!(m.is_symmetric());
        for i in 0..n {
            assert_eq!(m.get(i, i), Some(0));
        }
        assert_eq!(m.get(0, 5), Some(5));
        assert_eq!(m.get(1, 2), Some(6));
        assert_eq!(m.get(4, 5), Some(15));
    }

    #[test]
    fn test_gap_in_triangle_is_rejected() {
        let err = DistanceMatrix::from_upper_triangle(labels(&["s1", "s2", "s3"]), &[17, 19]).unwrap_err();
        assert_eq!(
            err,
            DistanceError::IncompleteTriangle {
                samples: 3,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_from_pair_sequence() {
        let pairs = vec![pair("s1", "s2", 17), pair("s1", "s3", 18), pair("s2", "s3", 19)];
        let m = DistanceMatrix::from_pair_sequence(&pairs).unwrap();
        assert_eq!(m.labels(), &["s1", "s2", "s3"]);
        assert_eq!(m.get(0, 2), Some(18));
        assert_eq!(m.get(2, 1), Some(19));
    }

    #[test]
    fn test_from_pair_sequence_with_gap() {
        // s1-s3 dropped: the sequence would otherwise silently misalign
        let pairs = vec![pair("s1", "s2", 17), pair("s2", "s3", 19)];
        assert!(matches!(
            DistanceMatrix::from_pair_sequence(&pairs),
            Err(DistanceError::IncompleteTriangle { .. })
        ));

        // same length as a complete set, but out of canonical order
        let pairs = vec![pair("s1", "s3", 18), pair("s1", "s2", 17), pair("s2", "s3", 19)];
        assert!(DistanceMatrix::from_pair_sequence(&pairs).is_err());
    }

    #[test]
    fn test_from_outcomes_leaves_skipped_cells_empty() {
        let outcomes = vec![
            PairResult {
                row: 0,
                col: 1,
                outcome: PairOutcome::Computed(pair("s1", "s2", 17)),
            },
            PairResult {
                row: 0,
                col: 2,
                outcome: PairOutcome::Skipped(SkippedPair {
                    sample_a: "s1".to_string(),
                    sample_b: "s3".to_string(),
                    reason: SkipReason::NoSharedGenes,
                }),
            },
            PairResult {
                row: 1,
                col: 2,
                outcome: PairOutcome::Computed(pair("s2", "s3", 19)),
            },
        ];
        let m = DistanceMatrix::from_outcomes(labels(&["s1", "s2", "s3"]), &outcomes);
        assert_eq!(m.get(0, 1), Some(17));
        assert_eq!(m.get(2, 1), Some(19));
        assert_eq!(m.get(0, 2), None);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(2, 2), Some(0));
        assert!(m.is_symmetric());
        assert_eq!(m.missing_pairs(), vec![(0, 2)]);
        assert!(!m.is_complete());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let m = DistanceMatrix::from_outcomes(labels(&["s1", "s2"]), &[]);
        assert_eq!(m.get(5, 0), None);
        assert_eq!(m.get_by_name("s1", "zz"), None);
        assert_eq!(m.get_by_name("s1", "s1"), Some(0));
    }
}
