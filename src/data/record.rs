// record.rs - Typed allele records

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Which of the two typed gene copies a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlleleCopy {
    First,
    Second,
}

impl AlleleCopy {
    pub fn index(&self) -> usize {
        match self {
            AlleleCopy::First => 0,
            AlleleCopy::Second => 1,
        }
    }
}

impl FromStr for AlleleCopy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(AlleleCopy::First),
            "2" => Ok(AlleleCopy::Second),
            other => Err(format!("Invalid allele copy '{}'. Use: 1, 2", other)),
        }
    }
}

impl Display for AlleleCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlleleCopy::First => write!(f, "1"),
            AlleleCopy::Second => write!(f, "2"),
        }
    }
}

/// One typed allele of one gene for one sample
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlleleRecord {
    pub sample: String,
    pub gene: String,
    pub allele: AlleleCopy,
    pub group: String,
}

impl AlleleRecord {
    pub fn new(
        sample: impl Into<String>,
        gene: impl Into<String>,
        allele: AlleleCopy,
        group: impl Into<String>,
    ) -> Self {
        Self {
            sample: sample.into(),
            gene: gene.into(),
            allele,
            group: group.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allele_copy() {
        assert_eq!("1".parse::<AlleleCopy>().unwrap(), AlleleCopy::First);
        assert_eq!(" 2 ".parse::<AlleleCopy>().unwrap(), AlleleCopy::Second);
        assert!("3".parse::<AlleleCopy>().is_err());
        assert!("A".parse::<AlleleCopy>().is_err());
    }

    #[test]
    fn test_allele_copy_display_and_index() {
        assert_eq!(AlleleCopy::First.to_string(), "1");
        assert_eq!(AlleleCopy::Second.index(), 1);
    }
}
