// delimited.rs - CSV/TSV loader for long-format allele tables

use crate::data::record::{AlleleCopy, AlleleRecord};
use crate::data::table::AlleleTable;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row as it appears in the input file
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "SampleName")]
    sample: String,
    #[serde(rename = "GeneName")]
    gene: String,
    #[serde(rename = "AlleleName")]
    allele: String,
    #[serde(rename = "AlleleGroup", default)]
    group: Option<String>,
}

/// Field delimiter chosen from the file extension
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => b',',
        _ => b'\t',
    }
}

impl AlleleTable {
    /// Load a table from a `.csv` or tab-delimited file
    pub fn from_file(file_path: &Path, missing_char: &str) -> Result<Self, String> {
        println!("📊 Loading allele table: {}", file_path.display());
        let file = std::fs::File::open(file_path)
            .map_err(|e| format!("Failed to open allele table '{}': {}", file_path.display(), e))?;
        let table = Self::from_reader(file, delimiter_for(file_path), missing_char)?;
        println!(
            "✅ Allele table loaded: {} records, {} samples, {} genes",
            table.len(),
            table.sample_names().len(),
            table.gene_names().len()
        );
        Ok(table)
    }

    /// Load a table from any reader; header row is required
    pub fn from_reader<R: Read>(
        reader: R,
        delimiter: u8,
        missing_char: &str,
    ) -> Result<Self, String> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut records = Vec::new();
        let mut untyped = 0usize;

        for (row_num, row) in csv_reader.deserialize::<RawRow>().enumerate() {
            let line = row_num + 2;
            let row = row.map_err(|e| format!("Failed to parse line {}: {}", line, e))?;

            let group = match row.group {
                Some(g) if !g.is_empty() && g != "NA" && g != missing_char => g,
                _ => {
                    untyped += 1;
                    continue;
                }
            };

            let allele: AlleleCopy = row
                .allele
                .parse()
                .map_err(|e| format!("Invalid AlleleName at line {}: {}", line, e))?;

            records.push(AlleleRecord {
                sample: row.sample,
                gene: row.gene,
                allele,
                group,
            });
        }

        if untyped > 0 {
            println!("⚠️  Skipped {} untyped allele records", untyped);
        }

        Ok(AlleleTable::new(records))
    }
}
