// table.rs - In-memory allele table and filtering

use crate::data::record::{AlleleCopy, AlleleRecord};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Typing completeness and diversity statistics for an allele table
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub samples: usize,
    pub genes: usize,
    pub records: usize,
    /// (sample, gene) cells typed with both allele copies
    pub complete_cells: usize,
    /// (sample, gene) cells with at least one record that are not complete
    pub partial_cells: usize,
    pub avg_groups_per_gene: f64,
    /// Per gene: fraction of samples with both allele copies typed
    pub gene_completeness: Vec<(String, f64)>,
}

/// Read-only collection of allele records for a cohort
#[derive(Debug, Clone, Default)]
pub struct AlleleTable {
    records: Vec<AlleleRecord>,
}

impl AlleleTable {
    pub fn new(records: Vec<AlleleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AlleleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct sample names in order of first appearance
    pub fn sample_names(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.sample.as_str()))
    }

    /// Distinct gene names in order of first appearance
    pub fn gene_names(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.gene.as_str()))
    }

    /// Sample filtering by regex and name sets
    pub fn apply_sample_filtering(
        &mut self,
        sample_include: Option<&Regex>,
        sample_exclude: Option<&Regex>,
        samples_include: Option<&HashSet<String>>,
        samples_exclude: Option<&HashSet<String>>,
    ) -> Result<(), String> {
        let initial_samples = self.sample_names().len();
        self.records.retain(|record| {
            keep_name(
                &record.sample,
                sample_include,
                sample_exclude,
                samples_include,
                samples_exclude,
            )
        });

        let filtered_samples = self.sample_names().len();
        if initial_samples != filtered_samples {
            println!(
                "Sample filters: kept {} samples (removed {})",
                filtered_samples,
                initial_samples - filtered_samples
            );
        }
        if filtered_samples == 0 {
            return Err("No samples remain after filtering".to_string());
        }
        Ok(())
    }

    /// Gene filtering by regex and name sets
    pub fn apply_gene_filtering(
        &mut self,
        gene_include: Option<&Regex>,
        gene_exclude: Option<&Regex>,
        genes_include: Option<&HashSet<String>>,
        genes_exclude: Option<&HashSet<String>>,
    ) -> Result<(), String> {
        let initial_genes = self.gene_names().len();
        self.records.retain(|record| {
            keep_name(
                &record.gene,
                gene_include,
                gene_exclude,
                genes_include,
                genes_exclude,
            )
        });

        let filtered_genes = self.gene_names().len();
        if initial_genes != filtered_genes {
            println!(
                "Gene filters: kept {} genes (removed {})",
                filtered_genes,
                initial_genes - filtered_genes
            );
        }
        if filtered_genes == 0 {
            return Err("No genes remain after filtering".to_string());
        }
        Ok(())
    }

    pub fn summary(&self) -> TableSummary {
        let samples = self.sample_names();
        let genes = self.gene_names();

        let mut cells: HashMap<(&str, &str), Vec<AlleleCopy>> = HashMap::new();
        let mut groups: HashMap<&str, HashSet<&str>> = HashMap::new();
        for record in &self.records {
            cells
                .entry((record.sample.as_str(), record.gene.as_str()))
                .or_default()
                .push(record.allele);
            groups
                .entry(record.gene.as_str())
                .or_default()
                .insert(record.group.as_str());
        }

        let is_complete = |copies: &Vec<AlleleCopy>| {
            copies.len() == 2
                && copies.contains(&AlleleCopy::First)
                && copies.contains(&AlleleCopy::Second)
        };
        let complete_cells = cells.values().filter(|c| is_complete(c)).count();
        let partial_cells = cells.len() - complete_cells;

        let gene_completeness = genes
            .iter()
            .map(|gene| {
                let typed = samples
                    .iter()
                    .filter(|sample| {
                        cells
                            .get(&(sample.as_str(), gene.as_str()))
                            .map(is_complete)
                            .unwrap_or(false)
                    })
                    .count();
                let fraction = if samples.is_empty() {
                    0.0
                } else {
                    typed as f64 / samples.len() as f64
                };
                (gene.clone(), fraction)
            })
            .collect();

        let total_groups: usize = groups.values().map(|g| g.len()).sum();
        let avg_groups_per_gene = if genes.is_empty() {
            0.0
        } else {
            total_groups as f64 / genes.len() as f64
        };

        TableSummary {
            samples: samples.len(),
            genes: genes.len(),
            records: self.records.len(),
            complete_cells,
            partial_cells,
            avg_groups_per_gene,
            gene_completeness,
        }
    }

    /// Print table statistics
    pub fn print_table_statistics(&self, phase: &str) {
        println!("\n📊 === ALLELE TABLE STATISTICS ({}) ===", phase);
        let summary = self.summary();
        let total_cells = summary.samples * summary.genes;

        println!(
            "  📏 Dimensions: {} samples × {} genes ({} allele records)",
            summary.samples, summary.genes, summary.records
        );

        let untyped = total_cells.saturating_sub(summary.complete_cells);
        let untyped_percent = if total_cells == 0 {
            0.0
        } else {
            100.0 * untyped as f64 / total_cells as f64
        };
        print!(
            "  📊 Incompletely typed cells: {:.2}% ({} cells, {} partial)",
            untyped_percent, untyped, summary.partial_cells
        );
        if untyped_percent <= 5.0 {
            println!("  🟢 EXCELLENT");
        } else if untyped_percent <= 15.0 {
            println!("  🟡 GOOD");
        } else if untyped_percent <= 30.0 {
            println!("  🟠 FAIR - consider gene filters");
        } else {
            println!("  🔴 POOR - gene filters recommended");
        }

        for (gene, completeness) in &summary.gene_completeness {
            println!("  🧬 {}: {:.1}% of samples fully typed", gene, completeness * 100.0);
        }
        println!(
            "  📈 Avg distinct allele groups per gene: {:.1}",
            summary.avg_groups_per_gene
        );
    }
}

impl From<Vec<AlleleRecord>> for AlleleTable {
    fn from(records: Vec<AlleleRecord>) -> Self {
        Self::new(records)
    }
}

fn distinct_in_order<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(|name| name.to_string())
        .collect()
}

fn keep_name(
    name: &str,
    include: Option<&Regex>,
    exclude: Option<&Regex>,
    include_set: Option<&HashSet<String>>,
    exclude_set: Option<&HashSet<String>>,
) -> bool {
    if let Some(regex) = include {
        if !regex.is_match(name) {
            return false;
        }
    }
    if let Some(regex) = exclude {
        if regex.is_match(name) {
            return false;
        }
    }
    if let Some(set) = include_set {
        if !set.contains(name) {
            return false;
        }
    }
    if let Some(set) = exclude_set {
        if set.contains(name) {
            return false;
        }
    }
    true
}
