// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::output::FORMATS;
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub struct ValidationResult {
    pub sample_include_regex: Option<Regex>,
    pub sample_exclude_regex: Option<Regex>,
    pub gene_include_regex: Option<Regex>,
    pub gene_exclude_regex: Option<Regex>,
    pub samples_include_set: Option<HashSet<String>>,
    pub samples_exclude_set: Option<HashSet<String>>,
    pub genes_include_set: Option<HashSet<String>>,
    pub genes_exclude_set: Option<HashSet<String>>,
}

impl ValidationResult {
    pub fn has_sample_filters(&self) -> bool {
        self.sample_include_regex.is_some()
            || self.sample_exclude_regex.is_some()
            || self.samples_include_set.is_some()
            || self.samples_exclude_set.is_some()
    }

    pub fn has_gene_filters(&self) -> bool {
        self.gene_include_regex.is_some()
            || self.gene_exclude_regex.is_some()
            || self.genes_include_set.is_some()
            || self.genes_exclude_set.is_some()
    }
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if !FORMATS.contains(&args.format.to_lowercase().as_str()) {
        return Err(format!(
            "Invalid output format '{}'. Use: {}",
            args.format,
            FORMATS.join(", ")
        ));
    }

    if args.missing_char.trim().is_empty() {
        return Err("--missing-char must not be empty".to_string());
    }

    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }

    Ok(ValidationResult {
        sample_include_regex: compile(args.include_samples.as_deref(), "include_samples")?,
        sample_exclude_regex: compile(args.exclude_samples.as_deref(), "exclude_samples")?,
        gene_include_regex: compile(args.include_genes.as_deref(), "include_genes")?,
        gene_exclude_regex: compile(args.exclude_genes.as_deref(), "exclude_genes")?,
        samples_include_set: load_optional_set(args.include_samples_list.as_deref())?,
        samples_exclude_set: load_optional_set(args.exclude_samples_list.as_deref())?,
        genes_include_set: load_optional_set(args.include_genes_list.as_deref())?,
        genes_exclude_set: load_optional_set(args.exclude_genes_list.as_deref())?,
    })
}

fn compile(pattern: Option<&str>, name: &str) -> Result<Option<Regex>, String> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid {} regex: {}", name, e)))
        .transpose()
}

fn load_optional_set(file_path: Option<&str>) -> Result<Option<HashSet<String>>, String> {
    file_path.map(load_set_from_file).transpose()
}

/// Load a set of strings from a file (one per line)
fn load_set_from_file(file_path: &str) -> Result<HashSet<String>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open filter file '{}': {}", file_path, e))?;

    let reader = BufReader::new(file);
    let mut set = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!("Failed to read line {} from '{}': {}", line_num + 1, file_path, e)
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            set.insert(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} items from filter file '{}'", set.len(), file_path);
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["hladist"], args).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let result = validate_args(&parse(&[])).unwrap();
        assert!(!result.has_sample_filters());
        assert!(!result.has_gene_filters());
    }

    #[test]
    fn test_invalid_format() {
        let err = validate_args(&parse(&["--format", "xlsx"])).err().unwrap();
        assert!(err.contains("xlsx"));
        assert!(validate_args(&parse(&["--format", "NEXUS"])).is_ok());
    }

    #[test]
    fn test_invalid_regex() {
        let err = validate_args(&parse(&["--include-genes", "("])).err().unwrap();
        assert!(err.contains("include_genes"));
    }

    #[test]
    fn test_zero_threads() {
        assert!(validate_args(&parse(&["--threads", "0"])).is_err());
    }

    #[test]
    fn test_gene_list_file() {
        let path = std::env::temp_dir().join(format!("hladist_genes_{}.txt", std::process::id()));
        std::fs::write(&path, "HLA-A\n\n  HLA-B \n").unwrap();
        let path_str = path.to_string_lossy().to_string();
        let result = validate_args(&parse(&["--include-genes-list", &path_str])).unwrap();
        let set = result.genes_include_set.as_ref().unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("HLA-B"));
        assert!(result.has_gene_filters());
        std::fs::remove_file(&path).ok();

        assert!(validate_args(&parse(&["--exclude-samples-list", "/nonexistent/list.txt"])).is_err());
    }
}
