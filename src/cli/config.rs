// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub alleles: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub details: Option<String>,
    pub missing_char: Option<String>,

    // Distance settings
    pub min_shared_genes: Option<usize>,

    // Performance
    pub threads: Option<usize>,

    // Sample/Gene filtering
    pub include_samples: Option<String>,
    pub exclude_samples: Option<String>,
    pub include_genes: Option<String>,
    pub exclude_genes: Option<String>,
    pub include_samples_list: Option<String>,
    pub exclude_samples_list: Option<String>,
    pub include_genes_list: Option<String>,
    pub exclude_genes_list: Option<String>,

    // Flags
    pub dry_run: Option<bool>,
    pub quiet: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# hladist.toml - Configuration file for hladist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Allele table with columns SampleName, GeneName, AlleleName, AlleleGroup
alleles = "/path/to/alleles.tsv"

# Output distance matrix file
output = "distances.tsv"

# Output format: tsv, csv, phylip, nexus
format = "tsv"

# Per-pair, per-gene detail report (JSON)
# details = "details.json"

# Missing allele marker
missing_char = "-"

# =============================================================================
# DISTANCE SETTINGS
# =============================================================================

# Pairs sharing fewer fully typed genes are reported as NA
min_shared_genes = 1

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# SAMPLE/GENE FILTERING
# =============================================================================

# include_samples = "^PT.*"
# exclude_samples = "control.*"
# include_genes = "^HLA-(A|B|C|DRB1)$"
# exclude_genes = "^HLA-DP"
# include_samples_list = "samples.txt"
# exclude_samples_list = "exclude.txt"
# include_genes_list = "genes.txt"
# exclude_genes_list = "blacklist.txt"

# =============================================================================
# FLAGS
# =============================================================================

dry_run = false
quiet = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();
        assert_eq!(config.alleles.as_deref(), Some("/path/to/alleles.tsv"));
        assert_eq!(config.format.as_deref(), Some("tsv"));
        assert_eq!(config.min_shared_genes, Some(1));
        assert_eq!(config.threads, None);
        assert_eq!(config.dry_run, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml("min_shared_genes = 3\ninclude_genes = \"^A$\"\n").unwrap();
        assert_eq!(config.min_shared_genes, Some(3));
        assert_eq!(config.include_genes.as_deref(), Some("^A$"));
        assert!(config.output.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("min_shared_genes = \"many\"").is_err());
    }

    #[test]
    fn test_round_trip_file() {
        let path = std::env::temp_dir().join(format!("hladist_config_{}.toml", std::process::id()));
        let config = Config {
            output: Some("out.csv".to_string()),
            threads: Some(4),
            ..Config::new()
        };
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_file(&path).ok();
    }
}
