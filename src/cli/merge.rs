// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        fill(&mut self.alleles, config.alleles);
        fill(&mut self.output, config.output);
        fill(&mut self.details, config.details);

        // Settings with defaults: only override when the CLI kept the default
        if self.format == "tsv" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.missing_char == "-" {
            if let Some(missing_char) = config.missing_char {
                self.missing_char = missing_char;
            }
        }
        if self.min_shared_genes == 1 {
            if let Some(min_shared_genes) = config.min_shared_genes {
                self.min_shared_genes = min_shared_genes;
            }
        }

        // Performance
        fill(&mut self.threads, config.threads);

        // Sample/Gene filtering
        fill(&mut self.include_samples, config.include_samples);
        fill(&mut self.exclude_samples, config.exclude_samples);
        fill(&mut self.include_genes, config.include_genes);
        fill(&mut self.exclude_genes, config.exclude_genes);
        fill(&mut self.include_samples_list, config.include_samples_list);
        fill(&mut self.exclude_samples_list, config.exclude_samples_list);
        fill(&mut self.include_genes_list, config.include_genes_list);
        fill(&mut self.exclude_genes_list, config.exclude_genes_list);

        // Flags (config can only switch them on)
        self.dry_run |= config.dry_run.unwrap_or(false);
        self.quiet |= config.quiet.unwrap_or(false);

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["hladist"], args).unwrap()
    }

    #[test]
    fn test_cli_values_win() {
        let args = parse(&["--alleles", "cli.tsv", "--format", "csv", "--min-shared-genes", "2"]);
        let config = Config {
            alleles: Some("config.tsv".to_string()),
            output: Some("out.tsv".to_string()),
            format: Some("nexus".to_string()),
            min_shared_genes: Some(5),
            ..Config::new()
        };
        let merged = args.merge_with_config(config);
        assert_eq!(merged.alleles.as_deref(), Some("cli.tsv"));
        assert_eq!(merged.output.as_deref(), Some("out.tsv"));
        assert_eq!(merged.format, "csv");
        assert_eq!(merged.min_shared_genes, 2);
    }

    #[test]
    fn test_config_fills_defaults() {
        let args = parse(&[]);
        let config = Config {
            format: Some("phylip".to_string()),
            missing_char: Some("*".to_string()),
            min_shared_genes: Some(3),
            exclude_genes: Some("^DP".to_string()),
            quiet: Some(true),
            ..Config::new()
        };
        let merged = args.merge_with_config(config);
        assert_eq!(merged.format, "phylip");
        assert_eq!(merged.missing_char, "*");
        assert_eq!(merged.min_shared_genes, 3);
        assert_eq!(merged.exclude_genes.as_deref(), Some("^DP"));
        assert!(merged.quiet);
        assert!(!merged.dry_run);
    }
}
