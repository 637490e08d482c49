// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// hladist - Pairwise HLA genotype Hamming distance matrix
pub struct Args {
    /// path to allele table (.tsv or .csv) with columns SampleName, GeneName, AlleleName, AlleleGroup
    #[argh(option)]
    pub alleles: Option<String>,

    /// output distance matrix file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, phylip, nexus (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// write per-pair, per-gene detail and skipped pairs as JSON
    #[argh(option)]
    pub details: Option<String>,

    /// missing allele marker (default: -)
    #[argh(option, default = "String::from(\"-\")")]
    pub missing_char: String,

    /// minimum number of shared typed genes for a pair to get a distance (default: 1)
    #[argh(option, default = "1")]
    pub min_shared_genes: usize,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// include only samples matching regex pattern
    #[argh(option)]
    pub include_samples: Option<String>,

    /// exclude samples matching regex pattern
    #[argh(option)]
    pub exclude_samples: Option<String>,

    /// include only genes matching regex pattern
    #[argh(option)]
    pub include_genes: Option<String>,

    /// exclude genes matching regex pattern
    #[argh(option)]
    pub exclude_genes: Option<String>,

    /// include only samples listed in a file (one sample per line)
    #[argh(option)]
    pub include_samples_list: Option<String>,

    /// exclude samples listed in a file (one sample per line)
    #[argh(option)]
    pub exclude_samples_list: Option<String>,

    /// include only genes listed in a file (one gene per line)
    #[argh(option)]
    pub include_genes_list: Option<String>,

    /// exclude genes listed in a file (one gene per line)
    #[argh(option)]
    pub exclude_genes_list: Option<String>,

    /// show allele table statistics only, then exit
    #[argh(switch)]
    pub stats_only: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// hide the progress bar
    #[argh(switch)]
    pub quiet: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
