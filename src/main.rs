// main.rs - CLI entry point

use hladist::cli::Config;
use hladist::prelude::*;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let alleles = args.alleles.clone().ok_or("--alleles is required")?;
    let output = if args.stats_only || args.dry_run {
        None
    } else {
        Some(args.output.clone().ok_or("--output is required")?)
    };

    println!("🚀 {}", hladist::get_info());

    let validation = validate_args(&args)?;

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    // Load and filter the allele table
    let mut table = AlleleTable::from_file(Path::new(&alleles), &args.missing_char)?;
    table.print_table_statistics("INITIAL TABLE");

    if validation.has_sample_filters() {
        table.apply_sample_filtering(
            validation.sample_include_regex.as_ref(),
            validation.sample_exclude_regex.as_ref(),
            validation.samples_include_set.as_ref(),
            validation.samples_exclude_set.as_ref(),
        )?;
    }
    if validation.has_gene_filters() {
        table.apply_gene_filtering(
            validation.gene_include_regex.as_ref(),
            validation.gene_exclude_regex.as_ref(),
            validation.genes_include_set.as_ref(),
            validation.genes_exclude_set.as_ref(),
        )?;
    }
    if validation.has_sample_filters() || validation.has_gene_filters() {
        table.print_table_statistics("AFTER FILTERING");
    }

    if args.stats_only {
        println!("\n✅ Statistics analysis completed");
        return Ok(());
    }

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        println!(
            "📊 Final table: {} samples × {} genes",
            table.sample_names().len(),
            table.gene_names().len()
        );
        return Ok(());
    }

    if args.min_shared_genes > 1 {
        println!("📏 Minimum shared genes: {}", args.min_shared_genes);
    }

    let engine = PairwiseDistanceEngine::new(EngineConfig {
        min_shared_genes: args.min_shared_genes,
        progress: !args.quiet,
    });
    let result = engine.compute(&table).map_err(|e| e.to_string())?;

    report_skipped(&result);
    println!(
        "🧬 Gene resolutions: {} ({} ambiguous pairings)",
        result.gene_resolutions(),
        result.ambiguous_resolutions()
    );

    if let Some(output_path) = output {
        write_matrix(&output_path, &args.format, &result.dist, &command_line)?;
    }
    if let Some(details_path) = &args.details {
        write_details(details_path, &result)?;
    }

    println!(
        "\n⏱️  Total execution time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn report_skipped(result: &MetricResult) {
    if result.skipped.is_empty() {
        return;
    }
    println!(
        "⚠️  {} sample pairs have no distance (written as NA):",
        result.skipped.len()
    );
    for skipped in result.skipped.iter().take(10) {
        println!(
            "   - {} / {}: {}",
            skipped.sample_a, skipped.sample_b, skipped.reason
        );
    }
    if result.skipped.len() > 10 {
        println!("   ... and {} more", result.skipped.len() - 10);
    }
}
