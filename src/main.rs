//! Rentcorr: Listing Cleanup and Price Correlation CLI
//!
//! Loads a rental listings CSV, cleans it, engineers numeric features and
//! reports the features most correlated with the total price.

use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use rentcorr::cli::Cli;
use rentcorr::pipeline::{
    analyze_correlations, clean_listings, dtype_listing, engineer_features, load_listings,
    missing_counts, resolve_input, sample_rows, CleanOutcome, FeatureOutcome,
};
use rentcorr::report::{
    display_cleaning_summary, display_correlation_analysis, display_dtypes,
    display_feature_summary, display_missing_counts,
};
use rentcorr::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success,
};

fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = cli.pipeline_config();
    cfg.validate()?;

    let input = resolve_input(&cli.input)?;

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&input, &cfg);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV...");
    let (df, rows, cols, memory_mb) = load_listings(&input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let df = sample_rows(df, cfg.sample_fraction, cfg.seed)?;
    if cfg.sample_fraction < 1.0 {
        print_count(
            &format!("rows sampled ({:.1}%, seed {})", cfg.sample_fraction * 100.0, cfg.seed),
            df.height(),
        );
    }
    display_missing_counts("MISSING VALUES (RAW)", &missing_counts(&df));
    print_step_time(step_start.elapsed());

    // Step 2: Cleaning
    print_step_header(2, "Cleaning");
    let step_start = Instant::now();
    let now = Local::now().naive_local();
    let spinner = create_spinner("Dropping, parsing and imputing...");
    let CleanOutcome { df, summary } = clean_listings(df, &cfg, now)?;
    finish_with_success(&spinner, "Cleaning complete");

    display_missing_counts("MISSING VALUES (AFTER CLEANING)", &summary.missing_after_cleaning);
    display_cleaning_summary(&summary);
    if summary.residual_duplicates == 0 {
        print_success("No duplicate rows remain");
    }
    print_step_time(step_start.elapsed());

    // Step 3: Feature transforms
    print_step_header(3, "Feature Transforms");
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding, capping and scaling...");
    let FeatureOutcome { df, summary } = engineer_features(df, &cfg)?;
    finish_with_success(&spinner, "Feature transforms complete");

    display_feature_summary(&summary);
    display_dtypes(&dtype_listing(&df));
    print_step_time(step_start.elapsed());

    // Step 4: Correlation analysis
    print_step_header(4, "Correlation Analysis");
    let step_start = Instant::now();
    let spinner = create_spinner("Computing correlation matrix...");
    let analysis = analyze_correlations(&df, &cfg)?;
    finish_with_success(&spinner, "Correlation analysis complete");

    display_correlation_analysis(&analysis, &cfg.target_column, &cfg.subgroup_column);
    if analysis.has_subgroups && analysis.subgroups.is_empty() {
        print_info("No subgroup produced a defined correlation");
    }
    print_step_time(step_start.elapsed());

    // Final completion message
    print_completion();

    Ok(())
}
