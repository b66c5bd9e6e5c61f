//! aadhaar-mask - Aadhaar card redaction
//!
//! CLI entry point

use aadhaar_mask::{
    augment_directory, exit_codes, rename_sequential,
    // CLI
    AugmentArgs, Cli, Commands, MaskArgs,
    // Config
    CliOverrides, Config,
    // Pipeline
    AugmentOptions, CommandTextDetector, MaskingPipeline,
    // Progress tracking
    OutputMode, ProgressTracker,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Mask(args) => run_mask(&args),
        Commands::Augment(args) => run_augment(&args),
        Commands::Info => run_info().map(|()| exit_codes::SUCCESS),
    };

    std::process::exit(match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

/// Install the stderr log subscriber for the requested verbosity
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============ Mask Command ============

fn run_mask(args: &MaskArgs) -> Result<i32> {
    init_logging(args.verbose, args.quiet);
    let start_time = Instant::now();

    // Validate input path
    if !args.input.exists() {
        eprintln!("Error: Input path does not exist: {}", args.input.display());
        return Ok(exit_codes::INPUT_NOT_FOUND);
    }

    let batch = args.input.is_dir();
    let images = collect_image_files(&args.input)?;
    if images.is_empty() {
        eprintln!("Error: No images found in input path");
        return Ok(exit_codes::INPUT_NOT_FOUND);
    }

    // Load config file if specified, otherwise search the default locations
    let file_config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let config = file_config.merge_with_cli(&create_cli_overrides(args));
    config.masking.validate()?;

    let mut detector = CommandTextDetector::new(
        &config.detector.program,
        config.detector.args.clone(),
        config.detector.languages.clone(),
    )
    .context("Text detector unavailable (see `aadhaar-mask info`)")?;
    let pipeline = MaskingPipeline::new(config.masking);

    let mode = if args.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::from_verbosity(args.verbose)
    };
    let mut tracker = ProgressTracker::new(images.len(), mode);

    // Track processing results
    let mut ok_count = 0usize;
    let mut unredacted_count = 0usize;
    let mut error_count = 0usize;
    let mut below_minimum = Vec::new();

    for (idx, image_path) in images.iter().enumerate() {
        let output_path = output_path_for(image_path, &args.output, batch);
        let name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracker.start_file(idx + 1, &name);

        match pipeline.process_with_progress(&mut detector, image_path, &output_path, &mut tracker)
        {
            Ok(report) => {
                tracker.complete_file(&report.rects);
                if report.is_unredacted() {
                    unredacted_count += 1;
                } else {
                    ok_count += 1;
                }
                if !report.meets_minimum(args.min_redactions) {
                    below_minimum.push(image_path.clone());
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", image_path.display(), e);
                error_count += 1;
            }
        }
    }

    // Print summary
    if batch && !args.quiet {
        ProgressTracker::print_summary(images.len(), ok_count, unredacted_count, error_count);
        println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    }

    // Report short images even when other files failed
    for path in &below_minimum {
        eprintln!(
            "Fewer than {} redaction(s): {}",
            args.min_redactions,
            path.display()
        );
    }

    if error_count > 0 {
        anyhow::bail!("{} file(s) failed to process", error_count);
    }

    if !below_minimum.is_empty() {
        return Ok(exit_codes::INSUFFICIENT_REDACTIONS);
    }

    Ok(exit_codes::SUCCESS)
}

/// Create CLI overrides from MaskArgs
///
/// Only values given on the command line are set, so config files keep
/// supplying everything else.
fn create_cli_overrides(args: &MaskArgs) -> CliOverrides {
    let mut overrides = CliOverrides::new();

    overrides.detector_program = args.detector.clone();
    if !args.detector_args.is_empty() {
        overrides.detector_args = Some(args.detector_args.clone());
    }
    if !args.languages.is_empty() {
        overrides.languages = Some(args.languages.clone());
    }
    overrides.chunk_order = args.chunk_order;
    overrides.orientation_min_confidence = args.orientation_confidence;
    overrides.extract_min_confidence = args.extract_confidence;
    overrides.extra_keywords = args.keywords.clone();

    overrides
}

/// Collect image files from input path (file or directory)
fn collect_image_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if input.is_file() {
        files.push(input.to_path_buf());
    } else if input.is_dir() {
        let entries = std::fs::read_dir(input)
            .with_context(|| format!("Failed to read directory {}", input.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
                files.push(path);
            }
        }
        files.sort();
    }

    Ok(files)
}

/// Where the masked copy of `image_path` goes
fn output_path_for(image_path: &Path, output: &Path, batch: bool) -> PathBuf {
    match image_path.file_name() {
        Some(name) if batch || output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    }
}

// ============ Augment Command ============

fn run_augment(args: &AugmentArgs) -> Result<i32> {
    init_logging(args.verbose, args.quiet);
    let start_time = Instant::now();

    if !args.input.is_dir() {
        eprintln!(
            "Error: Input directory does not exist: {}",
            args.input.display()
        );
        return Ok(exit_codes::INPUT_NOT_FOUND);
    }

    let mut options = AugmentOptions::default().with_progress(!args.quiet);
    if let Some(threads) = args.threads {
        options = options.with_threads(threads);
    }
    if let Some(expected) = args.expect {
        options = options.with_expected_count(expected);
    }

    let summary = augment_directory(&args.input, &args.output, &options)?;

    let renamed = if args.no_rename {
        0
    } else {
        rename_sequential(&args.output, &args.prefix, args.start)?
    };

    if !args.quiet {
        println!("Source files:  {}", summary.sources);
        println!("Augmented:     {}", summary.augmented);
        println!("Unreadable:    {}", summary.skipped.len());
        println!("Written:       {}", summary.written);
        if !args.no_rename {
            println!("Renamed:       {} (prefix '{}')", renamed, args.prefix);
        }
        println!("Output:        {}", args.output.display());
        println!("Total time:    {:.2}s", start_time.elapsed().as_secs_f64());
    }

    Ok(exit_codes::SUCCESS)
}

// ============ Info Command ============

fn run_info() -> Result<()> {
    println!("aadhaar-mask v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // System Information
    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    // Text detector
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            println!();
            println!("Config: {}", e);
            Config::default()
        }
    };
    println!();
    println!("Text Detector:");
    check_tool(&config.detector.program, "Program");
    println!("  Languages: {}", config.detector.languages.join(", "));
    if !config.detector.args.is_empty() {
        println!("  Arguments: {}", config.detector.args.join(" "));
    }

    // Config File Locations
    println!();
    println!("Config File Locations:");
    for path in Config::search_paths() {
        let state = if path.is_file() { "found" } else { "absent" };
        println!("  {} ({})", path.display(), state);
    }

    Ok(())
}

fn check_tool(cmd: &str, name: &str) {
    match which::which(cmd) {
        Ok(path) => println!("  {}: {} (found)", name, path.display()),
        Err(_) => println!("  {}: {} (not found)", name, cmd),
    }
}
