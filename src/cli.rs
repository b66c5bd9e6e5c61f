//! CLI argument definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::augment::{DEFAULT_RENAME_PREFIX, DEFAULT_RENAME_START};
use crate::masking::ChunkOrder;

/// Redact Aadhaar numbers and addresses from ID-card photos
#[derive(Parser, Debug)]
#[command(name = "aadhaar-mask")]
#[command(version)]
#[command(about = "Redact Aadhaar numbers and addresses from ID-card photos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mask one image, or every image in a directory
    Mask(MaskArgs),

    /// Write rotated and mirrored copies of a folder of card photos
    Augment(AugmentArgs),

    /// Show detector availability and config file locations
    Info,
}

#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Input image or directory of images
    pub input: PathBuf,

    /// Output image, or output directory when INPUT is a directory
    pub output: PathBuf,

    /// Config file (default: search ./aadhaar-mask.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Text detection program
    #[arg(long)]
    pub detector: Option<String>,

    /// Extra argument passed to the detection program (repeatable)
    #[arg(long = "detector-arg", allow_hyphen_values = true)]
    pub detector_args: Vec<String>,

    /// Recognition language (repeatable)
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Chunk windowing order: spatial or collection
    #[arg(long)]
    pub chunk_order: Option<ChunkOrder>,

    /// Extra address keyword (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Minimum confidence for orientation probes
    #[arg(long)]
    pub orientation_confidence: Option<f32>,

    /// Minimum confidence for extracted regions
    #[arg(long)]
    pub extract_confidence: Option<f32>,

    /// Fail with exit code 3 when fewer rectangles are masked in any image
    #[arg(long, default_value_t = 0)]
    pub min_redactions: usize,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct AugmentArgs {
    /// Directory of source images
    pub input: PathBuf,

    /// Directory for the augmented images
    pub output: PathBuf,

    /// Prefix for sequential renaming
    #[arg(long, default_value = DEFAULT_RENAME_PREFIX)]
    pub prefix: String,

    /// First index for sequential renaming
    #[arg(long, default_value_t = DEFAULT_RENAME_START)]
    pub start: usize,

    /// Keep the generated names instead of renaming sequentially
    #[arg(long)]
    pub no_rename: bool,

    /// Expected number of source files (warns on mismatch)
    #[arg(long)]
    pub expect: Option<usize>,

    /// Worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_mask_defaults() {
        let cli = Cli::try_parse_from(["aadhaar-mask", "mask", "in.jpg", "out.jpg"]).unwrap();
        match cli.command {
            Commands::Mask(args) => {
                assert_eq!(args.input, PathBuf::from("in.jpg"));
                assert_eq!(args.output, PathBuf::from("out.jpg"));
                assert!(args.config.is_none());
                assert!(args.detector_args.is_empty());
                assert!(args.chunk_order.is_none());
                assert_eq!(args.min_redactions, 0);
                assert_eq!(args.verbose, 0);
                assert!(!args.quiet);
            }
            _ => panic!("expected mask"),
        }
    }

    #[test]
    fn test_mask_all_options() {
        let cli = Cli::try_parse_from([
            "aadhaar-mask",
            "mask",
            "cards",
            "masked",
            "--detector",
            "my-ocr",
            "--detector-arg",
            "--gpu",
            "--detector-arg",
            "0",
            "-l",
            "en",
            "--language",
            "hi",
            "--chunk-order",
            "collection",
            "-k",
            "mohalla",
            "--min-redactions",
            "1",
            "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Mask(args) => {
                assert_eq!(args.detector.as_deref(), Some("my-ocr"));
                assert_eq!(args.detector_args, vec!["--gpu", "0"]);
                assert_eq!(args.languages, vec!["en", "hi"]);
                assert_eq!(args.chunk_order, Some(ChunkOrder::Collection));
                assert_eq!(args.keywords, vec!["mohalla"]);
                assert_eq!(args.min_redactions, 1);
                assert_eq!(args.verbose, 2);
            }
            _ => panic!("expected mask"),
        }
    }

    #[test]
    fn test_mask_rejects_unknown_chunk_order() {
        let result = Cli::try_parse_from([
            "aadhaar-mask",
            "mask",
            "a.jpg",
            "b.jpg",
            "--chunk-order",
            "diagonal",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_augment_defaults() {
        let cli = Cli::try_parse_from(["aadhaar-mask", "augment", "in", "out"]).unwrap();
        match cli.command {
            Commands::Augment(args) => {
                assert_eq!(args.prefix, "image_");
                assert_eq!(args.start, 1);
                assert!(!args.no_rename);
                assert!(args.expect.is_none());
                assert!(args.threads.is_none());
            }
            _ => panic!("expected augment"),
        }
    }

    #[test]
    fn test_info() {
        let cli = Cli::try_parse_from(["aadhaar-mask", "info"]).unwrap();
        assert!(matches!(cli.command, Commands::Info));
    }
}
