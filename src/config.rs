//! Configuration file support
//!
//! Settings come from a TOML file and can be overridden from the command
//! line. Search order for the file:
//!
//! 1. `./aadhaar-mask.toml`
//! 2. `<config dir>/aadhaar-mask/config.toml`
//!
//! ```toml
//! [detector]
//! program = "easyocr-json"
//! languages = ["en", "hi", "mr"]
//!
//! [masking]
//! orientation_min_confidence = 0.3
//! extract_min_confidence = 0.2
//! line_tolerance_px = 30
//! extra_keywords = ["mohalla"]
//!
//! [masking.aadhaar]
//! chunk_line_tolerance_px = 20
//! chunk_max_span_px = 300
//! chunk_order = "spatial"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::detection::{DEFAULT_DETECTOR_PROGRAM, DEFAULT_EXTRACT_MIN_CONFIDENCE, DEFAULT_LANGUAGES};
use crate::grouping::DEFAULT_LINE_TOLERANCE_PX;
use crate::masking::{AadhaarMaskOptions, AddressKeywords, ChunkOrder};
use crate::orientation::DEFAULT_ORIENTATION_MIN_CONFIDENCE;

/// Local config file name
pub const LOCAL_CONFIG_FILE: &str = "aadhaar-mask.toml";

/// Config directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "aadhaar-mask";

/// Smallest accepted pixel tolerance
const MIN_TOLERANCE_PX: i32 = 1;

// ============================================================
// Error Types
// ============================================================

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ============================================================
// Sections
// ============================================================

/// Detection program settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Program name or path
    pub program: String,
    /// Extra arguments placed before the language list and image path
    pub args: Vec<String>,
    /// Recognition languages
    pub languages: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_DETECTOR_PROGRAM.to_string(),
            args: Vec::new(),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Masking thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Confidence floor for orientation probes
    pub orientation_min_confidence: f32,
    /// Confidence floor for region extraction
    pub extract_min_confidence: f32,
    /// Vertical tolerance between neighbors of one line block (pixels)
    pub line_tolerance_px: i32,
    /// Keywords added to the built-in address set
    pub extra_keywords: Vec<String>,
    /// Aadhaar number masking options
    pub aadhaar: AadhaarMaskOptions,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            orientation_min_confidence: DEFAULT_ORIENTATION_MIN_CONFIDENCE,
            extract_min_confidence: DEFAULT_EXTRACT_MIN_CONFIDENCE,
            line_tolerance_px: DEFAULT_LINE_TOLERANCE_PX,
            extra_keywords: Vec::new(),
            aadhaar: AadhaarMaskOptions::default(),
        }
    }
}

impl MaskingConfig {
    /// Create a builder
    pub fn builder() -> MaskingConfigBuilder {
        MaskingConfigBuilder::default()
    }

    /// Built-in keywords plus any configured extras
    pub fn keywords(&self) -> AddressKeywords {
        let mut keywords = AddressKeywords::builtin();
        keywords.extend(&self.extra_keywords);
        keywords
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("orientation_min_confidence", self.orientation_min_confidence),
            ("extract_min_confidence", self.extract_min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0.0-1.0, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("line_tolerance_px", self.line_tolerance_px),
            ("chunk_line_tolerance_px", self.aadhaar.chunk_line_tolerance_px),
            ("chunk_max_span_px", self.aadhaar.chunk_max_span_px),
        ] {
            if value < MIN_TOLERANCE_PX {
                return Err(ConfigError::Invalid(format!(
                    "{} must be at least {}, got {}",
                    name, MIN_TOLERANCE_PX, value
                )));
            }
        }

        Ok(())
    }
}

/// Builder for MaskingConfig
#[derive(Debug, Default)]
pub struct MaskingConfigBuilder {
    config: MaskingConfig,
}

impl MaskingConfigBuilder {
    /// Set orientation confidence floor (clamped to 0-1)
    #[must_use]
    pub fn orientation_min_confidence(mut self, confidence: f32) -> Self {
        self.config.orientation_min_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Set extraction confidence floor (clamped to 0-1)
    #[must_use]
    pub fn extract_min_confidence(mut self, confidence: f32) -> Self {
        self.config.extract_min_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Set line block tolerance (at least 1 px)
    #[must_use]
    pub fn line_tolerance_px(mut self, px: i32) -> Self {
        self.config.line_tolerance_px = px.max(MIN_TOLERANCE_PX);
        self
    }

    /// Set chunk line tolerance (at least 1 px)
    #[must_use]
    pub fn chunk_line_tolerance_px(mut self, px: i32) -> Self {
        self.config.aadhaar.chunk_line_tolerance_px = px.max(MIN_TOLERANCE_PX);
        self
    }

    /// Set maximum chunk window span (at least 1 px)
    #[must_use]
    pub fn chunk_max_span_px(mut self, px: i32) -> Self {
        self.config.aadhaar.chunk_max_span_px = px.max(MIN_TOLERANCE_PX);
        self
    }

    /// Set chunk ordering
    #[must_use]
    pub fn chunk_order(mut self, order: ChunkOrder) -> Self {
        self.config.aadhaar.chunk_order = order;
        self
    }

    /// Add an address keyword
    #[must_use]
    pub fn add_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.extra_keywords.push(keyword.into());
        self
    }

    /// Build the config
    #[must_use]
    pub fn build(self) -> MaskingConfig {
        self.config
    }
}

// ============================================================
// Config File
// ============================================================

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection program
    pub detector: DetectorConfig,
    /// Masking thresholds
    pub masking: MaskingConfig,
}

/// Values set explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub detector_program: Option<String>,
    pub detector_args: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub chunk_order: Option<ChunkOrder>,
    pub orientation_min_confidence: Option<f32>,
    pub extract_min_confidence: Option<f32>,
    pub extra_keywords: Vec<String>,
}

impl CliOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }
}

impl Config {
    /// Load from the first config file found, or defaults
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.masking.validate()?;
        Ok(config)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Candidate config file locations, in search order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(CONFIG_DIR_NAME).join("config.toml"));
        }
        paths
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|p| p.is_file())
    }

    /// Apply command-line overrides; CLI values win
    pub fn merge_with_cli(mut self, cli: &CliOverrides) -> Self {
        if let Some(program) = &cli.detector_program {
            self.detector.program = program.clone();
        }
        if let Some(args) = &cli.detector_args {
            self.detector.args = args.clone();
        }
        if let Some(languages) = &cli.languages {
            self.detector.languages = languages.clone();
        }
        if let Some(order) = cli.chunk_order {
            self.masking.aadhaar.chunk_order = order;
        }
        if let Some(confidence) = cli.orientation_min_confidence {
            self.masking.orientation_min_confidence = confidence.clamp(0.0, 1.0);
        }
        if let Some(confidence) = cli.extract_min_confidence {
            self.masking.extract_min_confidence = confidence.clamp(0.0, 1.0);
        }
        self.masking
            .extra_keywords
            .extend(cli.extra_keywords.iter().cloned());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_masking_config_default() {
        let config = MaskingConfig::default();
        assert_eq!(config.orientation_min_confidence, 0.3);
        assert_eq!(config.extract_min_confidence, 0.20);
        assert_eq!(config.line_tolerance_px, 30);
        assert_eq!(config.aadhaar.chunk_line_tolerance_px, 20);
        assert_eq!(config.aadhaar.chunk_max_span_px, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_clamping() {
        let config = MaskingConfig::builder()
            .orientation_min_confidence(1.5)
            .extract_min_confidence(-0.1)
            .line_tolerance_px(0)
            .chunk_max_span_px(-20)
            .build();
        assert_eq!(config.orientation_min_confidence, 1.0);
        assert_eq!(config.extract_min_confidence, 0.0);
        assert_eq!(config.line_tolerance_px, 1);
        assert_eq!(config.aadhaar.chunk_max_span_px, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_keywords() {
        let config = MaskingConfig::builder()
            .add_keyword("Mohalla")
            .chunk_order(ChunkOrder::Collection)
            .build();
        assert_eq!(config.keywords().find("mohalla 3"), Some("mohalla"));
        assert_eq!(config.aadhaar.chunk_order, ChunkOrder::Collection);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = MaskingConfig {
            extract_min_confidence: 2.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = MaskingConfig {
            line_tolerance_px: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [masking]
            line_tolerance_px = 40

            [masking.aadhaar]
            chunk_order = "collection"
            "#,
        )
        .unwrap();
        assert_eq!(config.masking.line_tolerance_px, 40);
        assert_eq!(config.masking.extract_min_confidence, 0.20);
        assert_eq!(config.masking.aadhaar.chunk_order, ChunkOrder::Collection);
        assert_eq!(config.detector, DetectorConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let parsed = Config::from_toml(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[detector]\nprogram = \"my-ocr\"\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.detector.program, "my-ocr");
        assert_eq!(config.detector.languages, vec!["en", "hi", "mr"]);
    }

    #[test]
    fn test_load_from_path_errors() {
        let missing = Config::load_from_path(Path::new("/nonexistent/aadhaar-mask.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[masking\n").unwrap();
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));

        std::fs::write(&path, "[masking]\norientation_min_confidence = 3.0\n").unwrap();
        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_merge_with_cli() {
        let mut cli = CliOverrides::new();
        cli.detector_program = Some("paddle-json".to_string());
        cli.languages = Some(vec!["en".to_string()]);
        cli.chunk_order = Some(ChunkOrder::Collection);
        cli.extract_min_confidence = Some(0.5);
        cli.extra_keywords = vec!["nagar".to_string()];

        let merged = Config::default().merge_with_cli(&cli);
        assert_eq!(merged.detector.program, "paddle-json");
        assert_eq!(merged.detector.languages, vec!["en"]);
        assert_eq!(merged.masking.aadhaar.chunk_order, ChunkOrder::Collection);
        assert_eq!(merged.masking.extract_min_confidence, 0.5);
        assert_eq!(merged.masking.orientation_min_confidence, 0.3);
        assert_eq!(merged.masking.extra_keywords, vec!["nagar"]);
    }

    #[test]
    fn test_merge_empty_cli_keeps_file_values() {
        let mut config = Config::default();
        config.masking.line_tolerance_px = 45;
        let merged = config.clone().merge_with_cli(&CliOverrides::new());
        assert_eq!(merged, config);
    }

    #[test]
    fn test_search_paths() {
        let paths = Config::search_paths();
        assert_eq!(paths[0], PathBuf::from(LOCAL_CONFIG_FILE));
    }
}
