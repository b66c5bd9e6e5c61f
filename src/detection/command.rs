//! External OCR program adapter
//!
//! Runs a text-detection program as a subprocess. The image is handed over
//! as a temporary PNG and the program answers with a JSON array on stdout:
//!
//! ```json
//! [{"text": "1234 5678 9012", "polygon": [[10,20],[300,20],[300,60],[10,60]], "confidence": 0.93}]
//! ```

use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::{Detection, DetectionError, Result, TextDetector};

/// Default detector program name
pub const DEFAULT_DETECTOR_PROGRAM: &str = "easyocr-json";

/// Default recognition languages (English, Hindi, Marathi)
pub const DEFAULT_LANGUAGES: [&str; 3] = ["en", "hi", "mr"];

/// Text detector backed by an external program
#[derive(Debug, Clone)]
pub struct CommandTextDetector {
    program: PathBuf,
    args: Vec<String>,
    languages: Vec<String>,
    calls: usize,
}

impl CommandTextDetector {
    /// Resolve `program` on PATH (or as a path) and build a detector
    pub fn new(program: &str, args: Vec<String>, languages: Vec<String>) -> Result<Self> {
        let program = which::which(program)
            .map_err(|_| DetectionError::ProgramNotFound(program.to_string()))?;

        Ok(Self {
            program,
            args,
            languages,
            calls: 0,
        })
    }

    /// Detector using the default program and languages
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            DEFAULT_DETECTOR_PROGRAM,
            Vec::new(),
            DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        )
    }

    /// Resolved program path
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Number of detection calls made so far
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Parse the program's stdout
    pub fn parse_output(stdout: &[u8]) -> Result<Vec<Detection>> {
        let detections: Vec<Detection> = serde_json::from_slice(stdout)
            .map_err(|e| DetectionError::InvalidOutput(e.to_string()))?;

        // Confidence outside [0, 1] means the program is not speaking our format
        if let Some(bad) = detections
            .iter()
            .find(|d| !(0.0..=1.0).contains(&d.confidence))
        {
            return Err(DetectionError::InvalidOutput(format!(
                "confidence {} out of range for '{}'",
                bad.confidence, bad.text
            )));
        }

        Ok(detections)
    }

    fn build_command(&self, image_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if !self.languages.is_empty() {
            cmd.arg("--languages").arg(self.languages.join(","));
        }
        cmd.arg(image_path);
        cmd
    }
}

impl TextDetector for CommandTextDetector {
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>> {
        self.calls += 1;

        let file = tempfile::Builder::new()
            .prefix("aadhaar-mask-")
            .suffix(".png")
            .tempfile()?;
        image
            .save(file.path())
            .map_err(|e| DetectionError::Image(e.to_string()))?;

        let output = self
            .build_command(file.path())
            .output()
            .map_err(|source| DetectionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DetectionError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let detections = Self::parse_output(&output.stdout)?;
        tracing::debug!(
            call = self.calls,
            count = detections.len(),
            "Detector returned results"
        );
        Ok(detections)
    }
}
