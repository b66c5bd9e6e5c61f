//! Progress tracking module for masking runs.
//!
//! Per-file stage display for the CLI and the final batch summary.

use std::fmt;
use std::time::Instant;

use crate::masking::MaskRect;

/// Processing stages of one masking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingStage {
    /// Initializing
    #[default]
    Initializing,
    /// Decoding the input image
    Loading,
    /// Searching for the readable orientation
    Orienting,
    /// Running full text detection
    Extracting,
    /// Planning mask rectangles
    Planning,
    /// Encoding the masked image
    Writing,
    /// Completed
    Completed,
}

impl ProcessingStage {
    /// Get the name of the stage
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingStage::Initializing => "Initializing",
            ProcessingStage::Loading => "Loading",
            ProcessingStage::Orienting => "Orienting",
            ProcessingStage::Extracting => "Extracting",
            ProcessingStage::Planning => "Planning",
            ProcessingStage::Writing => "Writing",
            ProcessingStage::Completed => "Completed",
        }
    }

    /// Get a short description of the stage
    pub fn description(&self) -> &'static str {
        match self {
            ProcessingStage::Initializing => "starting",
            ProcessingStage::Loading => "decoding image",
            ProcessingStage::Orienting => "probing rotations",
            ProcessingStage::Extracting => "detecting text",
            ProcessingStage::Planning => "locating numbers and addresses",
            ProcessingStage::Writing => "saving masked image",
            ProcessingStage::Completed => "done",
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.description())
    }
}

/// Receives stage changes from the masking pipeline
pub trait ProgressCallback {
    /// Called when a new stage begins
    fn on_stage(&mut self, stage: ProcessingStage);
}

/// Progress sink that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_stage(&mut self, _stage: ProcessingStage) {}
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// No output
    Quiet,
    /// Normal output (file headers and results)
    #[default]
    Normal,
    /// Verbose output (stage display)
    Verbose,
    /// Very verbose (every masked rectangle)
    VeryVerbose,
}

impl OutputMode {
    /// Create OutputMode from verbosity level
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => OutputMode::Normal,
            1 => OutputMode::Verbose,
            _ => OutputMode::VeryVerbose,
        }
    }

    /// Check if output should be shown at this mode
    pub fn should_show(&self, required: OutputMode) -> bool {
        use OutputMode::*;
        match (self, required) {
            (Quiet, _) => false,
            (Normal, Quiet | Normal) => true,
            (Verbose, Quiet | Normal | Verbose) => true,
            (VeryVerbose, _) => true,
            _ => false,
        }
    }
}

/// Progress tracker for a batch of images
#[derive(Debug)]
pub struct ProgressTracker {
    /// Current file number (1-based)
    pub current_file: usize,
    /// Total number of files
    pub total_files: usize,
    /// Current filename
    pub current_filename: String,
    /// Current processing stage
    pub current_stage: ProcessingStage,
    /// Start time of the current file
    start_time: Instant,
    /// Output mode
    output_mode: OutputMode,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(1, OutputMode::Normal)
    }
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(total_files: usize, output_mode: OutputMode) -> Self {
        Self {
            current_file: 0,
            total_files,
            current_filename: String::new(),
            current_stage: ProcessingStage::Initializing,
            start_time: Instant::now(),
            output_mode,
        }
    }

    /// Start processing a new file
    pub fn start_file(&mut self, file_number: usize, filename: &str) {
        self.current_file = file_number;
        self.current_filename = filename.to_string();
        self.current_stage = ProcessingStage::Initializing;
        self.start_time = Instant::now();

        if self.output_mode.should_show(OutputMode::Normal) {
            println!(
                "[{}/{}] {}",
                self.current_file, self.total_files, self.current_filename
            );
        }
    }

    /// Set the current processing stage
    pub fn set_stage(&mut self, stage: ProcessingStage) {
        self.current_stage = stage;

        if self.output_mode.should_show(OutputMode::Verbose) {
            println!("  Stage: {}", self.current_stage);
        }
    }

    /// Mark the current file as complete with its painted rectangles
    pub fn complete_file(&mut self, rects: &[MaskRect]) {
        self.current_stage = ProcessingStage::Completed;

        if self.output_mode.should_show(OutputMode::Normal) {
            println!(
                "  Masked {} region(s) in {:.2}s",
                rects.len(),
                self.elapsed_secs()
            );
        }
        if self.output_mode.should_show(OutputMode::VeryVerbose) {
            for line in Self::rect_lines(rects) {
                println!("{}", line);
            }
        }
    }

    /// One display line per masked rectangle
    pub fn rect_lines(rects: &[MaskRect]) -> Vec<String> {
        rects.iter().map(|rect| format!("    - {}", rect)).collect()
    }

    /// Get elapsed time of the current file in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Print final summary
    pub fn print_summary(
        total_files: usize,
        ok_count: usize,
        unredacted_count: usize,
        error_count: usize,
    ) {
        println!();
        println!("{}", "=".repeat(60));
        println!("Masking Summary");
        println!("{}", "=".repeat(60));
        println!("  Total files:  {}", total_files);
        println!("  Masked:       {}", ok_count);
        println!("  Unredacted:   {}", unredacted_count);
        println!("  Errors:       {}", error_count);
        println!("{}", "=".repeat(60));
    }
}

impl ProgressCallback for ProgressTracker {
    fn on_stage(&mut self, stage: ProcessingStage) {
        self.set_stage(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::MaskReason;

    #[test]
    fn test_progress_tracker_new() {
        let tracker = ProgressTracker::new(5, OutputMode::Normal);
        assert_eq!(tracker.total_files, 5);
        assert_eq!(tracker.current_file, 0);
        assert_eq!(tracker.current_stage, ProcessingStage::Initializing);
    }

    #[test]
    fn test_start_file() {
        let mut tracker = ProgressTracker::new(3, OutputMode::Quiet);
        tracker.start_file(1, "card.jpg");
        assert_eq!(tracker.current_file, 1);
        assert_eq!(tracker.current_filename, "card.jpg");
    }

    #[test]
    fn test_callback_sets_stage() {
        let mut tracker = ProgressTracker::new(1, OutputMode::Quiet);
        tracker.on_stage(ProcessingStage::Orienting);
        assert_eq!(tracker.current_stage, ProcessingStage::Orienting);
    }

    #[test]
    fn test_complete_file() {
        let mut tracker = ProgressTracker::new(1, OutputMode::Quiet);
        tracker.start_file(1, "card.jpg");
        tracker.set_stage(ProcessingStage::Writing);
        tracker.complete_file(&[]);
        assert_eq!(tracker.current_stage, ProcessingStage::Completed);
    }

    #[test]
    fn test_rect_lines() {
        let rects = [
            MaskRect::new(0, 0, 200, 40, MaskReason::FullNumber),
            MaskRect::new(20, 100, 220, 145, MaskReason::AddressBlock),
        ];
        assert_eq!(
            ProgressTracker::rect_lines(&rects),
            vec![
                "    - (0, 0)-(200, 40) [full-number]",
                "    - (20, 100)-(220, 145) [address-block]",
            ]
        );

        let mut tracker = ProgressTracker::new(1, OutputMode::VeryVerbose);
        tracker.start_file(1, "card.jpg");
        tracker.complete_file(&rects);
        assert_eq!(tracker.current_stage, ProcessingStage::Completed);
    }

    #[test]
    fn test_processing_stage_name() {
        assert_eq!(ProcessingStage::Initializing.name(), "Initializing");
        assert_eq!(ProcessingStage::Loading.name(), "Loading");
        assert_eq!(ProcessingStage::Orienting.name(), "Orienting");
        assert_eq!(ProcessingStage::Extracting.name(), "Extracting");
        assert_eq!(ProcessingStage::Planning.name(), "Planning");
        assert_eq!(ProcessingStage::Writing.name(), "Writing");
        assert_eq!(ProcessingStage::Completed.name(), "Completed");
    }

    #[test]
    fn test_processing_stage_display() {
        let display = format!("{}", ProcessingStage::Orienting);
        assert_eq!(display, "Orienting (probing rotations)");
    }

    #[test]
    fn test_output_mode_quiet() {
        let mode = OutputMode::Quiet;
        assert!(!mode.should_show(OutputMode::Quiet));
        assert!(!mode.should_show(OutputMode::Normal));
        assert!(!mode.should_show(OutputMode::Verbose));
    }

    #[test]
    fn test_output_mode_normal() {
        let mode = OutputMode::Normal;
        assert!(mode.should_show(OutputMode::Quiet));
        assert!(mode.should_show(OutputMode::Normal));
        assert!(!mode.should_show(OutputMode::Verbose));
        assert!(!mode.should_show(OutputMode::VeryVerbose));
    }

    #[test]
    fn test_output_mode_verbose() {
        let mode = OutputMode::Verbose;
        assert!(mode.should_show(OutputMode::Normal));
        assert!(mode.should_show(OutputMode::Verbose));
        assert!(!mode.should_show(OutputMode::VeryVerbose));
    }

    #[test]
    fn test_output_mode_from_verbosity() {
        assert_eq!(OutputMode::from_verbosity(0), OutputMode::Normal);
        assert_eq!(OutputMode::from_verbosity(1), OutputMode::Verbose);
        assert_eq!(OutputMode::from_verbosity(2), OutputMode::VeryVerbose);
        assert_eq!(OutputMode::from_verbosity(10), OutputMode::VeryVerbose);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProcessingStage::default(), ProcessingStage::Initializing);
        assert_eq!(OutputMode::default(), OutputMode::Normal);
        let tracker = ProgressTracker::default();
        assert_eq!(tracker.total_files, 1);
    }

    #[test]
    fn test_elapsed_secs() {
        let tracker = ProgressTracker::new(1, OutputMode::Quiet);
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(tracker.elapsed_secs() >= 0.01);
    }
}
