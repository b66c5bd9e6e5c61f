//! Dataset augmentation
//!
//! Builds orientation training data from a folder of card photos: every
//! source image is written in four true rotations, each plain, mirrored
//! left-to-right and mirrored top-to-bottom. A sequential renaming pass
//! gives the output uniform, zero-padded names.
//!
//! This is separate from masking and never touches a text detector.

use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::imaging::{mirror_horizontal, mirror_vertical, rotate_exact, Rotation};

/// Variants written per readable source image
pub const VARIANTS_PER_IMAGE: usize = 12;

/// Default prefix for [`rename_sequential`]
pub const DEFAULT_RENAME_PREFIX: &str = "image_";

/// Default first index for [`rename_sequential`]
pub const DEFAULT_RENAME_START: usize = 1;

// ============================================================
// Error Types
// ============================================================

/// Augmentation error types
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("Input directory not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to write image {path}: {reason}")]
    Image { path: PathBuf, reason: String },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AugmentError>;

// ============================================================
// Options
// ============================================================

/// Augmentation options
#[derive(Debug, Clone, Default)]
pub struct AugmentOptions {
    /// Worker threads (None = one per CPU)
    pub threads: Option<usize>,
    /// Expected number of source files, warned about on mismatch
    pub expected_count: Option<usize>,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl AugmentOptions {
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    #[must_use]
    pub fn with_expected_count(mut self, count: usize) -> Self {
        self.expected_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// What an augmentation run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmentSummary {
    /// Regular files found in the input directory
    pub sources: usize,
    /// Sources decoded and augmented
    pub augmented: usize,
    /// Sources that could not be decoded
    pub skipped: Vec<PathBuf>,
    /// Files written to the output directory
    pub written: usize,
}

// ============================================================
// Augmentation
// ============================================================

/// Build the 12 variants of one image, paired with their name suffixes.
///
/// Order per angle (0, 90, 180, 270, clockwise): plain, horizontal mirror,
/// vertical mirror.
pub fn augment_image(image: &RgbImage) -> Vec<(String, RgbImage)> {
    let mut variants = Vec::with_capacity(VARIANTS_PER_IMAGE);

    for rotation in Rotation::ALL {
        let rotated = rotate_exact(image, rotation);
        let horiz = mirror_horizontal(&rotated);
        let vert = mirror_vertical(&rotated);
        let base = format!("_rotated_{}", rotation.degrees());

        variants.extend([
            (base.clone(), rotated),
            (format!("{base}_horiz"), horiz),
            (format!("{base}_vert"), vert),
        ]);
    }

    variants
}

/// Augment every image in `input_dir` into `output_dir`.
///
/// Files that do not decode are logged and skipped. Output names are
/// `{stem}{suffix}{ext}` with the source extension kept as-is.
pub fn augment_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &AugmentOptions,
) -> Result<AugmentSummary> {
    if !input_dir.is_dir() {
        return Err(AugmentError::InputNotFound(input_dir.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir)?;

    let files = list_files(input_dir)?;
    if let Some(expected) = options.expected_count {
        if expected != files.len() {
            tracing::warn!(expected, found = files.len(), "Unexpected number of source images");
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or_else(num_cpus::get))
        .build()
        .map_err(|e| AugmentError::ThreadPool(e.to_string()))?;

    let bar = if options.show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let results: Vec<Result<Option<usize>>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = augment_file(path, output_dir);
                bar.inc(1);
                result
            })
            .collect()
    });
    bar.finish_and_clear();

    let mut summary = AugmentSummary {
        sources: files.len(),
        ..Default::default()
    };
    for (path, result) in files.iter().zip(results) {
        match result? {
            Some(written) => {
                summary.augmented += 1;
                summary.written += written;
            }
            None => summary.skipped.push(path.clone()),
        }
    }

    tracing::info!(
        output = %output_dir.display(),
        augmented = summary.augmented,
        skipped = summary.skipped.len(),
        written = summary.written,
        "Augmentation finished"
    );
    Ok(summary)
}

/// Augment one file; `None` when it could not be decoded
fn augment_file(path: &Path, output_dir: &Path) -> Result<Option<usize>> {
    let image = match image::open(path) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read image");
            return Ok(None);
        }
    };

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let variants = augment_image(&image);
    for (suffix, variant) in &variants {
        let target = output_dir.join(format!("{stem}{suffix}{ext}"));
        variant.save(&target).map_err(|e| AugmentError::Image {
            path: target.clone(),
            reason: e.to_string(),
        })?;
    }

    tracing::debug!(path = %path.display(), "Augmented");
    Ok(Some(variants.len()))
}

// ============================================================
// Renaming
// ============================================================

/// Rename every regular file in `dir` to `{prefix}{index:05}{ext}`.
///
/// Files are numbered in name order from `start`; extensions are lowercased.
/// All files move to temporary names first, so a source whose name equals
/// another file's target is never overwritten. Returns the number renamed.
pub fn rename_sequential(dir: &Path, prefix: &str, start: usize) -> Result<usize> {
    if !dir.is_dir() {
        return Err(AugmentError::InputNotFound(dir.to_path_buf()));
    }

    let files = list_files(dir)?;
    let pid = std::process::id();

    let mut staged = Vec::with_capacity(files.len());
    for (i, path) in files.iter().enumerate() {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        let temp = dir.join(format!(".rename-{pid}-{i}.tmp"));
        std::fs::rename(path, &temp)?;
        staged.push((temp, format!("{prefix}{:05}{ext}", start + i)));
    }

    for (temp, name) in &staged {
        std::fs::rename(temp, dir.join(name))?;
    }

    tracing::info!(dir = %dir.display(), count = staged.len(), prefix, "Renamed files");
    Ok(staged.len())
}

/// Regular files directly inside `dir`, sorted by path
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    /// 3x2 white image with a red top-left pixel
    fn marked() -> RgbImage {
        let mut img = RgbImage::from_pixel(3, 2, WHITE);
        img.put_pixel(0, 0, RED);
        img
    }

    fn red_at(img: &RgbImage) -> (u32, u32) {
        img.enumerate_pixels()
            .find(|(_, _, p)| **p == RED)
            .map(|(x, y, _)| (x, y))
            .unwrap()
    }

    #[test]
    fn test_augment_image_names_and_order() {
        let names: Vec<String> = augment_image(&marked()).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names.len(), VARIANTS_PER_IMAGE);
        assert_eq!(
            &names[..3],
            &["_rotated_0", "_rotated_0_horiz", "_rotated_0_vert"]
        );
        assert_eq!(names[9], "_rotated_270");
        assert_eq!(names[11], "_rotated_270_vert");
    }

    #[test]
    fn test_augment_image_geometry() {
        let variants = augment_image(&marked());
        let find = |name: &str| &variants.iter().find(|(n, _)| n == name).unwrap().1;

        assert_eq!(find("_rotated_0").dimensions(), (3, 2));
        assert_eq!(red_at(find("_rotated_0_horiz")), (2, 0));
        assert_eq!(red_at(find("_rotated_0_vert")), (0, 1));

        // Clockwise quarter turn swaps dimensions
        let r90 = find("_rotated_90");
        assert_eq!(r90.dimensions(), (2, 3));
        assert_eq!(red_at(r90), (1, 0));
        assert_eq!(red_at(find("_rotated_90_horiz")), (0, 0));

        assert_eq!(red_at(find("_rotated_180")), (2, 1));
        assert_eq!(red_at(find("_rotated_270")), (0, 2));
    }

    #[test]
    fn test_augment_directory() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        marked().save(input.path().join("a.png")).unwrap();
        marked().save(input.path().join("b.png")).unwrap();
        std::fs::write(input.path().join("notes.txt"), "not an image").unwrap();

        let options = AugmentOptions::default().with_threads(2).with_expected_count(5);
        let summary = augment_directory(input.path(), output.path(), &options).unwrap();

        assert_eq!(summary.sources, 3);
        assert_eq!(summary.augmented, 2);
        assert_eq!(summary.written, 24);
        assert_eq!(summary.skipped, vec![input.path().join("notes.txt")]);

        assert_eq!(list_files(output.path()).unwrap().len(), 24);
        let turned = image::open(output.path().join("a_rotated_90_horiz.png"))
            .unwrap()
            .to_rgb8();
        assert_eq!(turned.dimensions(), (2, 3));
    }

    #[test]
    fn test_augment_directory_missing_input() {
        let output = tempdir().unwrap();
        let result = augment_directory(
            Path::new("/nonexistent/cards"),
            output.path(),
            &AugmentOptions::default(),
        );
        assert!(matches!(result, Err(AugmentError::InputNotFound(_))));
    }

    #[test]
    fn test_rename_sequential() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.PNG"), "b").unwrap();
        std::fs::write(dir.path().join("a.jpg"), "a").unwrap();
        std::fs::write(dir.path().join("c"), "c").unwrap();

        let count = rename_sequential(dir.path(), "Aadhaar_", 1).unwrap();
        assert_eq!(count, 3);

        let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("Aadhaar_00001.jpg"), "a");
        assert_eq!(read("Aadhaar_00002.png"), "b");
        assert_eq!(read("Aadhaar_00003"), "c");
        assert_eq!(list_files(dir.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_rename_sequential_no_clobber() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("img_00001.txt"), "first").unwrap();
        std::fs::write(dir.path().join("img_00002.txt"), "second").unwrap();

        // First file's target is the second file's current name
        rename_sequential(dir.path(), "img_", 2).unwrap();

        let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("img_00002.txt"), "first");
        assert_eq!(read("img_00003.txt"), "second");
        assert!(!dir.path().join("img_00001.txt").exists());
    }

    #[test]
    fn test_rename_empty_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(rename_sequential(dir.path(), DEFAULT_RENAME_PREFIX, 1).unwrap(), 0);
    }

    #[test]
    fn test_options_threads_at_least_one() {
        assert_eq!(AugmentOptions::default().with_threads(0).threads, Some(1));
    }
}
