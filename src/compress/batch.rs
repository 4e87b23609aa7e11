use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::display::{self, BatchProgress};
use super::error::CompressError;
use super::image::{compress_image, savings_percent, EncodeSettings};
use crate::config::CompressConfig;

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Source bytes of the files that were compressed successfully.
    pub total_original: u64,
    pub total_compressed: u64,
    pub failed_files: Vec<PathBuf>,
}

impl BatchSummary {
    pub fn savings_percent(&self) -> f64 {
        savings_percent(self.total_original, self.total_compressed)
    }

    pub fn saved_bytes(&self) -> u64 {
        self.total_original.saturating_sub(self.total_compressed)
    }
}

/// Files in `base_dir` matching `pattern`, sorted by path.
pub fn discover(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CompressError> {
    let escaped_base = glob::Pattern::escape(&base_dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_base).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let entries = glob::glob(&full_pattern).map_err(|source| CompressError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// `<output_dir>/<stem>.jpg`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".jpg");
    output_dir.join(name)
}

pub struct BatchCompressor {
    base_dir: PathBuf,
    pattern: String,
    output_dir: PathBuf,
    settings: EncodeSettings,
    interactive: bool,
}

impl BatchCompressor {
    pub fn new(base_dir: impl Into<PathBuf>, config: &CompressConfig) -> Self {
        Self {
            base_dir: base_dir.into(),
            pattern: config.pattern.clone(),
            output_dir: config.output_dir.clone(),
            settings: EncodeSettings::from(config),
            interactive: false,
        }
    }

    /// Show a progress bar while compressing.
    pub fn with_progress_bar(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }

    /// Compress every matching file, continuing past per-file failures.
    ///
    /// With no matching files nothing is created and an empty summary is
    /// returned.
    pub fn run(&self) -> Result<BatchSummary, CompressError> {
        let files = discover(&self.base_dir, &self.pattern)?;
        let mut summary = BatchSummary {
            found: files.len(),
            ..BatchSummary::default()
        };

        if files.is_empty() {
            display::show_no_files(&self.pattern);
            return Ok(summary);
        }

        println!("Found {} images to compress", files.len());
        println!("{}", display::rule());

        let output_dir = self.output_dir();
        if !output_dir.exists() {
            std::fs::create_dir_all(&output_dir).map_err(|source| CompressError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;
            println!("Created directory: {}", self.output_dir.display());
        }

        info!(
            "Compressing {} files into {:?} (quality {}, max width {})",
            files.len(),
            output_dir,
            self.settings.quality,
            self.settings.max_width
        );

        let progress = BatchProgress::new(files.len() as u64, self.interactive);
        for (index, input) in files.iter().enumerate() {
            progress.start_file(index + 1, files.len(), input);

            let output = output_path_for(input, &output_dir);
            match compress_image(input, &output, &self.settings) {
                Ok(result) => {
                    debug!("Wrote {:?} ({} bytes)", result.output, result.bytes);
                    progress.show_compressed(&result);
                    summary.succeeded += 1;
                    summary.total_original += result.source.bytes;
                    summary.total_compressed += result.bytes;
                }
                Err(e) => {
                    warn!("Failed to compress {:?}: {}", input, e);
                    progress.show_failure(input, &e);
                    summary.failed += 1;
                    summary.failed_files.push(input.clone());
                }
            }
            progress.file_done();
        }
        progress.finish();

        info!(
            "Batch finished: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 190, 180]))
            .save(dir.join(name))
            .unwrap();
    }

    fn config(pattern: &str) -> CompressConfig {
        CompressConfig {
            pattern: pattern.to_string(),
            ..CompressConfig::default()
        }
    }

    #[test]
    fn test_output_path_for_changes_extension() {
        assert_eq!(
            output_path_for(Path::new("/site/scan 01.png"), Path::new("/site/out")),
            PathBuf::from("/site/out/scan 01.jpg")
        );
        assert_eq!(
            output_path_for(Path::new("page.v2.png"), Path::new("out")),
            PathBuf::from("out/page.v2.jpg")
        );
    }

    #[test]
    fn test_discover_sorts_and_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        write_png(temp_dir.path(), "scan_02.png", 4, 4);
        write_png(temp_dir.path(), "scan_01.png", 4, 4);
        write_png(temp_dir.path(), "other.png", 4, 4);
        std::fs::create_dir(temp_dir.path().join("scan_dir.png")).unwrap();

        let files = discover(temp_dir.path(), "scan_*.png").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["scan_01.png", "scan_02.png"]);
    }

    #[test]
    fn test_discover_escapes_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let site = temp_dir.path().join("site [draft]");
        std::fs::create_dir(&site).unwrap();
        write_png(&site, "a.png", 2, 2);

        assert_eq!(discover(&site, "*.png").unwrap().len(), 1);
    }

    #[test]
    fn test_discover_rejects_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let err = discover(temp_dir.path(), "scan_[.png").unwrap_err();
        assert!(matches!(err, CompressError::Pattern { .. }));
    }

    #[test]
    fn test_run_with_no_matches_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_png(temp_dir.path(), "unrelated.png", 4, 4);

        let compressor = BatchCompressor::new(temp_dir.path(), &config("scan_*.png"));
        let summary = compressor.run().unwrap();

        assert_eq!(summary, BatchSummary::default());
        assert!(!compressor.output_dir().exists());
    }

    #[test]
    fn test_run_counts_failures_and_continues() {
        let temp_dir = TempDir::new().unwrap();
        write_png(temp_dir.path(), "scan_01.png", 1500, 1000);
        std::fs::write(temp_dir.path().join("scan_02.png"), b"garbage").unwrap();
        write_png(temp_dir.path(), "scan_03.png", 300, 200);

        let compressor = BatchCompressor::new(temp_dir.path(), &config("scan_*.png"));
        let summary = compressor.run().unwrap();

        assert_eq!(summary.found, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.failed_files,
            vec![temp_dir.path().join("scan_02.png")]
        );

        let out = compressor.output_dir();
        assert!(out.join("scan_01.jpg").is_file());
        assert!(!out.join("scan_02.jpg").exists());
        assert!(out.join("scan_03.jpg").is_file());

        let expected_original = std::fs::metadata(temp_dir.path().join("scan_01.png"))
            .unwrap()
            .len()
            + std::fs::metadata(temp_dir.path().join("scan_03.png"))
                .unwrap()
                .len();
        assert_eq!(summary.total_original, expected_original);
    }

    #[test]
    fn test_summary_savings() {
        let summary = BatchSummary {
            found: 2,
            succeeded: 2,
            total_original: 4000,
            total_compressed: 1000,
            ..BatchSummary::default()
        };
        assert_eq!(summary.saved_bytes(), 3000);
        assert!((summary.savings_percent() - 75.0).abs() < 1e-9);
    }
}
