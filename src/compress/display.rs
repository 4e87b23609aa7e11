use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use super::batch::BatchSummary;
use super::image::CompressedImage;
use super::patch::PatchOutcome;

const RULE_WIDTH: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Console sink for one batch.
///
/// Lines are printed above a progress bar when stdout is a terminal and
/// straight to stdout otherwise, so piped output stays complete.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total: u64, interactive: bool) -> Self {
        if !interactive {
            return Self::hidden();
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn line(&self, message: impl AsRef<str>) {
        if self.bar.is_hidden() {
            println!("{}", message.as_ref());
        } else {
            self.bar.println(message.as_ref());
        }
    }

    pub fn start_file(&self, index: usize, total: usize, path: &Path) {
        let label = file_label(path);
        self.line(format!("\n[{index}/{total}] Processing: {label}"));
        self.bar.set_message(label);
    }

    pub fn file_done(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn show_compressed(&self, result: &CompressedImage) {
        if result.resized() {
            self.line(format!(
                "  Resized: {}x{} -> {}x{}",
                result.source.width, result.source.height, result.width, result.height
            ));
        }
        self.line(format!("  Original: {}", format_kb(result.source.bytes)));
        self.line(format!("  Compressed: {}", format_kb(result.bytes)));
        self.line(format!("  Saved: {:.1}%", result.savings_percent()));
    }

    pub fn show_failure(&self, path: &Path, error: &dyn std::fmt::Display) {
        self.line(format!("  Error: {error}"));
        self.line(format!("  Failed to compress {}", file_label(path)));
    }
}

pub fn show_header() {
    println!("Document Viewer - Image Compression Tool");
    println!("{}", rule());
}

pub fn show_no_files(pattern: &str) {
    println!("No PNG files found matching the pattern '{pattern}'");
}

pub fn show_summary(summary: &BatchSummary) {
    println!("\n{}", rule());
    println!("COMPRESSION SUMMARY");
    println!("{}", rule());
    println!(
        "Successfully compressed: {}/{} images",
        summary.succeeded, summary.found
    );
    println!("Total original size: {}", format_mb(summary.total_original));
    println!("Total compressed size: {}", format_mb(summary.total_compressed));

    if summary.total_original > 0 {
        println!("Total space saved: {:.1}%", summary.savings_percent());
        println!("Space saved: {}", format_mb(summary.saved_bytes()));
    }
}

pub fn show_patch_header() {
    println!("\n{}", rule());
    println!("UPDATING FILES FOR COMPRESSED IMAGES");
    println!("{}", rule());
}

pub fn show_patch_outcome(file: &Path, outcome: &PatchOutcome) {
    match outcome {
        PatchOutcome::Updated { replacements } => println!(
            "Updated {} to use compressed images ({} reference{})",
            file.display(),
            replacements,
            if *replacements == 1 { "" } else { "s" }
        ),
        PatchOutcome::Unchanged => println!(
            "{} already references compressed images",
            file.display()
        ),
    }
}

pub fn show_patch_error(file: &Path, error: &dyn std::fmt::Display) {
    println!("Error updating {}: {}", file.display(), error);
}

pub fn show_next_steps() {
    println!("\nCompression complete!");
    println!("\nNext steps:");
    println!("1. Delete original PNG files if satisfied with compression");
    println!("2. Test the website with compressed images");
    println!("3. Publish the site with `docsite deploy`");
}
