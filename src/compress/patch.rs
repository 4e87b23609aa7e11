use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::CompressError;
use crate::config::{PatchConfig, OUTPUT_DIR_PLACEHOLDER};

/// Literal substring replacement in one companion file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePatch {
    pub file: PathBuf,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated { replacements: usize },
    Unchanged,
}

impl ReferencePatch {
    /// Build the patch for a batch that wrote into `output_dir`.
    pub fn new(config: &PatchConfig, output_dir: &Path) -> Self {
        let dir = output_dir.to_string_lossy().replace('\\', "/");
        let dir = dir.trim_end_matches('/');
        Self {
            file: config.file.clone(),
            from: config.from.clone(),
            to: config.to.replace(OUTPUT_DIR_PLACEHOLDER, dir),
        }
    }

    /// Rewrite `file` (relative to `base_dir`) when it still contains `from`.
    ///
    /// The file is left untouched when nothing would change.
    pub fn apply(&self, base_dir: &Path) -> Result<PatchOutcome, CompressError> {
        let path = base_dir.join(&self.file);
        let content =
            std::fs::read_to_string(&path).map_err(|e| CompressError::io(&path, e))?;

        let replacements = content.matches(self.from.as_str()).count();
        if replacements == 0 || self.from == self.to {
            debug!("No references to rewrite in {:?}", path);
            return Ok(PatchOutcome::Unchanged);
        }

        let updated = content.replace(self.from.as_str(), &self.to);
        std::fs::write(&path, updated).map_err(|e| CompressError::io(&path, e))?;
        debug!("Rewrote {} reference(s) in {:?}", replacements, path);
        Ok(PatchOutcome::Updated { replacements })
    }
}
