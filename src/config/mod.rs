//! Configuration for the compressor and the deployment flow.
//!
//! Values are layered: built-in defaults, then `docsite.toml` in the site
//! directory (or an explicit `--config` file), then `DOCSITE_*` environment
//! variables. Command-line flags are applied last by the CLI layer.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// File looked up in the site directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "docsite.toml";

pub const DEFAULT_PATTERN: &str = "2_CamScanner*.png";
pub const DEFAULT_OUTPUT_DIR: &str = "compressed_images";
pub const DEFAULT_QUALITY: u8 = 85;
pub const DEFAULT_MAX_WIDTH: u32 = 1200;
/// Expanded in `[compress.patch] to` with the effective output directory.
pub const OUTPUT_DIR_PLACEHOLDER: &str = "{output_dir}";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit: Document viewer with compressed images";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration:\n  - {}", .0.join("\n  - "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocsiteConfig {
    /// Log filter used when no `-v` flag is given.
    pub log_level: Option<String>,
    pub compress: CompressConfig,
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompressConfig {
    /// Glob of source scans, relative to the site directory.
    pub pattern: String,
    /// Subdirectory receiving the re-encoded JPEGs.
    pub output_dir: PathBuf,
    /// JPEG quality, 1-100.
    pub quality: u8,
    /// Wider images are scaled down to this width.
    pub max_width: u32,
    pub patch: PatchConfig,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            quality: DEFAULT_QUALITY,
            max_width: DEFAULT_MAX_WIDTH,
            patch: PatchConfig::default(),
        }
    }
}

/// Literal substitution applied to the viewer script after a batch.
///
/// `{output_dir}` in `to` stands for `[compress] output_dir` after all
/// overrides, so the script follows the directory the JPEGs land in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatchConfig {
    pub enabled: bool,
    pub file: PathBuf,
    pub from: String,
    pub to: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from("script.js"),
            from: "`2_CamScanner 06-10-2025 08.32_页面_${paddedNumber}.png`".to_string(),
            to: "`{output_dir}/2_CamScanner 06-10-2025 08.32_页面_${paddedNumber}.jpg`".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeployConfig {
    /// Host serving the repository, e.g. `github.com`.
    pub git_host: String,
    /// Host serving the published pages, e.g. `github.io`.
    pub pages_host: String,
    pub remote: String,
    pub branch: String,
    pub default_commit_message: String,
    pub compressor: CompressorCommand,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            git_host: "github.com".to_string(),
            pages_host: "github.io".to_string(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
            default_commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            compressor: CompressorCommand::default(),
        }
    }
}

/// How the deployment flow launches the compressor.
///
/// Without `program` the running `docsite` executable is re-invoked.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompressorCommand {
    pub program: Option<String>,
    pub args: Vec<String>,
    /// Package-manager command tried once when `program` is missing.
    pub install: Option<Vec<String>>,
}

impl Default for CompressorCommand {
    fn default() -> Self {
        Self {
            program: None,
            args: vec!["compress".to_string()],
            install: None,
        }
    }
}

impl DocsiteConfig {
    /// Load configuration for a site directory.
    ///
    /// An explicit `config_path` must exist; otherwise `docsite.toml` in
    /// `site_dir` is used when present and defaults apply when it is not.
    pub fn load(site_dir: &Path, config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = site_dir.join(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No {} in {:?}, using defaults", CONFIG_FILE_NAME, site_dir);
                    Self::default()
                }
            }
        };

        config.merge_env_vars();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply `DOCSITE_*` overrides read through `lookup`.
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(log_level) = lookup("DOCSITE_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }

        if let Some(pattern) = lookup("DOCSITE_PATTERN") {
            self.compress.pattern = pattern;
        }

        if let Some(quality) = lookup("DOCSITE_QUALITY") {
            match quality.parse::<u8>() {
                Ok(value) => self.compress.quality = value,
                Err(_) => warn!("Ignoring DOCSITE_QUALITY={:?}: not a number", quality),
            }
        }

        if let Some(max_width) = lookup("DOCSITE_MAX_WIDTH") {
            match max_width.parse::<u32>() {
                Ok(value) => self.compress.max_width = value,
                Err(_) => warn!("Ignoring DOCSITE_MAX_WIDTH={:?}: not a number", max_width),
            }
        }

        if let Some(host) = lookup("DOCSITE_GIT_HOST") {
            self.deploy.git_host = host;
        }
    }

    /// Check every field and report all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.compress.pattern.trim().is_empty() {
            errors.push("compress.pattern must not be empty".to_string());
        }
        if self.compress.output_dir.as_os_str().is_empty() {
            errors.push("compress.output_dir must not be empty".to_string());
        }
        if !(1..=100).contains(&self.compress.quality) {
            errors.push(format!(
                "compress.quality must be between 1 and 100, got {}",
                self.compress.quality
            ));
        }
        if self.compress.max_width == 0 {
            errors.push("compress.max_width must be greater than 0".to_string());
        }
        if self.compress.patch.enabled && self.compress.patch.from.is_empty() {
            errors.push("compress.patch.from must not be empty".to_string());
        }
        for (key, value) in [
            ("deploy.git_host", &self.deploy.git_host),
            ("deploy.pages_host", &self.deploy.pages_host),
            ("deploy.remote", &self.deploy.remote),
            ("deploy.branch", &self.deploy.branch),
            ("deploy.default_commit_message", &self.deploy.default_commit_message),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{key} must not be empty"));
            }
        }
        if let Some(install) = &self.deploy.compressor.install {
            if install.is_empty() {
                errors.push("deploy.compressor.install must name a program".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}
