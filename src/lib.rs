//! # docsite
//!
//! Maintenance tooling for a static document-viewer site.
//!
//! ## Usage
//!
//! ```bash
//! docsite compress [--pattern "2_CamScanner*.png"] [--quality 85] [--max-width 1200]
//! docsite deploy
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup, process settings and fatal error handling
//! - `cli` - Argument parsing and command routing
//! - `compress` - PNG to progressive JPEG batch compression and script patching
//! - `config` - Layered `docsite.toml` / environment configuration
//! - `deploy` - Interactive git publishing flow
//! - `subprocess` - Mockable subprocess layer used for git and the compressor
pub mod app;
pub mod cli;
pub mod compress;
pub mod config;
pub mod deploy;
pub mod subprocess;
