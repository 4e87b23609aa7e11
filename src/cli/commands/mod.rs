//! Command implementation modules

pub mod compress;
pub mod deploy;

pub use compress::{compress_site, run_compress_command, CompressOverrides};
pub use deploy::{compressor_for, run_deploy_command};
