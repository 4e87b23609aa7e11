//! Batch re-encoding of document scans.
//!
//! Matching PNGs are resized to a maximum width, flattened onto white and
//! written as progressive JPEGs under the output directory. A single bad
//! input never stops the batch.

pub mod batch;
pub mod display;
pub mod error;
pub mod image;
pub mod patch;

pub use batch::{discover, output_path_for, BatchCompressor, BatchSummary};
pub use error::CompressError;
pub use image::{compress_image, CompressedImage, EncodeSettings, ImageRecord};
pub use patch::{PatchOutcome, ReferencePatch};
