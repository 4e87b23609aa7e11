//! Single-image re-encoding: resize, flatten transparency, write JPEG.

use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GrayImage, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::CompressError;
use crate::config::CompressConfig;

/// Encoding parameters shared by every file of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    pub quality: u8,
    pub max_width: u32,
}

impl From<&CompressConfig> for EncodeSettings {
    fn from(config: &CompressConfig) -> Self {
        Self {
            quality: config.quality,
            max_width: config.max_width,
        }
    }
}

/// A source image as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

/// The result of re-encoding one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub source: ImageRecord,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

impl CompressedImage {
    pub fn resized(&self) -> bool {
        (self.width, self.height) != (self.source.width, self.source.height)
    }

    /// Size reduction relative to the source; negative when the JPEG grew.
    pub fn savings_percent(&self) -> f64 {
        savings_percent(self.source.bytes, self.bytes)
    }
}

pub(crate) fn savings_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Dimensions after applying the width cap.
///
/// Heights are truncated like the width ratio implies and never drop to 0.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scaled = u64::from(height) * u64::from(max_width) / u64::from(width);
    (max_width, (scaled as u32).max(1))
}

/// Composite an image with alpha onto an opaque white background.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([
            blend_over_white(r, a),
            blend_over_white(g, a),
            blend_over_white(b, a),
        ])
    })
}

#[inline]
fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Pixel data ready for the JPEG encoder.
enum JpegPixels {
    Rgb(RgbImage),
    Luma(GrayImage),
}

impl JpegPixels {
    fn from_image(img: DynamicImage) -> Self {
        let color = img.color();
        if color.has_alpha() {
            JpegPixels::Rgb(flatten_onto_white(&img))
        } else if matches!(color, ColorType::L8 | ColorType::L16) {
            JpegPixels::Luma(img.to_luma8())
        } else {
            JpegPixels::Rgb(img.to_rgb8())
        }
    }

    fn resize(self, width: u32, height: u32) -> Self {
        let (current_width, current_height) = self.dimensions();
        if (current_width, current_height) == (width, height) {
            return self;
        }
        match self {
            JpegPixels::Rgb(buf) => JpegPixels::Rgb(image::imageops::resize(
                &buf,
                width,
                height,
                FilterType::Lanczos3,
            )),
            JpegPixels::Luma(buf) => JpegPixels::Luma(image::imageops::resize(
                &buf,
                width,
                height,
                FilterType::Lanczos3,
            )),
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        match self {
            JpegPixels::Rgb(buf) => buf.dimensions(),
            JpegPixels::Luma(buf) => buf.dimensions(),
        }
    }

    fn encode(&self, quality: u8) -> Result<Vec<u8>, EncodeFailure> {
        let (width, height) = self.dimensions();
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(EncodeFailure::TooLarge { width, height }),
        };

        let (data, color) = match self {
            JpegPixels::Rgb(buf) => (buf.as_raw(), jpeg_encoder::ColorType::Rgb),
            JpegPixels::Luma(buf) => (buf.as_raw(), jpeg_encoder::ColorType::Luma),
        };

        let mut out = Vec::new();
        let mut encoder = jpeg_encoder::Encoder::new(&mut out, quality);
        encoder.set_progressive(true);
        encoder.set_optimized_huffman_tables(true);
        encoder
            .encode(data, w, h, color)
            .map_err(EncodeFailure::Encoder)?;
        Ok(out)
    }
}

enum EncodeFailure {
    TooLarge { width: u32, height: u32 },
    Encoder(jpeg_encoder::EncodingError),
}

/// Re-encode `input` as a progressive JPEG at `output`.
///
/// Nothing is left at `output` when decoding or encoding fails.
pub fn compress_image(
    input: &Path,
    output: &Path,
    settings: &EncodeSettings,
) -> Result<CompressedImage, CompressError> {
    let original_bytes = std::fs::metadata(input)
        .map_err(|e| CompressError::io(input, e))?
        .len();

    let img = image::open(input).map_err(|source| CompressError::Decode {
        path: input.to_path_buf(),
        source,
    })?;

    let source = ImageRecord {
        path: input.to_path_buf(),
        width: img.width(),
        height: img.height(),
        bytes: original_bytes,
    };
    debug!(
        "Decoded {:?}: {}x{} {:?}",
        input,
        source.width,
        source.height,
        img.color()
    );

    let (width, height) = target_dimensions(source.width, source.height, settings.max_width);
    let pixels = JpegPixels::from_image(img).resize(width, height);

    let encoded = pixels.encode(settings.quality).map_err(|e| match e {
        EncodeFailure::TooLarge { width, height } => CompressError::TooLarge { width, height },
        EncodeFailure::Encoder(source) => CompressError::Encode {
            path: output.to_path_buf(),
            source,
        },
    })?;

    if let Err(e) = std::fs::write(output, &encoded) {
        let _ = std::fs::remove_file(output);
        return Err(CompressError::io(output, e));
    }

    Ok(CompressedImage {
        source,
        output: output.to_path_buf(),
        width,
        height,
        bytes: encoded.len() as u64,
    })
}
