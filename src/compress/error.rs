use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{width}x{height} exceeds the JPEG size limit of 65535 pixels per side")]
    TooLarge { width: u32, height: u32 },

    #[error("Cannot encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: jpeg_encoder::EncodingError,
    },
}

impl CompressError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompressError::Io {
            path: path.into(),
            source,
        }
    }
}
