use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to encode payload at QR version {min_version} or above")]
    Encode {
        min_version: i16,
        #[source]
        source: qrcode::types::QrError,
    },

    #[error("{what} of {requested} pixels exceeds the {max} pixel limit")]
    CanvasTooLarge {
        what: &'static str,
        requested: u64,
        max: u32,
    },

    #[error("Logo file '{}' not found or unreadable", .path.display())]
    LogoUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl GenerateError {
    /// Only a missing logo is reported and skipped; everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::LogoUnavailable { .. })
    }
}
