use thiserror::Error;

/// Errors raised while turning the drawing surface into an image file
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Drawing surface has no area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Failed to write drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode drawing: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors that can occur while loading or saving composer settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors surfaced by composer operations.
///
/// None of these are fatal: each is scoped to the user action that triggered it.
#[derive(Debug, Error)]
pub enum ComposerError {
    /// The media library refused access
    #[error("Permission to access media library is needed.")]
    PermissionDenied,

    #[error("Image picker failed: {0}")]
    Picker(String),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type ComposerResult<T> = Result<T, ComposerError>;
pub type RasterResult<T> = Result<T, RasterError>;
pub type SettingsResult<T> = Result<T, SettingsError>;
