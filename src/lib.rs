#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod attachment;
pub mod components;
pub mod composer;
pub mod config;
pub mod drawing;
pub mod error;
pub mod file_handler;
pub mod id_generator;
pub mod panels;
pub mod picker;
pub mod rasterizer;
pub mod renderer;
pub mod services;
pub mod settings;
pub mod stroke;
pub mod transcript;
pub mod util;

pub use app::ComposerApp;
pub use attachment::{Attachment, AttachmentList};
pub use composer::{CommitOutcome, Composer, ComposerDeps, Notice};
pub use config::{CANVAS_SIZE, ComposerConfig, Theme};
pub use drawing::{DrawingSession, DrawingSurface, StrokeRecorder};
pub use error::{ComposerError, ComposerResult, RasterError, SettingsError};
pub use picker::{AttachmentPicker, MediaLibrary, PermissionStatus, PickerOptions, PickerResult};
pub use rasterizer::{CaptureOptions, PngFileRasterizer, SurfaceRasterizer, SurfaceSnapshot};
pub use renderer::{PathRenderer, PathStyle};
pub use services::{ChatStore, EntryId, GenerationPipeline, NewEntry};
pub use settings::{ComposerSettings, JsonSettingsStore, MemorySettingsStore, SettingsStore};
pub use stroke::{PathCommand, Stroke, StrokeId};
