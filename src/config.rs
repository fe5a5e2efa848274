use egui::Color32;

use crate::picker::PickerOptions;
use crate::rasterizer::CaptureOptions;
use crate::renderer::PathStyle;

/// Side length of the square drawing surface, in points
pub const CANVAS_SIZE: f32 = 300.0;

/// Colors used by the composer widgets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub primary: Color32,
    pub primary_border: Color32,
    pub error: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub neutral: Color32,
    pub canvas_button: Color32,
    pub remove_button: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(0x3b, 0x82, 0xf6),
            primary_border: Color32::from_rgb(0x93, 0xc5, 0xfd),
            error: Color32::from_rgb(0xef, 0x44, 0x44),
            text: Color32::from_gray(0x20),
            text_muted: Color32::from_gray(0x80),
            neutral: Color32::from_gray(0xfa),
            canvas_button: Color32::from_rgb(0x00, 0x7a, 0xff),
            remove_button: Color32::from_rgb(0xff, 0x3b, 0x30),
        }
    }
}

/// Fixed drawing and export parameters injected into the composer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposerConfig {
    pub canvas_size: f32,
    pub canvas_background: Color32,
    pub path_style: PathStyle,
    pub capture: CaptureOptions,
    pub picker: PickerOptions,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            canvas_background: Color32::from_gray(0xf2),
            path_style: PathStyle::default(),
            capture: CaptureOptions::default(),
            picker: PickerOptions::default(),
        }
    }
}
