use egui::{Color32, Pos2, Vec2};
use futures::future::{FutureExt, LocalBoxFuture};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::error::{RasterError, RasterResult};
use crate::renderer::{PathStyle, RenderedPath};

/// Output format for captured drawings. Only PNG is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureFormat {
    #[default]
    Png,
}

impl CaptureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// Fixed export settings passed along with every capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub format: CaptureFormat,
    /// 0.0..=1.0, honored by lossy rasterizers. PNG output ignores it.
    pub quality: f32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: CaptureFormat::Png,
            quality: 0.8,
        }
    }
}

/// Everything needed to reproduce the drawing surface as it is on screen
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    pub size: Vec2,
    pub background: Color32,
    pub style: PathStyle,
    pub paths: Vec<RenderedPath>,
}

/// Converts a rendered surface into an image file and returns its URI
pub trait SurfaceRasterizer {
    fn capture(
        &self,
        surface: &SurfaceSnapshot,
        options: CaptureOptions,
    ) -> LocalBoxFuture<'static, RasterResult<String>>;
}

/// Software rasterizer writing PNG files into a directory
#[derive(Debug, Clone)]
pub struct PngFileRasterizer {
    output_dir: PathBuf,
}

impl PngFileRasterizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write(&self, surface: &SurfaceSnapshot, options: CaptureOptions) -> RasterResult<String> {
        let pixels = rasterize(surface)?;
        std::fs::create_dir_all(&self.output_dir)?;

        let file_name = format!("drawing-{}.{}", uuid::Uuid::new_v4(), options.format.extension());
        let path = self.output_dir.join(file_name);
        match options.format {
            CaptureFormat::Png => pixels.save_with_format(&path, image::ImageFormat::Png)?,
        }

        log::info!(
            "Saved drawing to {} ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );
        Ok(file_uri(&path))
    }
}

impl SurfaceRasterizer for PngFileRasterizer {
    fn capture(
        &self,
        surface: &SurfaceSnapshot,
        options: CaptureOptions,
    ) -> LocalBoxFuture<'static, RasterResult<String>> {
        futures::future::ready(self.write(surface, options)).boxed_local()
    }
}

fn file_uri(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Composite the snapshot's paths over its background.
///
/// Strokes are drawn with round caps and joins and one pixel of anti-aliasing.
/// Paths with a single point draw nothing, matching the on-screen overlay.
pub fn rasterize(surface: &SurfaceSnapshot) -> RasterResult<RgbaImage> {
    let width = surface.size.x.round().max(0.0) as u32;
    let height = surface.size.y.round().max(0.0) as u32;
    if width == 0 || height == 0 {
        return Err(RasterError::EmptySurface { width, height });
    }

    // Coverage is shared by all paths since they share one color
    let mut coverage = vec![0.0f32; width as usize * height as usize];
    let radius = surface.style.width / 2.0;

    for path in &surface.paths {
        for segment in path.points.windows(2) {
            stamp_segment(&mut coverage, width, height, segment[0], segment[1], radius);
        }
    }

    let bg = surface.background;
    let fg = surface.style.color;
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let c = coverage[pixel_index(width, x, y)];
        Rgba([
            blend(bg.r(), fg.r(), c),
            blend(bg.g(), fg.g(), c),
            blend(bg.b(), fg.b(), c),
            blend(bg.a(), fg.a(), c),
        ])
    });
    Ok(image)
}

fn stamp_segment(coverage: &mut [f32], width: u32, height: u32, a: Pos2, b: Pos2, radius: f32) {
    let pad = radius + 1.0;
    let min_x = (a.x.min(b.x) - pad).floor().max(0.0) as u32;
    let min_y = (a.y.min(b.y) - pad).floor().max(0.0) as u32;
    let max_x = (a.x.max(b.x) + pad).ceil().min(width as f32 - 1.0);
    let max_y = (a.y.max(b.y) + pad).ceil().min(height as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as u32, max_y as u32);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = distance_to_segment(center, a, b);
            let c = (radius + 0.5 - distance).clamp(0.0, 1.0);
            let cell = &mut coverage[pixel_index(width, x, y)];
            *cell = cell.max(c);
        }
    }
}

/// Row-major offset, computed in `usize` so large surfaces cannot wrap
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn blend(bg: u8, fg: u8, coverage: f32) -> u8 {
    (bg as f32 + (fg as f32 - bg as f32) * coverage).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn snapshot(paths: Vec<Vec<Pos2>>) -> SurfaceSnapshot {
        SurfaceSnapshot {
            size: vec2(50.0, 50.0),
            background: Color32::from_gray(0xf2),
            style: PathStyle::default(),
            paths: paths
                .into_iter()
                .map(|points| RenderedPath {
                    points,
                    data: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_rasterize_draws_stroke_over_background() {
        let image = rasterize(&snapshot(vec![vec![pos2(5.0, 25.0), pos2(45.0, 25.0)]])).unwrap();
        assert_eq!(image.dimensions(), (50, 50));

        assert_eq!(image.get_pixel(25, 24).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(25, 5).0, [0xf2, 0xf2, 0xf2, 255]);
    }

    #[test]
    fn test_out_of_bounds_points_are_clipped() {
        let image = rasterize(&snapshot(vec![vec![pos2(-100.0, -100.0), pos2(500.0, 500.0)]])).unwrap();
        assert_eq!(image.get_pixel(25, 25).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_single_point_path_leaves_background() {
        let image = rasterize(&snapshot(vec![vec![pos2(25.0, 25.0)]])).unwrap();
        assert!(image.pixels().all(|p| p.0 == [0xf2, 0xf2, 0xf2, 255]));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_index_past_u32_range() {
        // 70000 * 70000 does not fit in a u32
        assert_eq!(pixel_index(70_000, 5, 69_999), 4_899_930_005);
    }

    #[test]
    fn test_empty_surface_is_an_error() {
        let mut surface = snapshot(vec![]);
        surface.size = vec2(0.0, 30.0);
        assert!(matches!(
            rasterize(&surface),
            Err(RasterError::EmptySurface { width: 0, height: 30 })
        ));
    }
}
