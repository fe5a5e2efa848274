// src/renderer.rs
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2};
use std::fmt::Write as _;

use crate::drawing::DrawingSession;
use crate::rasterizer::SurfaceSnapshot;

/// How recorded strokes are painted. Paths are never filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: Color32,
    pub width: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 3.0,
        }
    }
}

/// One stroke as it appears on the surface, in surface-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub points: Vec<Pos2>,
    pub data: String,
}

/// Renders a drawing session as a vector overlay.
///
/// Output is a pure function of the session. The renderer only remembers the
/// session version it last saw so it can skip rebuilding the paths on frames
/// where nothing was drawn.
#[derive(Debug)]
pub struct PathRenderer {
    style: PathStyle,
    background: Color32,
    cache: Option<(u64, Vec<RenderedPath>)>,
}

impl PathRenderer {
    pub fn new(style: PathStyle, background: Color32) -> Self {
        Self {
            style,
            background,
            cache: None,
        }
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Surface-local paths for the session, rebuilt only when its version changed
    pub fn paths(&mut self, session: &DrawingSession) -> &[RenderedPath] {
        let stale = !matches!(&self.cache, Some((version, _)) if *version == session.version());
        if stale {
            self.cache = Some((session.version(), rendered_paths(session)));
        }
        match &self.cache {
            Some((_, paths)) => paths,
            None => &[],
        }
    }

    /// egui shapes for the session with the surface placed at `origin`
    pub fn shapes(&mut self, session: &DrawingSession, origin: Pos2) -> Vec<Shape> {
        let style = self.style;
        let offset = origin.to_vec2();
        self.paths(session)
            .iter()
            .filter(|path| path.points.len() >= 2)
            .map(|path| {
                let points = path.points.iter().map(|p| *p + offset).collect();
                Shape::line(points, EguiStroke::new(style.width, style.color))
            })
            .collect()
    }

    /// Paint the background and every stroke, clipped to `rect`
    pub fn render(&mut self, painter: &Painter, session: &DrawingSession, rect: Rect) {
        let painter = painter.with_clip_rect(rect);
        painter.rect_filled(rect, 8.0, self.background);
        painter.extend(self.shapes(session, rect.min));
    }

    /// The handle handed to a `SurfaceRasterizer`
    pub fn snapshot(&mut self, session: &DrawingSession, size: f32) -> SurfaceSnapshot {
        SurfaceSnapshot {
            size: Vec2::splat(size),
            background: self.background,
            style: self.style,
            paths: self.paths(session).to_vec(),
        }
    }
}

fn rendered_paths(session: &DrawingSession) -> Vec<RenderedPath> {
    session
        .strokes()
        .iter()
        .map(|stroke| RenderedPath {
            points: stroke.points(),
            data: stroke.path_data(),
        })
        .collect()
}

/// Path data strings for every stroke, in drawing order
pub fn svg_path_data(session: &DrawingSession) -> Vec<String> {
    session.strokes().iter().map(|s| s.path_data()).collect()
}

/// A standalone SVG document of the overlay
pub fn svg_document(session: &DrawingSession, size: f32, style: PathStyle, background: Color32) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        hex_color(background)
    );
    for data in svg_path_data(session) {
        let _ = write!(
            svg,
            r#"<path d="{data}" stroke="{}" stroke-width="{}" fill="none"/>"#,
            hex_color(style.color),
            style.width
        );
    }
    svg.push_str("</svg>");
    svg
}

fn hex_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn session_with_two_strokes() -> DrawingSession {
        let mut session = DrawingSession::new();
        session.begin_stroke(pos2(1.0, 1.0));
        session.extend_last(pos2(5.0, 5.0));
        session.begin_stroke(pos2(10.0, 10.0));
        session
    }

    #[test]
    fn test_one_path_per_stroke() {
        let session = session_with_two_strokes();
        assert_eq!(svg_path_data(&session), vec!["M 1 1 L 5 5", "M 10 10"]);
    }

    #[test]
    fn test_single_point_stroke_draws_nothing() {
        let session = session_with_two_strokes();
        let mut renderer = PathRenderer::new(PathStyle::default(), Color32::WHITE);
        assert_eq!(renderer.shapes(&session, Pos2::ZERO).len(), 1);
    }

    #[test]
    fn test_paths_follow_session_changes() {
        let mut session = session_with_two_strokes();
        let mut renderer = PathRenderer::new(PathStyle::default(), Color32::WHITE);
        assert_eq!(renderer.paths(&session).len(), 2);

        session.extend_last(pos2(12.0, 12.0));
        assert_eq!(renderer.paths(&session)[1].data, "M 10 10 L 12 12");

        session.clear();
        assert!(renderer.paths(&session).is_empty());
    }

    #[test]
    fn test_shapes_are_offset_by_origin() {
        let session = session_with_two_strokes();
        let mut renderer = PathRenderer::new(PathStyle::default(), Color32::WHITE);
        let shapes = renderer.shapes(&session, pos2(100.0, 200.0));
        match &shapes[0] {
            Shape::Path(path) => assert_eq!(path.points[0], pos2(101.0, 201.0)),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_svg_document() {
        let session = session_with_two_strokes();
        let svg = svg_document(&session, 300.0, PathStyle::default(), Color32::from_gray(0xf2));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"fill="#f2f2f2""##));
        assert!(svg.contains(r##"<path d="M 1 1 L 5 5" stroke="#000000" stroke-width="3" fill="none"/>"##));
        assert!(svg.ends_with("</svg>"));
    }
}
