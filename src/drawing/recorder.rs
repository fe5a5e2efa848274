use egui::Pos2;

use super::DrawingSession;

/// Turns pointer gestures on a square drawing surface into strokes.
///
/// Points are surface-local and recorded as-is: anything outside the
/// surface is kept and simply falls outside the clip when rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeRecorder {
    surface_size: f32,
}

impl StrokeRecorder {
    pub fn new(surface_size: f32) -> Self {
        Self { surface_size }
    }

    pub fn surface_size(&self) -> f32 {
        self.surface_size
    }

    /// Convert a screen position into surface-local coordinates
    pub fn to_local(&self, screen: Pos2, origin: Pos2) -> Pos2 {
        (screen - origin).to_pos2()
    }

    pub fn gesture_start(&self, session: &mut DrawingSession, local: Pos2) {
        let id = session.begin_stroke(local);
        log::debug!("Stroke {} started at ({}, {})", id.value(), local.x, local.y);
    }

    pub fn gesture_move(&self, session: &mut DrawingSession, local: Pos2) {
        if !session.extend_last(local) {
            log::warn!("Ignoring pointer move with no stroke in progress");
        }
    }

    /// Strokes end implicitly when moves stop arriving
    pub fn gesture_end(&self, session: &mut DrawingSession, _local: Pos2) {
        if let Some(stroke) = session.last() {
            log::debug!("Stroke {} finished with {} commands", stroke.id().value(), stroke.len());
        }
    }
}
