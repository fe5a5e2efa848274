//! Freehand drawing state: the strokes on the canvas and the surface that holds them.

mod recorder;

pub use recorder::StrokeRecorder;

use egui::Pos2;

use crate::stroke::{Stroke, StrokeId};

/// The strokes currently on the drawing surface.
///
/// Every mutation bumps `version`, so renderers can cache derived output
/// and regenerate it only when the session actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingSession {
    strokes: Vec<Stroke>,
    version: u64,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Append a new stroke starting at `origin`
    pub fn begin_stroke(&mut self, origin: Pos2) -> StrokeId {
        let stroke = Stroke::begin(origin);
        let id = stroke.id();
        self.strokes.push(stroke);
        self.touch();
        id
    }

    /// Extend the most recent stroke. Returns `false` when there is none.
    pub fn extend_last(&mut self, point: Pos2) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.line_to(point);
                self.touch();
                true
            }
            None => false,
        }
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    /// Remove every stroke
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

/// The drawing overlay: visibility, the recorder bound to it, and its session
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    visible: bool,
    recorder: StrokeRecorder,
    session: DrawingSession,
    /// Bumped each time a drawing is discarded or handed off as an attachment
    epoch: u64,
}

impl DrawingSurface {
    pub fn new(size: f32) -> Self {
        Self {
            visible: false,
            recorder: StrokeRecorder::new(size),
            session: DrawingSession::new(),
            epoch: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn size(&self) -> f32 {
        self.recorder.surface_size()
    }

    pub fn recorder(&self) -> &StrokeRecorder {
        &self.recorder
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Drop every stroke but keep the surface open
    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Hide the surface and throw the drawing away
    pub fn cancel(&mut self) {
        self.visible = false;
        self.session.clear();
        self.epoch += 1;
    }

    /// Called once the drawing has been turned into an attachment
    pub(crate) fn finish_saved(&mut self) {
        self.visible = false;
        self.session.clear();
        self.epoch += 1;
    }

    pub fn pointer_down(&mut self, local: Pos2) {
        self.recorder.gesture_start(&mut self.session, local);
    }

    pub fn pointer_move(&mut self, local: Pos2) {
        self.recorder.gesture_move(&mut self.session, local);
    }

    pub fn pointer_up(&mut self, local: Pos2) {
        self.recorder.gesture_end(&mut self.session, local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_every_mutation_bumps_version() {
        let mut session = DrawingSession::new();
        assert_eq!(session.version(), 0);

        session.begin_stroke(pos2(1.0, 1.0));
        assert_eq!(session.version(), 1);

        assert!(session.extend_last(pos2(2.0, 2.0)));
        assert_eq!(session.version(), 2);

        session.clear();
        assert_eq!(session.version(), 3);
        assert!(session.is_empty());
    }

    #[test]
    fn test_extend_without_stroke_is_rejected() {
        let mut session = DrawingSession::new();
        assert!(!session.extend_last(pos2(2.0, 2.0)));
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn test_cancel_hides_and_discards() {
        let mut surface = DrawingSurface::new(300.0);
        surface.open();
        surface.pointer_down(pos2(5.0, 5.0));
        surface.pointer_move(pos2(6.0, 6.0));

        surface.cancel();
        assert!(!surface.is_visible());
        assert_eq!(surface.epoch(), 1);

        surface.open();
        assert!(surface.session().is_empty());
    }

    #[test]
    fn test_clear_keeps_surface_open() {
        let mut surface = DrawingSurface::new(300.0);
        surface.open();
        surface.pointer_down(pos2(5.0, 5.0));

        surface.clear();
        assert!(surface.is_visible());
        assert!(surface.session().is_empty());
        assert_eq!(surface.epoch(), 0);
    }
}
