use egui::Pos2;
use std::fmt;

use crate::id_generator::generate_stroke_id;

/// Identifier of a stroke within the running process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeId(usize);

impl StrokeId {
    pub fn next() -> Self {
        Self(generate_stroke_id())
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

/// One command of the move-to/line-to path language
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos2),
    LineTo(Pos2),
}

impl PathCommand {
    pub fn point(&self) -> Pos2 {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => *p,
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
        }
    }
}

/// A single continuous pointer drag.
///
/// Always starts with exactly one `MoveTo`; every later command is a `LineTo`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    commands: Vec<PathCommand>,
}

impl Stroke {
    /// Start a new stroke at `origin`
    pub fn begin(origin: Pos2) -> Self {
        Self {
            id: StrokeId::next(),
            commands: vec![PathCommand::MoveTo(origin)],
        }
    }

    /// Extend the stroke with a line to `point`
    pub fn line_to(&mut self, point: Pos2) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every point visited by the stroke, in drawing order
    pub fn points(&self) -> Vec<Pos2> {
        self.commands.iter().map(PathCommand::point).collect()
    }

    /// SVG path data, e.g. `M 10 20 L 15.5 22`
    pub fn path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
