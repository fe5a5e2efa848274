mod canvas_panel;
mod input_panel;
mod transcript_panel;

pub use canvas_panel::canvas_panel;
pub use input_panel::input_panel;
pub use transcript_panel::transcript_panel;
