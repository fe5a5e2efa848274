use eframe::egui;

use crate::composer::Composer;

/// The drawing overlay: the surface plus Clear / Save / Cancel
pub fn canvas_panel(composer: &mut Composer, ctx: &egui::Context) {
    if !composer.surface().is_visible() {
        return;
    }

    let size = composer.surface().size();
    let button_fill = composer.theme().canvas_button;

    egui::Window::new("Draw")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(egui::Vec2::splat(size), egui::Sense::drag());
            let rect = response.rect;
            let recorder = *composer.surface().recorder();

            if response.drag_started() {
                // Start where the press happened, not where the drag threshold was crossed
                let origin = ui.input(|i| i.pointer.press_origin());
                if let Some(pos) = origin.or(response.interact_pointer_pos()) {
                    composer.drawing_pointer_down(recorder.to_local(pos, rect.min));
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    composer.drawing_pointer_move(recorder.to_local(pos, rect.min));
                }
            }
            if response.drag_stopped() {
                if let Some(pos) = response.interact_pointer_pos() {
                    composer.drawing_pointer_up(recorder.to_local(pos, rect.min));
                }
            }

            composer.render_drawing(&painter, rect);

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.add(canvas_button("Clear", button_fill)).clicked() {
                    composer.clear_drawing();
                }
                let saving = composer.is_saving_drawing();
                if ui.add_enabled(!saving, canvas_button("Save", button_fill)).clicked() {
                    composer.save_drawing();
                }
                if ui.add(canvas_button("Cancel", button_fill)).clicked() {
                    composer.cancel_drawing();
                }
            });
        });
}

fn canvas_button(label: &str, fill: egui::Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label.to_owned()).color(egui::Color32::WHITE)).fill(fill)
}
