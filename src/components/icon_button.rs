use eframe::egui;

/// Square filled button showing a single glyph
pub struct IconButton {
    pub icon: &'static str,
    pub fill: egui::Color32,
    pub enabled: bool,
}

impl IconButton {
    pub fn new(icon: &'static str, fill: egui::Color32) -> Self {
        Self {
            icon,
            fill,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(36.0, 36.0);
        let sense = if self.enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(button_size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if !self.enabled {
                self.fill.gamma_multiply(0.4)
            } else if response.hovered() {
                self.fill.gamma_multiply(0.85)
            } else {
                self.fill
            };

            ui.painter().rect_filled(rect, 6.0, bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(18.0),
                egui::Color32::WHITE,
            );
        }

        response
    }
}
