use eframe::egui;

use crate::components::icon_button::IconButton;
use crate::composer::Composer;

const INPUT_ID: &str = "composer_input";

/// Thumbnail strip, attach/draw buttons, message box and send/stop control
pub fn input_panel(composer: &mut Composer, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("composer_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            attachment_strip(composer, ui);
            input_row(composer, ui);

            let mut send_on_enter = composer.settings().send_on_enter;
            if ui.checkbox(&mut send_on_enter, "Send on Enter").changed() {
                composer.set_send_on_enter(send_on_enter);
            }
            ui.add_space(4.0);
        });
}

fn attachment_strip(composer: &mut Composer, ui: &mut egui::Ui) {
    if composer.attachments().is_empty() {
        return;
    }

    let remove_fill = composer.theme().remove_button;
    let mut to_remove = None;
    ui.horizontal_wrapped(|ui| {
        for attachment in composer.attachments().iter() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(display_name(attachment.source_uri()))
                        .on_hover_text(attachment.source_uri());
                    let remove = egui::Button::new(egui::RichText::new("✕").color(egui::Color32::WHITE))
                        .fill(remove_fill)
                        .small();
                    if ui.add(remove).clicked() {
                        to_remove = Some(attachment.id().to_owned());
                    }
                });
            });
        }
    });

    if let Some(id) = to_remove {
        composer.remove_attachment(&id);
    }
    ui.add_space(6.0);
}

fn input_row(composer: &mut Composer, ui: &mut egui::Ui) {
    let theme = *composer.theme();
    let input_id = egui::Id::new(INPUT_ID);

    ui.horizontal(|ui| {
        if IconButton::new("📎", theme.primary).show(ui).clicked() {
            composer.attach_images();
        }
        if IconButton::new("🖌", theme.primary).show(ui).clicked() {
            composer.open_drawing();
        }

        // Intercept the commit key before the text box turns it into a newline
        let focused = ui.memory(|m| m.has_focus(input_id));
        let committed = focused
            && composer.settings().send_on_enter
            && ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

        let control_width = 48.0;
        let response = ui.add_sized(
            [ui.available_width() - control_width, 36.0],
            egui::TextEdit::multiline(composer.text_mut())
                .id(input_id)
                .hint_text("Message...")
                .text_color(theme.text)
                .desired_rows(1),
        );
        composer.set_input_focused(response.has_focus());

        if committed {
            composer.commit_key();
            if !composer.is_input_focused() {
                response.surrender_focus();
            }
        }

        if composer.is_generating() {
            if IconButton::new("■", theme.error).show(ui).clicked() {
                composer.abort();
            }
        } else if IconButton::new("➤", theme.primary)
            .enabled(!composer.is_sending())
            .show(ui)
            .clicked()
        {
            composer.send();
        }
    });
}

/// Last path segment of a uri, for compact display
fn display_name(uri: &str) -> &str {
    uri.rsplit(['/', '\\']).next().filter(|s| !s.is_empty()).unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("file:///tmp/drawing-1.png"), "drawing-1.png");
        assert_eq!(display_name("C:\\pics\\cat.jpg"), "cat.jpg");
        assert_eq!(display_name("plain"), "plain");
        assert_eq!(display_name("dir/"), "dir/");
    }
}
