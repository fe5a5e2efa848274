use eframe::egui;

use crate::transcript::Transcript;

pub fn transcript_panel(transcript: &Transcript, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in transcript.entries() {
                    let author = if entry.author.is_empty() {
                        "(unnamed)"
                    } else {
                        entry.author.as_str()
                    };
                    ui.horizontal_wrapped(|ui| {
                        ui.strong(author);
                        if entry.text.is_empty() && !entry.is_user {
                            ui.spinner();
                        } else {
                            ui.label(&entry.text);
                        }
                    });
                    for attachment in &entry.attachments {
                        ui.small(format!("📎 {}", attachment.source_uri()));
                    }
                    ui.separator();
                }
            });
    });
}
