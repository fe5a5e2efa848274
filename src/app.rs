use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::composer::{Composer, ComposerDeps, Notice};
use crate::config::{ComposerConfig, Theme};
use crate::file_handler::FileHandler;
use crate::panels::{canvas_panel, input_panel, transcript_panel};
use crate::picker::MediaLibrary;
use crate::rasterizer::PngFileRasterizer;
use crate::settings::{ComposerSettings, MemorySettingsStore};
use crate::transcript::Transcript;

const SETTINGS_KEY: &str = eframe::APP_KEY;

pub struct ComposerApp {
    composer: Composer,
    transcript: Rc<Transcript>,
    file_handler: FileHandler,
    // Alerts waiting to be acknowledged, oldest first
    notices: VecDeque<Notice>,
}

impl ComposerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: ComposerSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();

        let transcript = Rc::new(Transcript::new("You", "Assistant"));
        let deps = ComposerDeps {
            chat: transcript.clone(),
            generator: transcript.clone(),
            settings: Rc::new(MemorySettingsStore::new(settings)),
            media: media_library(),
            rasterizer: Rc::new(PngFileRasterizer::new(
                std::env::temp_dir().join("eframe_chat_composer"),
            )),
        };

        Self {
            composer: Composer::new(ComposerConfig::default(), Theme::default(), deps),
            transcript,
            file_handler: FileHandler::new(),
            notices: VecDeque::new(),
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.front() else {
            return;
        };
        let mut acknowledged = false;
        egui::Window::new(notice.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(notice.message.as_str());
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.notices.pop_front();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn media_library() -> Rc<dyn MediaLibrary> {
    Rc::new(crate::picker::FileDialogLibrary)
}

// Browsers expose no media library to us
#[cfg(target_arch = "wasm32")]
fn media_library() -> Rc<dyn MediaLibrary> {
    Rc::new(crate::picker::StaticMediaLibrary {
        permission: crate::picker::PermissionStatus::Denied,
        result: crate::picker::PickerResult::cancelled(),
    })
}

impl eframe::App for ComposerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self.composer.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.composer.pump();
        self.transcript.tick();
        self.notices.extend(self.composer.take_notices());

        if self.file_handler.check_for_dropped_files(ctx) {
            let uris = self.file_handler.take_image_uris();
            if !uris.is_empty() {
                self.composer.add_images(uris);
            }
        }

        input_panel(&mut self.composer, ctx);
        transcript_panel(&self.transcript, ctx);
        canvas_panel(&mut self.composer, ctx);
        self.show_notice(ctx);
        self.file_handler.preview_files_being_dropped(ctx);

        // Futures are polled once per frame, so keep frames coming while they run
        if self.composer.has_pending() || self.composer.is_generating() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }
}
