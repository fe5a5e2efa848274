//! The chat composer: message text, pending attachments, the drawing
//! surface, and the send/abort controls.
//!
//! All state is owned here and mutated only from the composer's own
//! handlers. Platform round trips (picker, rasterizer, chat store, abort)
//! run as futures in a local set; their results are applied in the order
//! they complete, one at a time, by [`Composer::pump`] or
//! [`Composer::settle`].

use egui::{Painter, Pos2, Rect};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use std::rc::Rc;
use std::task::{Context, Poll};

use crate::attachment::AttachmentList;
use crate::config::{ComposerConfig, Theme};
use crate::drawing::DrawingSurface;
use crate::error::{ComposerError, ComposerResult, RasterResult};
use crate::picker::{AttachmentPicker, MediaLibrary};
use crate::rasterizer::SurfaceRasterizer;
use crate::renderer::PathRenderer;
use crate::services::{ChatStore, EntryId, GenerationPipeline, NewEntry};
use crate::settings::{ComposerSettings, SettingsStore};

/// Collaborators the composer talks to
#[derive(Clone)]
pub struct ComposerDeps {
    pub chat: Rc<dyn ChatStore>,
    pub generator: Rc<dyn GenerationPipeline>,
    pub settings: Rc<dyn SettingsStore>,
    pub media: Rc<dyn MediaLibrary>,
    pub rasterizer: Rc<dyn SurfaceRasterizer>,
}

/// A user-visible alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// What the commit key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Sent,
    NewlineInserted,
}

enum Completion {
    Picked(ComposerResult<Vec<String>>),
    Captured {
        result: RasterResult<String>,
        epoch: u64,
        version: u64,
    },
    Sent { placeholder: Option<EntryId> },
    Aborted,
}

pub struct Composer {
    text: String,
    attachments: AttachmentList,
    surface: DrawingSurface,
    renderer: PathRenderer,
    input_focused: bool,
    capture_in_flight: bool,
    sends_in_flight: usize,
    settings: ComposerSettings,
    config: ComposerConfig,
    theme: Theme,
    picker: AttachmentPicker,
    deps: ComposerDeps,
    pending: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    notices: Vec<Notice>,
}

impl Composer {
    pub fn new(config: ComposerConfig, theme: Theme, deps: ComposerDeps) -> Self {
        let settings = deps.settings.load().unwrap_or_else(|err| {
            log::warn!("Failed to load composer settings, using defaults: {}", err);
            ComposerSettings::default()
        });

        Self {
            text: String::new(),
            attachments: AttachmentList::new(),
            surface: DrawingSurface::new(config.canvas_size),
            renderer: PathRenderer::new(config.path_style, config.canvas_background),
            input_focused: false,
            capture_in_flight: false,
            sends_in_flight: 0,
            settings,
            config,
            theme,
            picker: AttachmentPicker::new(Rc::clone(&deps.media), config.picker),
            deps,
            pending: FuturesUnordered::new(),
            notices: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Direct access for text widgets
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn attachments(&self) -> &AttachmentList {
        &self.attachments
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn set_input_focused(&mut self, focused: bool) {
        self.input_focused = focused;
    }

    /// Whether a sent message is still being written to the chat store
    pub fn is_sending(&self) -> bool {
        self.sends_in_flight > 0
    }

    pub fn is_generating(&self) -> bool {
        self.deps.generator.is_generating()
    }

    /// Whether any platform round trip is still outstanding
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drain queued user-visible alerts
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_send_on_enter(&mut self, enabled: bool) {
        self.settings.send_on_enter = enabled;
        if let Err(err) = self.deps.settings.save(&self.settings) {
            log::warn!("Failed to persist send-on-enter setting: {}", err);
        }
    }

    // Attachments

    /// Append one attachment per uri
    pub fn add_images<I, S>(&mut self, uris: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let uris: Vec<String> = uris.into_iter().map(Into::into).collect();
        log::info!("Adding attachments: {:?}", uris);
        self.attachments.add_uris(uris);
    }

    pub fn remove_attachment(&mut self, id: &str) -> bool {
        self.attachments.remove(id)
    }

    /// Ask for media library access and let the user pick images
    pub fn attach_images(&mut self) {
        let pick = self.picker.pick();
        self.spawn(pick.map(Completion::Picked));
    }

    // Drawing surface

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn open_drawing(&mut self) {
        self.surface.open();
    }

    pub fn clear_drawing(&mut self) {
        self.surface.clear();
    }

    pub fn cancel_drawing(&mut self) {
        self.surface.cancel();
    }

    pub fn drawing_pointer_down(&mut self, local: Pos2) {
        self.surface.pointer_down(local);
    }

    pub fn drawing_pointer_move(&mut self, local: Pos2) {
        self.surface.pointer_move(local);
    }

    pub fn drawing_pointer_up(&mut self, local: Pos2) {
        self.surface.pointer_up(local);
    }

    pub fn render_drawing(&mut self, painter: &Painter, rect: Rect) {
        self.renderer.render(painter, self.surface.session(), rect);
    }

    pub fn is_saving_drawing(&self) -> bool {
        self.capture_in_flight
    }

    /// Rasterize the current drawing into an attachment.
    ///
    /// The capture is tagged with the surface epoch and session version. A
    /// result for a drawing that was cancelled meanwhile is dropped, and one
    /// for a drawing that changed meanwhile is attached without wiping the
    /// newer strokes.
    pub fn save_drawing(&mut self) {
        if self.capture_in_flight {
            log::debug!("Drawing capture already in progress");
            return;
        }
        let snapshot = self.renderer.snapshot(self.surface.session(), self.surface.size());
        let capture = self.deps.rasterizer.capture(&snapshot, self.config.capture);
        let epoch = self.surface.epoch();
        let version = self.surface.session().version();
        self.capture_in_flight = true;
        self.spawn(capture.map(move |result| Completion::Captured {
            result,
            epoch,
            version,
        }));
    }

    // Sending

    /// Append the user's message and an empty reply, then start generating.
    ///
    /// Blank text skips the user entry but still requests a reply. Pending
    /// attachments travel with the user entry, so they stay queued when no
    /// user entry is created.
    pub fn send(&mut self) {
        let text = std::mem::take(&mut self.text);
        let chat = Rc::clone(&self.deps.chat);
        let generator = Rc::clone(&self.deps.generator);

        let user_entry = if text.trim().is_empty() {
            None
        } else {
            let author = chat.user_name().unwrap_or_default();
            Some(NewEntry::user(author, text, self.attachments.take()))
        };
        let placeholder = NewEntry::placeholder(chat.character_name().unwrap_or_default());

        self.sends_in_flight += 1;
        self.spawn(async move {
            if let Some(entry) = user_entry {
                chat.add_entry(entry).await;
            }
            let placeholder = chat.add_entry(placeholder).await;
            if let Some(id) = placeholder {
                generator.generate_response(id);
            }
            Completion::Sent { placeholder }
        });
    }

    /// Cancel the running generation, if any
    pub fn abort(&mut self) {
        if !self.deps.generator.is_generating() {
            return;
        }
        log::info!("Aborting generation");
        let abort = self.deps.generator.abort();
        self.spawn(abort.map(|()| Completion::Aborted));
    }

    /// The input's commit key was pressed
    pub fn commit_key(&mut self) -> CommitOutcome {
        if self.settings.send_on_enter {
            self.input_focused = false;
            self.send();
            CommitOutcome::Sent
        } else {
            self.text.push('\n');
            CommitOutcome::NewlineInserted
        }
    }

    // Completion handling

    /// Apply every completion that is ready right now without blocking.
    ///
    /// Returns how many completions were applied.
    pub fn pump(&mut self) -> usize {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut applied = 0;
        while let Poll::Ready(Some(completion)) = self.pending.poll_next_unpin(&mut cx) {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Drive every outstanding operation to completion
    pub async fn settle(&mut self) {
        while let Some(completion) = self.pending.next().await {
            self.apply(completion);
        }
    }

    fn spawn(&mut self, future: impl std::future::Future<Output = Completion> + 'static) {
        self.pending.push(future.boxed_local());
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Picked(Ok(uris)) => {
                if !uris.is_empty() {
                    self.add_images(uris);
                }
            }
            Completion::Picked(Err(ComposerError::PermissionDenied)) => {
                self.notices.push(Notice::new(
                    "Permission required",
                    "Permission to access media library is needed.",
                ));
            }
            Completion::Picked(Err(err)) => {
                log::error!("Failed to attach images: {}", err);
                self.notices.push(Notice::new("Error", "Failed to attach images."));
            }
            Completion::Captured {
                result,
                epoch,
                version,
            } => {
                self.capture_in_flight = false;
                match result {
                    Ok(uri) if epoch != self.surface.epoch() => {
                        log::info!("Discarding capture of a cancelled drawing: {}", uri);
                    }
                    Ok(uri) => {
                        self.add_images([uri]);
                        if version == self.surface.session().version() {
                            self.surface.finish_saved();
                        } else {
                            log::debug!("Drawing changed during capture, keeping surface open");
                        }
                    }
                    Err(err) if epoch != self.surface.epoch() => {
                        log::warn!("Capture of a cancelled drawing failed: {}", err);
                    }
                    Err(err) => {
                        log::error!("Failed to save drawing: {}", err);
                        self.notices.push(Notice::new("Error", "Failed to save drawing."));
                    }
                }
            }
            Completion::Sent { placeholder } => {
                self.sends_in_flight = self.sends_in_flight.saturating_sub(1);
                match placeholder {
                    Some(id) => log::debug!("Generating response into {}", id),
                    None => log::warn!("Chat store did not create a reply entry"),
                }
            }
            Completion::Aborted => log::debug!("Generation aborted"),
        }
    }
}

