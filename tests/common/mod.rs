#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use eframe_chat_composer::error::RasterResult;
use eframe_chat_composer::{
    ChatStore, Composer, ComposerConfig, ComposerDeps, ComposerResult, EntryId, GenerationPipeline,
    MediaLibrary, MemorySettingsStore, NewEntry, PermissionStatus, PickerOptions, PickerResult,
    RasterError, SurfaceRasterizer, SurfaceSnapshot, Theme,
};
use eframe_chat_composer::{CaptureOptions, ComposerSettings};
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

/// Chat store that records every entry it is given
pub struct RecordingChat {
    pub entries: RefCell<Vec<NewEntry>>,
    pub ids: RefCell<Vec<EntryId>>,
    next_id: Cell<u64>,
    /// When false, placeholder entries are not created
    pub create_placeholders: Cell<bool>,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            ids: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            create_placeholders: Cell::new(true),
        }
    }
}

impl ChatStore for RecordingChat {
    fn add_entry(&self, entry: NewEntry) -> LocalBoxFuture<'static, Option<EntryId>> {
        if !entry.is_user && !self.create_placeholders.get() {
            return futures::future::ready(None).boxed_local();
        }
        self.next_id.set(self.next_id.get() + 1);
        let id = EntryId(self.next_id.get());
        self.entries.borrow_mut().push(entry);
        self.ids.borrow_mut().push(id);
        futures::future::ready(Some(id)).boxed_local()
    }

    fn user_name(&self) -> Option<String> {
        Some("Alice".to_owned())
    }

    fn character_name(&self) -> Option<String> {
        Some("Robot".to_owned())
    }
}

#[derive(Default)]
pub struct RecordingGenerator {
    pub generated: RefCell<Vec<EntryId>>,
    pub generating: Cell<bool>,
    pub aborts: Cell<usize>,
}

impl GenerationPipeline for RecordingGenerator {
    fn generate_response(&self, entry: EntryId) {
        self.generated.borrow_mut().push(entry);
    }

    fn abort(&self) -> LocalBoxFuture<'static, ()> {
        self.aborts.set(self.aborts.get() + 1);
        self.generating.set(false);
        futures::future::ready(()).boxed_local()
    }

    fn is_generating(&self) -> bool {
        self.generating.get()
    }
}

/// Rasterizer answering with queued results
#[derive(Default)]
pub struct ScriptedRasterizer {
    pub results: RefCell<VecDeque<RasterResult<String>>>,
    pub captures: RefCell<Vec<SurfaceSnapshot>>,
    deferred: RefCell<VecDeque<oneshot::Receiver<RasterResult<String>>>>,
}

impl ScriptedRasterizer {
    pub fn succeed_with(&self, uri: &str) {
        self.results.borrow_mut().push_back(Ok(uri.to_owned()));
    }

    pub fn fail(&self) {
        self.results
            .borrow_mut()
            .push_back(Err(RasterError::Io(std::io::Error::other("view is gone"))));
    }

    /// The next capture waits until the returned sender delivers its result
    pub fn defer(&self) -> oneshot::Sender<RasterResult<String>> {
        let (tx, rx) = oneshot::channel();
        self.deferred.borrow_mut().push_back(rx);
        tx
    }
}

impl SurfaceRasterizer for ScriptedRasterizer {
    fn capture(
        &self,
        surface: &SurfaceSnapshot,
        _options: CaptureOptions,
    ) -> LocalBoxFuture<'static, RasterResult<String>> {
        self.captures.borrow_mut().push(surface.clone());
        if let Some(rx) = self.deferred.borrow_mut().pop_front() {
            return async move {
                rx.await
                    .unwrap_or_else(|_| Err(RasterError::Io(std::io::Error::other("capture dropped"))))
            }
            .boxed_local();
        }
        let result = self
            .results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RasterError::Io(std::io::Error::other("no scripted result"))));
        futures::future::ready(result).boxed_local()
    }
}

/// Media library whose picker results are delivered by the test
pub struct ChannelMediaLibrary {
    pub permission: Cell<PermissionStatus>,
    pending: RefCell<VecDeque<oneshot::Receiver<PickerResult>>>,
}

impl ChannelMediaLibrary {
    pub fn new() -> Self {
        Self {
            permission: Cell::new(PermissionStatus::Granted),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Prepare the next picker launch; the returned sender completes it
    pub fn next_pick(&self) -> oneshot::Sender<PickerResult> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(rx);
        tx
    }
}

impl MediaLibrary for ChannelMediaLibrary {
    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus> {
        futures::future::ready(self.permission.get()).boxed_local()
    }

    fn launch(&self, _options: PickerOptions) -> LocalBoxFuture<'static, ComposerResult<PickerResult>> {
        let rx = self.pending.borrow_mut().pop_front();
        async move {
            match rx {
                Some(rx) => Ok(rx.await.unwrap_or_else(|_| PickerResult::cancelled())),
                None => Ok(PickerResult::cancelled()),
            }
        }
        .boxed_local()
    }
}

pub struct Harness {
    pub composer: Composer,
    pub chat: Rc<RecordingChat>,
    pub generator: Rc<RecordingGenerator>,
    pub rasterizer: Rc<ScriptedRasterizer>,
    pub media: Rc<ChannelMediaLibrary>,
    pub settings: Rc<MemorySettingsStore>,
}

pub fn harness() -> Harness {
    harness_with_settings(ComposerSettings::default())
}

pub fn harness_with_settings(settings: ComposerSettings) -> Harness {
    let chat = Rc::new(RecordingChat::new());
    let generator = Rc::new(RecordingGenerator::default());
    let rasterizer = Rc::new(ScriptedRasterizer::default());
    let media = Rc::new(ChannelMediaLibrary::new());
    let settings = Rc::new(MemorySettingsStore::new(settings));

    let deps = ComposerDeps {
        chat: chat.clone(),
        generator: generator.clone(),
        settings: settings.clone(),
        media: media.clone(),
        rasterizer: rasterizer.clone(),
    };

    Harness {
        composer: Composer::new(ComposerConfig::default(), Theme::default(), deps),
        chat,
        generator,
        rasterizer,
        media,
        settings,
    }
}
