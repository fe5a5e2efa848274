use futures::future::{FutureExt, LocalBoxFuture};
use std::rc::Rc;

use crate::error::{ComposerError, ComposerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Images,
}

/// How the media picker is launched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    pub media: MediaKind,
    pub allows_multiple_selection: bool,
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media: MediaKind::Images,
            allows_multiple_selection: true,
            quality: 0.5,
        }
    }
}

/// What the picker returned
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PickerResult {
    pub cancelled: bool,
    pub assets: Vec<String>,
}

impl PickerResult {
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            assets: Vec::new(),
        }
    }

    pub fn selected(assets: Vec<String>) -> Self {
        Self {
            cancelled: false,
            assets,
        }
    }
}

/// The platform's media library
pub trait MediaLibrary {
    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus>;

    fn launch(&self, options: PickerOptions) -> LocalBoxFuture<'static, ComposerResult<PickerResult>>;
}

/// One permission + selection round trip against a `MediaLibrary`
#[derive(Clone)]
pub struct AttachmentPicker {
    library: Rc<dyn MediaLibrary>,
    options: PickerOptions,
}

impl AttachmentPicker {
    pub fn new(library: Rc<dyn MediaLibrary>, options: PickerOptions) -> Self {
        Self { library, options }
    }

    /// Asset uris the user picked. Cancelling yields an empty list.
    pub fn pick(&self) -> LocalBoxFuture<'static, ComposerResult<Vec<String>>> {
        let library = Rc::clone(&self.library);
        let options = self.options;
        async move {
            if library.request_permission().await == PermissionStatus::Denied {
                log::warn!("Media library permission denied");
                return Err(ComposerError::PermissionDenied);
            }

            let result = library.launch(options).await?;
            if result.cancelled {
                log::debug!("Image picker cancelled");
                return Ok(Vec::new());
            }
            log::info!("Picked {} image(s)", result.assets.len());
            Ok(result.assets)
        }
        .boxed_local()
    }
}

/// A library with a fixed answer, for headless runs and tests
#[derive(Debug, Clone)]
pub struct StaticMediaLibrary {
    pub permission: PermissionStatus,
    pub result: PickerResult,
}

impl MediaLibrary for StaticMediaLibrary {
    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus> {
        futures::future::ready(self.permission).boxed_local()
    }

    fn launch(&self, _options: PickerOptions) -> LocalBoxFuture<'static, ComposerResult<PickerResult>> {
        futures::future::ready(Ok(self.result.clone())).boxed_local()
    }
}

/// Native file dialog. Desktop platforms never gate file access.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct FileDialogLibrary;

#[cfg(not(target_arch = "wasm32"))]
impl MediaLibrary for FileDialogLibrary {
    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus> {
        futures::future::ready(PermissionStatus::Granted).boxed_local()
    }

    fn launch(&self, options: PickerOptions) -> LocalBoxFuture<'static, ComposerResult<PickerResult>> {
        let dialog = rfd::AsyncFileDialog::new()
            .set_title("Attach images")
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"]);
        async move {
            let picked = if options.allows_multiple_selection {
                dialog.pick_files().await
            } else {
                dialog.pick_file().await.map(|file| vec![file])
            };
            Ok(match picked {
                Some(files) => PickerResult::selected(
                    files
                        .iter()
                        .map(|file| format!("file://{}", file.path().display()))
                        .collect(),
                ),
                None => PickerResult::cancelled(),
            })
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn picker(permission: PermissionStatus, result: PickerResult) -> AttachmentPicker {
        AttachmentPicker::new(
            Rc::new(StaticMediaLibrary { permission, result }),
            PickerOptions::default(),
        )
    }

    #[test]
    fn test_denied_permission() {
        let picker = picker(PermissionStatus::Denied, PickerResult::selected(vec!["a.png".into()]));
        assert!(matches!(block_on(picker.pick()), Err(ComposerError::PermissionDenied)));
    }

    #[test]
    fn test_cancel_is_empty_selection() {
        let picker = picker(PermissionStatus::Granted, PickerResult::cancelled());
        assert!(block_on(picker.pick()).unwrap().is_empty());
    }

    #[test]
    fn test_selection_keeps_asset_order() {
        let picker = picker(
            PermissionStatus::Granted,
            PickerResult::selected(vec!["b.png".into(), "a.png".into()]),
        );
        assert_eq!(block_on(picker.pick()).unwrap(), vec!["b.png", "a.png"]);
    }

    #[test]
    fn test_default_options() {
        let options = PickerOptions::default();
        assert!(options.allows_multiple_selection);
        assert_eq!(options.quality, 0.5);
        assert_eq!(options.media, MediaKind::Images);
    }
}
