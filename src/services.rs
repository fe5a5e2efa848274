//! Interfaces to the chat store and the response generator the composer feeds.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attachment::Attachment;

/// Identifier of a chat entry, used to target streaming generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry#{}", self.0)
    }
}

/// An entry about to be appended to the chat history
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub author: String,
    pub is_user: bool,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl NewEntry {
    pub fn user(author: impl Into<String>, text: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            author: author.into(),
            is_user: true,
            text: text.into(),
            attachments,
        }
    }

    /// Empty assistant entry that the generator fills in
    pub fn placeholder(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            is_user: false,
            text: String::new(),
            attachments: Vec::new(),
        }
    }
}

/// Chat history the composer appends to
pub trait ChatStore {
    /// Append an entry. `None` means the store did not create one.
    fn add_entry(&self, entry: NewEntry) -> LocalBoxFuture<'static, Option<EntryId>>;

    /// Display name of the local user
    fn user_name(&self) -> Option<String>;

    /// Display name of the character answering
    fn character_name(&self) -> Option<String>;
}

/// Response generation engine
pub trait GenerationPipeline {
    /// Start filling `entry` in the background. Fire and forget.
    fn generate_response(&self, entry: EntryId);

    /// Cancel whatever is being generated
    fn abort(&self) -> LocalBoxFuture<'static, ()>;

    fn is_generating(&self) -> bool;
}
