//! In-memory chat history used by the desktop shell.
//!
//! Stands in for a real chat store and inference engine: replies are a
//! fixed notice streamed a few characters per tick so the stop control
//! has something to cancel.

use futures::future::{FutureExt, LocalBoxFuture};
use parking_lot::Mutex;

use crate::attachment::Attachment;
use crate::services::{ChatStore, EntryId, GenerationPipeline, NewEntry};

const OFFLINE_REPLY: &str = "No inference engine is connected, so this reply is a placeholder.";
const CHARS_PER_TICK: usize = 2;

/// A stored chat entry
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub id: EntryId,
    pub author: String,
    pub is_user: bool,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug)]
struct Generation {
    entry: EntryId,
    remaining: std::vec::IntoIter<char>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<ChatEntry>,
    next_id: u64,
    generation: Option<Generation>,
}

#[derive(Debug)]
pub struct Transcript {
    user_name: String,
    character_name: String,
    inner: Mutex<Inner>,
}

impl Transcript {
    pub fn new(user_name: impl Into<String>, character_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            character_name: character_name.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn entries(&self) -> Vec<ChatEntry> {
        self.inner.lock().entries.clone()
    }

    /// Stream the next few characters of the running reply.
    ///
    /// Returns `true` while a reply is still being written.
    pub fn tick(&self) -> bool {
        let mut inner = self.inner.lock();
        let Some(generation) = inner.generation.as_mut() else {
            return false;
        };
        let entry_id = generation.entry;
        let chunk: String = generation.remaining.by_ref().take(CHARS_PER_TICK).collect();
        let done = generation.remaining.len() == 0;

        if let Some(entry) = inner.entries.iter_mut().find(|e| e.id == entry_id) {
            entry.text.push_str(&chunk);
        }
        if done {
            inner.generation = None;
            log::debug!("Finished reply {}", entry_id);
        }
        !done
    }
}

impl ChatStore for Transcript {
    fn add_entry(&self, entry: NewEntry) -> LocalBoxFuture<'static, Option<EntryId>> {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = EntryId(inner.next_id);
        inner.entries.push(ChatEntry {
            id,
            author: entry.author,
            is_user: entry.is_user,
            text: entry.text,
            attachments: entry.attachments,
        });
        futures::future::ready(Some(id)).boxed_local()
    }

    fn user_name(&self) -> Option<String> {
        Some(self.user_name.clone())
    }

    fn character_name(&self) -> Option<String> {
        Some(self.character_name.clone())
    }
}

impl GenerationPipeline for Transcript {
    fn generate_response(&self, entry: EntryId) {
        let mut inner = self.inner.lock();
        if !inner.entries.iter().any(|e| e.id == entry) {
            log::warn!("Cannot generate into unknown {}", entry);
            return;
        }
        let reply: Vec<char> = OFFLINE_REPLY.chars().collect();
        inner.generation = Some(Generation {
            entry,
            remaining: reply.into_iter(),
        });
    }

    fn abort(&self) -> LocalBoxFuture<'static, ()> {
        if let Some(generation) = self.inner.lock().generation.take() {
            log::info!("Stopped reply {}", generation.entry);
        }
        futures::future::ready(()).boxed_local()
    }

    fn is_generating(&self) -> bool {
        self.inner.lock().generation.is_some()
    }
}
