use serde::{Deserialize, Serialize};

use crate::id_generator::random_suffix;
use crate::util::time;

/// A pending image reference queued for the next sent message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: String,
    source_uri: String,
}

impl Attachment {
    /// Build an attachment whose id combines the source, a timestamp and a random suffix
    pub fn new(source_uri: impl Into<String>) -> Self {
        let source_uri = source_uri.into();
        Self {
            id: make_id(&source_uri),
            source_uri,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }
}

fn make_id(source_uri: &str) -> String {
    format!("{}-{}-{}", source_uri, time::timestamp_millis(), random_suffix())
}

/// Ordered attachments awaiting send. Order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentList {
    items: Vec<Attachment>,
}

impl AttachmentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Attachment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|a| a.id == id)
    }

    /// Append one attachment per uri, keeping ids unique within the list
    pub fn add_uris<I, S>(&mut self, uris: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for uri in uris {
            let mut attachment = Attachment::new(uri);
            while self.contains_id(&attachment.id) {
                attachment.id = make_id(&attachment.source_uri);
            }
            added.push(attachment.id.clone());
            self.items.push(attachment);
        }
        added
    }

    /// Remove the attachment with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|a| a.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empty the list, returning everything that was pending
    pub fn take(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.items)
    }
}
