// crates/notekeep-core/src/note.rs - Persisted data model
//
// ON-DISK SHAPE:
// {
//   "notes": [
//     { "id": 1697712345678, "tags": ["errand"], "content": "Buy milk" }
//   ]
// }
//
// The `notes` field is mandatory. A file without it is malformed, never an
// empty default.

use serde::{Deserialize, Serialize};

/// Identifier of a note, assigned once at creation
pub type NoteId = u64;

/// One user-created record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub tags: Vec<String>,
    pub content: String,
}

impl Note {
    pub fn new(id: NoteId, tags: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            tags,
            content: content.into(),
        }
    }

    /// Case-insensitive substring match against the content only
    ///
    /// `needle_lower` must already be lowercased so a search over many notes
    /// lowercases the filter once.
    pub fn content_contains(&self, needle_lower: &str) -> bool {
        self.content.to_lowercase().contains(needle_lower)
    }
}

/// The entire persisted state
///
/// Order of `notes` is insertion order and also the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub notes: Vec<Note>,
}

impl Document {
    pub fn empty() -> Self {
        Self { notes: Vec::new() }
    }

    /// Largest id currently stored, if any
    pub fn max_id(&self) -> Option<NoteId> {
        self.notes.iter().map(|note| note.id).max()
    }

    pub fn contains_id(&self, id: NoteId) -> bool {
        self.notes.iter().any(|note| note.id == id)
    }

    /// Pretty JSON with 2-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
