// crates/notekeep-core/src/service.rs - Note domain operations
//
// The service holds no state of its own between calls. Each operation is one
// load-mutate-save unit against the injected Store:
//
//   create  -> update (append a new note)
//   all     -> load
//   find    -> load + filter on content
//   remove  -> update (write only if the id exists)
//   clean   -> save an empty Document

use thiserror::Error;
use tracing::{debug, info};

use crate::id::{IdGenerator, IdStrategy};
use crate::note::{Document, Note, NoteId};
use crate::store::{Change, Store, StoreError};

#[derive(Error, Debug)]
pub enum NoteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Note content cannot be empty")]
    EmptyContent,
}

pub type NoteResult<T> = Result<T, NoteError>;

/// Create, list, find and remove notes over a [`Store`]
pub struct NoteService<S, C = fn() -> u64>
where
    S: Store,
    C: Fn() -> u64,
{
    store: S,
    ids: IdGenerator<C>,
}

impl<S: Store> NoteService<S> {
    /// Service assigning timestamp ids from the system clock
    pub fn with_store(store: S) -> Self {
        Self::new(store, IdGenerator::system(IdStrategy::Timestamp))
    }
}

impl<S, C> NoteService<S, C>
where
    S: Store,
    C: Fn() -> u64,
{
    pub fn new(store: S, ids: IdGenerator<C>) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a new note at the end of the Document
    ///
    /// Content is trimmed and must not end up empty. Tags are stored exactly
    /// as given, in order; cleaning them up is the caller's business.
    pub fn create_note<I, T>(&self, content: &str, tags: I) -> NoteResult<Note>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteError::EmptyContent);
        }
        let tags: Vec<String> = tags
            .into_iter()
            .map(|tag| tag.as_ref().to_string())
            .collect();

        let note = self.store.update(|doc| {
            let note = Note::new(self.ids.next_id(doc), tags, content);
            doc.notes.push(note.clone());
            Change::Write(note)
        })?;

        info!(id = note.id, tags = note.tags.len(), "created note");
        Ok(note)
    }

    /// Every note in insertion order
    pub fn all_notes(&self) -> NoteResult<Vec<Note>> {
        Ok(self.store.load()?.notes)
    }

    /// Notes whose content contains `filter`, ignoring case
    ///
    /// Tags are never searched. An empty filter matches everything.
    pub fn find_notes(&self, filter: &str) -> NoteResult<Vec<Note>> {
        let needle = filter.to_lowercase();
        let matches: Vec<Note> = self
            .all_notes()?
            .into_iter()
            .filter(|note| note.content_contains(&needle))
            .collect();

        debug!(filter, matches = matches.len(), "searched notes");
        Ok(matches)
    }

    /// Remove every note with `id`
    ///
    /// Returns `None` without writing anything when no note has that id.
    pub fn remove_note(&self, id: NoteId) -> NoteResult<Option<NoteId>> {
        let removed = self.store.update(|doc| {
            if !doc.contains_id(id) {
                return Change::Skip(None);
            }
            doc.notes.retain(|note| note.id != id);
            Change::Write(Some(id))
        })?;

        match removed {
            Some(id) => info!(id, "removed note"),
            None => debug!(id, "no note to remove"),
        }
        Ok(removed)
    }

    /// Replace the Document with an empty one, unconditionally
    pub fn remove_all_notes(&self) -> NoteResult<()> {
        self.store.save(Document::empty())?;
        info!("removed all notes");
        Ok(())
    }
}
