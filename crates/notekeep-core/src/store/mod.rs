// crates/notekeep-core/src/store/mod.rs - Document persistence layer
//
// A Store owns the on-disk (or in-memory) representation of the Document.
// It knows HOW to read and write the whole Document but nothing about notes
// as a domain; that lives in the service layer.
//
// Every operation is whole-document: a load reads everything, a save
// replaces everything. `update` groups load + mutate + save into one unit
// so implementations can hold a lock across it.

mod file;
mod lock;
mod memory;

pub use file::{FileStoreOptions, JsonFileStore};
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::note::{Document, Note};

/// Errors raised by Store implementations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed note database {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Note database is locked by another process: {} (delete it if no other process is running)",
        .path.display()
    )]
    Locked { path: PathBuf },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a mutation inside [`Store::update`]
///
/// `Write` persists the mutated Document, `Skip` leaves storage untouched.
/// Both carry the value handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    Write(T),
    Skip(T),
}

/// Durable load/save of the whole Document
pub trait Store {
    /// Read the persisted Document
    fn load(&self) -> StoreResult<Document>;

    /// Replace the persisted Document, returning it unchanged for chaining
    fn save(&self, doc: Document) -> StoreResult<Document>;

    /// Load, let `mutate` change the Document, then save it if asked to
    ///
    /// The default is a plain read-modify-write with no isolation from other
    /// writers. Implementations that can lock override it.
    fn update<T, F>(&self, mutate: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Document) -> Change<T>,
    {
        let mut doc = self.load()?;
        match mutate(&mut doc) {
            Change::Write(value) => {
                self.save(doc)?;
                Ok(value)
            }
            Change::Skip(value) => Ok(value),
        }
    }

    /// Push `note` onto the end of the Document and persist it
    fn append(&self, note: Note) -> StoreResult<Note> {
        self.update(|doc| {
            doc.notes.push(note.clone());
            Change::Write(note)
        })
    }
}
