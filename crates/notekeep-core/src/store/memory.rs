// crates/notekeep-core/src/store/memory.rs - In-memory Store
//
// Holds the Document in process memory. Used where a real file is not wanted,
// mostly in tests: it counts saves so callers can assert that an operation
// did not write, and can be told to fail every write.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{Store, StoreError, StoreResult};
use crate::note::Document;

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Mutex<Document>,
    saves: AtomicUsize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new(doc: Document) -> Self {
        Self {
            doc: Mutex::new(doc),
            saves: AtomicUsize::new(0),
            fail_writes: false,
        }
    }

    /// A store whose every save fails with an I/O error
    pub fn failing_writes(doc: Document) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(doc)
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the current Document
    pub fn snapshot(&self) -> Document {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> StoreResult<Document> {
        Ok(self.snapshot())
    }

    fn save(&self, doc: Document) -> StoreResult<Document> {
        if self.fail_writes {
            return Err(StoreError::Io {
                path: PathBuf::from(MEMORY_PATH),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "write permission denied"),
            });
        }

        *self.doc.lock().unwrap_or_else(PoisonError::into_inner) = doc.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(doc)
    }
}
