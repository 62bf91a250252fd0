// crates/notekeep-core/src/store/file.rs - JSON file backed Store
//
// The database is one UTF-8 JSON file rewritten in full on every save.
//
// WRITE PATH:
// With atomic writes enabled the new bytes go to a temporary file in the same
// directory which is then renamed over the database. Readers see either the
// old Document or the new one, never a torn write.
//
// LOCKING:
// `save` and `update` hold `<db>.lock` for their whole duration so two
// processes cannot interleave a read-modify-write. `load` takes no lock.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::lock::LockFile;
use super::{Change, Store, StoreError, StoreResult};
use crate::note::Document;

/// Tuning knobs for [`JsonFileStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStoreOptions {
    /// Write to a temporary file and rename it over the database
    pub atomic_write: bool,

    /// Hold an advisory lock file across save and update
    pub lock: bool,

    /// How long to wait for a lock held by another process
    pub lock_timeout: Duration,
}

impl Default for FileStoreOptions {
    fn default() -> Self {
        Self {
            atomic_write: true,
            lock: true,
            lock_timeout: Duration::from_millis(2000),
        }
    }
}

/// Store persisting the Document as pretty-printed JSON at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    options: FileStoreOptions,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, FileStoreOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: FileStoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &FileStoreOptions {
        &self.options
    }

    /// Location of the advisory lock file (`<db>.lock`)
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Create the database with an empty Document unless it already exists
    ///
    /// Returns `true` when a new file was written. An existing file is never
    /// touched, whatever its content.
    pub fn init(&self) -> StoreResult<bool> {
        if let Some(parent) = non_empty_parent(&self.path) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Staged through a temp file: a failed write never leaves a half-written
        // database behind, and no-clobber keeps an existing one untouched.
        let text = self.encode(&Document::empty())?;
        let temp = self.stage(text.as_bytes())?;
        if let Err(err) = temp.persist_noclobber(&self.path) {
            if err.error.kind() == io::ErrorKind::AlreadyExists {
                debug!(db = %self.path.display(), "database already exists");
                return Ok(false);
            }
            return Err(self.io_error(err.error));
        }

        info!(db = %self.path.display(), "initialized empty note database");
        Ok(true)
    }

    fn acquire_lock(&self) -> StoreResult<Option<LockFile>> {
        if !self.options.lock {
            return Ok(None);
        }
        LockFile::acquire(&self.lock_path(), self.options.lock_timeout).map(Some)
    }

    fn read_document(&self) -> StoreResult<Document> {
        let text = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let doc: Document = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(db = %self.path.display(), notes = doc.notes.len(), "loaded document");
        Ok(doc)
    }

    fn write_document(&self, doc: &Document) -> StoreResult<()> {
        let text = self.encode(doc)?;

        if self.options.atomic_write {
            self.write_atomically(text.as_bytes())?;
        } else {
            fs::write(&self.path, text.as_bytes()).map_err(|source| self.io_error(source))?;
        }

        debug!(db = %self.path.display(), notes = doc.notes.len(), "saved document");
        Ok(())
    }

    fn write_atomically(&self, bytes: &[u8]) -> StoreResult<()> {
        let temp = self.stage(bytes)?;

        // Temp files are created 0600; keep whatever mode the database had.
        if let Ok(meta) = fs::metadata(&self.path) {
            fs::set_permissions(temp.path(), meta.permissions()).map_err(|source| {
                StoreError::Io {
                    path: temp.path().to_path_buf(),
                    source,
                }
            })?;
        }

        temp.persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }

    /// Write `bytes` to a synced temp file beside the database
    fn stage(&self, bytes: &[u8]) -> StoreResult<NamedTempFile> {
        let dir = non_empty_parent(&self.path).unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let written = temp.write_all(bytes).and_then(|()| temp.as_file().sync_all());
        if let Err(source) = written {
            return Err(StoreError::Io {
                path: temp.path().to_path_buf(),
                source,
            });
        }
        Ok(temp)
    }

    fn encode(&self, doc: &Document) -> StoreResult<String> {
        doc.to_pretty_json().map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> StoreResult<Document> {
        self.read_document()
    }

    fn save(&self, doc: Document) -> StoreResult<Document> {
        let _lock = self.acquire_lock()?;
        self.write_document(&doc)?;
        Ok(doc)
    }

    fn update<T, F>(&self, mutate: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Document) -> Change<T>,
    {
        let _lock = self.acquire_lock()?;
        let mut doc = self.read_document()?;
        match mutate(&mut doc) {
            Change::Write(value) => {
                self.write_document(&doc)?;
                Ok(value)
            }
            Change::Skip(value) => Ok(value),
        }
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}
