// crates/notekeep-core/src/lib.rs - Core library for tagged notes
//
// LAYERS (leaves first):
// - note:    the persisted data model (Document, Note)
// - store:   durable load/save of the whole Document, plus transactional update
// - id:      id assignment for newly created notes
// - service: the domain operations (create, list, find, remove) over a Store
// - config:  configuration schema and layered loading
//
// Every service call reads the full Document, mutates an in-memory copy and
// writes the full Document back. No state survives between calls.

pub mod config;
pub mod id;
pub mod note;
pub mod service;
pub mod store;

pub use config::{ConfigError, ConfigManager, NotekeepConfig};
pub use id::{IdError, IdGenerator, IdStrategy};
pub use note::{Document, Note, NoteId};
pub use service::{NoteError, NoteResult, NoteService};
pub use store::{
    Change, FileStoreOptions, JsonFileStore, MemoryStore, Store, StoreError, StoreResult,
};
