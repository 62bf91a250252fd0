use anyhow::{Context as AnyhowContext, Result};
use notekeep_core::{ConfigManager, IdGenerator, JsonFileStore, NoteService, NotekeepConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application context that gets passed to command handlers
///
/// Built once per invocation from the global flags. It owns the note service
/// and the resolved configuration so handlers never look anything up
/// themselves.
pub struct Context {
    pub notes: NoteService<JsonFileStore>,
    config: NotekeepConfig,
    db_path: PathBuf,
    json: bool,
}

impl Context {
    /// Resolve configuration and wire the service to the database file
    pub fn new(db: Option<&Path>, config_file: Option<&Path>, json: bool) -> Result<Self> {
        let config =
            ConfigManager::load_config(config_file).context("Failed to load configuration")?;

        let db_path = config.db_path(db);
        debug!(db = %db_path.display(), strategy = %config.id.strategy, "resolved note database");

        let store = JsonFileStore::with_options(db_path.clone(), config.store.file_options());
        let notes = NoteService::new(store, IdGenerator::system(config.id.strategy));

        Ok(Self {
            json: json || config.json_output(),
            notes,
            config,
            db_path,
        })
    }

    /// Path of the note database
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn config(&self) -> &NotekeepConfig {
        &self.config
    }

    /// Whether results should be printed as JSON
    pub fn json(&self) -> bool {
        self.json
    }
}
