//! Resolves where the reminder database lives and prepares it for use.

use std::path::{Path, PathBuf};

use tokio::task;

use super::{task_ops::seed_default_tasks, Tracker};
use crate::{
    db::Database,
    error::{NudgeError, Result},
};

const APP_PREFIX: &str = "nudge";
const DATABASE_FILE: &str = "nudge.db";

/// Configures a [`Tracker`].
///
/// Without an explicit path the database is placed at
/// `$XDG_DATA_HOME/nudge/nudge.db`.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    default_tasks: bool,
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `path` for the database when given; `None` keeps the XDG default.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Seeds the two starter tasks while building if the database holds no
    /// task yet.
    pub fn with_default_tasks(mut self, seed: bool) -> Self {
        self.default_tasks = seed;
        self
    }

    /// Creates the database directory, applies the schema and default
    /// settings, and optionally seeds the starter tasks.
    ///
    /// # Errors
    ///
    /// `FileSystem` when the directory cannot be created, `XdgDirectory`
    /// when no data directory can be resolved, and `Database` when the
    /// file cannot be opened or initialised.
    pub async fn build(self) -> Result<Tracker> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => xdg_database_path()?,
        };

        if let Some(dir) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| NudgeError::FileSystem {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let seed = self.default_tasks;
        let path = db_path.clone();
        task::spawn_blocking(move || -> Result<()> {
            let mut db = Database::new(&path)?;
            if seed {
                seed_default_tasks(&mut db)?;
            }
            Ok(())
        })
        .await
        .map_err(NudgeError::join)??;

        Ok(Tracker::new(db_path))
    }
}

fn xdg_database_path() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
        .place_data_file(DATABASE_FILE)
        .map_err(|e| NudgeError::XdgDirectory(e.to_string()))
}
