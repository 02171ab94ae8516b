//! Journal store lifecycle
//!
//! A store is a `.solace/` directory holding `config.toml` and the SQLite
//! journal database. Stores are created with [`Store::init`], opened directly
//! with [`Store::open`], or found by walking up from a working directory with
//! [`Store::discover`].

mod records;
mod tags;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{StoreConfig, STORE_FORMAT_VERSION};
use crate::db::{Database, DB_FILE};
use crate::error::{Result, SolaceError};
use crate::tag::system_tags;

/// Store directory name inside a project root
pub const STORE_DIR: &str = ".solace";
/// Config file name inside the store directory
pub const CONFIG_FILE: &str = "config.toml";

/// An open journal store
#[derive(Debug)]
pub struct Store {
    /// Root path of the store directory
    root: PathBuf,
    /// Store configuration
    config: StoreConfig,
    /// SQLite database
    db: Database,
}

impl Store {
    /// Create a new store under the given project root.
    ///
    /// Fails if the store directory already exists. Seeds the system tags.
    pub fn init(project_root: &Path) -> Result<Self> {
        let store_root = project_root.join(STORE_DIR);
        Self::init_at(&store_root)
    }

    /// Create a new store at an explicit store directory path.
    pub fn init_at(store_root: &Path) -> Result<Self> {
        if store_root.exists() {
            return Err(SolaceError::already_exists(
                "store",
                store_root.display(),
            ));
        }

        fs::create_dir_all(store_root)?;

        let config = StoreConfig::default();
        config.save(&store_root.join(CONFIG_FILE))?;

        let db = Database::open(store_root)?;
        for tag in system_tags() {
            db.upsert_tag(&tag)?;
        }

        tracing::info!(store = %store_root.display(), "initialized journal store");

        Ok(Store {
            root: store_root.to_path_buf(),
            config,
            db,
        })
    }

    /// Open an existing store at the given store directory path.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SolaceError::StoreNotFound {
                search_root: path.to_path_buf(),
            });
        }

        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() && !path.join(DB_FILE).exists() {
            return Err(SolaceError::InvalidStore {
                reason: format!(
                    "{} has neither {} nor {}",
                    path.display(),
                    CONFIG_FILE,
                    DB_FILE
                ),
            });
        }

        let config = if config_path.exists() {
            StoreConfig::load(&config_path)?
        } else {
            StoreConfig::default()
        };

        if config.version > STORE_FORMAT_VERSION {
            return Err(SolaceError::InvalidStore {
                reason: format!(
                    "store format version {} is newer than this build supports ({})",
                    config.version, STORE_FORMAT_VERSION
                ),
            });
        }

        let db = Database::open(path)?;

        Ok(Store {
            root: path.to_path_buf(),
            config,
            db,
        })
    }

    /// Find and open a store by walking up from the given directory.
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            let candidate = dir.join(STORE_DIR);
            if candidate.is_dir() {
                return Self::open(&candidate);
            }
        }
        Err(SolaceError::StoreNotFound {
            search_root: start.to_path_buf(),
        })
    }

    /// Store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Config file path
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Database file path
    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    /// The underlying database
    pub fn db(&self) -> &Database {
        &self.db
    }
}
