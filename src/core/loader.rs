//! Locate, read and resolve database files.
//!
//! A relative file name is looked up in order in `$TOP/db` (when `TOP` is
//! set and `use_top_env` is on), each configured search path, and the
//! current directory (when `include_cwd` is on). The first existing match
//! wins. Absolute paths are used as given.
//!
//! ## Examples
//! ```no_run
//! # use epics_db_rs::core::loader::{DatabaseLoader, LoaderConfig};
//! let config = LoaderConfig::default().with_search_path("/opt/ioc/db");
//! let loaded = DatabaseLoader::new(config).load("scope.db")?;
//! for binding in loaded.parameters.iter() {
//!     println!("{} -> {}", binding.drv_info, binding.param_name);
//! }
//! # Ok::<(), epics_db_rs::core::loader::LoadError>(())
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::parse_database_with_options;
use crate::core::parser::{Database, ParserOptions};
use crate::core::resolver::{ResolvedParameters, resolve};

/// Environment variable naming the IOC top directory.
pub const TOP_ENV: &str = "TOP";

/// Subdirectory of `$TOP` holding installed databases.
pub const TOP_DB_DIR: &str = "db";

/// Where and how database files are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Extra directories searched after `$TOP/db`.
    pub search_paths: Vec<PathBuf>,
    /// Search `$TOP/db` first when `TOP` is set.
    pub use_top_env: bool,
    /// Search the current directory last.
    pub include_cwd: bool,
    pub parser: ParserOptions,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            use_top_env: true,
            include_cwd: true,
            parser: ParserOptions::default(),
        }
    }
}

impl LoaderConfig {
    /// Append a search directory.
    #[must_use]
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    #[must_use]
    pub fn with_top_env(mut self, enabled: bool) -> Self {
        self.use_top_env = enabled;
        self
    }

    #[must_use]
    pub fn with_cwd(mut self, enabled: bool) -> Self {
        self.include_cwd = enabled;
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }
}

/// Failure to load a database file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(
        "database '{}' not found (searched {})",
        .file.display(),
        display_dirs(.searched)
    )]
    NotFound { file: PathBuf, searched: Vec<PathBuf> },
    #[error("cannot read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid database '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: crate::core::Error,
    },
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "nothing".to_string();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A database file after parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDatabase {
    /// Where the file was found.
    pub path: PathBuf,
    pub database: Database,
    pub parameters: ResolvedParameters,
}

/// Finds and loads database files according to a `LoaderConfig`.
#[derive(Debug, Clone)]
pub struct DatabaseLoader {
    config: LoaderConfig,
    top: Option<PathBuf>,
}

impl DatabaseLoader {
    /// Create a loader, reading `TOP` from the environment.
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        let top = env::var_os(TOP_ENV).map(PathBuf::from);
        Self { config, top }
    }

    /// Use `top` in place of the `TOP` environment variable.
    #[must_use]
    pub fn with_top_dir(mut self, top: Option<PathBuf>) -> Self {
        self.top = top;
        self
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Directories searched for relative file names, in order.
    #[must_use]
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if self.config.use_top_env
            && let Some(top) = &self.top
        {
            dirs.push(top.join(TOP_DB_DIR));
        }
        dirs.extend(self.config.search_paths.iter().cloned());
        if self.config.include_cwd
            && let Ok(cwd) = env::current_dir()
        {
            dirs.push(cwd);
        }
        dirs
    }

    /// Find `file` on the search path.
    ///
    /// # Errors
    /// `LoadError::NotFound` listing every location tried.
    pub fn locate(&self, file: impl AsRef<Path>) -> Result<PathBuf, LoadError> {
        let file = file.as_ref();
        if file.is_absolute() {
            if file.is_file() {
                return Ok(file.to_path_buf());
            }
            return Err(LoadError::NotFound {
                file: file.to_path_buf(),
                searched: Vec::new(),
            });
        }

        let searched = self.search_dirs();
        for dir in &searched {
            let candidate = dir.join(file);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "located database");
                return Ok(candidate);
            }
        }
        Err(LoadError::NotFound {
            file: file.to_path_buf(),
            searched,
        })
    }

    /// Locate, read, parse and resolve `file`.
    ///
    /// # Errors
    /// `NotFound` when no candidate exists, `Io` when it cannot be read, and
    /// `Parse` when its text is not a valid database.
    pub fn load(&self, file: impl AsRef<Path>) -> Result<LoadedDatabase, LoadError> {
        let path = self.locate(file)?;
        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let database = parse_database_with_options(&text, &self.config.parser)
            .map_err(|source| LoadError::Parse {
                path: path.clone(),
                source,
            })?;
        let parameters = resolve(&database.records);
        info!(
            path = %path.display(),
            records = database.len(),
            parameters = parameters.len(),
            "loaded database"
        );
        Ok(LoadedDatabase {
            path,
            database,
            parameters,
        })
    }
}
