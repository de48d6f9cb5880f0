//! Store configuration

use crate::error::{StoreError, StoreResult};
use crate::types::{DEFAULT_PASSWORD, InsertMode, SNAPSHOT_EXT};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Settings of one store session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding `save`/`load` snapshot files
    pub data_dir: PathBuf,
    /// Password for the interactive prompt, `None` disables the prompt
    pub password: Option<String>,
    /// Failure policy of multi-tuple inserts
    pub insert_mode: InsertMode,
}

impl StoreConfig {
    const DEFAULT_DATA_DIR: &'static str = "data";

    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn with_insert_mode(mut self, insert_mode: InsertMode) -> Self {
        self.insert_mode = insert_mode;
        self
    }

    /// Whether `attempt` unlocks the prompt; always true without a password
    pub fn check_password(&self, attempt: &str) -> bool {
        self.password.as_deref().is_none_or(|p| p == attempt)
    }

    /// Read one password line from `reader` and check it.
    ///
    /// Surrounding whitespace is ignored. Running out of input is an error.
    pub fn authenticate(&self, reader: &mut impl BufRead) -> StoreResult<bool> {
        let attempt = rpassword::read_password_from_bufread(reader)?;
        Ok(self.check_password(attempt.trim()))
    }

    /// File used by `save <name>` / `load <name>`.
    ///
    /// Names are plain file stems; anything that could leave the data
    /// directory is refused.
    pub fn snapshot_path(&self, name: &str) -> StoreResult<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !name.starts_with('.');
        if !valid {
            return Err(StoreError::invalid(format!("invalid snapshot name '{}'", name)));
        }
        Ok(self.data_dir.join(format!("{}.{}", name, SNAPSHOT_EXT)))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            password: Some(DEFAULT_PASSWORD.to_string()),
            insert_mode: InsertMode::Partial,
        }
    }
}
