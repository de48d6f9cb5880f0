//! Session module
//!
//! A session owns one executor and runs complete commands against it,
//! including the commands that replace or persist the whole store
//! (`save`, `load`, `new database`, `exit`). Input may arrive one line at a
//! time; a command runs once a line ends with `;`.

use crate::catalog::TableStore;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::executor::{Executor, Output};
use crate::snapshot;
use crate::sql::{self, Statement};
use crate::types::STATEMENT_TERMINATOR;
use tracing::debug;

pub struct Session {
    config: StoreConfig,
    executor: Executor,
    pending: String,
}

impl Session {
    pub fn new(config: StoreConfig) -> Self {
        let executor = Executor::new(TableStore::new()).with_insert_mode(config.insert_mode);
        Self {
            config,
            executor,
            pending: String::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Whether a command has been started but not yet terminated
    pub fn is_pending(&self) -> bool {
        !self.pending.trim().is_empty()
    }

    /// Drop a partially entered command
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Feed one line of input.
    ///
    /// Returns `None` while the command is incomplete (or empty) and the
    /// command's result once a line ends with `;`.
    pub fn feed_line(&mut self, line: &str) -> Option<StoreResult<Output>> {
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(line);

        if !self.pending.trim_end().ends_with(STATEMENT_TERMINATOR) {
            return None;
        }

        let command = std::mem::take(&mut self.pending);
        let tokens = sql::tokenize(&command);
        if tokens.is_empty() {
            return None;
        }
        Some(sql::parse_tokens(&tokens).and_then(|stmt| self.execute_statement(stmt)))
    }

    /// Run one complete command
    pub fn execute(&mut self, command: &str) -> StoreResult<Output> {
        let stmt = sql::parse(command)?;
        self.execute_statement(stmt)
    }

    pub fn execute_statement(&mut self, stmt: Statement) -> StoreResult<Output> {
        debug!(statement = ?stmt, "executing");

        match stmt {
            Statement::Save(name) => {
                let path = self.config.snapshot_path(&name)?;
                snapshot::save(self.executor.store(), &path)?;
                Ok(Output::Saved(path))
            }
            Statement::Load(name) => {
                let path = self.config.snapshot_path(&name)?;
                let store = snapshot::load(&path)?;
                let tables = store.len();
                self.executor.replace_store(store).clear();
                Ok(Output::Loaded { path, tables })
            }
            Statement::NewDatabase => {
                self.executor.replace_store(TableStore::new()).clear();
                Ok(Output::NewDatabase)
            }
            Statement::Exit => Ok(Output::Exit),
            other => self.executor.execute(other),
        }
    }
}
