use std::path::PathBuf;

use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    errors::{Result, TrackerError},
    ledger::{BudgetRegistry, TransactionStore},
    storage::{self, Snapshot},
};

use super::commands;
use super::output;
use super::registry::CommandRegistry;

const SUGGESTION_DISTANCE: usize = 2;
const DATA_FILE_ENV: &str = "FINLOG_DATA_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Owns the store, budget registry, and configuration for one shell session.
///
/// All commands mutate state through this context and persist a snapshot
/// after each mutation; no global state is involved.
pub struct ShellContext {
    mode: CliMode,
    registry: CommandRegistry,
    pub store: TransactionStore,
    pub budgets: BudgetRegistry,
    pub config: Config,
    data_path: PathBuf,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self> {
        let config = match ConfigManager::new() {
            Ok(manager) => manager.load()?,
            Err(err) => {
                tracing::warn!(%err, "Falling back to default configuration");
                Config::default()
            }
        };
        let data_path = std::env::var_os(DATA_FILE_ENV)
            .map(PathBuf::from)
            .or_else(|| config.data_file.clone())
            .unwrap_or_else(storage::default_data_path);
        let (store, budgets) = storage::load_snapshot(&data_path)?.into_parts();
        tracing::info!(
            transactions = store.count(),
            path = %data_path.display(),
            "Loaded journal"
        );

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            store,
            budgets,
            config,
            data_path,
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Looks up and runs the named command; unknown names get a nearest-match
    /// suggestion.
    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl> {
        let Some(handler) = self.registry.handler(command) else {
            return Err(self.unknown_command(command));
        };
        handler(self, args)?;
        if self.running {
            Ok(LoopControl::Continue)
        } else {
            Ok(LoopControl::Exit)
        }
    }

    fn unknown_command(&self, command: &str) -> TrackerError {
        let suggestion = self
            .registry
            .names()
            .map(|name| (levenshtein(command, name), name))
            .min()
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE);
        match suggestion {
            Some((_, name)) => TrackerError::InvalidInput(format!(
                "unknown command `{}`. Did you mean `{}`?",
                command, name
            )),
            None => TrackerError::InvalidInput(format!(
                "unknown command `{}`. Type `help` for the command list.",
                command
            )),
        }
    }

    /// Saves the current store and budgets to the journal file.
    pub fn persist(&self) -> Result<()> {
        storage::save_snapshot(&Snapshot::new(&self.store, &self.budgets), &self.data_path)
    }

    pub fn report_error(&self, err: &TrackerError) {
        output::error(err);
    }
}
