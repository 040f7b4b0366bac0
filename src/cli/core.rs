//! Shell state, dispatch, and error reporting.

use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::services::{LedgerQuery, ServiceError};
use crate::core::{EntryFormController, LedgerStore};
use crate::domain::LedgerEntry;
use crate::errors::{CliError, LedgerError};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
use super::shell::parse_command_line;

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

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Core(err),
        }
    }
}

/// Everything a command handler can see: the ledger, the current view, and preferences.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub form: EntryFormController,
    pub query: LedgerQuery,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
    config_manager: Option<ConfigManager>,
}

impl ShellContext {
    /// Loads preferences from disk and builds a fresh, empty ledger session.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        Ok(Self::with_config(mode, config, Some(manager)))
    }

    /// Session without config persistence; `config set` only lasts for the session.
    pub fn in_memory(mode: CliMode) -> Self {
        Self::with_config(mode, Config::default(), None)
    }

    pub fn with_config(mode: CliMode, config: Config, config_manager: Option<ConfigManager>) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        cli_io::apply_config(&config);

        let query = LedgerQuery {
            sort: config.default_sort,
            ..LedgerQuery::default()
        };

        Self {
            mode,
            registry,
            store: LedgerStore::new(),
            form: EntryFormController::new(config.catalog()),
            query,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
            config_manager,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        if self.query.is_identity() {
            "ledger> ".into()
        } else {
            "ledger (view)> ".into()
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Entries as currently shown: the store filtered and ordered by the active query.
    pub fn view(&self) -> Vec<LedgerEntry> {
        self.query.apply(self.store.list())
    }

    /// Saves preferences and re-applies the parts that affect the session.
    pub fn config_changed(&mut self) -> CommandResult {
        cli_io::apply_config(&self.config);
        if !self.form.is_open() {
            self.form = EntryFormController::new(self.config.catalog());
        }
        if let Some(manager) = &self.config_manager {
            manager.save(&self.config)?;
        }
        Ok(())
    }

    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| match err {
                CommandError::Dialoguer(err) => CliError::Prompt(err),
                CommandError::Io(err) => CliError::Io(err),
                other => CliError::Core(LedgerError::InvalidInput(other.to_string())),
            })
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(LedgerError::Validation(errors)) => {
                cli_io::print_error("Entry not saved.");
                for error in errors.iter() {
                    cli_io::print_warning(format!("{}: {}", error.field.label(), error.message));
                }
            }
            other => cli_io::print_error(other.to_string()),
        }
    }

    pub fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_context() -> ShellContext {
        ShellContext::in_memory(CliMode::Script)
    }

    #[test]
    fn unknown_commands_continue() {
        let mut context = script_context();
        let control = context.process_line("lsit").unwrap();
        assert_eq!(control, LoopControl::Continue);
        assert!(context.running);
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut context = script_context();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn quoted_arguments_reach_the_form() {
        let mut context = script_context();
        context
            .process_line(
                "add date=2024-03-05 category=food \"description=team lunch\" amount=20 payment=cash",
            )
            .unwrap();
        assert_eq!(context.store.len(), 1);
        assert_eq!(context.store.list()[0].description, "team lunch");
    }

    #[test]
    fn default_sort_seeds_the_view() {
        let config = Config {
            default_sort: crate::core::services::SortOrder::Descending,
            ..Config::default()
        };
        let context = ShellContext::with_config(CliMode::Script, config, None);
        assert!(!context.query.is_identity());
    }
}
