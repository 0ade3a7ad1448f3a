//! Command framework for the `formwright` binary.
//!
//! A [`Command`] names itself, declares its arguments on a `clap::Command`,
//! and handles the parsed matches. [`CommandRegistry`] collects commands,
//! builds the top-level parser, and dispatches to the selected one.

use std::collections::HashMap;
use std::io::Write;

use formwright_core::{FormwrightError, FormwrightResult};

/// A subcommand of the `formwright` binary.
pub trait Command: Send + Sync {
    /// Returns the name used to invoke this command.
    fn name(&self) -> &str;

    /// Returns a one-line description.
    fn help(&self) -> &str;

    /// Adds this command's arguments. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command, writing its primary output to `out`.
    fn handle(&self, matches: &clap::ArgMatches, out: &mut dyn Write) -> FormwrightResult<()>;
}

/// Commands registered by name.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command of the same name.
    pub fn register(&mut self, command: Box<dyn Command>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the registered names in sorted order.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level parser with one subcommand per registered command.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("formwright")
            .about("Render and check declarative form definitions")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true);

        for name in self.list_commands() {
            let Some(cmd) = self.get(name) else { continue };
            // Subcommand names must be 'static; the registry lives for the process.
            let static_name: &'static str = Box::leak(name.to_string().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand selected in `matches`.
    pub fn execute(&self, matches: &clap::ArgMatches, out: &mut dyn Write) -> FormwrightResult<()> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            FormwrightError::Configuration("No subcommand specified".to_string())
        })?;

        let cmd = self
            .get(name)
            .ok_or_else(|| FormwrightError::Configuration(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "dispatching");
        cmd.handle(sub_matches, out)
    }
}
