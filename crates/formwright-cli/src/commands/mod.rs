//! Built-in commands.

pub mod check;
pub mod render;

pub use check::CheckCommand;
pub use render::RenderCommand;

use std::path::PathBuf;

use formwright_core::{FormwrightError, FormwrightResult};
use formwright_forms::loader::{self, FormDefinition};

use crate::command::CommandRegistry;

/// Registers `render` and `check`.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(RenderCommand));
    registry.register(Box::new(CheckCommand));
}

fn definition_arg() -> clap::Arg {
    clap::Arg::new("definition")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Form definition file (.toml or .json)")
}

fn load_definition(matches: &clap::ArgMatches) -> FormwrightResult<FormDefinition> {
    let path = matches
        .get_one::<PathBuf>("definition")
        .ok_or_else(|| FormwrightError::Configuration("No definition file given".to_string()))?;
    tracing::debug!(path = %path.display(), "loading definition");
    loader::from_file_with_env(path)
}
