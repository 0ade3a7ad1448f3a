//! # formwright-cli
//!
//! The `formwright` command line tool.
//!
//! - **`render`** - renders a definition file, through the cache, to stdout or a file
//! - **`check`** - resolves attributes and reports errors and warnings without rendering
//!
//! ```rust
//! use formwright_cli::command::CommandRegistry;
//! use formwright_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//! assert_eq!(registry.list_commands(), vec!["check", "render"]);
//! ```

pub mod command;
pub mod commands;

pub use command::{Command, CommandRegistry};
