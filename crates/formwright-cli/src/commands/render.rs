//! The `render` command.

use std::io::Write;
use std::path::PathBuf;

use formwright_core::FormwrightResult;
use formwright_forms::captcha::ClientIdentity;
use formwright_forms::form::Form;

use super::{definition_arg, load_definition};
use crate::command::Command;

/// Renders a definition, honoring its cache settings.
pub struct RenderCommand;

fn identity_from(matches: &clap::ArgMatches) -> ClientIdentity {
    let get = |key: &str| matches.get_one::<String>(key).cloned().unwrap_or_default();
    ClientIdentity {
        user_agent: get("user-agent"),
        server_name: get("server-name"),
        server_addr: get("server-addr"),
        remote_addr: get("remote-addr"),
    }
}

impl Command for RenderCommand {
    fn name(&self) -> &'static str {
        "render"
    }

    fn help(&self) -> &'static str {
        "Render a form definition to markup and script"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        let identity = |name: &'static str, help: &'static str| {
            clap::Arg::new(name).long(name).value_name("VALUE").help(help)
        };
        cmd.arg(definition_arg())
            .arg(
                clap::Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Write the result to this file instead of stdout"),
            )
            .arg(
                clap::Arg::new("clear-cache")
                    .long("clear-cache")
                    .action(clap::ArgAction::SetTrue)
                    .help("Delete the cached artifact and render without caching"),
            )
            .arg(identity("user-agent", "Client user agent for the captcha challenge"))
            .arg(identity("server-name", "Server name for the captcha challenge"))
            .arg(identity("server-addr", "Server address for the captcha challenge"))
            .arg(identity("remote-addr", "Client address for the captcha challenge"))
    }

    fn handle(&self, matches: &clap::ArgMatches, out: &mut dyn Write) -> FormwrightResult<()> {
        let definition = load_definition(matches)?;
        let mut form = Form::builder(definition.form)
            .identity(identity_from(matches))
            .clear_cache(matches.get_flag("clear-cache"))
            .build()?;
        tracing::info!(cache = %form.cache_state(), items = definition.items.len(), "rendering");
        form.items(definition.items);
        let html = form.render()?;

        match matches.get_one::<PathBuf>("output") {
            Some(path) => {
                std::fs::write(path, &html)?;
                tracing::info!(path = %path.display(), bytes = html.len(), "wrote output");
            }
            None => writeln!(out, "{html}")?,
        }
        Ok(())
    }
}
