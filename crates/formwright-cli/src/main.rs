use formwright_cli::command::CommandRegistry;
use formwright_cli::commands::register_builtin_commands;
use formwright_core::logging::setup_logging;

fn main() {
    let level = std::env::var("FORMWRIGHT_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    setup_logging(&level, true);

    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    let matches = registry.build_cli().get_matches();

    let stdout = std::io::stdout();
    if let Err(err) = registry.execute(&matches, &mut stdout.lock()) {
        tracing::error!(%err, "command failed");
        eprintln!("formwright: {err}");
        std::process::exit(err.exit_code());
    }
}
