//! The `check` command.
//!
//! Resolves inferred attributes and runs the consistency checks without
//! rendering or touching the render cache.

use std::io::Write;

use formwright_core::{FormwrightError, FormwrightResult};
use formwright_forms::cache::MemoryStore;
use formwright_forms::form::Form;
use formwright_forms::validation::Report;

use super::{definition_arg, load_definition};
use crate::command::Command;

/// Reports definition errors and warnings.
pub struct CheckCommand;

/// Writes one line per message, errors first.
pub fn write_report(report: &Report, out: &mut dyn Write) -> std::io::Result<()> {
    for msg in &report.errors {
        writeln!(out, "ERROR: {msg}")?;
    }
    for msg in &report.warnings {
        writeln!(out, "WARNING: {msg}")?;
    }
    writeln!(
        out,
        "Check identified {} error(s) and {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    )
}

impl Command for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Check a form definition for errors and warnings"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(definition_arg())
    }

    fn handle(&self, matches: &clap::ArgMatches, out: &mut dyn Write) -> FormwrightResult<()> {
        let definition = load_definition(matches)?;
        // A scratch store keeps an existing artifact from hiding the items.
        let mut form = Form::builder(definition.form)
            .store(MemoryStore::new())
            .build()?;
        form.items(definition.items);
        let report = form.check();
        write_report(report, out)?;

        if report.has_errors() {
            return Err(FormwrightError::Configuration(format!(
                "Form check found {} error(s)",
                report.errors.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report_orders_errors_first() {
        let mut report = Report::new();
        report.warning("Item tabindex [ 1 ] was entered [ 2 ] times");
        report.error("Item ID [ email ] was entered [ 2 ] times");
        let mut out = Vec::new();
        write_report(&report, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                "ERROR: Item ID [ email ] was entered [ 2 ] times\n",
                "WARNING: Item tabindex [ 1 ] was entered [ 2 ] times\n",
                "Check identified 1 error(s) and 1 warning(s)\n"
            )
        );
    }

    #[test]
    fn test_empty_report_summary() {
        let mut out = Vec::new();
        write_report(&Report::new(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Check identified 0 error(s) and 0 warning(s)\n"
        );
    }
}
