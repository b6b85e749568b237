use super::{Issue, Report};
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Terminal reporter with colored output.
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        if report.is_empty() {
            println!("{}", "No dead functions found!".green().bold());
            return Ok(());
        }

        println!();
        println!(
            "{}",
            format!("Found {} dead function(s):", report.len())
                .yellow()
                .bold()
        );
        println!();

        // Group by file, preserving the report's ordering inside each file.
        let mut by_file: BTreeMap<PathBuf, Vec<&Issue>> = BTreeMap::new();
        for issue in report.issues() {
            by_file.entry(issue.file.clone()).or_default().push(issue);
        }

        for (file, issues) in &by_file {
            println!("{}", file.display().to_string().cyan().bold());
            for issue in issues {
                println!(
                    "  {}:{} {}",
                    file.display(),
                    issue.line,
                    issue.message().red()
                );
            }
            println!();
        }

        println!(
            "{}",
            format!(
                "{} dead function(s) across {} file(s)",
                report.len(),
                by_file.len()
            )
            .dimmed()
        );

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
