use super::Report;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

/// JSON reporter for programmatic output.
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        let doc = JsonReport::from_report(report);
        let json = serde_json::to_string_pretty(&doc).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport {
    version: &'static str,
    total_issues: usize,
    issues: Vec<JsonIssue>,
}

#[derive(Serialize)]
struct JsonIssue {
    func: String,
    file: String,
    line: u32,
    message: String,
}

impl JsonReport {
    fn from_report(report: &Report) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            total_issues: report.len(),
            issues: report
                .issues()
                .iter()
                .map(|issue| JsonIssue {
                    func: issue.func.clone(),
                    file: issue.file.display().to_string(),
                    line: issue.line,
                    message: issue.message(),
                })
                .collect(),
        }
    }
}
