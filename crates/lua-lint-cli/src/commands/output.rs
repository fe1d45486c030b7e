//! Shared output formatting for lint results.

use anyhow::Result;
use lua_lint_core::{FindingSet, LintResult, Severity};
use serde::Serialize;
use std::path::PathBuf;

use crate::OutputFormat;

/// Findings for one linted file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path of the file (or `<stdin>`).
    pub file: PathBuf,
    /// Findings in source order.
    pub findings: FindingSet,
}

/// Prints lint results in the specified format.
pub fn print(reports: &[FileReport], result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(reports, result),
        OutputFormat::Json => return print_json(reports, result),
        OutputFormat::Compact => print_compact(reports),
    }
    Ok(())
}

fn print_text(reports: &[FileReport], result: &LintResult) {
    let (errors, warnings) = result.count_by_severity();

    for report in reports {
        for finding in &report.findings {
            let severity_indicator = match finding.severity {
                Severity::Error => "\x1b[31merror\x1b[0m",
                Severity::Warning => "\x1b[33mwarning\x1b[0m",
            };

            println!(
                "{} {} at {}:{}",
                finding.code,
                finding.rule,
                report.file.display(),
                finding.line,
            );
            println!("  {}: {}", severity_indicator, finding.message);
            println!();
        }
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, result.files_checked
    );
}

fn print_json(reports: &[FileReport], result: &LintResult) -> Result<()> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        files: &'a [FileReport],
        files_checked: usize,
        errors: usize,
        warnings: usize,
    }

    let (errors, warnings) = result.count_by_severity();
    let json = serde_json::to_string_pretty(&JsonReport {
        files: reports,
        files_checked: result.files_checked,
        errors,
        warnings,
    })?;
    println!("{json}");
    Ok(())
}

fn print_compact(reports: &[FileReport]) {
    for report in reports {
        for finding in &report.findings {
            println!(
                "{}:{}: {} [{}] {}",
                report.file.display(),
                finding.line,
                finding.severity,
                finding.code,
                finding.message,
            );
        }
    }
}
