//! Check command implementation.

use anyhow::{Context, Result};
use lua_lint_core::{Config, FindingSet, LintResult, Linter, RuleBox};
use lua_lint_rules::{rules_from_config, Preset};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::output::{self, FileReport};
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    fail_on_parse_error: bool,
    explicit_config: Option<&Path>,
) -> Result<()> {
    let project_dir = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or_else(|| Path::new("."))
    };
    let source = crate::config_resolver::resolve(project_dir, explicit_config);

    let config = match source.path() {
        None => Config::default(),
        Some(p) => {
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let rules = select_rules(&config, rules_filter.as_deref())?;
    let linter = Linter::builder().rules(rules).config(config.clone()).build();

    tracing::info!("Linting {:?} with {} rules", path, linter.rule_count());

    let excludes = compile_excludes(&config, &exclude);
    let (reports, result, parse_failures) =
        lint_path(path, &linter, &excludes, fail_on_parse_error)?;

    output::print(&reports, &result, format)?;

    if result.has_findings_at(config.fail_on()) || (fail_on_parse_error && parse_failures > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Builds the configured rule set, restricted by preset and `--rules`.
fn select_rules(config: &Config, filter: Option<&str>) -> Result<Vec<RuleBox>> {
    let mut rules = rules_from_config(config)?;

    if let Some(name) = &config.preset {
        match Preset::from_name(name) {
            Some(preset) => {
                let allowed: Vec<&str> = preset.rules().iter().map(|r| r.name()).collect();
                rules.retain(|r| allowed.contains(&r.name()));
            }
            None => tracing::warn!("Unknown preset: {}", name),
        }
    }

    if let Some(filter) = filter {
        let wanted: Vec<&str> = filter.split(',').map(str::trim).collect();
        for name in &wanted {
            if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
                tracing::warn!("Unknown rule: {}", name);
            }
        }
        rules.retain(|r| wanted.contains(&r.name()) || wanted.contains(&r.code()));
    }

    Ok(rules)
}

/// Compiles exclude patterns from config and command line, dropping
/// invalid ones with a warning.
fn compile_excludes(config: &Config, extra: &[String]) -> Vec<glob::Pattern> {
    config
        .files
        .exclude
        .iter()
        .chain(extra)
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Invalid exclude pattern {:?}: {}", p, e);
                None
            }
        })
        .collect()
}

/// Lints a path (file, directory, or `-` for stdin) and returns per-file
/// reports, the aggregate result, and the parse-failure count.
fn lint_path(
    path: &Path,
    linter: &Linter,
    excludes: &[glob::Pattern],
    fail_on_parse_error: bool,
) -> Result<(Vec<FileReport>, LintResult, usize)> {
    let mut reports = Vec::new();
    let mut result = LintResult::new();
    let mut parse_failures = 0;

    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        let findings = lint_source(&source, linter)?;
        result.files_checked = 1;
        push_report(&mut reports, &mut result, PathBuf::from("<stdin>"), findings);
        return Ok((reports, result, 0));
    }

    for file in discover_files(path, excludes)? {
        match lua_lint_parser::parse_file(&file) {
            Ok(block) => {
                let findings = linter.lint(&block)?;
                result.files_checked += 1;
                push_report(&mut reports, &mut result, file, findings);
            }
            Err(e) if fail_on_parse_error => {
                return Err(e).with_context(|| format!("Failed to parse {}", file.display()));
            }
            Err(e) => {
                parse_failures += 1;
                tracing::warn!("Skipping {}: {}", file.display(), e);
            }
        }
    }

    Ok((reports, result, parse_failures))
}

fn lint_source(source: &str, linter: &Linter) -> Result<FindingSet> {
    let block = lua_lint_parser::parse_source(source).context("Failed to parse input")?;
    Ok(linter.lint(&block)?)
}

fn push_report(
    reports: &mut Vec<FileReport>,
    result: &mut LintResult,
    file: PathBuf,
    findings: FindingSet,
) {
    if findings.is_empty() {
        return;
    }
    result.findings.concat(findings.clone());
    reports.push(FileReport { file, findings });
}

/// Collects the `.lua` files under `path`, sorted for deterministic output.
fn discover_files(path: &Path, excludes: &[glob::Pattern]) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    // The directory part is literal; only the appended wildcard may glob.
    let pattern = format!(
        "{}/**/*.lua",
        glob::Pattern::escape(&path.display().to_string())
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid search pattern {pattern:?}"))?
        .filter_map(|entry| match entry {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|p| !excludes.iter().any(|pat| pat.matches_path(p)))
        .collect();
    files.sort();
    Ok(files)
}
