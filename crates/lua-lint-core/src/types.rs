//! Core types for lint findings and results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Severity level for lint findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One reported rule violation.
///
/// Immutable once created: the engine only ever moves findings into larger
/// sets, it never edits them (severity overrides are applied at creation
/// time, before a finding enters a set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule code (e.g., "LL001").
    pub code: String,
    /// Rule name (e.g., "local-var-name").
    pub rule: String,
    /// Severity of this finding, for output routing by the caller.
    pub severity: Severity,
    /// 1-based source line of the statement that produced the finding.
    pub line: usize,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

/// An ordered collection of findings.
///
/// An empty set is unconditionally success; only a non-empty set constitutes
/// a reportable problem. Sets compose by concatenation, order preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingSet(Vec<Finding>);

impl FindingSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one finding.
    pub fn push(&mut self, finding: Finding) {
        self.0.push(finding);
    }

    /// Appends all findings of `other` after the current contents.
    pub fn concat(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Appends findings from a plain vector, as returned by rules.
    pub fn extend_from(&mut self, findings: Vec<Finding>) {
        self.0.extend(findings);
    }

    /// Returns `true` if the set holds no findings (success).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of findings in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the findings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.0.iter()
    }

    /// Returns the findings as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Finding] {
        &self.0
    }
}

impl From<Vec<Finding>> for FindingSet {
    fn from(findings: Vec<Finding>) -> Self {
        Self(findings)
    }
}

impl IntoIterator for FindingSet {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FindingSet {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for FindingSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for finding in &self.0 {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{finding}")?;
            first = false;
        }
        Ok(())
    }
}

/// Converts a [`Finding`] to a miette [`Diagnostic`] for rich error display.
#[derive(Debug, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct FindingDiagnostic {
    code: String,
    message: String,
    severity: Severity,
    rule: String,
}

impl Diagnostic for FindingDiagnostic {
    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("reported by rule `{}`", self.rule)))
    }
}

impl From<&Finding> for FindingDiagnostic {
    fn from(finding: &Finding) -> Self {
        Self {
            code: finding.code.clone(),
            message: format!("{}: {}", finding.line, finding.message),
            severity: finding.severity,
            rule: finding.rule.clone(),
        }
    }
}

/// Result of linting one or more files.
///
/// The CLI aggregates per-file finding sets into one of these; the engine
/// itself only ever produces a [`FindingSet`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All findings, in file-then-source order.
    pub findings: FindingSet,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are any error-level findings.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns `true` if any finding meets or exceeds the given severity.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }

    /// Counts findings as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count();
        (errors, warnings)
    }

    /// Merges findings from another result.
    pub fn extend(&mut self, other: Self) {
        self.findings.concat(other.findings);
        self.files_checked += other.files_checked;
    }
}
