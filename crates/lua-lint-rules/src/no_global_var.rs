//! Rule forbidding global variable assignment entirely.
//!
//! # Rationale
//!
//! Implicit globals are the most common source of accidental state sharing
//! in Lua; any assignment to a bare identifier writes the global
//! environment unless a `local` of that name is in scope. This rule flags
//! every simple-identifier assignment target regardless of naming, so the
//! only sanctioned globals are the explicitly whitelisted ones.
//!
//! Runs independently of [`GlobalVarName`](crate::GlobalVarName): a
//! well-named global is still a global.
//!
//! # Configuration
//!
//! - `whitelist`: names that may be assigned globally

use lua_lint_core::{whitelist, Finding, LintError, Rule, RuleConfig, Severity, Stmt};
use regex::Regex;

/// Rule code for no-global-var.
pub const CODE: &str = "LL004";

/// Rule name for no-global-var.
pub const NAME: &str = "no-global-var";

/// Flags every non-whitelisted simple-identifier assignment target.
#[derive(Debug, Clone, Default)]
pub struct NoGlobalVar {
    whitelist: Vec<Regex>,
    severity: Option<Severity>,
}

impl NoGlobalVar {
    /// Creates the rule with an empty whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the whitelist of exempted names.
    #[must_use]
    pub fn whitelist(mut self, patterns: Vec<Regex>) -> Self {
        self.whitelist = patterns;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Builds the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::InvalidPattern`] when a whitelist entry fails
    /// to compile.
    pub fn from_config(config: &RuleConfig) -> Result<Self, LintError> {
        let mut rule = Self::new().whitelist(super::compile_whitelist(NAME, config)?);
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        Ok(rule)
    }

    fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Error)
    }
}

impl Rule for NoGlobalVar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids assignment to global variables"
    }

    fn level(&self) -> Severity {
        self.effective_severity()
    }

    fn validate(&self, stmt: &Stmt) -> Result<Vec<Finding>, LintError> {
        let Stmt::Assign { targets, line, .. } = stmt else {
            return Ok(vec![]);
        };

        let mut findings = Vec::new();
        for target in targets {
            let Some(name) = target.as_ident() else {
                continue;
            };

            if whitelist::matches(&self.whitelist, name) {
                continue;
            }

            findings.push(Finding::new(
                CODE,
                NAME,
                self.effective_severity(),
                *line,
                format!("{name} is invalid global var"),
            ));
        }

        Ok(findings)
    }
}
