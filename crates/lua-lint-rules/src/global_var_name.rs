//! Rule checking global variable names against a naming convention.
//!
//! # Rationale
//!
//! Globals that are deliberately introduced conventionally use uppercase
//! snake_case, which makes global mutation stand out at the assignment
//! site. Only simple-identifier targets are checked; indexed targets
//! (`t.field = x`) mutate a table, not the global environment name itself.
//!
//! # Configuration
//!
//! - `pattern`: the naming regex (default: `^[A-Z_][A-Z0-9_]*$`)
//! - `whitelist`: exemption patterns

use lua_lint_core::{whitelist, Finding, LintError, Rule, RuleConfig, Severity, Stmt};
use regex::Regex;

/// Rule code for global-var-name.
pub const CODE: &str = "LL002";

/// Rule name for global-var-name.
pub const NAME: &str = "global-var-name";

/// Default naming pattern: uppercase snake_case.
pub const DEFAULT_PATTERN: &str = "^[A-Z_][A-Z0-9_]*$";

/// Checks simple-identifier assignment targets against a naming pattern.
#[derive(Debug, Clone)]
pub struct GlobalVarName {
    pattern: Regex,
    whitelist: Vec<Regex>,
    severity: Severity,
}

// The default pattern is a known-good literal.
#[allow(clippy::expect_used)]
fn compile_default() -> Regex {
    Regex::new(DEFAULT_PATTERN).expect("default pattern is a valid regex")
}

impl Default for GlobalVarName {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalVarName {
    /// Creates the rule with the default pattern and no whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: compile_default(),
            whitelist: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Replaces the naming pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets the whitelist of exemption patterns.
    #[must_use]
    pub fn whitelist(mut self, patterns: Vec<Regex>) -> Self {
        self.whitelist = patterns;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Builds the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::InvalidPattern`] when a configured pattern or
    /// whitelist entry fails to compile.
    pub fn from_config(config: &RuleConfig) -> Result<Self, LintError> {
        let mut rule = Self::new()
            .pattern(super::compile_pattern(
                NAME,
                config.get_str("pattern", DEFAULT_PATTERN),
            )?)
            .whitelist(super::compile_whitelist(NAME, config)?);
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        Ok(rule)
    }
}

impl Rule for GlobalVarName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks global variable names against a naming pattern"
    }

    fn level(&self) -> Severity {
        self.severity
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

            if self.pattern.is_match(name) || whitelist::matches(&self.whitelist, name) {
                continue;
            }

            findings.push(Finding::new(
                CODE,
                NAME,
                self.severity,
                *line,
                format!("{name} is invalid global var name"),
            ));
        }

        Ok(findings)
    }
}
