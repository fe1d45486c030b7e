//! Rule checking function names against a naming convention.
//!
//! # Rationale
//!
//! Functions conventionally use lowerCamelCase. Only plain
//! `function name()` definitions are checked; dotted and method
//! definitions (`function M.helper()`, `function obj:method()`) name a
//! table field, not a function-scope identifier.
//!
//! Unlike the variable rules this rule produces at most one finding per
//! statement.
//!
//! # Configuration
//!
//! - `pattern`: the naming regex (default: `^[a-z]+([A-Z][a-z0-9]+)*$`)
//! - `whitelist`: exemption patterns

use lua_lint_core::{whitelist, Finding, LintError, Rule, RuleConfig, Severity, Stmt};
use regex::Regex;

/// Rule code for func-name.
pub const CODE: &str = "LL003";

/// Rule name for func-name.
pub const NAME: &str = "func-name";

/// Default naming pattern: lowerCamelCase.
pub const DEFAULT_PATTERN: &str = "^[a-z]+([A-Z][a-z0-9]+)*$";

/// Checks plain function-definition names against a naming pattern.
#[derive(Debug, Clone)]
pub struct FuncName {
    pattern: Regex,
    whitelist: Vec<Regex>,
    severity: Severity,
}

// The default pattern is a known-good literal.
#[allow(clippy::expect_used)]
fn compile_default() -> Regex {
    Regex::new(DEFAULT_PATTERN).expect("default pattern is a valid regex")
}

impl Default for FuncName {
    fn default() -> Self {
        Self::new()
    }
}

impl FuncName {
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

impl Rule for FuncName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks function names against a naming pattern"
    }

    fn level(&self) -> Severity {
        self.severity
    }

    fn validate(&self, stmt: &Stmt) -> Result<Vec<Finding>, LintError> {
        let Stmt::FunctionDef { name, line, .. } = stmt else {
            return Ok(vec![]);
        };

        let Some(name) = name.as_ident() else {
            return Ok(vec![]);
        };

        if self.pattern.is_match(name) || whitelist::matches(&self.whitelist, name) {
            return Ok(vec![]);
        }

        Ok(vec![Finding::new(
            CODE,
            NAME,
            self.severity,
            *line,
            format!("{name} is invalid func name"),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lua_lint_core::Expr;

    fn func_def(name: Expr, line: usize) -> Stmt {
        Stmt::FunctionDef {
            name,
            body: vec![],
            line,
        }
    }

    #[test]
    fn accepts_lower_camel_case() {
        let stmt = func_def(Expr::Ident("doThing".to_string()), 1);
        assert!(FuncName::new().validate(&stmt).unwrap().is_empty());
    }

    #[test]
    fn flags_upper_camel_case_once() {
        let stmt = func_def(Expr::Ident("DoThing".to_string()), 5);
        let findings = FuncName::new().validate(&stmt).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "DoThing is invalid func name");
        assert_eq!(findings[0].line, 5);
    }

    #[test]
    fn flags_snake_case() {
        let stmt = func_def(Expr::Ident("do_thing".to_string()), 1);
        let findings = FuncName::new().validate(&stmt).unwrap();
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn dotted_names_are_ignored() {
        let name = Expr::Index {
            object: Box::new(Expr::Ident("M".to_string())),
            key: Box::new(Expr::Str("DoThing".to_string())),
        };
        let stmt = func_def(name, 1);
        assert!(FuncName::new().validate(&stmt).unwrap().is_empty());
    }

    #[test]
    fn whitelist_exempts_name() {
        let stmt = func_def(Expr::Ident("Init".to_string()), 1);
        let rule = FuncName::new().whitelist(vec![Regex::new("^Init$").unwrap()]);
        assert!(rule.validate(&stmt).unwrap().is_empty());
    }
}
