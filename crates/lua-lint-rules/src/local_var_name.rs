//! Rule checking local variable names against a naming convention.
//!
//! # Rationale
//!
//! Local variables conventionally use lowercase snake_case. Each name bound
//! by a `local` declaration is checked independently, so one statement can
//! produce several findings.
//!
//! # Configuration
//!
//! - `pattern`: the naming regex (default: `^[a-z_][a-z0-9_]*$`)
//! - `func_skip`: skip names bound to function values (default: true)
//! - `whitelist`: exemption patterns

use lua_lint_core::{whitelist, Finding, LintError, Rule, RuleConfig, Severity, Stmt};
use regex::Regex;

/// Rule code for local-var-name.
pub const CODE: &str = "LL001";

/// Rule name for local-var-name.
pub const NAME: &str = "local-var-name";

/// Default naming pattern: lowercase snake_case.
pub const DEFAULT_PATTERN: &str = "^[a-z_][a-z0-9_]*$";

/// Checks names bound by `local` declarations against a naming pattern.
#[derive(Debug, Clone)]
pub struct LocalVarName {
    pattern: Regex,
    func_skip: bool,
    whitelist: Vec<Regex>,
    severity: Severity,
}

// The default pattern is a known-good literal.
#[allow(clippy::expect_used)]
fn compile_default() -> Regex {
    Regex::new(DEFAULT_PATTERN).expect("default pattern is a valid regex")
}

impl Default for LocalVarName {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalVarName {
    /// Creates the rule with the default pattern, function-skip enabled and
    /// no whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: compile_default(),
            func_skip: true,
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

    /// Sets whether function-valued bindings are skipped.
    #[must_use]
    pub fn func_skip(mut self, skip: bool) -> Self {
        self.func_skip = skip;
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
            .func_skip(config.get_bool("func_skip", true))
            .whitelist(super::compile_whitelist(NAME, config)?);
        if let Some(severity) = config.severity {
            rule = rule.severity(severity);
        }
        Ok(rule)
    }
}

impl Rule for LocalVarName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks local variable names against a naming pattern"
    }

    fn level(&self) -> Severity {
        self.severity
    }

    fn validate(&self, stmt: &Stmt) -> Result<Vec<Finding>, LintError> {
        let Stmt::LocalAssign { names, exprs, line } = stmt else {
            return Ok(vec![]);
        };

        let mut findings = Vec::new();
        for (i, name) in names.iter().enumerate() {
            // A name with no initializer is checked; only an actual
            // function value qualifies for the skip.
            if self.func_skip && exprs.get(i).is_some_and(lua_lint_core::Expr::is_function) {
                continue;
            }

            if whitelist::matches(&self.whitelist, name) {
                continue;
            }

            if !self.pattern.is_match(name) {
                findings.push(Finding::new(
                    CODE,
                    NAME,
                    self.severity,
                    *line,
                    format!("{name} is invalid local var name"),
                ));
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lua_lint_core::Expr;

    fn local_assign(names: &[&str], exprs: Vec<Expr>, line: usize) -> Stmt {
        Stmt::LocalAssign {
            names: names.iter().map(ToString::to_string).collect(),
            exprs,
            line,
        }
    }

    #[test]
    fn flags_camel_case_local() {
        let stmt = local_assign(&["myVar"], vec![Expr::Number(1.0)], 3);
        let findings = LocalVarName::new().validate(&stmt).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 3);
        assert_eq!(findings[0].message, "myVar is invalid local var name");
    }

    #[test]
    fn accepts_snake_case_local() {
        let stmt = local_assign(&["my_var"], vec![Expr::Number(1.0)], 1);
        assert!(LocalVarName::new().validate(&stmt).unwrap().is_empty());
    }

    #[test]
    fn each_bad_name_is_one_finding() {
        let stmt = local_assign(
            &["Bad", "good", "AlsoBad"],
            vec![Expr::Number(1.0), Expr::Number(2.0), Expr::Number(3.0)],
            2,
        );
        let findings = LocalVarName::new().validate(&stmt).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].message, "Bad is invalid local var name");
        assert_eq!(findings[1].message, "AlsoBad is invalid local var name");
    }

    #[test]
    fn func_skip_exempts_function_bindings() {
        let func = Expr::Function {
            params: vec![],
            body: vec![],
        };
        let stmt = local_assign(&["myHelper"], vec![func], 1);
        assert!(LocalVarName::new().validate(&stmt).unwrap().is_empty());

        let func = Expr::Function {
            params: vec![],
            body: vec![],
        };
        let stmt = local_assign(&["myHelper"], vec![func], 1);
        let findings = LocalVarName::new()
            .func_skip(false)
            .validate(&stmt)
            .unwrap();
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn missing_initializer_is_still_checked() {
        let stmt = local_assign(&["ok_name", "BadName"], vec![Expr::Number(1.0)], 4);
        let findings = LocalVarName::new().validate(&stmt).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "BadName is invalid local var name");
    }

    #[test]
    fn whitelisted_name_never_produces_a_finding() {
        let stmt = local_assign(&["SELF"], vec![Expr::Number(1.0)], 1);
        let rule = LocalVarName::new().whitelist(vec![Regex::new("^SELF$").unwrap()]);
        assert!(rule.validate(&stmt).unwrap().is_empty());
    }

    #[test]
    fn other_statements_are_ignored() {
        let stmt = Stmt::Break { line: 1 };
        assert!(LocalVarName::new().validate(&stmt).unwrap().is_empty());
    }

    #[test]
    fn from_config_rejects_bad_pattern() {
        let mut config = RuleConfig::default();
        config
            .options
            .insert("pattern".to_string(), toml::Value::String("[".to_string()));
        let err = LocalVarName::from_config(&config).unwrap_err();
        assert!(matches!(err, LintError::InvalidPattern { .. }));
    }
}
