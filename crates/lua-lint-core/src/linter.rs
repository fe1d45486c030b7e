//! The lint engine: recursive statement traversal and finding aggregation.

use crate::ast::Stmt;
use crate::config::Config;
use crate::rule::{Rule, RuleBox};
use crate::types::{Finding, FindingSet};

use thiserror::Error;
use tracing::debug;

/// Genuine failures during linting.
///
/// Policy violations are never errors; they are [`Finding`]s inside an
/// `Ok` result. An `Err` aborts the remaining traversal.
#[derive(Debug, Error)]
pub enum LintError {
    /// A user-supplied rule pattern failed to compile.
    #[error("Invalid pattern {pattern:?} for rule {rule}: {source}")]
    InvalidPattern {
        /// Rule the pattern was configured for.
        rule: String,
        /// The offending pattern.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },

    /// A rule failed for a reason other than producing findings.
    #[error("Rule {rule} failed: {message}")]
    Rule {
        /// Rule that failed.
        rule: String,
        /// Failure description.
        message: String,
    },

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the end of the evaluation order.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the end of the evaluation order.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a list of boxed rules, preserving their order.
    #[must_use]
    pub fn rules(mut self, rules: Vec<RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration used for rule enablement and severity
    /// overrides.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    #[must_use]
    pub fn build(self) -> Linter {
        Linter {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// The lint engine.
///
/// Owns an ordered list of rules and walks a statement tree in pre-order:
/// for each statement, every enabled rule runs in configured order, then the
/// engine descends into the statement's nested body (if any), concatenating
/// child findings after the statement's own. Results across a statement
/// sequence concatenate in source order.
///
/// The engine holds no mutable state between calls; two linters over
/// disjoint trees can run on separate threads without coordination.
pub struct Linter {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lints a statement sequence and returns the aggregated finding set.
    ///
    /// An empty set is success; the traversal never short-circuits on
    /// findings, only on genuine failures.
    ///
    /// # Errors
    ///
    /// Propagates the first rule failure encountered, aborting the rest of
    /// the traversal.
    pub fn lint(&self, block: &[Stmt]) -> Result<FindingSet, LintError> {
        let mut findings = FindingSet::new();
        for stmt in block {
            findings.concat(self.lint_stmt(stmt)?);
        }
        Ok(findings)
    }

    /// Lints one statement: rules first, then the nested body.
    fn lint_stmt(&self, stmt: &Stmt) -> Result<FindingSet, LintError> {
        let mut findings = FindingSet::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_findings = rule.validate(stmt)?;
            findings.extend_from(self.apply_severity_override(rule.name(), rule_findings));
        }

        if let Some(body) = stmt.nested_body() {
            debug!(
                line = stmt.line(),
                statements = body.len(),
                "Descending into nested body"
            );
            findings.concat(self.lint(body)?);
        }

        Ok(findings)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(&self, rule_name: &str, mut findings: Vec<Finding>) -> Vec<Finding> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for f in &mut findings {
                f.severity = severity;
            }
        }
        findings
    }
}
