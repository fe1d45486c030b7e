//! Rule trait for defining lint policies.

use crate::ast::Stmt;
use crate::linter::LintError;
use crate::types::{Finding, Severity};

/// A single naming/usage policy, evaluated once per statement.
///
/// Implementations inspect the statement's concrete variant and return the
/// findings it produces; a variant the rule does not care about yields an
/// empty vector. Rules are stateless across invocations: the engine may
/// reorder or repeat calls, so no mutable state may be retained between
/// statements.
///
/// `Err` is reserved for genuine failures (not policy violations) and
/// aborts the traversal path immediately.
///
/// # Example
///
/// ```ignore
/// use lua_lint_core::{Finding, Rule, Severity, Stmt};
///
/// pub struct NoRepeatLoops;
///
/// impl Rule for NoRepeatLoops {
///     fn name(&self) -> &'static str { "no-repeat-loops" }
///     fn code(&self) -> &'static str { "LL900" }
///     fn level(&self) -> Severity { Severity::Warning }
///
///     fn validate(&self, stmt: &Stmt) -> Result<Vec<Finding>, LintError> {
///         match stmt {
///             Stmt::Repeat { line, .. } => Ok(vec![Finding::new(
///                 self.code(),
///                 self.name(),
///                 self.level(),
///                 *line,
///                 "repeat loop is not allowed",
///             )]),
///             _ => Ok(vec![]),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "local-var-name").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "LL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the severity of findings from this rule, used by callers to
    /// route output. The engine itself does not act on it.
    fn level(&self) -> Severity;

    /// Validates a single statement and returns any findings produced.
    ///
    /// # Errors
    ///
    /// Returns an error only for genuine failures, never for policy
    /// violations; those are findings.
    fn validate(&self, stmt: &Stmt) -> Result<Vec<Finding>, LintError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
