//! # lua-lint-rules
//!
//! Built-in rules for lua-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | LL001 | `local-var-name` | Checks local variable names (default: snake_case) |
//! | LL002 | `global-var-name` | Checks global variable names (default: UPPER_SNAKE) |
//! | LL003 | `func-name` | Checks function names (default: lowerCamelCase) |
//! | LL004 | `no-global-var` | Forbids global assignment outside the whitelist |
//!
//! ## Usage
//!
//! ```ignore
//! use lua_lint_core::Linter;
//! use lua_lint_rules::default_rules;
//!
//! let linter = Linter::builder().rules(default_rules()).build();
//! let findings = linter.lint(&block)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod func_name;
mod global_var_name;
mod local_var_name;
mod no_global_var;
mod presets;

pub use func_name::FuncName;
pub use global_var_name::GlobalVarName;
pub use local_var_name::LocalVarName;
pub use no_global_var::NoGlobalVar;
pub use presets::{all_rules, default_rules, naming_rules, rules_from_config, Preset};

/// Re-export core types for convenience.
pub use lua_lint_core::{Finding, FindingSet, Rule, Severity};

use lua_lint_core::{LintError, RuleConfig};
use regex::Regex;

/// Compiles a configured pattern, attributing failures to the rule.
fn compile_pattern(rule: &str, pattern: &str) -> Result<Regex, LintError> {
    Regex::new(pattern).map_err(|source| LintError::InvalidPattern {
        rule: rule.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiles the `whitelist` option of a rule configuration.
fn compile_whitelist(rule: &str, config: &RuleConfig) -> Result<Vec<Regex>, LintError> {
    config
        .get_str_array("whitelist")
        .iter()
        .map(|p| compile_pattern(rule, p))
        .collect()
}
