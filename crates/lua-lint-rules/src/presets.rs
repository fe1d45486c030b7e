//! Rule presets and configuration-driven rule construction.

use crate::{FuncName, GlobalVarName, LocalVarName, NoGlobalVar};
use lua_lint_core::{Config, LintError, RuleBox};

/// Preset configurations for lua-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// All four built-in rules with their default patterns.
    Default,
    /// Naming rules only; global assignment is allowed.
    Naming,
    /// Only the global-assignment ban, for gradual adoption.
    NoGlobals,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Default => default_rules(),
            Self::Naming => naming_rules(),
            Self::NoGlobals => vec![Box::new(NoGlobalVar::new())],
        }
    }

    /// Parses a preset name as used in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "naming" => Some(Self::Naming),
            "no-globals" => Some(Self::NoGlobals),
            _ => None,
        }
    }
}

/// Returns the default rule set, in evaluation order:
///
/// - `local-var-name` (LL001), function-skip enabled
/// - `global-var-name` (LL002)
/// - `func-name` (LL003)
/// - `no-global-var` (LL004)
///
/// Each call returns a fresh, independently owned list, so concurrent
/// engines never share rule instances.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LocalVarName::new()),
        Box::new(GlobalVarName::new()),
        Box::new(FuncName::new()),
        Box::new(NoGlobalVar::new()),
    ]
}

/// Returns the naming rules only (LL001–LL003).
#[must_use]
pub fn naming_rules() -> Vec<RuleBox> {
    vec![
        Box::new(LocalVarName::new()),
        Box::new(GlobalVarName::new()),
        Box::new(FuncName::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    default_rules()
}

/// Builds the rule set described by a configuration: the default order,
/// with per-rule pattern/whitelist/flag overrides applied.
///
/// Rule enablement is not decided here; the engine skips disabled rules
/// itself so that `enabled = false` and `--rules` filtering compose.
///
/// # Errors
///
/// Returns [`LintError::InvalidPattern`] when a configured pattern fails
/// to compile.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, LintError> {
    let mut rules: Vec<RuleBox> = Vec::with_capacity(4);

    for name in [
        crate::local_var_name::NAME,
        crate::global_var_name::NAME,
        crate::func_name::NAME,
        crate::no_global_var::NAME,
    ] {
        let rule_config = config.rules.get(name).cloned().unwrap_or_default();
        if !rule_config.options.is_empty() {
            tracing::debug!("Applying configured options for rule: {name}");
        }
        let rule: RuleBox = match name {
            crate::local_var_name::NAME => Box::new(LocalVarName::from_config(&rule_config)?),
            crate::global_var_name::NAME => Box::new(GlobalVarName::from_config(&rule_config)?),
            crate::func_name::NAME => Box::new(FuncName::from_config(&rule_config)?),
            _ => Box::new(NoGlobalVar::from_config(&rule_config)?),
        };
        rules.push(rule);
    }

    Ok(rules)
}
