//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# lua-lint configuration

# Preset: "default" (all rules), "naming", or "no-globals"
# preset = "default"

# Exit non-zero when findings at or above this severity exist
# fail_on = "error"

[files]
# Glob patterns to exclude from linting
exclude = [
    "**/.git/**",
    "**/vendor/**",
]

# Rule configurations
# Each rule can be enabled/disabled, have its severity overridden, and
# take a custom naming pattern and whitelist.

[rules.local-var-name]
enabled = true
# pattern = "^[a-z_][a-z0-9_]*$"
# func_skip = true

[rules.global-var-name]
enabled = true
# pattern = "^[A-Z_][A-Z0-9_]*$"

[rules.func-name]
enabled = true
# pattern = "^[a-z]+([A-Z][a-z0-9]+)*$"

[rules.no-global-var]
enabled = true
# severity = "warning"
# whitelist = ["^VERSION$"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("lua-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created lua-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit lua-lint.toml to configure rules");
    println!("  2. Run: lua-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = lua_lint_core::Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("local-var-name"));
        assert!(config.is_rule_enabled("no-global-var"));
        assert_eq!(config.files.exclude.len(), 2);
    }
}
