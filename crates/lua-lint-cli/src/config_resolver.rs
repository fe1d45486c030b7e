//! Locates the configuration file for a lint run.
//!
//! Precedence: an explicit `--config` path wins outright; otherwise the
//! project directory is searched for `lua-lint.toml` then `.lua-lint.toml`,
//! then the global directory (`$LUA_LINT_CONFIG_DIR`, or `~/.lua-lint`) for
//! `config.toml`. When nothing exists the built-in defaults apply.

use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed on the command line; never existence-checked here, so a bad
    /// path surfaces as a load error instead of being silently skipped.
    Explicit(PathBuf),
    /// A config file sitting in the project directory.
    Project(PathBuf),
    /// The per-user fallback under the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// The file to load, or `None` for built-in defaults.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Whether this came from the per-user global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Resolves the config file for `project_dir`, honoring an explicit
/// `--config` path.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let global_dir = std::env::var_os("LUA_LINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".lua-lint")));

    search(project_dir, global_dir.as_deref())
}

/// Walks the candidate locations in precedence order and returns the first
/// one that exists. Split from [`resolve`] so tests can pin the global
/// directory instead of racing over the environment.
fn search(project_dir: &Path, global_dir: Option<&Path>) -> ConfigSource {
    let mut candidates = vec![
        ConfigSource::Project(project_dir.join("lua-lint.toml")),
        ConfigSource::Project(project_dir.join(".lua-lint.toml")),
    ];
    if let Some(dir) = global_dir {
        candidates.push(ConfigSource::Global(dir.join("config.toml")));
    }

    for candidate in candidates {
        if let Some(path) = candidate.path() {
            if path.exists() {
                tracing::debug!("Using config file: {}", path.display());
                return candidate;
            }
        }
    }

    ConfigSource::Default
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn cli_flag_wins_over_project_file() {
        let tmp = TempDir::new().unwrap();
        let custom = tmp.path().join("custom.toml");
        touch(&custom);
        touch(&tmp.path().join("lua-lint.toml"));

        let source = resolve(tmp.path(), Some(&custom));
        assert_eq!(source, ConfigSource::Explicit(custom));
    }

    #[test]
    fn missing_cli_path_is_returned_as_given() {
        let source = resolve(Path::new("/tmp"), Some(Path::new("/no/such.toml")));
        assert_eq!(
            source,
            ConfigSource::Explicit(PathBuf::from("/no/such.toml"))
        );
    }

    #[test]
    fn finds_plain_project_file() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("lua-lint.toml"));

        let source = search(tmp.path(), None);
        assert_eq!(
            source,
            ConfigSource::Project(tmp.path().join("lua-lint.toml"))
        );
    }

    #[test]
    fn finds_hidden_project_file() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join(".lua-lint.toml"));

        let source = search(tmp.path(), None);
        assert_eq!(
            source,
            ConfigSource::Project(tmp.path().join(".lua-lint.toml"))
        );
    }

    #[test]
    fn plain_name_beats_hidden_name() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("lua-lint.toml"));
        touch(&tmp.path().join(".lua-lint.toml"));

        let source = search(tmp.path(), None);
        assert_eq!(
            source,
            ConfigSource::Project(tmp.path().join("lua-lint.toml"))
        );
    }

    #[test]
    fn falls_back_to_global_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        touch(&global.path().join("config.toml"));

        let source = search(project.path(), Some(global.path()));
        assert_eq!(
            source,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(source.is_global());
    }

    #[test]
    fn project_file_shadows_global() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join("lua-lint.toml"));
        let global = TempDir::new().unwrap();
        touch(&global.path().join("config.toml"));

        let source = search(project.path(), Some(global.path()));
        assert!(matches!(source, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_is_not_a_hit() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(search(project.path(), Some(global.path())), ConfigSource::Default);
    }

    #[test]
    fn nothing_found_means_defaults() {
        let project = TempDir::new().unwrap();
        let source = search(project.path(), None);
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
        assert!(!source.is_global());
    }
}
