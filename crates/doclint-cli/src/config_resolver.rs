//! Locating the configuration file of a run.
//!
//! A `--config` path always wins. Otherwise the analyzed directory and then
//! each of its ancestors is searched; the nearest directory holding
//! `doclint.toml` or `.doclint.toml` decides, the visible name first. When
//! the project has no file, `config.toml` in the user directory
//! (`$DOCLINT_CONFIG_DIR`, else `~/.doclint`) applies. Without any file the
//! built-in defaults are used.

use anyhow::{Context, Result};
use doclint_core::Config;
use std::path::{Path, PathBuf};

/// Name written by `doclint init`.
pub const CONFIG_FILE: &str = "doclint.toml";

const HIDDEN_CONFIG_FILE: &str = ".doclint.toml";
const USER_CONFIG_FILE: &str = "config.toml";

/// How a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Named on the command line.
    Flag,
    /// Found next to the sources or above them.
    Project,
    /// The user-wide file.
    User,
}

/// A configuration file selected for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Where it came from.
    pub origin: Origin,
}

/// Search settings for configuration files.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    user_dir: Option<PathBuf>,
}

impl Lookup {
    /// Lookup using the user directory from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let user_dir = std::env::var_os("DOCLINT_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|home| home.join(".doclint")));
        Self { user_dir }
    }

    #[cfg(test)]
    fn with_user_dir(dir: &Path) -> Self {
        Self {
            user_dir: Some(dir.to_path_buf()),
        }
    }

    /// Selects the configuration file for sources under `start`.
    ///
    /// An explicit path is returned as given; a missing file is reported
    /// when it is loaded.
    #[must_use]
    pub fn find(&self, start: &Path, explicit: Option<&Path>) -> Option<ConfigFile> {
        if let Some(path) = explicit {
            return Some(ConfigFile {
                path: path.to_path_buf(),
                origin: Origin::Flag,
            });
        }

        if let Some(path) = project_file(start) {
            return Some(ConfigFile {
                path,
                origin: Origin::Project,
            });
        }

        let path = self.user_dir.as_ref()?.join(USER_CONFIG_FILE);
        path.is_file().then_some(ConfigFile {
            path,
            origin: Origin::User,
        })
    }
}

/// Nearest project file at or above `start`.
#[must_use]
pub fn project_file(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start.ancestors().find_map(|dir| {
        [CONFIG_FILE, HIDDEN_CONFIG_FILE]
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Reads the selected file, or the defaults when there is none.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid configuration.
pub fn load(file: Option<&ConfigFile>) -> Result<Config> {
    let Some(file) = file else {
        tracing::debug!("No configuration file, using defaults");
        return Ok(Config::default());
    };
    match file.origin {
        Origin::User => tracing::info!("Using user config: {}", file.path.display()),
        Origin::Flag | Origin::Project => {
            tracing::debug!("Using config: {}", file.path.display());
        }
    }
    Config::from_file(&file.path)
        .with_context(|| format!("Failed to load config: {}", file.path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, "").expect("write");
    }

    fn found(file: Option<ConfigFile>) -> Option<(PathBuf, Origin)> {
        file.map(|f| {
            let path = f.path.canonicalize().unwrap_or(f.path);
            (path, f.origin)
        })
    }

    fn canonical(path: &Path) -> PathBuf {
        path.canonicalize().expect("canonical path")
    }

    #[test]
    fn flag_is_used_even_if_missing() {
        let project = TempDir::new().expect("tempdir");
        touch(&project.path().join(CONFIG_FILE));

        let explicit = Path::new("/no/such/doclint.toml");
        let file = Lookup::default().find(project.path(), Some(explicit));
        assert_eq!(
            file,
            Some(ConfigFile {
                path: explicit.to_path_buf(),
                origin: Origin::Flag,
            })
        );
    }

    #[test]
    fn sources_inherit_the_nearest_project_file() {
        let repo = TempDir::new().expect("tempdir");
        touch(&repo.path().join(CONFIG_FILE));
        let module = repo.path().join("billing");
        touch(&module.join(HIDDEN_CONFIG_FILE));
        let sources = module.join("src/main/java");
        fs::create_dir_all(&sources).expect("mkdir");

        let file = Lookup::default().find(&sources, None);
        assert_eq!(
            found(file),
            Some((canonical(&module.join(HIDDEN_CONFIG_FILE)), Origin::Project))
        );

        let file = Lookup::default().find(repo.path(), None);
        assert_eq!(
            found(file),
            Some((canonical(&repo.path().join(CONFIG_FILE)), Origin::Project))
        );
    }

    #[test]
    fn visible_name_wins_in_one_directory() {
        let repo = TempDir::new().expect("tempdir");
        touch(&repo.path().join(HIDDEN_CONFIG_FILE));
        touch(&repo.path().join(CONFIG_FILE));

        let path = project_file(repo.path()).expect("project file");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(CONFIG_FILE));
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let repo = TempDir::new().expect("tempdir");
        fs::create_dir(repo.path().join(CONFIG_FILE)).expect("mkdir");
        assert!(project_file(repo.path()).is_none());
    }

    #[test]
    fn user_file_applies_only_without_project_file() {
        let repo = TempDir::new().expect("tempdir");
        let user = TempDir::new().expect("tempdir");
        let lookup = Lookup::with_user_dir(user.path());

        assert_eq!(lookup.find(repo.path(), None), None);

        touch(&user.path().join(USER_CONFIG_FILE));
        let file = lookup.find(repo.path(), None).expect("user file");
        assert_eq!(file.origin, Origin::User);

        touch(&repo.path().join(CONFIG_FILE));
        let file = lookup.find(repo.path(), None).expect("project file");
        assert_eq!(file.origin, Origin::Project);
    }

    #[test]
    fn load_reads_file_or_defaults() {
        assert!(load(None).expect("defaults").preset.is_none());

        let repo = TempDir::new().expect("tempdir");
        let path = repo.path().join(CONFIG_FILE);
        fs::write(&path, "preset = \"strict\"\n").expect("write");
        let file = ConfigFile {
            path,
            origin: Origin::Project,
        };
        assert_eq!(load(Some(&file)).expect("config").preset.as_deref(), Some("strict"));

        let missing = ConfigFile {
            path: repo.path().join("absent.toml"),
            origin: Origin::Flag,
        };
        let err = load(Some(&missing)).expect_err("missing file");
        assert!(err.to_string().contains("absent.toml"));
    }
}
