//! Config file resolution, loading and initialization.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ConfigError;

use super::schema::Config;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".herald.json";

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "HERALD_CONFIG";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Pick the config file to load.
///
/// Order: explicit path, `HERALD_CONFIG`, `.herald.json` in `workdir`.
/// Returns `None` when nothing applies and the defaults should be used.
pub fn resolve_config_path(explicit: Option<&Path>, workdir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    match env::var(CONFIG_ENV_VAR) {
        Ok(v) if !v.is_empty() => return Some(PathBuf::from(v)),
        _ => {}
    }

    let local = workdir.join(CONFIG_FILE_NAME);
    local.is_file().then_some(local)
}

/// Read and parse a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve and load the effective configuration.
///
/// A config file that cannot be read or parsed is reported with a warning
/// and the built-in defaults are used instead.
pub fn load_or_default(explicit: Option<&Path>, workdir: &Path) -> (Config, ConfigSource) {
    let Some(path) = resolve_config_path(explicit, workdir) else {
        debug!("No config file found, using defaults");
        return (Config::default(), ConfigSource::Defaults);
    };

    match load_config(&path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            (config, ConfigSource::File(path))
        }
        Err(e) => {
            warn!("{}. Using default configuration.", e);
            (Config::default(), ConfigSource::Defaults)
        }
    }
}

/// Write the default configuration to `path`.
///
/// The file is written to a temporary sibling first and then moved into
/// place. Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    let json =
        serde_json::to_string_pretty(&Config::default()).map_err(ConfigError::SerializeFailed)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .map_err(ConfigError::WriteFailed)?;
    tmp.persist(path)
        .map_err(|e| ConfigError::WriteFailed(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_explicit_path_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_var(CONFIG_ENV_VAR, Some("/from/env.json"), || {
            let explicit = PathBuf::from("/explicit.json");
            assert_eq!(
                resolve_config_path(Some(&explicit), dir.path()),
                Some(explicit.clone())
            );
        });
    }

    #[test]
    #[serial]
    fn test_env_var_wins_over_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        temp_env::with_var(CONFIG_ENV_VAR, Some("/from/env.json"), || {
            assert_eq!(
                resolve_config_path(None, dir.path()),
                Some(PathBuf::from("/from/env.json"))
            );
        });
    }

    #[test]
    #[serial]
    fn test_empty_env_var_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_var(CONFIG_ENV_VAR, Some(""), || {
            assert_eq!(resolve_config_path(None, dir.path()), None);
        });
    }

    #[test]
    #[serial]
    fn test_local_file_found() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&local, "{}").unwrap();
        temp_env::with_var_unset(CONFIG_ENV_VAR, || {
            assert_eq!(resolve_config_path(None, dir.path()), Some(local.clone()));
        });
    }

    #[test]
    #[serial]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        temp_env::with_var_unset(CONFIG_ENV_VAR, || {
            let (config, source) = load_or_default(None, dir.path());
            assert_eq!(config, Config::default());
            assert_eq!(source, ConfigSource::Defaults);
        });
    }

    #[test]
    fn test_load_config_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn test_write_default_config_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path, false).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_write_default_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{\"suggestType\": false}").unwrap();

        let err = write_default_config(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));

        write_default_config(&path, true).unwrap();
        assert!(load_config(&path).unwrap().suggest_type);
    }
}
