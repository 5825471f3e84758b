use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::model::config::AppConfig;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default config location: `<user config dir>/taskit/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taskit").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config.
///
/// With an explicit path the file must exist and parse. Without one, the
/// default location is tried and a missing file just means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = default_config_path() else {
                return Ok(AppConfig::default());
            };
            if !path.exists() {
                return Ok(AppConfig::default());
            }
            path
        }
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_explicit_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"
[notifications]
enabled = false
timeout_secs = 3

[ui.colors]
background = "#101010"
"##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.notifications.enabled);
        assert_eq!(config.notifications.timeout_secs, 3);
        assert_eq!(
            config.ui.colors.get("background").map(String::as_str),
            Some("#101010")
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn parse_error_reports_the_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
