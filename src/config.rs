use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const TOKEN_VAR: &str = "INTEGRATION_TOKEN";
pub const URL_VAR: &str = "INTEGRATION_URL";

/// Connection settings for the integration API. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    token: String,
}

impl Config {
    /// Builds a config, dropping a single trailing slash from `base_url`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Settings as they appear in an optional YAML config file.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Raw configuration inputs before validation.
///
/// `url` and `token` come from flags or the environment; anything still
/// unset is taken from the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigSources {
    pub url: Option<String>,
    pub token: Option<String>,
    pub config_file: Option<PathBuf>,
}

impl ConfigSources {
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let file = match &self.config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        self.merge(file)
    }

    /// Merges with already-loaded file settings. Empty strings count as unset.
    pub fn merge(self, file: FileConfig) -> Result<Config, ConfigError> {
        let token = non_empty(self.token).or_else(|| non_empty(file.token));
        let url = non_empty(self.url).or_else(|| non_empty(file.base_url));

        match (url, token) {
            (Some(url), Some(token)) => Ok(Config::new(url, token)),
            (url, token) => {
                let mut vars = Vec::new();
                if token.is_none() {
                    vars.push(TOKEN_VAR);
                }
                if url.is_none() {
                    vars.push(URL_VAR);
                }
                Err(ConfigError::Missing { vars })
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sources(url: Option<&str>, token: Option<&str>) -> ConfigSources {
        ConfigSources {
            url: url.map(str::to_string),
            token: token.map(str::to_string),
            config_file: None,
        }
    }

    #[test]
    fn strips_one_trailing_slash() {
        assert_eq!(Config::new("https://x.io/api/", "t").base_url(), "https://x.io/api");
        assert_eq!(Config::new("https://x.io/api", "t").base_url(), "https://x.io/api");
        assert_eq!(Config::new("https://x.io/api//", "t").base_url(), "https://x.io/api/");
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", Config::new("https://x.io", "s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("https://x.io"));
    }

    #[test]
    fn resolves_from_flags_or_env() {
        let config = sources(Some("https://x.io/"), Some("tok")).resolve().unwrap();
        assert_eq!(config, Config::new("https://x.io", "tok"));
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = sources(None, Some("")).resolve().unwrap_err();
        match err {
            ConfigError::Missing { vars } => assert_eq!(vars, vec![TOKEN_VAR, URL_VAR]),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = sources(None, Some("tok")).resolve().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { vars } if vars == vec![URL_VAR]));
    }

    #[test]
    fn whitespace_values_are_kept_as_given() {
        let config = sources(Some("https://x.io"), Some("  ")).resolve().unwrap();
        assert_eq!(config.token(), "  ");
    }

    #[test]
    fn file_fills_gaps_but_does_not_override() {
        let file = FileConfig {
            base_url: Some("https://file.io".to_string()),
            token: Some("file-token".to_string()),
        };

        let config = sources(None, Some("env-token")).merge(file.clone()).unwrap();
        assert_eq!(config.base_url(), "https://file.io");
        assert_eq!(config.token(), "env-token");

        let config = sources(None, None).merge(file).unwrap();
        assert_eq!(config.token(), "file-token");
    }

    #[test]
    fn loads_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://yaml.io/\ntoken: yaml-token").unwrap();

        let config = ConfigSources {
            config_file: Some(file.path().to_path_buf()),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(config, Config::new("https://yaml.io", "yaml-token"));
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = ConfigSources {
            config_file: Some(PathBuf::from("/definitely/not/here.yml")),
            ..Default::default()
        }
        .resolve()
        .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
