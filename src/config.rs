//! Configuration management using the prefer crate for file discovery.
//!
//! Settings are resolved from built-in defaults, then a config file (explicit
//! path or discovered by prefer), then command line and environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default backing file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "karnataka_crime_merged_with_pdf_districts.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("Invalid delimiter '{0}': must be a single ASCII character")]
    InvalidDelimiter(String),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Delimited file loaded at startup.
    pub data_path: PathBuf,
    /// Field delimiter of the data file.
    pub delimiter: u8,
    /// Address the server binds to.
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            delimiter: b',',
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Path to the data file; relative paths resolve against the config file.
    #[serde(default, alias = "data")]
    pub data_path: Option<String>,
    /// Field delimiter (a single character, or "tab").
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// Path to the config file this was loaded from (not deserialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Discover a `crime-api` config file in prefer's standard locations.
    pub async fn discover() -> Result<Option<Self>, ConfigError> {
        match prefer::load("crime-api").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path).await.map(Some),
                None => Ok(None),
            },
            // No config file found
            Err(_) => Ok(None),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports TOML, YAML and JSON based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parsed = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
            _ => serde_json::from_str(&contents).map_err(|e| e.to_string()),
        };
        let mut config: Config = parsed.map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<&Path> {
        self.source_path.as_deref().and_then(Path::parent)
    }

    /// Apply file values on top of `settings`.
    pub fn apply_to_settings(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        if let Some(ref data_path) = self.data_path {
            settings.data_path = match self.base_dir() {
                Some(base) => resolve_path(data_path, base),
                None => PathBuf::from(data_path),
            };
        }
        if let Some(ref delimiter) = self.delimiter {
            settings.delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        Ok(())
    }
}

/// Resolve a possibly relative path against `base_dir`.
fn resolve_path(path_str: &str, base_dir: &Path) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Parse a delimiter given as a single ASCII character or `tab`.
pub fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(ConfigError::InvalidDelimiter(s.to_string())),
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data file (--data flag); relative to the working directory.
    pub data: Option<PathBuf>,
}

/// Load settings with explicit options.
pub async fn load_settings_with_options(options: LoadOptions) -> Result<Settings, ConfigError> {
    let config = match options.config_path {
        Some(ref path) => Some(Config::load_from_path(path).await?),
        None => Config::discover().await?,
    };

    let mut settings = Settings::default();
    if let Some(ref config) = config {
        if let Some(ref path) = config.source_path {
            tracing::debug!("Using config file: {}", path.display());
        }
        config.apply_to_settings(&mut settings)?;
    }

    if let Some(data) = options.data {
        settings.data_path = data;
    }

    Ok(settings)
}

/// Parse a bind address that can be:
/// - Just a port: "8080" -> 0.0.0.0:8080
/// - Just a host: "127.0.0.1" -> 127.0.0.1:<default port>
/// - Host and port: "127.0.0.1:8080"
pub fn parse_bind_address(bind: &str, default_host: &str, default_port: u16) -> (String, u16) {
    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return (default_host.to_string(), port);
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            let host = host.trim_start_matches('[').trim_end_matches(']');
            return (host.to_string(), port);
        }
    }

    // Must be just a host, use default port
    (bind.to_string(), default_port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(parse_bind_address("8080", "0.0.0.0", 5000), ("0.0.0.0".into(), 8080));
        assert_eq!(
            parse_bind_address("127.0.0.1", "0.0.0.0", 5000),
            ("127.0.0.1".into(), 5000)
        );
        assert_eq!(
            parse_bind_address("localhost:3000", "0.0.0.0", 5000),
            ("localhost".into(), 3000)
        );
        assert_eq!(parse_bind_address("[::1]:3000", "0.0.0.0", 5000), ("::1".into(), 3000));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter("||").is_err());
    }

    #[tokio::test]
    async fn test_load_toml_config_resolves_relative_data_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crime-api.toml");
        std::fs::write(
            &path,
            "data_path = \"data/crimes.csv\"\ndelimiter = \";\"\nport = 8081\n",
        )
        .unwrap();

        let settings = load_settings_with_options(LoadOptions {
            config_path: Some(path),
            data: None,
        })
        .await
        .unwrap();

        assert_eq!(settings.data_path, dir.path().join("data/crimes.csv"));
        assert_eq!(settings.delimiter, b';');
        assert_eq!(settings.port, 8081);
        assert_eq!(settings.host, DEFAULT_HOST);
    }

    #[tokio::test]
    async fn test_data_flag_overrides_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crime-api.json");
        std::fs::write(&path, r#"{"data_path": "/srv/crimes.csv", "host": "127.0.0.1"}"#).unwrap();

        let settings = load_settings_with_options(LoadOptions {
            config_path: Some(path),
            data: Some(PathBuf::from("override.csv")),
        })
        .await
        .unwrap();

        assert_eq!(settings.data_path, PathBuf::from("override.csv"));
        assert_eq!(settings.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_unparsable_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crime-api.yaml");
        std::fs::write(&path, "port: [not, a, port]\n").unwrap();

        let err = Config::load_from_path(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
