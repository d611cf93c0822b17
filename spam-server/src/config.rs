//! Configuration for spam-server
//!
//! Values come from built-in defaults, then an optional TOML file, then environment
//! variables. `PORT` follows the hosting convention; everything else is `SPAM_*`.

use serde::{Deserialize, Serialize};
use spam_core::StemmerKind;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

use crate::error::{Result, ServerError};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub artifacts: ArtifactsConfig,
    pub text: TextConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Fitted model files
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

/// Linguistic resources
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TextConfig {
    /// One stopword per line; the bundled English list when unset
    pub stopwords_path: Option<PathBuf>,
    pub stemmer: StemmerKind,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: PathBuf::from("vectorizer.json"),
            classifier_path: PathBuf::from("model.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ServerError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Resolve the full configuration for a process.
    ///
    /// Uses `path` when given, otherwise `config.toml` if present, otherwise defaults;
    /// then applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("Invalid PORT '{}'", port)))?;
        }
        if let Some(host) = lookup("SPAM_HOST") {
            self.server.host = host;
        }
        if let Some(path) = lookup("SPAM_VECTORIZER_PATH") {
            self.artifacts.vectorizer_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SPAM_CLASSIFIER_PATH") {
            self.artifacts.classifier_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SPAM_STOPWORDS_PATH") {
            self.text.stopwords_path = Some(PathBuf::from(path));
        }
        if let Some(stemmer) = lookup("SPAM_STEMMER") {
            self.text.stemmer = stemmer.parse().map_err(ServerError::Config)?;
        }
        if let Some(level) = lookup("SPAM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SPAM_LOG_FORMAT") {
            self.logging.format = format.parse().map_err(ServerError::Config)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ServerError::Config("server.host is empty".to_string()));
        }
        if self.logging.level.parse::<Level>().is_err() {
            return Err(ServerError::Config(format!(
                "Invalid log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
