use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Error, Result, bail};
use serde::Deserialize;

/// Config file looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "taskdeck.toml";
/// Overrides `storage.path`.
pub const ENV_DB_PATH: &str = "TASKDECK_DB_PATH";
/// Overrides `server.bind`.
pub const ENV_BIND: &str = "TASKDECK_BIND";

/// Top-level configuration loaded from `taskdeck.toml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`CONFIG_FILE`] is read from the working directory if present and the
    /// defaults are used otherwise.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or parsed, or when the
    /// result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate the file at `path`.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply [`ENV_DB_PATH`] and [`ENV_BIND`] from the process environment.
    ///
    /// # Errors
    /// Returns an error when an override makes the configuration invalid.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`; empty values are ignored.
    ///
    /// # Errors
    /// Returns an error when an override makes the configuration invalid.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        self.validate()
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns an error describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.storage.backend == BackendKind::Sqlite && self.storage.path.as_os_str().is_empty() {
            bail!("storage.path must not be empty when backend is sqlite");
        }
        let Some((host, port)) = self.server.bind.rsplit_once(':') else {
            bail!("server.bind must be host:port, got '{}'", self.server.bind);
        };
        if host.is_empty() || port.parse::<u16>().is_err() {
            bail!("server.bind must be host:port, got '{}'", self.server.bind);
        }
        Ok(())
    }
}

/// `[storage]` block.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Which repository implementation to use.
    pub backend: BackendKind,
    /// SQLite database file.
    pub path: PathBuf,
    /// Start the in-memory backend with the sample tasks.
    pub seed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: PathBuf::from("taskdeck.db"),
            seed: false,
        }
    }
}

/// `[server]` block.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,
    /// Directory served at `/`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".into(),
            static_dir: PathBuf::from("wwwroot"),
        }
    }
}

/// Repository implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// SQLite file on disk.
    #[default]
    Sqlite,
    /// Volatile process memory.
    Memory,
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => bail!("unknown backend '{other}' (expected sqlite or memory)"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        })
    }
}
