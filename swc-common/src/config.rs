//! Configuration loading and store location resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing TOML file is not an error. An unreadable or unparseable one is
//! recorded as a warning and ignored so the binaries still start.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the SQLite database file
pub const DATABASE_ENV_VAR: &str = "SWC_DATABASE";
/// Environment variable naming the root data folder
pub const ROOT_FOLDER_ENV_VAR: &str = "SWC_ROOT_FOLDER";
/// Environment variable naming the API listen address
pub const BIND_ADDR_ENV_VAR: &str = "SWC_BIND_ADDR";
/// Environment variable naming the default log level
pub const LOG_LEVEL_ENV_VAR: &str = "SWC_LOG_LEVEL";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "swc.db";

/// Compiled fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub bind_addr: String,
    pub log_level: String,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            bind_addr: "127.0.0.1:5740".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// `[logging]` table of the TOML config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk configuration file
///
/// ```toml
/// root_folder = "/var/lib/swc"
/// database = "/var/lib/swc/analytics.db"
/// bind_addr = "0.0.0.0:5740"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub bind_addr: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse TOML config text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Resolves settings from CLI, environment, TOML and compiled defaults
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    toml: TomlConfig,
    defaults: CompiledDefaults,
    warnings: Vec<String>,
}

impl ConfigResolver {
    /// Load the config file (explicit path, or the platform location when
    /// `None`) and build a resolver over it
    pub fn new(config_file: Option<&Path>) -> Self {
        let mut warnings = Vec::new();

        let path = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_file(),
        };

        let toml = match path {
            Some(path) if path.exists() => match TomlConfig::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    warnings.push(format!("Ignoring config file: {}", e));
                    TomlConfig::default()
                }
            },
            Some(path) if config_file.is_some() => {
                warnings.push(format!("Config file not found: {}", path.display()));
                TomlConfig::default()
            }
            _ => TomlConfig::default(),
        };

        Self {
            toml,
            defaults: CompiledDefaults::for_current_platform(),
            warnings,
        }
    }

    /// Build a resolver over an already parsed config
    pub fn with_toml(toml: TomlConfig) -> Self {
        Self {
            toml,
            defaults: CompiledDefaults::for_current_platform(),
            warnings: Vec::new(),
        }
    }

    /// Problems met while loading the config file, for logging once tracing
    /// is up
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Root data folder
    pub fn root_folder(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }

        if let Some(path) = non_empty_env(ROOT_FOLDER_ENV_VAR) {
            return PathBuf::from(path);
        }

        if let Some(path) = &self.toml.root_folder {
            return path.clone();
        }

        self.defaults.root_folder.clone()
    }

    /// SQLite database file
    ///
    /// Falls back to `swc.db` inside the resolved root folder.
    pub fn database_path(&self, cli_arg: Option<&Path>, root_folder_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }

        if let Some(path) = non_empty_env(DATABASE_ENV_VAR) {
            return PathBuf::from(path);
        }

        if let Some(path) = &self.toml.database {
            return path.clone();
        }

        self.root_folder(root_folder_arg).join(DATABASE_FILE_NAME)
    }

    /// HTTP listen address for the query service
    pub fn bind_addr(&self, cli_arg: Option<&str>) -> String {
        cli_arg
            .map(str::to_string)
            .or_else(|| non_empty_env(BIND_ADDR_ENV_VAR))
            .or_else(|| self.toml.bind_addr.clone())
            .unwrap_or_else(|| self.defaults.bind_addr.clone())
    }

    /// Default tracing level (RUST_LOG still overrides it at subscriber init)
    pub fn log_level(&self, cli_arg: Option<&str>) -> String {
        cli_arg
            .map(str::to_string)
            .or_else(|| non_empty_env(LOG_LEVEL_ENV_VAR))
            .or_else(|| self.toml.logging.level.clone())
            .unwrap_or_else(|| self.defaults.log_level.clone())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Platform config file location: ~/.config/swc/config.toml, then
/// /etc/swc/config.toml on Linux
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("swc").join("config.toml"));

    if cfg!(target_os = "linux") {
        if let Some(path) = user_config.filter(|p| p.exists()) {
            return Some(path);
        }
        let system_config = PathBuf::from("/etc/swc/config.toml");
        return system_config.exists().then_some(system_config);
    }

    user_config
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\swc
        dirs::data_local_dir()
            .map(|d| d.join("swc"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\swc"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/swc
        dirs::data_dir()
            .map(|d| d.join("swc"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/swc"))
    } else {
        // ~/.local/share/swc (or /var/lib/swc for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("swc"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/swc"))
    }
}
