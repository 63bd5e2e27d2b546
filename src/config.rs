//! Configuration for wuvo paths, accounts and library behavior.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (WUVO_HOME, WUVO_DATABASE)
//! 2. Config file (.wuvo/config.yaml)
//! 3. Defaults (~/.wuvo, <home>/library.db)
//!
//! Config file discovery:
//! - Searches current directory and parents for .wuvo/config.yaml
//! - Paths in config file are relative to the .wuvo/ directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::library::LibrarySettings;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Database file name used when none is configured
pub const DEFAULT_DATABASE: &str = "library.db";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub library: LibrarySettings,
    /// Opaque credential -> owner subject
    #[serde(default)]
    pub accounts: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .wuvo/)
    pub home: Option<String>,
    /// SQLite database file (relative to .wuvo/)
    pub database: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to wuvo home
    pub home: PathBuf,
    /// Absolute path to the library database
    pub database: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Library behavior switches
    pub library: LibrarySettings,
    /// Credential lookup table for token callers
    pub accounts: HashMap<String, String>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".wuvo").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Environment overrides, read once per load
#[derive(Debug, Default)]
struct EnvOverrides {
    home: Option<PathBuf>,
    database: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var_os("WUVO_HOME").map(PathBuf::from),
            database: std::env::var_os("WUVO_DATABASE").map(PathBuf::from),
        }
    }
}

/// Merge the config file (if any) with env overrides and defaults
fn resolve(
    config_file: Option<PathBuf>,
    env: EnvOverrides,
    default_home: PathBuf,
) -> Result<ResolvedConfig> {
    let Some(config_path) = config_file else {
        let home = env.home.unwrap_or(default_home);
        let database = env.database.unwrap_or_else(|| home.join(DEFAULT_DATABASE));

        return Ok(ResolvedConfig {
            home,
            database,
            config_file: None,
            library: LibrarySettings::default(),
            accounts: HashMap::new(),
        });
    };

    let config = load_config_file(&config_path)?;
    let wuvo_dir = config_path.parent().unwrap_or(Path::new("."));

    let home = match (env.home, &config.paths.home) {
        (Some(env_home), _) => env_home,
        (None, Some(home_path)) => resolve_path(wuvo_dir, home_path),
        (None, None) => default_home,
    };

    let database = match (env.database, &config.paths.database) {
        (Some(env_db), _) => env_db,
        (None, Some(db_path)) => resolve_path(wuvo_dir, db_path),
        (None, None) => home.join(DEFAULT_DATABASE),
    };

    Ok(ResolvedConfig {
        home,
        database,
        config_file: Some(config_path),
        library: config.library,
        accounts: config.accounts,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".wuvo");

    let config_file = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file(&cwd));

    resolve(config_file, EnvOverrides::from_env(), default_home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
