// Configuration loading and parsing (config/warroom.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::catalog::{CatalogSource, ConsensusJsonSource, FantasyProsCsvSource};
use crate::player::Position;

const CONFIG_FILE: &str = "warroom.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for warroom.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataConfig,
    #[serde(default)]
    positions: PositionsConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

/// The assembled configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub positions: PositionsConfig,
    pub logging: LoggingConfig,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
}

/// On-disk format of the player pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Player pool file (consensus JSON or FantasyPros CSV).
    pub path: String,
    /// Explicit format. Inferred from the file extension when omitted.
    #[serde(default)]
    pub format: Option<CatalogFormat>,
}

impl DataConfig {
    /// The configured format, or the one implied by the file extension.
    pub fn resolved_format(&self) -> Option<CatalogFormat> {
        self.format.or_else(|| {
            let ext = Path::new(&self.path)
                .extension()
                .and_then(|e| e.to_str())?
                .to_ascii_lowercase();
            match ext.as_str() {
                "json" => Some(CatalogFormat::Json),
                "csv" => Some(CatalogFormat::Csv),
                _ => None,
            }
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionsConfig {
    /// Position codes kept when loading the player pool.
    pub allowed: Vec<String>,
}

impl Default for PositionsConfig {
    fn default() -> Self {
        PositionsConfig {
            allowed: ["QB", "RB", "WR", "TE", "K", "DEF"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log directory. Defaults to the platform data directory.
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
            dir: None,
        }
    }
}

fn default_log_filter() -> String {
    "warroom_core=info,warroom_tui=info,warn".to_string()
}

impl Config {
    /// Absolute (or base-relative) path of the player pool file.
    pub fn data_path(&self) -> PathBuf {
        self.base_dir.join(&self.data.path)
    }

    /// Build the catalog source described by `[data]`.
    pub fn catalog_source(&self) -> Result<Box<dyn CatalogSource>, ConfigError> {
        let path = self.data_path();
        match self.data.resolved_format() {
            Some(CatalogFormat::Json) => Ok(Box::new(ConsensusJsonSource::new(path))),
            Some(CatalogFormat::Csv) => Ok(Box::new(FantasyProsCsvSource::new(path))),
            None => Err(unknown_format_error(&self.data.path)),
        }
    }

    /// Allowed positions as parsed codes.
    pub fn allowed_positions(&self) -> Vec<Position> {
        self.positions
            .allowed
            .iter()
            .map(|code| Position::from_code(code))
            .collect()
    }

    /// Where log files go: `[logging] dir`, else the platform data directory,
    /// else `./logs`.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.logging.dir {
            return self.base_dir.join(dir);
        }
        directories::ProjectDirs::from("", "", "warroom")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| self.base_dir.join("logs"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/warroom.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        data: file.data,
        positions: file.positions,
        logging: file.logging,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` with every `*.toml` from `defaults/` that it lacks.
///
/// Files already in `config/` are left alone. Returns the paths written.
/// With no `defaults/` an existing `config/` is used as is.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(seed_error(format!(
            "no defaults/ or config/ directory under {}",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut seeded = Vec::new();
    for default in toml_files_in(&defaults_dir)? {
        let Some(name) = default.file_name() else {
            continue;
        };
        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        std::fs::copy(&default, &target).map_err(|e| {
            seed_error(format!(
                "cannot copy {} to {}: {e}",
                default.display(),
                target.display()
            ))
        })?;
        info!("Seeded {} from defaults", target.display());
        seeded.push(target);
    }
    Ok(seeded)
}

/// `*.toml` files directly inside `dir`, sorted by path.
fn toml_files_in(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| seed_error(format!("cannot read {}: {e}", dir.display())))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    Ok(files)
}

fn seed_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Load config relative to the current working directory, seeding
/// `config/` from `defaults/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn unknown_format_error(path: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: "data.format".into(),
        message: format!("cannot infer format from '{path}'; set format = \"json\" or \"csv\""),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.data.resolved_format().is_none() {
        return Err(unknown_format_error(&config.data.path));
    }

    if config.positions.allowed.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "positions.allowed".into(),
            message: "must list at least one position".into(),
        });
    }

    if let Some(code) = config
        .positions
        .allowed
        .iter()
        .find(|code| code.trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "positions.allowed".into(),
            message: format!("blank position code {code:?}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
