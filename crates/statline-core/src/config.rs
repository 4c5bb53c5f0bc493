// Configuration loading and parsing (config/statline.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::Term;
use crate::sort::SortField;

/// Name of the one config file, both in `defaults/` and `config/`.
pub const CONFIG_FILE: &str = "statline.toml";

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
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the per-game stats CSV, relative to the working directory.
    pub stats_csv: String,
    pub display: DisplayConfig,
}

/// Validated display settings.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub page_size: usize,
    pub default_sort: SortField,
    pub default_term: Term,
}

// ---------------------------------------------------------------------------
// statline.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire statline.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    data: DataSection,
    display: DisplaySection,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    stats_csv: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DisplaySection {
    page_size: usize,
    default_sort: String,
    default_term: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/statline.toml` relative to
/// `base_dir`.
///
/// This does not copy defaults. Prefer `load_config()` which does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    validate(file)
}

/// Copy `defaults/statline.toml` to `config/statline.toml` if the latter is
/// missing. Returns the path written, or `None` when a config already exists.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/{CONFIG_FILE} nor defaults/{CONFIG_FILE} found in {}; \
                 run from the project root",
                base_dir.display()
            ),
        });
    }

    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    std::fs::create_dir_all(base_dir.join("config")).map_err(copy_err)?;
    std::fs::copy(&source, &target).map_err(copy_err)?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures the default config file is copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
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

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: ConfigFile) -> Result<Config, ConfigError> {
    if file.data.stats_csv.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.stats_csv".into(),
            message: "must not be empty".into(),
        });
    }

    if file.display.page_size == 0 {
        return Err(ConfigError::ValidationError {
            field: "display.page_size".into(),
            message: "must be > 0".into(),
        });
    }

    let default_sort = SortField::from_column_name(&file.display.default_sort).ok_or_else(|| {
        ConfigError::ValidationError {
            field: "display.default_sort".into(),
            message: format!("unknown column '{}'", file.display.default_sort),
        }
    })?;

    let default_term: Term =
        file.display
            .default_term
            .parse()
            .map_err(|message| ConfigError::ValidationError {
                field: "display.default_term".into(),
                message,
            })?;

    Ok(Config {
        stats_csv: file.data.stats_csv,
        display: DisplayConfig {
            page_size: file.display.page_size,
            default_sort,
            default_term,
        },
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
