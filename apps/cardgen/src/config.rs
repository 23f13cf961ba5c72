use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pipeline::filter::{DEFAULT_MAX_CHALLENGE, DEFAULT_MIN_CHALLENGE};

/// What the run produces the deck from.
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    /// Build cards from the bestiary export.
    Build { monsters_path: PathBuf },
    /// Reload an existing card file and paginate it again.
    Repaginate { cards_path: PathBuf },
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: RunMode,
    pub images_dir: Option<PathBuf>,
    pub image_root_url: String,
    pub lookup_tables_path: Option<PathBuf>,
    pub name_list_path: Option<PathBuf>,
    pub source_filter: Option<String>,
    pub min_cr: f64,
    pub max_cr: f64,
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let path = |key: &str| optional(key).map(PathBuf::from);

        let mode = match path("CARDS_PATH") {
            Some(cards_path) => RunMode::Repaginate { cards_path },
            None => RunMode::Build {
                monsters_path: PathBuf::from(require(&optional, "MONSTERS_PATH")?),
            },
        };

        Ok(Config {
            mode,
            images_dir: path("IMAGES_DIR"),
            image_root_url: optional("IMAGE_ROOT_URL").unwrap_or_else(|| "Images".to_string()),
            lookup_tables_path: path("LOOKUP_TABLES_PATH"),
            name_list_path: path("NAME_LIST_PATH"),
            source_filter: optional("SOURCE_FILTER"),
            min_cr: parse_cr(optional("MIN_CR"), "MIN_CR", DEFAULT_MIN_CHALLENGE)?,
            max_cr: parse_cr(optional("MAX_CR"), "MAX_CR", DEFAULT_MAX_CHALLENGE)?,
            output_dir: path("OUTPUT_DIR").unwrap_or_else(|| PathBuf::from("Output")),
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(get: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_cr(value: Option<String>, key: &str, default: f64) -> Result<f64> {
    match value {
        Some(v) => v
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number, got '{v}'")),
        None => Ok(default),
    }
}
