//! Initialization helpers for `.cubetimer/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use super::config::{TimerConfig, write_config};

pub const HISTORY_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/solve_history/v1.schema.json"
));

/// All canonical paths within `.cubetimer/` for a root directory.
#[derive(Debug, Clone)]
pub struct TimerPaths {
    pub root: PathBuf,
    pub timer_dir: PathBuf,
    pub config_path: PathBuf,
    pub store_path: PathBuf,
    pub schema_path: PathBuf,
}

impl TimerPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let timer_dir = root.join(".cubetimer");
        Self {
            root: root.clone(),
            timer_dir: timer_dir.clone(),
            config_path: timer_dir.join("config.toml"),
            store_path: timer_dir.join("store.json"),
            schema_path: timer_dir.join("schema.json"),
        }
    }
}

/// Options for `init_timer`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing timer-owned files (solves included).
    pub force: bool,
}

/// Create `.cubetimer/` scaffolding in `root`.
///
/// Writes the default config, the history schema and a store holding an empty
/// history. Fails if `.cubetimer/` already exists unless `options.force` is set.
pub fn init_timer(root: &Path, options: &InitOptions) -> Result<TimerPaths> {
    let paths = TimerPaths::new(root);
    if paths.timer_dir.exists() && !options.force {
        return Err(anyhow!(
            "cubetimer init: .cubetimer already exists (use --force to overwrite)"
        ));
    }
    if paths.timer_dir.exists() && !paths.timer_dir.is_dir() {
        return Err(anyhow!(
            "cubetimer init: .cubetimer exists but is not a directory"
        ));
    }

    fs::create_dir_all(&paths.timer_dir)
        .with_context(|| format!("create directory {}", paths.timer_dir.display()))?;

    let config = TimerConfig::default();
    write_config(&paths.config_path, &config)?;
    write_file(&paths.schema_path, HISTORY_SCHEMA)?;
    write_empty_store(&paths.store_path, &config.store.key)?;

    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write file {}", path.display()))
}

fn write_empty_store(path: &Path, key: &str) -> Result<()> {
    let mut document = Map::new();
    document.insert(key.to_string(), Value::Array(Vec::new()));
    let mut buf = serde_json::to_string_pretty(&Value::Object(document))?;
    buf.push('\n');
    write_file(path, &buf)
}
