//! Timer configuration stored under `.cubetimer/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Timer configuration (TOML).
///
/// Intended to be edited by hand. Missing fields fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    pub session: SessionConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Timing sessions shorter than this are treated as accidental triggers.
    pub min_solve_millis: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the solve array is stored under in `store.json`.
    pub key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_solve_millis: 500,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: "rubiksSolves".to_string(),
        }
    }
}

impl TimerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.session.min_solve_millis == 0 {
            return Err(anyhow!("session.min_solve_millis must be > 0"));
        }
        if self.store.key.trim().is_empty() {
            return Err(anyhow!("store.key must be a non-empty string"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TimerConfig::default()`.
pub fn load_config(path: &Path) -> Result<TimerConfig> {
    if !path.exists() {
        let cfg = TimerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TimerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &TimerConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, TimerConfig::default());
        assert_eq!(cfg.session.min_solve_millis, 500);
        assert_eq!(cfg.store.key, "rubiksSolves");
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        let mut cfg = TimerConfig::default();
        cfg.session.min_solve_millis = 750;
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[store]\nkey = \"practice\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.store.key, "practice");
        assert_eq!(cfg.session.min_solve_millis, 500);
    }

    #[test]
    fn rejects_invalid_values() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[session]\nmin_solve_millis = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(err.to_string().contains("min_solve_millis"));

        fs::write(&path, "[store]\nkey = \"  \"\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(err.to_string().contains("store.key"));
    }
}
