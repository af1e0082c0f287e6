//! Key-value solve store with schema + invariant validation.
//!
//! The store is a JSON object; the solve array lives under one key. Other keys
//! are left as they are on write.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::invariants::validate_history;
use crate::core::solve::SolveHistory;

/// Load and validate the history stored under `key`.
///
/// A missing store file or key yields an empty history. DNF records that also
/// carry a penalty load with the penalty held for restore.
pub fn load_history(schema_path: &Path, store_path: &Path, key: &str) -> Result<SolveHistory> {
    debug!(path = %store_path.display(), key, "loading solve history");
    let document = read_document(store_path)?;
    let Some(value) = document.get(key) else {
        debug!(key, "history key missing, starting empty");
        return Ok(SolveHistory::new());
    };
    validate_schema(schema_path, value)?;
    let history: SolveHistory = serde_json::from_value(value.clone())
        .with_context(|| format!("deserialize solves under '{}'", key))?;
    let history = history.with_dnf_penalties_held();
    validate_history_invariants(&history)?;
    debug!(solves = history.len(), "solve history loaded");
    Ok(history)
}

/// Store `history` under `key`, keeping the rest of the document.
pub fn write_history(store_path: &Path, key: &str, history: &SolveHistory) -> Result<()> {
    debug!(path = %store_path.display(), key, solves = history.len(), "writing solve history");
    let mut document = read_document(store_path)?;
    let value = serde_json::to_value(history).context("serialize solve history")?;
    document.insert(key.to_string(), value);
    let mut buf = serde_json::to_string_pretty(&Value::Object(document))?;
    buf.push('\n');
    super::write_atomic(store_path, &buf)
}

fn read_document(store_path: &Path) -> Result<Map<String, Value>> {
    if !store_path.exists() {
        return Ok(Map::new());
    }
    let contents = fs::read_to_string(store_path)
        .with_context(|| format!("read store {}", store_path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse store {}", store_path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow!(
            "store {} must be a JSON object",
            store_path.display()
        )),
    }
}

fn validate_schema(schema_path: &Path, solves: &Value) -> Result<()> {
    let schema_contents = fs::read_to_string(schema_path)
        .with_context(|| format!("read schema {}", schema_path.display()))?;
    let schema_value: Value = serde_json::from_str(&schema_contents)
        .with_context(|| format!("parse schema {}", schema_path.display()))?;
    let compiled =
        validator_for(&schema_value).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(solves) {
        let messages = compiled
            .iter_errors(solves)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "solve history schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

fn validate_history_invariants(history: &SolveHistory) -> Result<()> {
    let errors = validate_history(history);
    if errors.is_empty() {
        return Ok(());
    }
    Err(anyhow!("solve history invariants failed: {}", errors.join("; ")))
}
