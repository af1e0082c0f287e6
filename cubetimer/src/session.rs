//! Session helpers for the recording and editing commands.
//!
//! Each mutation loads the stored history, applies one core transition and
//! writes the result back once.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::core::solve::{Solve, SolveHistory};
use crate::core::stats::{self, SessionStats};
use crate::io::config::{TimerConfig, load_config};
use crate::io::init::TimerPaths;
use crate::io::solve_store::{load_history, write_history};

/// Loaded session: paths, config and the stored history.
#[derive(Debug, Clone)]
pub struct Session {
    pub paths: TimerPaths,
    pub config: TimerConfig,
    pub history: SolveHistory,
}

impl Session {
    fn save(&self, history: &SolveHistory) -> Result<()> {
        write_history(&self.paths.store_path, &self.config.store.key, history)
            .with_context(|| "write solve history")
    }
}

/// Which solve an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveTarget {
    /// The most recent solve.
    Latest,
    Id(u64),
}

impl From<Option<u64>> for SolveTarget {
    fn from(id: Option<u64>) -> Self {
        id.map_or(SolveTarget::Latest, SolveTarget::Id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded(Solve),
    /// Elapsed time under `session.min_solve_millis`; nothing was stored.
    Discarded { elapsed_millis: u64, min_millis: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The solve after the edit.
    Updated(Solve),
    /// The solve that was removed.
    Deleted(Solve),
    NotFound(u64),
    /// `SolveTarget::Latest` on an empty history.
    Empty,
}

pub fn load_session(root: &Path) -> Result<Session> {
    let paths = TimerPaths::new(root);
    if !paths.timer_dir.is_dir() {
        return Err(anyhow!(
            "missing {} (run `cubetimer init`)",
            paths.timer_dir.display()
        ));
    }
    let config = load_config(&paths.config_path).with_context(|| "load timer config")?;
    let history = load_history(&paths.schema_path, &paths.store_path, &config.store.key)
        .with_context(|| "load solve history")?;
    Ok(Session {
        paths,
        config,
        history,
    })
}

/// Store a finished timing session.
///
/// Sessions shorter than the configured minimum are discarded as accidental
/// triggers.
pub fn record_solve(
    root: &Path,
    elapsed_millis: u64,
    scramble: &str,
    date: DateTime<Utc>,
) -> Result<RecordOutcome> {
    let session = load_session(root)?;
    let min_millis = session.config.session.min_solve_millis;
    if elapsed_millis < min_millis {
        debug!(elapsed_millis, min_millis, "discarding short timing session");
        return Ok(RecordOutcome::Discarded {
            elapsed_millis,
            min_millis,
        });
    }
    let next = session
        .history
        .record(elapsed_millis, date, scramble)
        .map_err(|err| anyhow!(err))?;
    session.save(&next)?;
    let solve = next
        .latest()
        .cloned()
        .ok_or_else(|| anyhow!("recorded solve missing from history"))?;
    info!(id = solve.id, time = solve.time, "recorded solve");
    Ok(RecordOutcome::Recorded(solve))
}

pub fn toggle_dnf(root: &Path, target: SolveTarget) -> Result<EditOutcome> {
    edit(root, target, |history, id| history.toggle_dnf(id))
}

pub fn toggle_penalty(root: &Path, target: SolveTarget) -> Result<EditOutcome> {
    edit(root, target, |history, id| history.toggle_penalty(id))
}

pub fn delete_solve(root: &Path, target: SolveTarget) -> Result<EditOutcome> {
    let session = load_session(root)?;
    let Some(id) = resolve(&session.history, target) else {
        return Ok(EditOutcome::Empty);
    };
    let Some(removed) = session.history.get(id).cloned() else {
        return Ok(EditOutcome::NotFound(id));
    };
    let next = session.history.delete(id).map_err(|err| anyhow!(err))?;
    session.save(&next)?;
    info!(id, "deleted solve");
    Ok(EditOutcome::Deleted(removed))
}

/// Statistics over the stored history.
pub fn session_stats(root: &Path) -> Result<SessionStats> {
    let session = load_session(root)?;
    Ok(stats::session_stats(&session.history))
}

fn resolve(history: &SolveHistory, target: SolveTarget) -> Option<u64> {
    match target {
        SolveTarget::Latest => history.latest().map(|solve| solve.id),
        SolveTarget::Id(id) => Some(id),
    }
}

fn edit(
    root: &Path,
    target: SolveTarget,
    transition: impl Fn(&SolveHistory, u64) -> Result<SolveHistory, String>,
) -> Result<EditOutcome> {
    let session = load_session(root)?;
    let Some(id) = resolve(&session.history, target) else {
        return Ok(EditOutcome::Empty);
    };
    if session.history.get(id).is_none() {
        return Ok(EditOutcome::NotFound(id));
    }
    let next = transition(&session.history, id).map_err(|err| anyhow!(err))?;
    session.save(&next)?;
    let solve = next
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("edited solve {} missing from history", id))?;
    debug!(id, is_dnf = solve.is_dnf, penalty = solve.penalty, "updated solve");
    Ok(EditOutcome::Updated(solve))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestRoot, at_millis};
    use std::fs;

    fn record(root: &TestRoot, millis: u64, at: i64) -> Solve {
        match record_solve(root.path(), millis, "R U2 F'", at_millis(at)).expect("record") {
            RecordOutcome::Recorded(solve) => solve,
            other => panic!("expected recorded solve, got {other:?}"),
        }
    }

    #[test]
    fn short_sessions_are_discarded_without_writing() {
        let root = TestRoot::new();
        let before = fs::read_to_string(&root.paths.store_path).expect("read");

        let outcome = record_solve(root.path(), 499, "R", at_millis(1)).expect("record");
        assert_eq!(
            outcome,
            RecordOutcome::Discarded {
                elapsed_millis: 499,
                min_millis: 500
            }
        );
        assert_eq!(fs::read_to_string(&root.paths.store_path).expect("read"), before);
    }

    #[test]
    fn threshold_is_inclusive_and_configurable() {
        let root = TestRoot::new();
        let solve = record(&root, 500, 1_000);
        assert_eq!(solve.time, 500);

        fs::write(&root.paths.config_path, "[session]\nmin_solve_millis = 2000\n")
            .expect("write config");
        let outcome = record_solve(root.path(), 1_999, "R", at_millis(2_000)).expect("record");
        assert!(matches!(outcome, RecordOutcome::Discarded { min_millis: 2_000, .. }));
    }

    #[test]
    fn recorded_solves_persist_most_recent_first() {
        let root = TestRoot::new();
        let first = record(&root, 12_000, 1_000);
        let second = record(&root, 11_000, 5_000);

        let session = load_session(root.path()).expect("load");
        let ids: Vec<u64> = session.history.iter().map(|solve| solve.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(session.history.solves()[0].scramble, "R U2 F'");
    }

    #[test]
    fn dnf_round_trip_restores_penalty_across_writes() {
        let root = TestRoot::new();
        let solve = record(&root, 10_000, 1_000);

        toggle_penalty(root.path(), SolveTarget::Latest).expect("penalty");
        let dnf = toggle_dnf(root.path(), SolveTarget::Id(solve.id)).expect("dnf");
        let EditOutcome::Updated(dnf) = dnf else {
            panic!("expected update");
        };
        assert!(dnf.is_dnf);
        assert!(!dnf.penalty);

        let cleared = toggle_dnf(root.path(), SolveTarget::Latest).expect("clear");
        let EditOutcome::Updated(cleared) = cleared else {
            panic!("expected update");
        };
        assert!(!cleared.is_dnf);
        assert!(cleared.penalty);
        assert_eq!(cleared.adjusted_time(), Some(12_000));
    }

    #[test]
    fn edits_report_empty_and_unknown_targets() {
        let root = TestRoot::new();
        assert_eq!(
            toggle_dnf(root.path(), SolveTarget::Latest).expect("dnf"),
            EditOutcome::Empty
        );
        assert_eq!(
            delete_solve(root.path(), SolveTarget::Latest).expect("delete"),
            EditOutcome::Empty
        );

        record(&root, 10_000, 1_000);
        assert_eq!(
            toggle_penalty(root.path(), SolveTarget::Id(42)).expect("penalty"),
            EditOutcome::NotFound(42)
        );
    }

    #[test]
    fn delete_latest_drops_head_only() {
        let root = TestRoot::new();
        let first = record(&root, 12_000, 1_000);
        let second = record(&root, 11_000, 5_000);

        let outcome = delete_solve(root.path(), SolveTarget::Latest).expect("delete");
        assert_eq!(outcome, EditOutcome::Deleted(second));

        let session = load_session(root.path()).expect("load");
        assert_eq!(session.history.solves(), &[first]);
    }

    #[test]
    fn stats_reflect_stored_history() {
        let root = TestRoot::new();
        for (index, millis) in [1_200, 1_000, 1_500, 1_100, 1_300].into_iter().enumerate() {
            record(&root, millis, (index as i64 + 1) * 1_000);
        }
        let stats = session_stats(root.path()).expect("stats");
        assert_eq!(stats.count, 5);
        assert_eq!(stats.best, Some(1_000));
        assert_eq!(stats.ao5, Some(1_200.0));
        assert_eq!(stats.ao12, None);
    }

    #[test]
    fn recording_past_the_largest_id_is_an_error() {
        let root = TestRoot::new();
        fs::write(
            &root.paths.store_path,
            format!(
                r#"{{"rubiksSolves":[{{"id":{},"time":9000,"date":"2023-11-14T22:13:25Z","scramble":"R","isDNF":false,"penalty":false}}]}}"#,
                u64::MAX
            ),
        )
        .expect("write store");
        let before = fs::read_to_string(&root.paths.store_path).expect("read");

        let err = record_solve(root.path(), 1_000, "R", at_millis(1)).expect_err("exhausted");
        assert!(err.to_string().contains("id space exhausted"));
        assert_eq!(fs::read_to_string(&root.paths.store_path).expect("read"), before);
    }

    #[test]
    fn load_session_requires_init() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_session(temp.path()).expect_err("missing");
        assert!(err.to_string().contains("cubetimer init"));
    }

    #[test]
    fn solve_target_from_optional_id() {
        assert_eq!(SolveTarget::from(None), SolveTarget::Latest);
        assert_eq!(SolveTarget::from(Some(7)), SolveTarget::Id(7));
    }
}
