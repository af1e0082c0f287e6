//! Test-only helpers for constructing solves, histories and timer roots.

use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::core::scramble::RandomSource;
use crate::core::solve::{Solve, SolveHistory};
use crate::io::init::{InitOptions, TimerPaths, init_timer};

/// Unix milliseconds of the first solve built by `history_of`.
pub const BASE_MILLIS: i64 = 1_700_000_000_000;

pub fn at_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).expect("timestamp in range")
}

/// Create a deterministic clean solve.
pub fn solve(id: u64, time: u64) -> Solve {
    Solve {
        id,
        time,
        date: at_millis(BASE_MILLIS),
        scramble: "R U R' U'".to_string(),
        is_dnf: false,
        penalty: false,
        held_penalty: false,
    }
}

pub fn dnf_solve(id: u64, time: u64) -> Solve {
    solve(id, time).with_dnf_toggled()
}

/// Build a history from raw times, most recent first.
///
/// Ids and dates are one second apart and strictly decreasing.
pub fn history_of(times: &[u64]) -> SolveHistory {
    let count = times.len() as i64;
    let solves = times
        .iter()
        .enumerate()
        .map(|(index, time)| {
            let millis = BASE_MILLIS + (count - index as i64) * 1_000;
            Solve {
                date: at_millis(millis),
                ..solve(millis as u64, *time)
            }
        })
        .collect();
    SolveHistory::from_solves(solves)
}

/// Random source replaying a fixed script of choices.
///
/// Values are reduced modulo the requested bound; the script cycles when it
/// runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "script must not be empty");
        Self { values, cursor: 0 }
    }

    /// Always answer `value`.
    pub fn repeating(value: usize) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, bound: usize) -> usize {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}

/// Temporary directory with an initialized `.cubetimer/` layout.
pub struct TestRoot {
    temp: TempDir,
    pub paths: TimerPaths,
}

impl TestRoot {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_timer(temp.path(), &InitOptions { force: false }).expect("init");
        Self { temp, paths }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}
