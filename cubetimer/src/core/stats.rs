//! Session statistics over a solve history.
//!
//! All values are milliseconds. DNF solves are excluded from every value
//! except `count`; `None` means there is not enough data.

use serde::Serialize;

use crate::core::solve::{Solve, SolveHistory};

/// Window sizes reported in session summaries.
pub const AO5: usize = 5;
pub const AO12: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    /// All solves, DNFs included.
    pub count: usize,
    pub best: Option<u64>,
    pub worst: Option<u64>,
    pub mean: Option<f64>,
    pub ao5: Option<f64>,
    pub ao12: Option<f64>,
}

pub fn adjusted_time(solve: &Solve) -> Option<u64> {
    solve.adjusted_time()
}

/// Adjusted times of non-DNF solves, most recent first.
fn valid_times(history: &SolveHistory) -> Vec<u64> {
    history.iter().filter_map(adjusted_time).collect()
}

/// Sum as `f64`; stored times may be close to `u64::MAX`.
fn sum_millis(times: &[u64]) -> f64 {
    times.iter().map(|time| *time as f64).sum()
}

pub fn best(history: &SolveHistory) -> Option<u64> {
    valid_times(history).into_iter().min()
}

pub fn worst(history: &SolveHistory) -> Option<u64> {
    valid_times(history).into_iter().max()
}

pub fn mean(history: &SolveHistory) -> Option<f64> {
    let times = valid_times(history);
    if times.is_empty() {
        return None;
    }
    Some(sum_millis(&times) / times.len() as f64)
}

/// Trimmed mean of the `n` most recent non-DNF solves.
///
/// One minimum and one maximum are dropped from the window. Requires at least
/// `n` non-DNF solves and `n >= 3`.
pub fn average_of(history: &SolveHistory, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let times = valid_times(history);
    if times.len() < n {
        return None;
    }
    let mut window = times[..n].to_vec();
    window.sort_unstable();
    let kept = &window[1..n - 1];
    Some(sum_millis(kept) / kept.len() as f64)
}

pub fn session_stats(history: &SolveHistory) -> SessionStats {
    SessionStats {
        count: history.len(),
        best: best(history),
        worst: worst(history),
        mean: mean(history),
        ao5: average_of(history, AO5),
        ao12: average_of(history, AO12),
    }
}
