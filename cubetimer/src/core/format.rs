//! Display formatting for times and statistics.

use crate::core::solve::Solve;

/// Render milliseconds as `s.cc` or `m:ss.cc`, truncating to centiseconds.
pub fn format_millis(millis: u64) -> String {
    let centis = (millis % 1_000) / 10;
    let seconds = (millis / 1_000) % 60;
    let minutes = millis / 60_000;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{centis:02}")
    } else {
        format!("{seconds}.{centis:02}")
    }
}

/// Render a statistic, `-` when there is not enough data.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(millis) => format_millis(millis.max(0.0).floor() as u64),
        None => "-".to_string(),
    }
}

/// Render a solve row time: `DNF`, or the adjusted time.
pub fn format_solve_time(solve: &Solve) -> String {
    match solve.adjusted_time() {
        Some(millis) => format_millis(millis),
        None => "DNF".to_string(),
    }
}
