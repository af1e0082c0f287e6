//! Semantic invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::core::cube::{Color, CubeState, faces_outward, slot_normal};
use crate::core::solve::SolveHistory;

/// Check solve history invariants:
/// - No duplicate ids
/// - `time > 0`
/// - A DNF never carries a penalty; only a DNF holds one aside
/// - Ordered most-recent-first (ids strictly decreasing)
pub fn validate_history(history: &SolveHistory) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, solve) in history.iter().enumerate() {
        let path = format!("solves[{}]", index);
        if !seen.insert(solve.id) {
            errors.push(format!("duplicate id {} at {}", solve.id, path));
        }
        if solve.time == 0 {
            errors.push(format!("{}: time must be > 0", path));
        }
        if solve.is_dnf && solve.penalty {
            errors.push(format!("{}: DNF solve cannot carry a penalty", path));
        }
        if solve.held_penalty && !solve.is_dnf {
            errors.push(format!("{}: held penalty on a solve that is not DNF", path));
        }
    }

    if !most_recent_first(history) {
        errors.push("solves must be ordered most-recent-first (ids decreasing)".to_string());
    }

    errors
}

fn most_recent_first(history: &SolveHistory) -> bool {
    history
        .solves()
        .windows(2)
        .all(|pair| pair[0].id > pair[1].id)
}

/// Check cube state invariants:
/// - Every position in `{-1,0,1}^3` except the origin is occupied exactly once
/// - Each face colour appears on exactly 9 slots
/// - A slot holds a face colour exactly when it faces outward
pub fn validate_cube(state: &CubeState) -> Vec<String> {
    let mut errors = Vec::new();
    let mut occupied = HashSet::new();

    for (index, cubie) in state.cubies().iter().enumerate() {
        let position = cubie.position;
        if position.iter().any(|c| !(-1..=1).contains(c)) || position == [0, 0, 0] {
            errors.push(format!("cubie {}: invalid position {:?}", index, position));
        }
        if !occupied.insert(position) {
            errors.push(format!("cubie {}: position {:?} occupied twice", index, position));
        }
        for (slot, color) in cubie.colors.iter().enumerate() {
            let outward = faces_outward(position, slot_normal(slot));
            if outward && *color == Color::Internal {
                errors.push(format!("cubie {}: outward slot {} has no colour", index, slot));
            }
            if !outward && *color != Color::Internal {
                errors.push(format!(
                    "cubie {}: inward slot {} holds {:?}",
                    index, slot, color
                ));
            }
        }
    }

    let counts = state.color_counts();
    for color in Color::FACES {
        let count = counts.get(&color).copied().unwrap_or(0);
        if count != 9 {
            errors.push(format!("{:?} appears on {} slots, expected 9", color, count));
        }
    }

    errors
}
