//! Solve records and history transitions.
//!
//! A `SolveHistory` is a value: every transition borrows the current history
//! and returns the next one. Ordering is most-recent-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time added by a +2 penalty.
pub const PENALTY_MILLIS: u64 = 2_000;

/// One timed solve, in the persisted record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solve {
    /// Unique, strictly increasing with recording order.
    pub id: u64,
    /// Raw elapsed time in milliseconds, excluding penalties.
    pub time: u64,
    pub date: DateTime<Utc>,
    /// Notation the solve was scrambled with, as recorded.
    pub scramble: String,
    #[serde(rename = "isDNF")]
    pub is_dnf: bool,
    pub penalty: bool,
    /// Penalty set aside while the solve is DNF; restored when DNF is cleared.
    #[serde(rename = "heldPenalty", default, skip_serializing_if = "is_false")]
    pub held_penalty: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Solve {
    /// Time counted by statistics, or `None` for a DNF.
    pub fn adjusted_time(&self) -> Option<u64> {
        if self.is_dnf {
            return None;
        }
        let penalty = if self.penalty { PENALTY_MILLIS } else { 0 };
        Some(self.time.saturating_add(penalty))
    }

    /// Flip DNF. Marking DNF clears the penalty; clearing DNF restores it.
    pub fn with_dnf_toggled(&self) -> Solve {
        let mut next = self.clone();
        if self.is_dnf {
            next.is_dnf = false;
            next.penalty = self.held_penalty;
            next.held_penalty = false;
        } else {
            next.is_dnf = true;
            next.held_penalty = self.penalty;
            next.penalty = false;
        }
        next
    }

    /// Move a penalty stored alongside DNF into `held_penalty`.
    ///
    /// Older records can carry both flags; clearing DNF later restores it.
    pub fn with_dnf_penalty_held(&self) -> Solve {
        let mut next = self.clone();
        if self.is_dnf && self.penalty {
            next.penalty = false;
            next.held_penalty = true;
        }
        next
    }

    /// Flip the +2 penalty. DNF solves cannot carry one and are returned as-is.
    pub fn with_penalty_toggled(&self) -> Solve {
        let mut next = self.clone();
        if !self.is_dnf {
            next.penalty = !self.penalty;
        }
        next
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolveHistory {
    solves: Vec<Solve>,
}

impl SolveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap solves already ordered most-recent-first.
    pub fn from_solves(solves: Vec<Solve>) -> Self {
        Self { solves }
    }

    pub fn solves(&self) -> &[Solve] {
        &self.solves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solve> {
        self.solves.iter()
    }

    pub fn len(&self) -> usize {
        self.solves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solves.is_empty()
    }

    pub fn latest(&self) -> Option<&Solve> {
        self.solves.first()
    }

    pub fn get(&self, id: u64) -> Option<&Solve> {
        self.solves.iter().find(|solve| solve.id == id)
    }

    /// Id for a solve recorded at `date`: its Unix milliseconds, bumped past
    /// the current head so ids stay strictly increasing. `None` once the head
    /// holds `u64::MAX`.
    pub fn next_id(&self, date: DateTime<Utc>) -> Option<u64> {
        let stamp = u64::try_from(date.timestamp_millis()).unwrap_or(0);
        match self.latest() {
            Some(head) => head.id.checked_add(1).map(|next| stamp.max(next)),
            None => Some(stamp),
        }
    }

    /// Prepend a new solve.
    pub fn record(
        &self,
        time: u64,
        date: DateTime<Utc>,
        scramble: &str,
    ) -> Result<SolveHistory, String> {
        if time == 0 {
            return Err("solve time must be > 0".to_string());
        }
        let id = self
            .next_id(date)
            .ok_or_else(|| "solve id space exhausted".to_string())?;
        let solve = Solve {
            id,
            time,
            date,
            scramble: scramble.to_string(),
            is_dnf: false,
            penalty: false,
            held_penalty: false,
        };
        let mut solves = Vec::with_capacity(self.solves.len() + 1);
        solves.push(solve);
        solves.extend(self.solves.iter().cloned());
        Ok(Self { solves })
    }

    /// Apply `Solve::with_dnf_penalty_held` to every solve.
    pub fn with_dnf_penalties_held(&self) -> SolveHistory {
        Self {
            solves: self.solves.iter().map(Solve::with_dnf_penalty_held).collect(),
        }
    }

    pub fn delete(&self, id: u64) -> Result<SolveHistory, String> {
        self.position(id)?;
        let solves = self
            .solves
            .iter()
            .filter(|solve| solve.id != id)
            .cloned()
            .collect();
        Ok(Self { solves })
    }

    /// Drop the most recent solve. No-op on an empty history.
    pub fn without_latest(&self) -> SolveHistory {
        Self {
            solves: self.solves.iter().skip(1).cloned().collect(),
        }
    }

    pub fn toggle_dnf(&self, id: u64) -> Result<SolveHistory, String> {
        self.map_solve(id, Solve::with_dnf_toggled)
    }

    pub fn toggle_penalty(&self, id: u64) -> Result<SolveHistory, String> {
        self.map_solve(id, Solve::with_penalty_toggled)
    }

    fn map_solve(&self, id: u64, update: fn(&Solve) -> Solve) -> Result<SolveHistory, String> {
        let index = self.position(id)?;
        let mut solves = self.solves.clone();
        solves[index] = update(&self.solves[index]);
        Ok(Self { solves })
    }

    fn position(&self, id: u64) -> Result<usize, String> {
        self.solves
            .iter()
            .position(|solve| solve.id == id)
            .ok_or_else(|| format!("solve {} not found", id))
    }
}
