//! Move notation shared by the scramble generator and the cube engine.
//!
//! Grammar: `token = face modifier?` where `face ∈ {R,L,U,D,F,B}` (case
//! sensitive) and `modifier ∈ {"", "'", "2"}`. Sequences are tokens separated
//! by ASCII whitespace. Unrecognised tokens are skipped, never fatal.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rotation axis of a face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Coordinate index of this axis in a `[x, y, z]` position.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One of the six outer faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    R,
    L,
    U,
    D,
    F,
    B,
}

impl Face {
    /// Canonical face order used by the generator's uniform draw.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    /// The face on the other end of the same axis.
    pub fn opposite(self) -> Face {
        match self {
            Face::R => Face::L,
            Face::L => Face::R,
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Coordinate value (+1 or -1) of the layer this face turns.
    pub fn layer(self) -> i8 {
        match self {
            Face::R | Face::U | Face::F => 1,
            Face::L | Face::D | Face::B => -1,
        }
    }

    /// Rotation sign of an unmodified turn. Matches `layer` for every face.
    fn base_direction(self) -> i8 {
        self.layer()
    }

    pub fn letter(self) -> char {
        match self {
            Face::R => 'R',
            Face::L => 'L',
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Turn amount suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Quarter turn in the face's base direction.
    None,
    /// Quarter turn against the base direction (`'`).
    Prime,
    /// Half turn (`2`).
    Double,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::None, Modifier::Prime, Modifier::Double];

    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Prime => "'",
            Modifier::Double => "2",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Modifier> {
        Modifier::ALL
            .into_iter()
            .find(|modifier| modifier.suffix() == suffix)
    }
}

/// A single face turn such as `R`, `U'` or `F2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    pub fn axis(self) -> Axis {
        self.face.axis()
    }

    pub fn layer(self) -> i8 {
        self.face.layer()
    }

    /// Rotation sign of each quarter turn. Half turns keep the base sign.
    pub fn direction(self) -> i8 {
        match self.modifier {
            Modifier::Prime => -self.face.base_direction(),
            Modifier::None | Modifier::Double => self.face.base_direction(),
        }
    }

    /// Number of sequential quarter turns.
    pub fn turns(self) -> u8 {
        match self.modifier {
            Modifier::Double => 2,
            Modifier::None | Modifier::Prime => 1,
        }
    }

    /// Parse one notation token. Returns `None` for anything outside the grammar.
    pub fn parse(token: &str) -> Option<Move> {
        let mut chars = token.chars();
        let face = Face::from_letter(chars.next()?)?;
        let modifier = Modifier::from_suffix(chars.as_str())?;
        Some(Move::new(face, modifier))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.modifier.suffix())
    }
}

/// Parse a whitespace-separated move sequence, skipping unrecognised tokens.
pub fn parse_moves(text: &str) -> Vec<Move> {
    text.split_ascii_whitespace()
        .filter_map(|token| {
            let parsed = Move::parse(token);
            if parsed.is_none() {
                debug!(token, "skipping unrecognised move token");
            }
            parsed
        })
        .collect()
}
