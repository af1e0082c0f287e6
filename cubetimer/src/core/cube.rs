//! 26-cubie model of a 3x3x3 cube and pure move application.
//!
//! Each cubie carries its position in `{-1,0,1}^3` and six colour slots indexed
//! by outward normal `[+x, -x, +y, -y, +z, -z]`. The hidden centre piece is not
//! modelled. A state is a fixed array whose index is the cubie's identity,
//! taken from its solved-state coordinates; moves return new states.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::notation::{Axis, Move, parse_moves};
use crate::core::scramble::Scramble;

/// Number of modelled cubies (27 minus the hidden centre).
pub const CUBIE_COUNT: usize = 26;

/// Facelet slot indices, in `colors` order.
pub const RIGHT: usize = 0;
pub const LEFT: usize = 1;
pub const TOP: usize = 2;
pub const BOTTOM: usize = 3;
pub const FRONT: usize = 4;
pub const BACK: usize = 5;

/// Outward normal of each slot.
const SLOT_NORMALS: [Position; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

/// `[x, y, z]`, each in `{-1, 0, 1}`.
pub type Position = [i8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    White,
    Yellow,
    Green,
    Blue,
    /// Filler for slots facing into the cube.
    Internal,
}

impl Color {
    /// Solved-state colour of each slot: `+x` red, `-x` orange, `+y` white,
    /// `-y` yellow, `+z` green, `-z` blue.
    pub const FACES: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::White,
        Color::Yellow,
        Color::Green,
        Color::Blue,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cubie {
    pub position: Position,
    pub colors: [Color; 6],
}

impl Cubie {
    fn solved(position: Position) -> Self {
        let mut colors = [Color::Internal; 6];
        for (slot, normal) in SLOT_NORMALS.iter().enumerate() {
            if faces_outward(position, *normal) {
                colors[slot] = Color::FACES[slot];
            }
        }
        Self { position, colors }
    }

    /// Rotate position and stickers together by a quarter turn about `axis`.
    fn rotated(&self, axis: Axis, direction: i8) -> Self {
        let mut colors = [Color::Internal; 6];
        for (slot, normal) in SLOT_NORMALS.iter().enumerate() {
            colors[slot_for(rotate(axis, direction, *normal))] = self.colors[slot];
        }
        Self {
            position: rotate(axis, direction, self.position),
            colors,
        }
    }
}

/// Snapshot of all 26 cubies. Serializes as a plain array of
/// `{position, colors}` records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubeState {
    cubies: [Cubie; CUBIE_COUNT],
}

impl CubeState {
    /// Reference solved state. Cubies are ordered by x, then y, then z.
    pub fn solved() -> Self {
        let mut cubies = [Cubie::solved([1, 1, 1]); CUBIE_COUNT];
        let mut index = 0;
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    if (x, y, z) == (0, 0, 0) {
                        continue;
                    }
                    cubies[index] = Cubie::solved([x, y, z]);
                    index += 1;
                }
            }
        }
        Self { cubies }
    }

    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// Cubie currently occupying `position`, if any.
    pub fn cubie_at(&self, position: Position) -> Option<&Cubie> {
        self.cubies.iter().find(|cubie| cubie.position == position)
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }

    /// Apply one move: `turns` sequential quarter turns.
    pub fn apply_move(&self, mv: Move) -> Self {
        let mut state = self.clone();
        for _ in 0..mv.turns() {
            state = state.quarter_turn(mv.axis(), mv.layer(), mv.direction());
        }
        state
    }

    pub fn apply_moves<I>(&self, moves: I) -> Self
    where
        I: IntoIterator<Item = Move>,
    {
        moves
            .into_iter()
            .fold(self.clone(), |state, mv| state.apply_move(mv))
    }

    pub fn apply_scramble(&self, scramble: &Scramble) -> Self {
        self.apply_moves(scramble.moves().iter().copied())
    }

    /// Parse `notation` leniently and apply it.
    pub fn apply_notation(&self, notation: &str) -> Self {
        self.apply_moves(parse_moves(notation))
    }

    /// Rotate the 9 cubies with coordinate `layer` on `axis` by 90 degrees.
    ///
    /// Cubies outside the layer are returned untouched.
    pub fn quarter_turn(&self, axis: Axis, layer: i8, direction: i8) -> Self {
        let mut cubies = self.cubies;
        for cubie in &mut cubies {
            if cubie.position[axis.index()] == layer {
                *cubie = cubie.rotated(axis, direction);
            }
        }
        Self { cubies }
    }

    /// Number of facelet slots holding each colour, `Internal` included.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for cubie in &self.cubies {
            for color in cubie.colors {
                *counts.entry(color).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

/// Quarter-turn rotation of a coordinate triple.
pub fn rotate(axis: Axis, direction: i8, [x, y, z]: Position) -> Position {
    let d = direction;
    match axis {
        Axis::X => [x, d * z, -d * y],
        Axis::Y => [d * z, y, -d * x],
        Axis::Z => [-d * y, d * x, z],
    }
}

/// True if the slot with outward `normal` is on the cube's surface at `position`.
pub fn faces_outward(position: Position, normal: Position) -> bool {
    position
        .iter()
        .zip(normal.iter())
        .any(|(p, n)| *n != 0 && p == n)
}

/// Outward normal of slot `slot`.
pub fn slot_normal(slot: usize) -> Position {
    SLOT_NORMALS[slot]
}

fn slot_for(normal: Position) -> usize {
    SLOT_NORMALS
        .iter()
        .position(|candidate| *candidate == normal)
        .unwrap_or(RIGHT)
}
