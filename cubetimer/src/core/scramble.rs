//! Random-move scramble generation.
//!
//! Faces are drawn uniformly and re-drawn until they pass two rejection rules:
//! the face differs from the previous one, and the last three faces do not form
//! an `X opp(X) X` pattern on one axis. Modifiers are drawn independently.

use std::fmt;

use rand::Rng;

use crate::core::notation::{Face, Modifier, Move, parse_moves};

/// Number of moves in a generated scramble.
pub const SCRAMBLE_LENGTH: usize = 20;

/// Rejected draws tolerated for one position before falling back to the first
/// acceptable face in canonical order.
pub const MAX_FACE_DRAWS: usize = 64;

/// Source of uniform choices for the generator.
pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is always non-zero.
    fn pick(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Immutable move sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scramble {
    moves: Vec<Move>,
}

impl Scramble {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    /// Lenient parse: unrecognised tokens are dropped.
    pub fn parse(text: &str) -> Self {
        Self::new(parse_moves(text))
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, mv) in self.moves.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

/// Generate a standard-length scramble.
pub fn generate<S: RandomSource + ?Sized>(source: &mut S) -> Scramble {
    generate_with_length(source, SCRAMBLE_LENGTH)
}

/// Generate a scramble of `length` moves under the same rejection rules.
pub fn generate_with_length<S: RandomSource + ?Sized>(source: &mut S, length: usize) -> Scramble {
    let mut moves = Vec::with_capacity(length);
    let mut last: Option<Face> = None;
    let mut second_last: Option<Face> = None;

    for _ in 0..length {
        let face = draw_face(source, last, second_last);
        let modifier = Modifier::ALL[source.pick(Modifier::ALL.len())];
        moves.push(Move::new(face, modifier));
        second_last = last;
        last = Some(face);
    }

    Scramble::new(moves)
}

fn draw_face<S: RandomSource + ?Sized>(
    source: &mut S,
    last: Option<Face>,
    second_last: Option<Face>,
) -> Face {
    for _ in 0..MAX_FACE_DRAWS {
        let face = Face::ALL[source.pick(Face::ALL.len())];
        if !is_redundant(face, last, second_last) {
            return face;
        }
    }
    // Any face off the previous face's axis is acceptable, so this never fails.
    Face::ALL
        .into_iter()
        .find(|face| !is_redundant(*face, last, second_last))
        .unwrap_or(Face::R)
}

/// True if `face` repeats the previous face or closes an `X opp(X) X` triple.
pub fn is_redundant(face: Face, last: Option<Face>, second_last: Option<Face>) -> bool {
    if last == Some(face) {
        return true;
    }
    second_last == Some(face) && last == Some(face.opposite())
}

/// Report rule violations for an arbitrary scramble, one message per position.
pub fn redundancy_errors(scramble: &Scramble) -> Vec<String> {
    let moves = scramble.moves();
    let mut errors = Vec::new();
    for (index, mv) in moves.iter().enumerate() {
        let last = index.checked_sub(1).map(|i| moves[i].face);
        let second_last = index.checked_sub(2).map(|i| moves[i].face);
        if last == Some(mv.face) {
            errors.push(format!("move {}: {} repeats the previous face", index + 1, mv));
        } else if is_redundant(mv.face, last, second_last) {
            errors.push(format!(
                "move {}: {} closes a redundant {} {} {} sequence",
                index + 1,
                mv,
                mv.face,
                mv.face.opposite(),
                mv.face
            ));
        }
    }
    errors
}
