// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::attacks::Attacks;
use super::material::{Color, Piece};
use super::position::Position;
use super::square::{Offset, Rank, Square};

use Color::*;
use Piece::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("The game is already over")]
    GameOver,
    #[error("Not a legal move")]
    IllegalMove,
    #[error("Moving here would leave the king attacked")]
    ExposesKing,
}

/// A candidate relocation, not yet validated.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parse the host-layer 4-character form, e.g. "e2e4".
    pub fn try_from_string(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let from = Square::try_from_chars(chars.next()?, chars.next()?)?;
        let to = Square::try_from_chars(chars.next()?, chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Move legality and check detection.
///
/// `is_shape_legal` covers geometry and occupancy only; a move is fully
/// legal once it also leaves the mover's own king unattacked.
pub trait Rules: Attacks {
    fn is_shape_legal(&self, from: Square, to: Square, side: Color) -> bool {
        let Some(material) = self.contents(from) else {
            return false;
        };
        if material.color() != side {
            return false;
        }
        // also rules out from == to
        if self.holds(to, side) {
            return false;
        }
        let offset = to - from;
        match material.piece() {
            Rook => offset.is_straight() && self.is_path_clear(from, to),
            Bishop => offset.is_diagonal() && self.is_path_clear(from, to),
            Queen => {
                (offset.is_straight() || offset.is_diagonal()) && self.is_path_clear(from, to)
            }
            Knight => {
                let (dx, dy) = (offset.x.abs(), offset.y.abs());
                (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
            }
            King => offset.x.abs() <= 1 && offset.y.abs() <= 1,
            Pawn => self.is_legal_pawn_shape(from, to, side),
        }
    }

    /// Walk the squares strictly between `from` and `to`; all must be
    /// vacant. `from` and `to` are expected to share a rank, file or
    /// diagonal.
    fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let Some(step) = (to - from).to_unit() else {
            return false;
        };
        let mut next = from + step;
        while let Some(current) = next {
            if current == to {
                return true;
            }
            if self.is_occupied(current) {
                return false;
            }
            next = current + step;
        }
        false
    }

    fn is_legal_pawn_shape(&self, from: Square, to: Square, side: Color) -> bool {
        let forward: isize = match side {
            White => -1,
            Black => 1,
        };
        let offset = to - from;
        // straight advances never capture
        if offset.x == 0 {
            if !self.is_vacant(to) {
                return false;
            }
            if offset.y == forward {
                return true;
            }
            if offset.y == forward * 2 && from.rank() == Rank::home_rank(side) {
                return matches!(from + Offset::new(0, forward), Some(mid) if self.is_vacant(mid));
            }
            return false;
        }
        // one-square diagonal, capture only
        offset.x.abs() == 1 && offset.y == forward && self.holds(to, !side)
    }

    fn is_in_check(&self, side: Color) -> bool {
        match self.king(side) {
            Some(square) => self.is_attacked(square, !side),
            None => false,
        }
    }

    /// Simulate the bare relocation (no promotion, no other side effects)
    /// on a private copy and test whether `side`'s king ends up attacked.
    /// The live position is never touched.
    fn would_expose_king(&self, from: Square, to: Square, side: Color) -> bool {
        let pos: &Position = self.as_ref();
        let mut copy = pos.clone();
        let Some(material) = copy.remove(from) else {
            return false;
        };
        copy.place(to, material);
        copy.is_in_check(side)
    }

    fn is_fully_legal(&self, from: Square, to: Square, side: Color) -> bool {
        self.is_shape_legal(from, to, side) && !self.would_expose_king(from, to, side)
    }

    /// Whether `side` has any fully legal move at all. Scans every
    /// (from, to) pair, short-circuiting on the first hit; the dominant
    /// cost of checkmate/stalemate classification.
    fn has_any_legal_move(&self, side: Color) -> bool {
        for from in Square::iter() {
            if !self.holds(from, side) {
                continue;
            }
            for to in Square::iter() {
                if self.is_fully_legal(from, to, side) {
                    return true;
                }
            }
        }
        false
    }

    /// Every square the piece on `from` may move to, for the side to move.
    fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let side = self.turn();
        if !self.holds(from, side) {
            return Vec::new();
        }
        Square::iter()
            .filter(|&to| self.is_fully_legal(from, to, side))
            .collect()
    }
}

impl Rules for Position {}
