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

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;

use super::material::{Color, Material, Pair, Piece};
use super::square::{File, Rank, Square};
use super::Turn;

use Color::*;
use Piece::*;
use Rank::*;

/// Count of applied moves; doubles as the history cursor. White moves at
/// even values, so the side to move is always the cursor's parity.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveId(u16);

impl MoveId {
    pub const START: MoveId = MoveId(0);

    #[inline]
    pub fn turn(&self) -> Color {
        const TURNS: [Color; 2] = [White, Black];
        let index = self.value() % 2;
        TURNS[index]
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub fn move_number(&self) -> usize {
        1 + self.value() / 2
    }
    #[inline]
    pub fn at_start(&self) -> bool {
        self.0 == 0
    }
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
    #[inline]
    pub fn prev(self) -> Self {
        debug_assert!(self.0 > 0);
        Self(self.0 - 1)
    }
}

impl Default for MoveId {
    #[inline]
    fn default() -> Self {
        MoveId::START
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squares([Option<Material>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

/// Contents of the 64 squares plus the number of moves applied so far.
/// Holds no rules knowledge: legality, check detection and history all
/// live above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: Squares,
    next_move_id: MoveId,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    pub fn new() -> Self {
        let mut position = Self {
            squares: Squares::empty(),
            next_move_id: MoveId::START,
        };
        position.init();
        position
    }

    fn init(&mut self) {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        const PAWN_RANKS: Pair<Rank> = Pair::new(Rank2, Rank7);
        const BACK_RANKS: Pair<Rank> = Pair::new(Rank1, Rank8);
        for color in Color::iter() {
            for (index, piece) in BACK_RANK.into_iter().enumerate() {
                let file = File::from_index(index);
                let square = Square::new(file, BACK_RANKS[color]);
                let _ = self.place(square, Material::new(color, piece));
                let square = Square::new(file, PAWN_RANKS[color]);
                let _ = self.place(square, Material::new(color, Pawn));
            }
        }
    }

    pub fn squares(&self) -> &Squares {
        &self.squares
    }

    #[inline]
    pub fn move_id(&self) -> MoveId {
        self.next_move_id
    }

    /// Fixed-order snapshot: 64 characters, row-major from a8, uppercase
    /// White, lowercase Black, a space per empty square.
    pub fn render(&self) -> String {
        Square::iter()
            .map(|square| match self.squares[square] {
                Some(material) => material.to_char(),
                None => ' ',
            })
            .collect()
    }

    pub(crate) fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        self.squares[square].replace(material)
    }

    pub(crate) fn remove(&mut self, square: Square) -> Option<Material> {
        self.squares[square].take()
    }

    pub(crate) fn advance_turn(&mut self) {
        self.next_move_id = self.next_move_id.next();
    }

    pub(crate) fn rewind_turn(&mut self) {
        self.next_move_id = self.next_move_id.prev();
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.render())?;
        tuple.serialize_element(&self.next_move_id)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PositionVisitor;
        impl<'de> serde::de::Visitor<'de> for PositionVisitor {
            type Value = (String, MoveId);
            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a Position condensed into a (placement, move id) tuple")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let placement = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::custom("Missing elements"))?;
                let next_move_id = seq
                    .next_element()?
                    .ok_or_else(|| serde::de::Error::custom("Missing elements"))?;
                Ok((placement, next_move_id))
            }
        }
        let (placement, next_move_id): (String, MoveId) =
            deserializer.deserialize_tuple(2, PositionVisitor)?;
        if placement.chars().count() != 64 {
            return Err(serde::de::Error::custom("placement must hold 64 squares"));
        }
        let mut squares = Squares::empty();
        for (square, c) in Square::iter().zip(placement.chars()) {
            if c != ' ' {
                let material = Material::try_from_char(c)
                    .ok_or_else(|| serde::de::Error::custom("unknown piece symbol"))?;
                squares[square] = Some(material);
            }
        }
        Ok(Position {
            squares,
            next_move_id,
        })
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.next_move_id.turn()
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

pub trait Pos: Turn + AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> Option<Material> {
        let pos: &Position = self.as_ref();
        pos.squares[square]
    }
    #[inline]
    fn is_vacant(&self, square: Square) -> bool {
        self.contents(square).is_none()
    }
    #[inline]
    fn is_occupied(&self, square: Square) -> bool {
        self.contents(square).is_some()
    }
    /// Does `square` hold a piece of `color`?
    #[inline]
    fn holds(&self, square: Square, color: Color) -> bool {
        matches!(self.contents(square), Some(material) if material.color() == color)
    }
    /// The king's square, or `None` once the king has left the board
    /// (a terminal position, not an error).
    fn king(&self, color: Color) -> Option<Square> {
        let king = Material::new(color, Piece::King);
        Square::iter().find(|&square| self.contents(square) == Some(king))
    }
    fn has_both_kings(&self) -> bool {
        self.king(White).is_some() && self.king(Black).is_some()
    }
}

#[cfg(test)]
impl Position {
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        self.squares[square] = value;
        self
    }
    pub fn set_next_move_id(mut self, value: MoveId) -> Self {
        self.next_move_id = value;
        self
    }
}
