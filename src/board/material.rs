// Copyright 2026 Tobin Edwards
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
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    color: Color,
    piece: Piece,
}

impl Material {
    pub const WK: Self = Self {
        color: White,
        piece: King,
    };
    pub const WQ: Self = Self {
        color: White,
        piece: Queen,
    };
    pub const WR: Self = Self {
        color: White,
        piece: Rook,
    };
    pub const WB: Self = Self {
        color: White,
        piece: Bishop,
    };
    pub const WN: Self = Self {
        color: White,
        piece: Knight,
    };
    pub const WP: Self = Self {
        color: White,
        piece: Pawn,
    };

    pub const BK: Self = Self {
        color: Black,
        piece: King,
    };
    pub const BQ: Self = Self {
        color: Black,
        piece: Queen,
    };
    pub const BR: Self = Self {
        color: Black,
        piece: Rook,
    };
    pub const BB: Self = Self {
        color: Black,
        piece: Bishop,
    };
    pub const BN: Self = Self {
        color: Black,
        piece: Knight,
    };
    pub const BP: Self = Self {
        color: Black,
        piece: Pawn,
    };

    #[inline]
    pub const fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    #[inline]
    pub const fn white(piece: Piece) -> Self {
        Self::new(White, piece)
    }

    #[inline]
    pub const fn black(piece: Piece) -> Self {
        Self::new(Black, piece)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The queen this material becomes when a pawn of its color promotes.
    #[inline]
    pub const fn promoted(&self) -> Self {
        Self::new(self.color, Queen)
    }

    /// Board-export symbol: uppercase for White, lowercase for Black.
    #[inline]
    pub const fn to_char(&self) -> char {
        let letter = self.piece.letter();
        match self.color {
            White => letter,
            Black => letter.to_ascii_lowercase(),
        }
    }

    #[inline]
    pub fn try_from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { White } else { Black };
        let piece = Piece::try_from_letter(c.to_ascii_uppercase())?;
        Some(Self::new(color, piece))
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    /// Lowercase name for status exports ("white" / "black").
    pub const fn label(&self) -> &'static str {
        match self {
            White => "white",
            Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
}

impl<T> Pair<T> {
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Piece {
    /// Uppercase notation letter, 'P' for pawns.
    pub const fn letter(&self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }

    pub fn try_from_letter(c: char) -> Option<Self> {
        match c {
            'P' => Some(Pawn),
            'N' => Some(Knight),
            'B' => Some(Bishop),
            'R' => Some(Rook),
            'Q' => Some(Queen),
            'K' => Some(King),
            _ => None,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_char_round_trip() {
        for color in Color::iter() {
            for piece in Piece::iter() {
                let material = Material::new(color, piece);
                let c = material.to_char();
                assert_eq!(Material::try_from_char(c), Some(material));
            }
        }
    }

    #[test]
    fn test_char_case_by_color() {
        assert_eq!(Material::WK.to_char(), 'K');
        assert_eq!(Material::BK.to_char(), 'k');
        assert_eq!(Material::WP.to_char(), 'P');
        assert_eq!(Material::BN.to_char(), 'n');
    }

    #[test]
    fn test_promoted_is_queen_of_same_color() {
        assert_eq!(Material::WP.promoted(), Material::WQ);
        assert_eq!(Material::BP.promoted(), Material::BQ);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }
}
