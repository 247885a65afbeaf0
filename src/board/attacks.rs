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

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::material::{Color, Material, Piece};
use super::position::{Pos, Position};
use super::square::{Direction, Offset, Square};

use Piece::*;

/// Attack oracle: can any piece of a given side capture onto a square?
///
/// Read-only over the position, so it is safe to ask of a simulation copy
/// as well as the live board.
pub trait Attacks: Pos {
    fn is_attacked(&self, square: Square, by: Color) -> bool {
        self.attacked_along_line(square, by)
            || self.attacked_from(&KNIGHT_TARGETS[square], Material::new(by, Knight))
            || self.attacked_from(&PAWN_ATTACK_ORIGINS[by.to_index()][square], Material::new(by, Pawn))
            || self.attacked_from(&KING_TARGETS[square], Material::new(by, King))
    }

    /// Scan the 8 rays outward; on each, only the first occupied square can
    /// attack, and only if its piece moves along that ray class.
    fn attacked_along_line(&self, square: Square, by: Color) -> bool {
        for direction in Direction::iter() {
            let Some(material) = self.first_piece_along(square, direction) else {
                continue;
            };
            if material.color() != by {
                continue;
            }
            let reaches = match material.piece() {
                Queen => true,
                Rook => direction.is_orthogonal(),
                Bishop => direction.is_diagonal(),
                _ => false,
            };
            if reaches {
                return true;
            }
        }
        false
    }

    fn first_piece_along(&self, square: Square, direction: Direction) -> Option<Material> {
        let mut next = square + direction;
        while let Some(current) = next {
            if let Some(material) = self.contents(current) {
                return Some(material);
            }
            next = current + direction;
        }
        None
    }

    fn attacked_from(&self, origins: &[Square], material: Material) -> bool {
        origins
            .iter()
            .any(|&origin| self.contents(origin) == Some(material))
    }
}

impl Attacks for Position {}

static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    targets_from_offsets(&OFFSETS)
});

static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    let offsets: Vec<Offset> = Direction::iter().map(Offset::from).collect();
    targets_from_offsets(&offsets)
});

/// For each target square, the squares a pawn of the indexed color would
/// capture from: one row behind the target from that pawn's perspective
/// (below for White, above for Black).
static PAWN_ATTACK_ORIGINS: Lazy<[[Vec<Square>; 64]; 2]> = Lazy::new(|| {
    const WHITE_OFFSETS: [Offset; 2] = [Offset::new(-1, 1), Offset::new(1, 1)];
    const BLACK_OFFSETS: [Offset; 2] = [Offset::new(-1, -1), Offset::new(1, -1)];
    [
        targets_from_offsets(&WHITE_OFFSETS),
        targets_from_offsets(&BLACK_OFFSETS),
    ]
});

fn targets_from_offsets(offsets: &[Offset]) -> [Vec<Square>; 64] {
    let mut array: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());
    for square in Square::iter() {
        array[square] = offsets.iter().filter_map(|&offset| square + offset).collect();
    }
    array
}
