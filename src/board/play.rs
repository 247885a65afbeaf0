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

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{DrawReason, GameResult, WinReason};

use super::attacks::Attacks;
use super::history::{History, MoveRecord};
use super::material::Color;
use super::moves::{Move, MoveError, Rules};
use super::position::{MoveId, Pos, Position};
use super::square::Square;
use super::Turn;

use Color::*;

/// Classification of the current position, always for the side to move.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    Check(Color),
    Checkmate(Color),
    Stalemate,
}

impl Status {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Checkmate(_) | Status::Stalemate)
    }
    #[inline]
    pub fn is_check(&self) -> bool {
        matches!(self, Status::Check(_) | Status::Checkmate(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ongoing => write!(f, "ongoing"),
            Status::Check(color) => write!(f, "check_{}", color.label()),
            Status::Checkmate(color) => write!(f, "checkmate_{}", color.label()),
            Status::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// One game of chess: the live position, the move history with its cursor,
/// and a cached in-check flag for the side to move.
///
/// Every operation either fully commits (board, history and cursor move
/// together) or rejects without touching anything.
#[derive(Debug, Clone)]
pub struct GameState {
    position: Position,
    history: History,
    in_check: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn for GameState {
    #[inline]
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl AsRef<Position> for GameState {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for GameState {}

impl Attacks for GameState {}

impl Rules for GameState {}

impl GameState {
    pub fn new() -> Self {
        Self {
            position: Position::new(),
            history: History::new(),
            in_check: false,
        }
    }

    /// Back to the standard setup: fresh board, empty history, White to
    /// move.
    pub fn reset(&mut self) {
        self.position = Position::new();
        self.history.clear();
        self.in_check = false;
    }

    /// Validate and apply a move for the side to move. Rejections leave
    /// the game unchanged.
    pub fn submit_move(&mut self, mv: Move) -> Result<MoveId> {
        let side = self.turn();
        if self.is_over() {
            return Err(MoveError::GameOver.into());
        }
        if !self.is_shape_legal(mv.from, mv.to, side) {
            return Err(MoveError::IllegalMove.into());
        }
        if self.would_expose_king(mv.from, mv.to, side) {
            return Err(MoveError::ExposesKing.into());
        }

        let move_id = self.position.move_id();
        // Safety: shape validation above guarantees material at `from`
        let moved = self.position.remove(mv.from).unwrap();
        let promoted = (moved.piece().is_pawn() && mv.to.rank().is_promotion_rank(side))
            .then(|| moved.promoted());
        let captured = self.position.place(mv.to, promoted.unwrap_or(moved));
        self.position.advance_turn();

        let status = self.status();
        self.in_check = status.is_check();
        self.history.push(MoveRecord::new(
            mv.from,
            mv.to,
            moved,
            captured,
            promoted,
            status.is_check(),
            matches!(status, Status::Checkmate(_)),
        ));
        Ok(move_id)
    }

    /// Revert the move under the cursor. Restoring the pre-move identity
    /// of the mover also reverts a promotion.
    pub fn undo(&mut self) -> Result<()> {
        let record = self.history.step_back()?;
        self.position.remove(record.to());
        if let Some(captured) = record.captured() {
            self.position.place(record.to(), captured);
        }
        self.position.place(record.from(), record.moved());
        self.position.rewind_turn();
        self.in_check = self
            .history
            .last_applied()
            .is_some_and(|prev| prev.gives_check());
        Ok(())
    }

    /// Re-apply the move just past the cursor.
    pub fn redo(&mut self) -> Result<()> {
        let record = self.history.step_forward()?;
        self.position.remove(record.from());
        self.position.place(record.to(), record.placed());
        self.position.advance_turn();
        self.in_check = record.gives_check();
        Ok(())
    }

    /// Classify the position for the side to move.
    pub fn status(&self) -> Status {
        let side = self.turn();
        let in_check = self.is_in_check(side);
        let can_move = self.has_any_legal_move(side);
        match (in_check, can_move) {
            (true, false) => Status::Checkmate(side),
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check(side),
            (false, true) => Status::Ongoing,
        }
    }

    /// Checkmate, stalemate, or a king missing from the board; no further
    /// moves are processed once this holds.
    pub fn is_over(&self) -> bool {
        !self.has_both_kings() || self.status().is_terminal()
    }

    pub fn result(&self) -> Option<GameResult> {
        match (self.king(White), self.king(Black)) {
            (Some(_), None) => return Some(GameResult::Win(White, WinReason::KingCaptured)),
            (None, Some(_)) => return Some(GameResult::Win(Black, WinReason::KingCaptured)),
            (None, None) => return None,
            (Some(_), Some(_)) => {}
        }
        match self.status() {
            Status::Checkmate(side) => Some(GameResult::Win(!side, WinReason::CheckMate)),
            Status::Stalemate => Some(GameResult::Draw(DrawReason::StaleMate)),
            _ => None,
        }
    }

    /// Cached check flag for the side to move; kept in sync by
    /// submit/undo/redo.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }
    #[inline]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
    /// Count of applied moves; also the position of the history cursor.
    #[inline]
    pub fn move_index(&self) -> usize {
        self.history.cursor().value()
    }
    pub fn history(&self) -> &History {
        &self.history
    }

    /// 64-character board snapshot (see [`Position::render`]).
    pub fn render(&self) -> String {
        self.position.render()
    }

    /// Legal destinations for the piece on `from`, empty when it is not
    /// the owner's turn.
    pub fn move_destinations(&self, from: Square) -> Vec<Square> {
        self.legal_destinations(from)
    }
}

#[cfg(test)]
impl GameState {
    pub(crate) fn with_position(position: Position) -> Self {
        let in_check = position.is_in_check(position.turn());
        Self {
            position,
            history: History::new(),
            in_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;
    use strum::IntoEnumIterator;
    use Square::*;

    fn mv(text: &str) -> Move {
        Move::try_from_string(text).unwrap()
    }

    fn kings_only(white: Square, black: Square) -> Position {
        let mut position = Position::new();
        for square in Square::iter() {
            position.remove(square);
        }
        position.place(white, Material::WK);
        position.place(black, Material::BK);
        position
    }

    #[test]
    fn test_opening_move_accepted() {
        let mut game = GameState::new();
        let move_id = game.submit_move(mv("e2e4")).unwrap();
        assert_eq!(move_id, MoveId::START);
        assert_eq!(game.turn(), Black);
        assert_eq!(game.status(), Status::Ongoing);
        assert_eq!(game.move_index(), 1);
        assert!(game.can_undo());
        assert!(!game.can_redo());
    }

    #[test]
    fn test_overlong_pawn_move_rejected() {
        let mut game = GameState::new();
        let before = game.render();
        assert!(game.submit_move(mv("e2e5")).is_err());
        assert_eq!(game.render(), before);
        assert_eq!(game.turn(), White);
        assert_eq!(game.move_index(), 0);
    }

    #[test]
    fn test_rejection_is_a_no_op() {
        let mut game = GameState::new();
        game.submit_move(mv("e2e4")).unwrap();
        let before = game.render();
        let history_len = game.history().len();
        // White piece, but it is Black's turn
        assert!(game.submit_move(mv("d2d4")).is_err());
        assert_eq!(game.render(), before);
        assert_eq!(game.history().len(), history_len);
        assert_eq!(game.turn(), Black);
    }

    #[test]
    fn test_self_check_rejected() {
        let mut game = GameState::new();
        game.submit_move(mv("e2e4")).unwrap();
        game.submit_move(mv("e7e5")).unwrap();
        game.submit_move(mv("d1h5")).unwrap();
        // Black's f-pawn is pinned against the king by the queen on h5
        let before = game.render();
        let err = game.submit_move(mv("f7f6")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::ExposesKing)
        );
        assert_eq!(game.render(), before);
    }

    #[test]
    fn test_capture_and_undo() {
        let mut game = GameState::new();
        game.submit_move(mv("e2e4")).unwrap();
        game.submit_move(mv("d7d5")).unwrap();
        game.submit_move(mv("e4d5")).unwrap();
        let record = game.history().last_applied().unwrap();
        assert!(record.is_capture());
        assert_eq!(record.captured(), Some(Material::BP));

        game.undo().unwrap();
        assert_eq!(game.contents(E4), Some(Material::WP));
        assert_eq!(game.contents(D5), Some(Material::BP));
        assert_eq!(game.turn(), White);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut game = GameState::new();
        let moves = ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4"];
        let mut renders = vec![game.render()];
        for text in moves {
            game.submit_move(mv(text)).unwrap();
            renders.push(game.render());
        }
        for expected in renders.iter().rev().skip(1) {
            game.undo().unwrap();
            assert_eq!(game.render(), *expected);
        }
        assert!(!game.can_undo());
        for expected in renders.iter().skip(1) {
            game.redo().unwrap();
            assert_eq!(game.render(), *expected);
        }
        assert!(!game.can_redo());
        assert_eq!(game.turn(), Black);
    }

    #[test]
    fn test_undo_restores_check_flag() {
        let mut game = GameState::new();
        game.submit_move(mv("e2e4")).unwrap();
        game.submit_move(mv("d7d5")).unwrap();
        // Bb5+ against the black king
        game.submit_move(mv("f1b5")).unwrap();
        assert!(game.in_check());
        assert_eq!(game.status(), Status::Check(Black));
        game.undo().unwrap();
        assert!(!game.in_check());
        game.redo().unwrap();
        assert!(game.in_check());
    }

    #[test]
    fn test_branching_truncates_redo() {
        let mut game = GameState::new();
        game.submit_move(mv("e2e4")).unwrap();
        game.submit_move(mv("e7e5")).unwrap();
        game.undo().unwrap();
        game.undo().unwrap();
        assert!(game.can_redo());
        game.submit_move(mv("d2d4")).unwrap();
        assert!(!game.can_redo());
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_undo_redo_boundaries_reject() {
        let mut game = GameState::new();
        assert!(game.undo().is_err());
        assert!(game.redo().is_err());
        game.submit_move(mv("e2e4")).unwrap();
        assert!(game.redo().is_err());
    }

    #[test]
    fn test_fools_mate() {
        let mut game = GameState::new();
        game.submit_move(mv("f2f3")).unwrap();
        game.submit_move(mv("e7e5")).unwrap();
        game.submit_move(mv("g2g4")).unwrap();
        game.submit_move(mv("d8h4")).unwrap();

        assert_eq!(game.status(), Status::Checkmate(White));
        assert_eq!(game.status().to_string(), "checkmate_white");
        assert!(!game.has_any_legal_move(White));
        assert!(game.is_over());
        assert_eq!(
            game.result(),
            Some(GameResult::Win(Black, WinReason::CheckMate))
        );
        let record = game.history().last_applied().unwrap();
        assert!(record.gives_check());
        assert!(record.gives_mate());
        // no further moves are processed
        assert!(game.submit_move(mv("a2a3")).is_err());
    }

    #[test]
    fn test_stalemate() {
        // Black to move: king cornered on a8 by the pawn's cover and the
        // white king, but not in check
        let position = kings_only(B6, A8)
            .set_contents(A7, Some(Material::WP))
            .set_next_move_id(MoveId::START.next());
        let game = GameState::with_position(position);
        assert_eq!(game.status(), Status::Stalemate);
        assert_eq!(game.status().to_string(), "stalemate");
        assert!(game.is_over());
        assert_eq!(game.result(), Some(GameResult::Draw(DrawReason::StaleMate)));
    }

    #[test]
    fn test_terminal_exclusivity() {
        let mut game = GameState::new();
        let moves = ["f2f3", "e7e5", "g2g4", "d8h4"];
        for text in moves {
            let status = game.status();
            let exclusive = [
                matches!(status, Status::Ongoing),
                matches!(status, Status::Check(_)),
                matches!(status, Status::Checkmate(_)),
                matches!(status, Status::Stalemate),
            ];
            assert_eq!(exclusive.iter().filter(|&&held| held).count(), 1);
            game.submit_move(mv(text)).unwrap();
        }
        // checkmate implies check
        assert!(game.status().is_check());
        assert!(game.in_check());
    }

    #[test]
    fn test_promotion_to_queen() {
        let position = kings_only(E1, E8)
            .set_contents(B7, Some(Material::WP))
            .set_contents(A8, Some(Material::BR));
        let mut game = GameState::with_position(position);
        game.submit_move(mv("b7a8")).unwrap();

        assert_eq!(game.contents(A8), Some(Material::WQ));
        let record = game.history().last_applied().unwrap();
        assert!(record.is_promotion());
        assert_eq!(record.promoted(), Some(Material::WQ));
        assert_eq!(record.captured(), Some(Material::BR));

        game.undo().unwrap();
        assert_eq!(game.contents(B7), Some(Material::WP));
        assert_eq!(game.contents(A8), Some(Material::BR));

        game.redo().unwrap();
        assert_eq!(game.contents(A8), Some(Material::WQ));
        assert_eq!(game.contents(B7), None);
    }

    #[test]
    fn test_missing_king_is_terminal() {
        let position = Position::new().set_contents(E8, None);
        let game = GameState::with_position(position);
        assert!(game.is_over());
        assert_eq!(
            game.result(),
            Some(GameResult::Win(White, WinReason::KingCaptured))
        );
        let mut game = game;
        assert!(game.submit_move(mv("e2e4")).is_err());
    }

    #[test]
    fn test_reset() {
        let mut game = GameState::new();
        game.submit_move(mv("e2e4")).unwrap();
        game.submit_move(mv("e7e5")).unwrap();
        game.reset();
        assert_eq!(game.render(), GameState::new().render());
        assert_eq!(game.move_index(), 0);
        assert!(!game.can_undo());
        assert!(!game.can_redo());
        assert_eq!(game.turn(), White);
    }

    #[test]
    fn test_move_destinations() {
        let game = GameState::new();
        assert_eq!(game.move_destinations(E2), vec![E4, E3]);
        assert!(game.move_destinations(E7).is_empty());
    }
}
