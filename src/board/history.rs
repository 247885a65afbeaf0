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
use thiserror::Error;

use super::material::Material;
use super::position::MoveId;
use super::square::Square;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("No moves to undo")]
    NothingToUndo,
    #[error("No moves to redo")]
    NothingToRedo,
}
use HistoryError::*;

/// One applied move, immutable once recorded. Stores the pre-move identity
/// of the mover and the captured contents, which is everything undo needs;
/// `promoted` is the queen that replaced a pawn reaching the far rank.
/// The check flags describe the position after this move was applied.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    from: Square,
    to: Square,
    moved: Material,
    captured: Option<Material>,
    promoted: Option<Material>,
    gives_check: bool,
    gives_mate: bool,
}

impl MoveRecord {
    pub fn new(
        from: Square,
        to: Square,
        moved: Material,
        captured: Option<Material>,
        promoted: Option<Material>,
        gives_check: bool,
        gives_mate: bool,
    ) -> Self {
        Self {
            from,
            to,
            moved,
            captured,
            promoted,
            gives_check,
            gives_mate,
        }
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }
    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }
    #[inline]
    pub fn moved(&self) -> Material {
        self.moved
    }
    #[inline]
    pub fn captured(&self) -> Option<Material> {
        self.captured
    }
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
    #[inline]
    pub fn promoted(&self) -> Option<Material> {
        self.promoted
    }
    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promoted.is_some()
    }
    /// What ends up on the destination square: the promoted queen if the
    /// move promoted, the mover otherwise.
    #[inline]
    pub fn placed(&self) -> Material {
        self.promoted.unwrap_or(self.moved)
    }
    #[inline]
    pub fn gives_check(&self) -> bool {
        self.gives_check
    }
    #[inline]
    pub fn gives_mate(&self) -> bool {
        self.gives_mate
    }
}

/// Linear, truncatable move history. The cursor counts applied records;
/// records past it form the redo tail, which submitting a new move
/// discards (the buffer never branches).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct History {
    records: Vec<MoveRecord>,
    cursor: MoveId,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    #[inline]
    pub fn cursor(&self) -> MoveId {
        self.cursor
    }
    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.cursor.at_start()
    }
    #[inline]
    pub fn can_redo(&self) -> bool {
        self.cursor.value() < self.records.len()
    }
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// The most recently applied record, if any moves remain applied.
    pub fn last_applied(&self) -> Option<&MoveRecord> {
        let index = self.cursor.value().checked_sub(1)?;
        self.records.get(index)
    }

    /// Discard any redo tail, then append; the cursor moves over the new
    /// record.
    pub fn push(&mut self, record: MoveRecord) {
        self.records.truncate(self.cursor.value());
        self.records.push(record);
        self.cursor = self.cursor.next();
    }

    /// Step the cursor back, yielding the record to revert.
    pub fn step_back(&mut self) -> Result<MoveRecord, HistoryError> {
        if !self.can_undo() {
            return Err(NothingToUndo);
        }
        self.cursor = self.cursor.prev();
        Ok(self.records[self.cursor.value()])
    }

    /// Step the cursor forward, yielding the record to re-apply.
    pub fn step_forward(&mut self) -> Result<MoveRecord, HistoryError> {
        if !self.can_redo() {
            return Err(NothingToRedo);
        }
        let record = self.records[self.cursor.value()];
        self.cursor = self.cursor.next();
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = MoveId::START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::material::Material;
    use Square::*;

    fn quiet(from: Square, to: Square, moved: Material) -> MoveRecord {
        MoveRecord::new(from, to, moved, None, None, false, false)
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.last_applied().is_none());
        assert!(history.cursor().at_start());
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut history = History::new();
        history.push(quiet(E2, E4, Material::WP));
        history.push(quiet(E7, E5, Material::BP));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor().value(), 2);
        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.last_applied().unwrap().from(), E7);
    }

    #[test]
    fn test_step_back_and_forward() {
        let mut history = History::new();
        history.push(quiet(E2, E4, Material::WP));
        history.push(quiet(E7, E5, Material::BP));

        let record = history.step_back().unwrap();
        assert_eq!(record.from(), E7);
        assert!(history.can_redo());
        assert_eq!(history.last_applied().unwrap().from(), E2);

        let record = history.step_forward().unwrap();
        assert_eq!(record.from(), E7);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_boundaries_reject() {
        let mut history = History::new();
        assert_eq!(history.step_back(), Err(HistoryError::NothingToUndo));
        history.push(quiet(E2, E4, Material::WP));
        assert_eq!(history.step_forward(), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn test_push_truncates_redo_tail() {
        let mut history = History::new();
        history.push(quiet(E2, E4, Material::WP));
        history.push(quiet(E7, E5, Material::BP));
        history.step_back().unwrap();

        history.push(quiet(D7, D5, Material::BP));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.records()[1].from(), D7);
    }

    #[test]
    fn test_record_placed() {
        let record = quiet(E2, E4, Material::WP);
        assert_eq!(record.placed(), Material::WP);
        let record = MoveRecord::new(
            A7,
            A8,
            Material::WP,
            None,
            Some(Material::WQ),
            false,
            false,
        );
        assert!(record.is_promotion());
        assert_eq!(record.placed(), Material::WQ);
    }
}
