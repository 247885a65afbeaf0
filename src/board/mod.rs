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

//! Rules engine for standard chess with a rewindable move history
//!
//! A _game_ tracks the state of one chess board and provides the core
//! mechanisms to play, rewind and replay a game of chess. The following
//! features are supported:
//!
//! [x] Standard piece movement, capture and path-clearance rules
//! [x] Check detection, checkmate and stalemate classification
//! [x] Automatic promotion to a queen on the far rank
//! [x] Linear move history with undo/redo and truncation on branching
//! [x] Fixed-order board snapshots for host rendering
//! [x] Human-readable and machine-replay history exports
//! [ ] Castling
//! [ ] En passant capture
//! [ ] Underpromotion (promotion always yields a queen)
//! [ ] Threefold-repetition and fifty-move draws
//! [ ] SAN parsing or disambiguation
//! [ ] Search or evaluation of any kind
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board, identified by a `File` ('a'..'h') and a `Rank`
//!   (1..8). Squares are laid out row-major from a8, so a square's
//!   `rank_index` and `file_index` match the (row, column) convention
//!   of UI hosts, with row 0 being Black's back rank.
//!
//! * `Material` is a piece of a specific color. `Piece` has six
//!   variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and `Pawn`;
//!   `Color` is `White` or `Black`. Each material value maps to one
//!   snapshot symbol (uppercase White, lowercase Black).
//!
//! * A `Position` holds the contents of the 64 squares plus the count
//!   of applied moves (`MoveId`), whose parity is the side to move. It
//!   knows nothing about legality; the `Pos` trait layers shared read
//!   accessors over it.
//!
//! * The `Attacks` and `Rules` traits implement the attack oracle and
//!   the move validator. Self-check tests run against a private copy of
//!   the position, so readers never observe a simulated move.
//!
//! * A `MoveRecord` captures everything needed to revert or re-apply
//!   one move; `History` keeps the record list and the cursor. The redo
//!   tail is a single line: submitting a new move after undoing
//!   discards the abandoned future rather than forking it.
//!
//! * `GameState` ties the pieces together: it validates and applies
//!   moves, classifies the resulting position (`Status`), and exposes
//!   undo/redo plus the board, status and history exports a host needs.

mod attacks;
mod history;
mod material;
mod moves;
pub mod notation;
mod play;
mod position;
mod square;

pub use attacks::*;
pub use history::*;
pub use material::*;
pub use moves::*;
pub use play::*;
pub use position::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
