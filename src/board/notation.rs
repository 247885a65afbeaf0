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

use std::fmt::Write;

use super::history::MoveRecord;

/// Render the record list as numbered move pairs: piece letter prefix
/// (pawns bare), `-` or `x` between the squares, `=Q` on promotion, `#`
/// on mate else `+` on check. White and Black halves of a pair are
/// separated by a space, pairs by ", ".
pub fn history(records: &[MoveRecord]) -> String {
    let mut out = String::new();
    for (index, record) in records.iter().enumerate() {
        if index % 2 == 0 {
            let _ = write!(out, "{}. ", index / 2 + 1);
        }
        let moved = record.moved();
        if !moved.piece().is_pawn() {
            out.push(moved.piece().letter());
        }
        let _ = write!(out, "{}", record.from());
        out.push(if record.is_capture() { 'x' } else { '-' });
        let _ = write!(out, "{}", record.to());
        if record.is_promotion() {
            out.push('=');
            out.push(record.placed().piece().letter());
        }
        if record.gives_mate() {
            out.push('#');
        } else if record.gives_check() {
            out.push('+');
        }
        if index + 1 < records.len() {
            out.push_str(if index % 2 == 0 { " " } else { ", " });
        }
    }
    out
}

/// Machine-replay form: comma-separated origin+destination pairs
/// ("e2e4,e7e5,...").
pub fn raw_history(records: &[MoveRecord]) -> String {
    let moves: Vec<String> = records
        .iter()
        .map(|record| format!("{}{}", record.from(), record.to()))
        .collect();
    moves.join(",")
}
