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

//! Interactive terminal host for the rules engine. All input validation
//! happens here; the core only ever sees well-formed squares.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use rewind_chess::board::notation;
#[cfg(feature = "random")]
use rewind_chess::GameId;
use rewind_chess::{GameState, Move, Turn};

fn display_board(game: &GameState) {
    let snapshot = game.render();
    let cells: Vec<char> = snapshot.chars().collect();
    println!("  a b c d e f g h");
    println!(" +-+-+-+-+-+-+-+-+");
    for row in 0..8 {
        let rank = 8 - row;
        print!("{rank}|");
        for col in 0..8 {
            print!("{}|", cells[row * 8 + col]);
        }
        println!("{rank}");
        println!(" +-+-+-+-+-+-+-+-+");
    }
    println!("  a b c d e f g h");
}

fn main() -> Result<()> {
    let mut game = GameState::new();

    #[cfg(feature = "random")]
    println!("Session {}", GameId::random().value());
    println!("Enter moves as origin and destination (e.g. e2e4)");
    println!("Commands: undo, redo, history, raw, status, new, quit");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        display_board(&game);
        println!("Status: {}", game.status());
        if game.is_over() {
            if let Some(result) = game.result() {
                println!("Game ended: {result:?}");
            }
            println!("Moves: {}", notation::history(game.history().records()));
            break;
        }

        print!("{} to move: ", game.turn());
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "quit" => break,
            "new" => game.reset(),
            "undo" => {
                if let Err(err) = game.undo() {
                    println!("{err}");
                }
            }
            "redo" => {
                if let Err(err) = game.redo() {
                    println!("{err}");
                }
            }
            "history" => println!("{}", notation::history(game.history().records())),
            "raw" => println!("{}", notation::raw_history(game.history().records())),
            "status" => println!("{}", game.status()),
            text => match Move::try_from_string(text) {
                Some(mv) => {
                    if let Err(err) = game.submit_move(mv) {
                        println!("Invalid move: {err}");
                    }
                }
                None => println!("Invalid input! Use origin+destination like 'e2e4'."),
            },
        }
    }
    Ok(())
}
