/*
  Corvid, a chess move-generation and search core.
  Copyright (C) 2026 The Corvid Authors (see AUTHORS.md file)

  Corvid is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Corvid is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Interactive REPL front-end for Corvid.
//!
//! Reads one command per line from standard input and prints the result to
//! standard output, flushing after every prompt so the front-end works the
//! same whether stdout is a terminal or a pipe.

use std::{
    io::{stdin, stdout, Write},
    process::ExitCode,
    time::Duration,
};

use corvid_core::{
    algebraic::{format_move, parse_move},
    fen::parse_fen,
    movegen,
    perft::{perft, perft_with_stats},
    Game,
};
use corvid_search::iterative_deepening;

const DEFAULT_SEARCH_DEPTH: u8 = 6;
const DEFAULT_SEARCH_BUDGET: Duration = Duration::from_secs(5);

fn main() -> ExitCode {
    let mut game = Game::new();
    let mut line = String::new();

    loop {
        print!("corvid> ");
        if stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        line.clear();
        match stdin().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {e}");
                return ExitCode::FAILURE;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        match command {
            "quit" => return ExitCode::SUCCESS,
            "board" => print!("{}", game.board()),
            "moves" => print_moves(&game),
            "move" => {
                if !handle_move(&mut game, rest) {
                    return ExitCode::FAILURE;
                }
            }
            "analysis" => handle_analysis(&mut game),
            "perft" => {
                if !handle_perft(&mut game, rest) {
                    return ExitCode::FAILURE;
                }
            }
            "perftfull" => {
                if !handle_perftfull(&mut game, rest) {
                    return ExitCode::FAILURE;
                }
            }
            "fen" => {
                if !handle_fen(&mut game, rest) {
                    return ExitCode::FAILURE;
                }
            }
            other => println!("unrecognized command '{other}'"),
        }
    }
}

fn print_moves(game: &Game) {
    for mv in movegen::legal_moves(game) {
        println!("{}", format_move(mv));
    }
}

fn handle_move(game: &mut Game, text: &str) -> bool {
    if text.is_empty() {
        eprintln!("usage: move <algebraic>");
        return false;
    }
    match parse_move(text, game) {
        Some(mv) => {
            game.do_move(mv);
            reply_with_engine_move(game);
            true
        }
        None => {
            println!("illegal move: {text}");
            true
        }
    }
}

fn reply_with_engine_move(game: &mut Game) {
    match iterative_deepening(game, DEFAULT_SEARCH_DEPTH, DEFAULT_SEARCH_BUDGET) {
        Some(info) => {
            game.do_move(info.best_move);
            println!("{}", format_move(info.best_move));
        }
        None => println!("no legal moves"),
    }
}

fn handle_analysis(game: &mut Game) {
    match iterative_deepening(game, DEFAULT_SEARCH_DEPTH, DEFAULT_SEARCH_BUDGET) {
        Some(info) => println!(
            "bestmove {} score {} depth {} nodes {}",
            format_move(info.best_move),
            info.score,
            info.depth,
            info.nodes
        ),
        None => println!("no legal moves"),
    }
}

fn handle_perft(game: &mut Game, arg: &str) -> bool {
    let Some(depth) = parse_depth(arg) else {
        eprintln!("usage: perft <depth>");
        return false;
    };
    println!("{}", perft(game, depth));
    true
}

fn handle_perftfull(game: &mut Game, arg: &str) -> bool {
    let Some(depth) = parse_depth(arg) else {
        eprintln!("usage: perftfull <depth>");
        return false;
    };
    let stats = perft_with_stats(game, depth);
    println!(
        "nodes {} captures {} en_passants {} castles {} promotions {} checks {} checkmates {}",
        stats.count, stats.captures, stats.en_passants, stats.castles, stats.promotions, stats.checks, stats.checkmates
    );
    true
}

fn parse_depth(arg: &str) -> Option<u32> {
    arg.parse().ok()
}

fn handle_fen(game: &mut Game, text: &str) -> bool {
    if text.is_empty() {
        eprintln!("usage: fen <fen string>");
        return false;
    }
    match parse_fen(text) {
        Ok(parsed) => {
            *game = parsed;
            true
        }
        Err(e) => {
            println!("invalid fen: {e}");
            true
        }
    }
}
