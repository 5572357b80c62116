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

//! Primary search algorithm: negamax alpha-beta with a quiescence extension
//! at the leaves, driven by iterative deepening against a wall-clock budget.

use std::time::Duration;

use corvid_core::{movegen, Game, Move};

use crate::{
    eval::{evaluate, Score},
    limit::SearchLimit,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The ways a search can fail to produce a result.
pub enum SearchError {
    /// The position passed to `search` had no legal moves to search.
    NoLegalMoves,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The outcome of a completed search at a fixed depth.
pub struct SearchInfo {
    pub best_move: Move,
    pub score: Score,
    pub depth: u8,
    pub nodes: u64,
}

/// Search `game` to exactly `depth` plies, returning the best move found and
/// its score. `game` is left exactly as it was found: every recursive
/// descent is undone before `search` returns.
pub fn search(game: &mut Game, depth: u8, limit: &mut SearchLimit) -> Result<SearchInfo, SearchError> {
    let moves = movegen::legal_moves(game);
    let mut best_move = *moves.first().ok_or(SearchError::NoLegalMoves)?;
    let mut alpha = Score::MIN + 1;
    let beta = Score::MAX - 1;
    let mut nodes = 1;

    for mv in moves {
        game.do_move(mv);
        let val = -negamax(game, depth.saturating_sub(1), -beta, -alpha, limit, &mut nodes);
        game.unmake();

        if val > alpha {
            alpha = val;
            best_move = mv;
        }
    }

    limit.add_nodes(nodes);
    Ok(SearchInfo {
        best_move,
        score: alpha,
        depth,
        nodes,
    })
}

fn negamax(game: &mut Game, depth: u8, mut alpha: Score, beta: Score, limit: &SearchLimit, nodes: &mut u64) -> Score {
    *nodes += 1;

    if depth == 0 || limit.expired() {
        return quiesce(game, alpha, beta, limit, nodes);
    }

    let moves = movegen::legal_moves(game);
    if moves.is_empty() {
        return evaluate(game);
    }

    for mv in moves {
        game.do_move(mv);
        let val = -negamax(game, depth - 1, -beta, -alpha, limit, nodes);
        game.unmake();

        if val >= beta {
            return val;
        }
        if val > alpha {
            alpha = val;
        }
    }

    alpha
}

/// Extend search along capturing lines past the nominal depth limit, so the
/// static evaluator is never asked to judge a position where a piece hangs
/// mid-capture.
fn quiesce(game: &mut Game, mut alpha: Score, beta: Score, limit: &SearchLimit, nodes: &mut u64) -> Score {
    *nodes += 1;

    let stand_pat = evaluate(game);
    if stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if limit.expired() {
        return alpha;
    }

    for mv in movegen::legal_captures(game) {
        game.do_move(mv);
        let val = -quiesce(game, -beta, -alpha, limit, nodes);
        game.unmake();

        if val >= beta {
            return val;
        }
        if val > alpha {
            alpha = val;
        }
    }

    alpha
}

#[must_use]
/// Search progressively deeper, depth by depth, until `max_depth` is reached
/// or `time_budget` expires. Only whole depths are kept: a depth that starts
/// before the budget expires but does not finish is discarded, since a
/// partially searched depth cannot be trusted to report its true best move.
pub fn iterative_deepening(game: &mut Game, max_depth: u8, time_budget: Duration) -> Option<SearchInfo> {
    let mut limit = SearchLimit::new(time_budget);
    let mut best: Option<SearchInfo> = None;

    for depth in 1..=max_depth {
        if limit.expired() {
            break;
        }
        match search(game, depth, &mut limit) {
            Ok(info) => best = Some(info),
            Err(SearchError::NoLegalMoves) => break,
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_core::fen::parse_fen;

    #[test]
    fn finds_mate_in_one() {
        // Black to move is down to a lone king; white has a queen one move
        // from delivering checkmate on the back rank.
        let mut game = parse_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut limit = SearchLimit::new(Duration::from_secs(5));
        let info = search(&mut game, 2, &mut limit).unwrap();
        assert!(info.score > 1000);
    }

    #[test]
    fn search_restores_the_game_it_was_given() {
        let mut game = Game::new();
        let before = game.hash();
        let mut limit = SearchLimit::new(Duration::from_secs(5));
        search(&mut game, 2, &mut limit).unwrap();
        assert_eq!(game.hash(), before);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn no_legal_moves_is_an_error() {
        let mut game = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        let mut limit = SearchLimit::new(Duration::from_secs(5));
        assert_eq!(search(&mut game, 2, &mut limit), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn iterative_deepening_returns_some_result_within_budget() {
        let mut game = Game::new();
        let info = iterative_deepening(&mut game, 3, Duration::from_secs(5)).unwrap();
        assert!(info.depth >= 1);
    }
}
