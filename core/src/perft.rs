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

//! Perft: exact leaf-node counting, used to validate the move generator bit
//! for bit against known node counts at fixed depths.

use super::{game::Game, movegen};

#[must_use]
/// Count the leaves of the legal-move tree rooted at `game`, `depth` plies
/// deep. `perft(game, 0) == 1` (the empty line counts as one leaf).
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = movegen::legal_moves(game);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        game.do_move(mv);
        nodes += perft(game, depth - 1);
        game.unmake();
    }
    nodes
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftStats {
    pub count: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

#[must_use]
pub fn perft_with_stats(game: &mut Game, depth: u32) -> PerftStats {
    let mut stats = PerftStats::default();
    if depth == 0 {
        stats.count = 1;
        return stats;
    }
    perft_search(game, depth, &mut stats);
    stats
}

fn perft_search(game: &mut Game, depth: u32, stats: &mut PerftStats) {
    let moves = movegen::legal_moves(game);
    for mv in moves {
        if depth == 1 {
            stats.count += 1;
            if mv.is_capture() {
                stats.captures += 1;
            }
            if mv.is_en_passant() {
                stats.en_passants += 1;
            }
            if mv.is_castle() {
                stats.castles += 1;
            }
            if mv.is_promotion() {
                stats.promotions += 1;
            }
            game.do_move(mv);
            if game.check_stats().in_check() {
                stats.checks += 1;
                if !movegen::has_legal_moves(game) {
                    stats.checkmates += 1;
                }
            }
            game.unmake();
        } else {
            game.do_move(mv);
            perft_search(game, depth - 1, stats);
            game.unmake();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    #[test]
    fn depth_zero_is_one_leaf() {
        let mut game = Game::new();
        assert_eq!(perft(&mut game, 0), 1);
    }

    #[test]
    fn start_position_matches_known_node_counts() {
        let mut game = Game::new();
        assert_eq!(perft(&mut game, 1), 20);
        assert_eq!(perft(&mut game, 2), 400);
        assert_eq!(perft(&mut game, 3), 8902);
    }

    #[test]
    fn kiwipete_matches_known_node_counts() {
        let mut game =
            parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -").unwrap();
        assert_eq!(perft(&mut game, 1), 48);
        assert_eq!(perft(&mut game, 2), 2039);
    }

    #[test]
    fn stats_breakdown_matches_plain_count() {
        let mut game = Game::new();
        let stats = perft_with_stats(&mut game, 2);
        assert_eq!(stats.count, 400);
    }

    #[test]
    fn does_not_mutate_the_game_it_counts() {
        let mut game = Game::new();
        let before = game.hash();
        perft(&mut game, 3);
        assert_eq!(game.hash(), before);
        assert_eq!(game.history_len(), 0);
    }
}
