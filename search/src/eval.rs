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

//! Static evaluation of positions.
//!
//! Corvid's evaluation is a flat sum of material and central occupancy,
//! scored from the perspective of the side to move. There is no tapering
//! between midgame and endgame phases and no piece-square tables: the
//! evaluation exists to give the search something to compare leaves by, not
//! to play strong chess on its own.

use corvid_core::{
    movegen,
    movegen::tables::{king_attacks, knight_attacks, pawn_attacks},
    Bitboard, Board, Color, Game, Piece,
};

pub type Score = i32;

/// Centipawn value of each piece type, indexed by `Piece as usize`.
pub const PIECE_VALUES: [Score; Piece::NUM_TYPES] = [100, 350, 350, 500, 900, 0];

/// The sixteen central squares (files c-f, ranks 3-6).
pub const CENTER_MASK: Bitboard = Bitboard::new(0x0000_3C3C_3C3C_0000);

/// Bonus per central square a piece attacks (not per piece standing on one).
const CENTER_BONUS: Score = 1;

/// Once this few pieces remain on the board, central occupancy stops being a
/// meaningful signal and the center bonus is switched off.
const CENTER_BONUS_MIN_OCCUPANCY: u32 = 10;

pub const MATE_PENALTY: Score = 13500;
pub const STALEMATE_PENALTY: Score = 7200;

#[must_use]
/// Evaluate `game` from the perspective of the side to move: positive favors
/// the mover, negative favors the opponent.
pub fn evaluate(game: &Game) -> Score {
    if !movegen::has_legal_moves(game) {
        return if game.check_stats().in_check() {
            -MATE_PENALTY
        } else {
            -STALEMATE_PENALTY
        };
    }

    let side = game.side_to_move();
    let center_enabled = game.board().occupancy().len() as u32 > CENTER_BONUS_MIN_OCCUPANCY;
    side_score(game, side, center_enabled) - side_score(game, !side, center_enabled)
}

fn side_score(game: &Game, side: Color, center_enabled: bool) -> Score {
    let board = game.board();
    let occupancy = board.occupancy();
    let mut score = 0;

    for &piece in &Piece::ALL {
        let count = board.piece_color_occupancy(piece, side).len() as Score;
        score += count * PIECE_VALUES[piece as usize];
    }

    if center_enabled {
        score += centre_control(board, occupancy, side);
    }

    score
}

/// Sum, over every one of `side`'s pieces, the number of central squares that
/// piece currently attacks from its square.
fn centre_control(board: &Board, occupancy: Bitboard, side: Color) -> Score {
    let mut control = 0;

    for sq in board.piece_color_occupancy(Piece::Pawn, side) {
        control += (pawn_attacks(sq, side) & CENTER_MASK).len() as Score;
    }
    for sq in board.piece_color_occupancy(Piece::Knight, side) {
        control += (knight_attacks(sq) & CENTER_MASK).len() as Score;
    }
    for sq in board.piece_color_occupancy(Piece::Bishop, side) {
        control += (movegen::slider_attacks(Piece::Bishop, occupancy, sq) & CENTER_MASK).len() as Score;
    }
    for sq in board.piece_color_occupancy(Piece::Rook, side) {
        control += (movegen::slider_attacks(Piece::Rook, occupancy, sq) & CENTER_MASK).len() as Score;
    }
    for sq in board.piece_color_occupancy(Piece::Queen, side) {
        control += (movegen::slider_attacks(Piece::Queen, occupancy, sq) & CENTER_MASK).len() as Score;
    }
    for sq in board.piece_color_occupancy(Piece::King, side) {
        control += (king_attacks(sq) & CENTER_MASK).len() as Score;
    }

    control * CENTER_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_core::fen::parse_fen;

    #[test]
    fn start_position_is_balanced() {
        let game = Game::new();
        assert_eq!(evaluate(&game), 0);
    }

    #[test]
    fn missing_queen_favors_the_opponent() {
        let game = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1").unwrap();
        assert!(evaluate(&game) < 0);
    }

    #[test]
    fn checkmate_scores_the_mate_penalty() {
        let game = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(evaluate(&game), -MATE_PENALTY);
    }

    #[test]
    fn stalemate_scores_the_stalemate_penalty() {
        let game = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(evaluate(&game), -STALEMATE_PENALTY);
    }
}
