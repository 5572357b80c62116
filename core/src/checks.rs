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

//! Check and pin bookkeeping, recomputed after every move.
//!
//! `CheckStats` is the legality oracle the move generator consults: which
//! squares currently give check, which of the side-to-move's own pieces are
//! pinned (and to what line), and which squares a blocking or capturing move
//! would have to land on to resolve a check.

use super::{
    bitboard::Bitboard,
    board::Board,
    color::Color,
    magic::MAGIC,
    movegen::tables::{king_attacks, knight_attacks, pawn_attacks},
    piece::Piece,
    square::Square,
};

#[derive(Clone, Copy, Debug)]
pub struct CheckStats {
    /// The side-to-move's king square (the defended king).
    pub king_square: Square,
    /// The opponent's king square (the attacked king).
    pub enemy_king_square: Square,
    /// Enemy pieces currently giving check.
    pub checkers: Bitboard,
    /// Own pieces pinned to the king, keyed by their square.
    pub pinned: Bitboard,
    /// For each pinned piece's square, the full line (through the king) it
    /// is constrained to move along. Queried via `pin_line`.
    pin_lines: [Bitboard; 64],
    /// Our own pieces that, if moved off their current square, would uncover
    /// an attack from one of our sliders onto the enemy king.
    pub discovered: Bitboard,
    /// For each piece type, the squares from which a piece of that type
    /// would give direct check to the enemy king, given current occupancy.
    /// Indexed by `piece as usize`; the king entry is always empty, since a
    /// king can never give check.
    check_giving_squares: [Bitboard; Piece::NUM_TYPES],
    /// Squares a non-king move must land on to address the current check:
    /// the checker's square, or (for a single sliding checker) any square
    /// between the checker and the king. `Bitboard::ALL` when not in check,
    /// since every move is legal with respect to check in that case.
    pub resolution_squares: Bitboard,
}

impl CheckStats {
    #[must_use]
    /// Recompute check and pin information for `side`'s king on `board`.
    pub fn compute(board: &Board, side: Color) -> CheckStats {
        let king_square = board
            .piece_color_occupancy(Piece::King, side)
            .into_iter()
            .next()
            .expect("a legal position always has exactly one king per side");
        let enemy = !side;
        let enemy_king_square = board
            .piece_color_occupancy(Piece::King, enemy)
            .into_iter()
            .next()
            .expect("a legal position always has exactly one king per side");
        let occupancy = board.occupancy();

        let mut checkers = Bitboard::EMPTY;
        checkers |= pawn_attacks(king_square, side) & board.piece_color_occupancy(Piece::Pawn, enemy);
        checkers |= knight_attacks(king_square) & board.piece_color_occupancy(Piece::Knight, enemy);
        checkers |= king_attacks(king_square) & board.piece_color_occupancy(Piece::King, enemy);
        let enemy_bishops = board.piece_color_occupancy(Piece::Bishop, enemy);
        let enemy_rooks = board.piece_color_occupancy(Piece::Rook, enemy);
        let enemy_queens = board.piece_color_occupancy(Piece::Queen, enemy);
        checkers |= MAGIC.bishop_attacks(occupancy, king_square) & (enemy_bishops | enemy_queens);
        checkers |= MAGIC.rook_attacks(occupancy, king_square) & (enemy_rooks | enemy_queens);

        let mut pinned = Bitboard::EMPTY;
        let mut pin_lines = [Bitboard::EMPTY; 64];

        // A piece is pinned iff it is the sole occupant between the king and
        // an enemy slider on a shared rank, file, or diagonal.
        let potential_pinners = (enemy_bishops | enemy_queens)
            .into_iter()
            .filter(|&sq| !(Bitboard::diagonal(king_square) & Bitboard::from(sq)).is_empty()
                || !(Bitboard::anti_diagonal(king_square) & Bitboard::from(sq)).is_empty())
            .chain((enemy_rooks | enemy_queens).into_iter().filter(|&sq| {
                sq.file() == king_square.file() || sq.rank() == king_square.rank()
            }));

        for pinner in potential_pinners {
            if !Bitboard::can_slide_attack(pinner, king_square) {
                continue;
            }
            let between = Bitboard::between(pinner, king_square);
            let blockers = between & occupancy;
            if blockers.has_single_bit() && !(blockers & board.color_occupancy(side)).is_empty() {
                let pin_sq = blockers.into_iter().next().unwrap();
                pinned.insert(pin_sq);
                pin_lines[pin_sq as usize] = Bitboard::line(pinner, king_square);
            }
        }

        let discovered = discovered_checkers(board, side, enemy_king_square, occupancy);
        let check_giving_squares = check_giving_squares(board, enemy_king_square, occupancy);

        let resolution_squares = match checkers.len() {
            0 => Bitboard::ALL,
            1 => {
                let checker_sq = checkers.into_iter().next().unwrap();
                checker_sq_mask(checker_sq, king_square, board, checker_sq)
            }
            _ => Bitboard::EMPTY, // double check: only the king may move
        };

        CheckStats {
            king_square,
            enemy_king_square,
            checkers,
            pinned,
            pin_lines,
            discovered,
            check_giving_squares,
            resolution_squares,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn in_double_check(&self) -> bool {
        self.checkers.more_than_one()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_pinned(&self, sq: Square) -> bool {
        self.pinned.contains(sq)
    }

    #[must_use]
    /// The line a pinned piece on `sq` is constrained to move along. Returns
    /// `Bitboard::ALL` for an unpinned square (an unconstrained mask is a
    /// safe identity element under intersection).
    pub fn pin_line(&self, sq: Square) -> Bitboard {
        if self.is_pinned(sq) {
            self.pin_lines[sq as usize]
        } else {
            Bitboard::ALL
        }
    }

    #[must_use]
    /// Would moving the piece on `from` to `to` leave it pinned-legal? A
    /// pinned piece may only move within its pin line.
    pub fn respects_pin(&self, from: Square, to: Square) -> bool {
        self.pin_line(from).contains(to)
    }

    #[must_use]
    /// Does capturing or blocking on `to` address the current check? Always
    /// true when not in check.
    pub fn resolves_check(&self, to: Square) -> bool {
        self.resolution_squares.contains(to)
    }

    #[must_use]
    /// Squares from which a `piece` of ours would give direct check to the
    /// enemy king, given current occupancy. Used to recognize a move as
    /// check-giving without having to make it and recompute from scratch.
    pub fn check_squares_for(&self, piece: Piece) -> Bitboard {
        self.check_giving_squares[piece as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Is `sq` one of our own pieces that would uncover a check on the enemy
    /// king if it moved off this square?
    pub fn is_discovered(&self, sq: Square) -> bool {
        self.discovered.contains(sq)
    }
}

/// Our pieces that, sitting between one of our sliders and the enemy king,
/// would uncover a check on that king if they moved off the line. Mirrors the
/// pin-detection loop in `compute`, but aimed at the enemy king with our own
/// sliders as the potential "pinners".
fn discovered_checkers(board: &Board, side: Color, enemy_king_square: Square, occupancy: Bitboard) -> Bitboard {
    let our_bishops = board.piece_color_occupancy(Piece::Bishop, side);
    let our_rooks = board.piece_color_occupancy(Piece::Rook, side);
    let our_queens = board.piece_color_occupancy(Piece::Queen, side);

    let candidates = (our_bishops | our_queens)
        .into_iter()
        .filter(|&sq| {
            !(Bitboard::diagonal(enemy_king_square) & Bitboard::from(sq)).is_empty()
                || !(Bitboard::anti_diagonal(enemy_king_square) & Bitboard::from(sq)).is_empty()
        })
        .chain((our_rooks | our_queens).into_iter().filter(|&sq| {
            sq.file() == enemy_king_square.file() || sq.rank() == enemy_king_square.rank()
        }));

    let mut discovered = Bitboard::EMPTY;
    for slider in candidates {
        if !Bitboard::can_slide_attack(slider, enemy_king_square) {
            continue;
        }
        let between = Bitboard::between(slider, enemy_king_square);
        let blockers = between & occupancy;
        if blockers.has_single_bit() && !(blockers & board.color_occupancy(side)).is_empty() {
            discovered.insert(blockers.into_iter().next().unwrap());
        }
    }
    discovered
}

/// For each piece type, the squares from which that piece type would give
/// direct check to `enemy_king_square`, using the same attacker/target
/// symmetry as the `checkers` computation in `compute`.
fn check_giving_squares(board: &Board, enemy_king_square: Square, occupancy: Bitboard) -> [Bitboard; Piece::NUM_TYPES] {
    let mut squares = [Bitboard::EMPTY; Piece::NUM_TYPES];
    // Pawn attacks are direction-dependent, so the set of squares from which
    // one of our pawns would attack `enemy_king_square` is found by looking
    // up pawn attacks from the king's own square in the king's own color,
    // the same symmetry `compute` uses for `checkers`.
    let enemy_color = board
        .color_at(enemy_king_square)
        .expect("the enemy king occupies its own square");
    squares[Piece::Pawn as usize] = pawn_attacks(enemy_king_square, enemy_color);
    squares[Piece::Knight as usize] = knight_attacks(enemy_king_square);
    squares[Piece::Bishop as usize] = MAGIC.bishop_attacks(occupancy, enemy_king_square);
    squares[Piece::Rook as usize] = MAGIC.rook_attacks(occupancy, enemy_king_square);
    squares[Piece::Queen as usize] = MAGIC.queen_attacks(occupancy, enemy_king_square);
    squares
}

fn checker_sq_mask(checker_sq: Square, king_square: Square, board: &Board, checker: Square) -> Bitboard {
    let checker_piece = board
        .piece_at(checker_sq)
        .expect("a checker square must hold the piece giving check");
    match checker_piece {
        Piece::Knight | Piece::Pawn => Bitboard::from(checker),
        _ => Bitboard::between(checker, king_square).with_square(checker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    #[test]
    fn quiescent_position_has_no_checkers() {
        let game = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let stats = CheckStats::compute(game.board(), game.side_to_move());
        assert!(!stats.in_check());
        assert_eq!(stats.resolution_squares, Bitboard::ALL);
    }

    #[test]
    fn detects_rook_check() {
        let game = parse_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        let stats = CheckStats::compute(game.board(), game.side_to_move());
        assert!(stats.in_check());
        assert_eq!(stats.checkers.len(), 1);
    }

    #[test]
    fn detects_pinned_piece() {
        // White king e1, white bishop e2, black rook e8: bishop is pinned.
        let game = parse_fen("k3r3/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let stats = CheckStats::compute(game.board(), game.side_to_move());
        assert!(stats.is_pinned(Square::E2));
        assert!(stats.respects_pin(Square::E2, Square::E5));
        assert!(!stats.respects_pin(Square::E2, Square::D3));
    }

    #[test]
    fn detects_discovered_check_candidate() {
        // White rook e1, white knight e2, black king e8: moving the knight
        // off the e-file would uncover a check from the rook.
        let game = parse_fen("4k3/8/8/8/8/8/4N3/K3R3 w - - 0 1").unwrap();
        let stats = CheckStats::compute(game.board(), game.side_to_move());
        assert!(stats.is_discovered(Square::E2));
        assert!(!stats.is_discovered(Square::A1));
    }

    #[test]
    fn check_giving_squares_for_a_rook_include_the_enemy_kings_file() {
        let game = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let stats = CheckStats::compute(game.board(), game.side_to_move());
        let rook_checks = stats.check_squares_for(Piece::Rook);
        assert!(rook_checks.contains(Square::E4));
        assert!(!rook_checks.contains(Square::D4));
    }
}
