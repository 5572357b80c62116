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

//! Legal move generation.
//!
//! Pseudo-legal moves are generated per piece type and filtered against the
//! position's `CheckStats` (pin lines, check-resolution squares) rather than
//! by making each move and testing for king safety afterward.

pub mod tables;

use super::{
    bitboard::Bitboard,
    castling::CastleRights,
    checks::CheckStats,
    color::Color,
    game::Game,
    magic::MAGIC,
    moves::Move,
    piece::Piece,
    square::Square,
};

use tables::{king_attacks, knight_attacks, pawn_attacks};

/// Generate every legal move available to the side to move.
#[must_use]
pub fn legal_moves(game: &Game) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    let side = game.side_to_move();
    let stats = game.check_stats();

    if stats.in_double_check() {
        king_moves(game, side, stats, &mut moves);
        return moves;
    }

    pawn_moves(game, side, stats, &mut moves);
    knight_moves(game, side, stats, &mut moves);
    slider_moves(game, side, stats, Piece::Bishop, &mut moves);
    slider_moves(game, side, stats, Piece::Rook, &mut moves);
    slider_moves(game, side, stats, Piece::Queen, &mut moves);
    king_moves(game, side, stats, &mut moves);
    if !stats.in_check() {
        castle_moves(game, side, &mut moves);
    }
    moves
}

#[must_use]
/// Every legal capturing move available to the side to move, for quiescence
/// search. Filters the full legal move list rather than generating captures
/// directly; the branching factor at quiescence depth makes the duplicated
/// pin/check filtering cheap relative to a second bespoke generator.
pub fn legal_captures(game: &Game) -> Vec<Move> {
    legal_moves(game).into_iter().filter(|m| m.is_capture()).collect()
}

/// True iff the side to move has at least one legal move. Cheaper than
/// `legal_moves(game).is_empty()` when a move is found early, though it
/// still falls back on full generation: the spec has no existence-only
/// fast path distinct from generation with early exit.
#[must_use]
pub fn has_legal_moves(game: &Game) -> bool {
    !legal_moves(game).is_empty()
}

#[must_use]
/// The squares a slider of `piece` (bishop, rook, or queen) standing on `sq`
/// attacks given `occupancy`. Exposed so callers outside this crate (the
/// evaluator's center-control term) can query sliding attacks without
/// reaching into the magic-bitboard tables directly.
pub fn slider_attacks(piece: Piece, occupancy: Bitboard, sq: Square) -> Bitboard {
    match piece {
        Piece::Bishop => MAGIC.bishop_attacks(occupancy, sq),
        Piece::Rook => MAGIC.rook_attacks(occupancy, sq),
        Piece::Queen => MAGIC.queen_attacks(occupancy, sq),
        _ => unreachable!("slider_attacks is only called for bishop, rook, and queen"),
    }
}

#[must_use]
/// Is `sq` attacked by any piece of `by_color` on `board`?
pub fn is_attacked(board: &super::board::Board, sq: Square, by_color: Color) -> bool {
    let occupancy = board.occupancy();
    if !(pawn_attacks(sq, !by_color) & board.piece_color_occupancy(Piece::Pawn, by_color)).is_empty() {
        return true;
    }
    if !(knight_attacks(sq) & board.piece_color_occupancy(Piece::Knight, by_color)).is_empty() {
        return true;
    }
    if !(king_attacks(sq) & board.piece_color_occupancy(Piece::King, by_color)).is_empty() {
        return true;
    }
    let bishops_queens = board.piece_color_occupancy(Piece::Bishop, by_color) | board.piece_color_occupancy(Piece::Queen, by_color);
    if !(MAGIC.bishop_attacks(occupancy, sq) & bishops_queens).is_empty() {
        return true;
    }
    let rooks_queens = board.piece_color_occupancy(Piece::Rook, by_color) | board.piece_color_occupancy(Piece::Queen, by_color);
    if !(MAGIC.rook_attacks(occupancy, sq) & rooks_queens).is_empty() {
        return true;
    }
    false
}

fn pawn_moves(game: &Game, side: Color, stats: &CheckStats, out: &mut Vec<Move>) {
    let board = game.board();
    let pawns = board.piece_color_occupancy(Piece::Pawn, side);
    let empty = !board.occupancy();
    let enemy = board.color_occupancy(!side);
    let promote_rank = side.pawn_promote_rank();
    let dir = side.pawn_direction();

    for from in pawns {
        let single_to = from + dir;
        if empty.contains(single_to) && stats.respects_pin(from, single_to) {
            push_pawn_advance(from, single_to, promote_rank, stats, out);

            if side.pawn_start_rank().contains(from) {
                let double_to = single_to + dir;
                if empty.contains(double_to) && stats.respects_pin(from, double_to) && stats.resolves_check(double_to) {
                    out.push(Move::quiet(from, double_to, Piece::Pawn));
                }
            }
        }

        for to in pawn_attacks(from, side) {
            if enemy.contains(to) && stats.respects_pin(from, to) {
                push_pawn_capture(from, to, promote_rank, stats, out);
            } else if Some(to) == game.en_passant_square() && stats.respects_pin(from, to) {
                if en_passant_is_legal(game, from, to, side) {
                    out.push(Move::en_passant(from, to));
                }
            }
        }
    }
}

fn push_pawn_advance(from: Square, to: Square, promote_rank: Bitboard, stats: &CheckStats, out: &mut Vec<Move>) {
    if !stats.resolves_check(to) {
        return;
    }
    if promote_rank.contains(to) {
        for &p in &Piece::PROMOTING {
            out.push(Move::promotion(from, to, p, false));
        }
    } else {
        out.push(Move::quiet(from, to, Piece::Pawn));
    }
}

fn push_pawn_capture(from: Square, to: Square, promote_rank: Bitboard, stats: &CheckStats, out: &mut Vec<Move>) {
    if !stats.resolves_check(to) {
        return;
    }
    if promote_rank.contains(to) {
        for &p in &Piece::PROMOTING {
            out.push(Move::promotion(from, to, p, true));
        }
    } else {
        out.push(Move::capture(from, to, Piece::Pawn));
    }
}

/// En passant has a notorious extra pin case: capturing can expose the king
/// to a horizontal pin along the fifth/fourth rank once both the capturing
/// pawn and the captured pawn leave it. Checked by simulating the capture
/// directly rather than folding it into the ordinary pin table.
fn en_passant_is_legal(game: &Game, from: Square, to: Square, side: Color) -> bool {
    let board = game.board();
    let captured_sq = Square::new(to.file(), from.rank());
    let king_sq = game.check_stats().king_square;

    let mut occupancy = board.occupancy();
    occupancy &= !Bitboard::from(from);
    occupancy &= !Bitboard::from(captured_sq);
    occupancy |= Bitboard::from(to);

    let enemy = !side;
    let rooks_queens = board.piece_color_occupancy(Piece::Rook, enemy) | board.piece_color_occupancy(Piece::Queen, enemy);
    (MAGIC.rook_attacks(occupancy, king_sq) & rooks_queens).is_empty()
}

fn knight_moves(game: &Game, side: Color, stats: &CheckStats, out: &mut Vec<Move>) {
    let board = game.board();
    let knights = board.piece_color_occupancy(Piece::Knight, side);
    let own = board.color_occupancy(side);
    let enemy = board.color_occupancy(!side);

    for from in knights {
        if stats.is_pinned(from) {
            // A knight can never move along its own pin line, so a pinned
            // knight has no legal moves at all.
            continue;
        }
        for to in knight_attacks(from) & !own {
            if !stats.resolves_check(to) {
                continue;
            }
            if enemy.contains(to) {
                out.push(Move::capture(from, to, Piece::Knight));
            } else {
                out.push(Move::quiet(from, to, Piece::Knight));
            }
        }
    }
}

fn slider_moves(game: &Game, side: Color, stats: &CheckStats, piece: Piece, out: &mut Vec<Move>) {
    let board = game.board();
    let pieces = board.piece_color_occupancy(piece, side);
    let own = board.color_occupancy(side);
    let enemy = board.color_occupancy(!side);
    let occupancy = board.occupancy();

    for from in pieces {
        let attacks = match piece {
            Piece::Bishop => MAGIC.bishop_attacks(occupancy, from),
            Piece::Rook => MAGIC.rook_attacks(occupancy, from),
            Piece::Queen => MAGIC.queen_attacks(occupancy, from),
            _ => unreachable!("slider_moves is only called for bishop, rook, and queen"),
        };
        for to in attacks & !own {
            if !stats.respects_pin(from, to) || !stats.resolves_check(to) {
                continue;
            }
            if enemy.contains(to) {
                out.push(Move::capture(from, to, piece));
            } else {
                out.push(Move::quiet(from, to, piece));
            }
        }
    }
}

fn king_moves(game: &Game, side: Color, stats: &CheckStats, out: &mut Vec<Move>) {
    let board = game.board();
    let own = board.color_occupancy(side);
    let enemy = board.color_occupancy(!side);
    let from = stats.king_square;

    // The king itself must be excluded from occupancy while testing target
    // squares, or it would appear to block check along its own departure
    // line (a slider checking the king "through" its old square).
    let mut board_without_king = *board;
    board_without_king.remove_piece(from);

    for to in king_attacks(from) & !own {
        if is_attacked(&board_without_king, to, !side) {
            continue;
        }
        if enemy.contains(to) {
            out.push(Move::capture(from, to, Piece::King));
        } else {
            out.push(Move::quiet(from, to, Piece::King));
        }
    }
}

fn castle_moves(game: &Game, side: Color, out: &mut Vec<Move>) {
    let board = game.board();
    let rights = game.castle_rights();
    let home = side.home_rank_offset();
    let king_from = Square::new(4, home / 8);

    if rights.is_kingside_legal(side) {
        let f = Square::new(5, home / 8);
        let g = Square::new(6, home / 8);
        if !board.occupancy().contains(f)
            && !board.occupancy().contains(g)
            && !is_attacked(board, king_from, !side)
            && !is_attacked(board, f, !side)
            && !is_attacked(board, g, !side)
        {
            out.push(Move::castle_king(king_from, g));
        }
    }

    if rights.is_queenside_legal(side) {
        let d = Square::new(3, home / 8);
        let c = Square::new(2, home / 8);
        let b = Square::new(1, home / 8);
        if !board.occupancy().contains(d)
            && !board.occupancy().contains(c)
            && !board.occupancy().contains(b)
            && !is_attacked(board, king_from, !side)
            && !is_attacked(board, d, !side)
            && !is_attacked(board, c, !side)
        {
            out.push(Move::castle_queen(king_from, c));
        }
    }

    let _ = CastleRights::NO_RIGHTS; // keep castling import grounded to the type, not just the method
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    #[test]
    fn start_position_has_20_moves() {
        let game = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(legal_moves(&game).len(), 20);
    }

    #[test]
    fn check_restricts_to_resolving_moves() {
        // White king e1 in check from a black rook on e8; only blocking,
        // capturing the rook, or moving the king resolves it.
        let game = parse_fen("4r3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&game);
        assert!(moves.iter().all(|m| m.piece() == Piece::King));
    }

    #[test]
    fn pinned_piece_cannot_leave_its_line() {
        let game = parse_fen("4r3/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let moves = legal_moves(&game);
        assert!(moves
            .iter()
            .filter(|m| m.piece() == Piece::Bishop)
            .all(|m| m.to_square().file() == 4));
    }

    #[test]
    fn no_legal_moves_in_checkmate() {
        // Fool's mate position.
        let game = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert!(!has_legal_moves(&game));
    }
}
