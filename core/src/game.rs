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

//! `Game`: a `Board` plus everything else needed to make and unmake moves.
//!
//! Mutated in place by `do_move`/`unmake` rather than copied on recursion;
//! search descends and backtracks through a single `Game` instance.

use nohash_hasher::IntMap;

use super::{
    board::Board,
    castling::CastleRights,
    checks::CheckStats,
    color::Color,
    movegen,
    moves::{Move, MoveType},
    piece::Piece,
    square::Square,
    zobrist,
};

#[derive(Clone, Debug)]
struct UndoFrame {
    mv: Move,
    captured: Option<Piece>,
    prior_en_passant: Option<Square>,
    castle_delta: CastleRights,
    prior_check_stats: CheckStats,
    prior_hash: u64,
    prior_halfmove_clock: u16,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    side_to_move: Color,
    check_stats: CheckStats,
    hash: u64,
    halfmove_clock: u16,
    repetitions: IntMap<u64, u8>,
    history: Vec<UndoFrame>,
}

impl Game {
    #[must_use]
    pub fn new() -> Game {
        Game::from_parts(Board::start_position(), CastleRights::ALL_RIGHTS, None, Color::White)
    }

    #[must_use]
    /// Build a `Game` from a fully-specified position, reconstructing
    /// `CheckStats` and the Zobrist hash from scratch. Used by the FEN
    /// parser, which has no prior frame to derive them incrementally from.
    pub(crate) fn from_parts(
        board: Board,
        castle_rights: CastleRights,
        en_passant: Option<Square>,
        side_to_move: Color,
    ) -> Game {
        let check_stats = CheckStats::compute(&board, side_to_move);
        let hash = full_hash(&board, castle_rights, en_passant, side_to_move);
        let mut repetitions = IntMap::default();
        repetitions.insert(hash, 1);
        Game {
            board,
            castle_rights,
            en_passant,
            side_to_move,
            check_stats,
            hash,
            halfmove_clock: 0,
            repetitions,
            history: Vec::new(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    #[must_use]
    pub const fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    #[inline(always)]
    #[must_use]
    pub const fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline(always)]
    #[must_use]
    pub const fn check_stats(&self) -> &CheckStats {
        &self.check_stats
    }

    #[inline(always)]
    #[must_use]
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.check_stats.in_check() && !movegen::has_legal_moves(self)
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.check_stats.in_check() && !movegen::has_legal_moves(self)
    }

    #[must_use]
    pub fn is_drawn_by_repetition(&self) -> bool {
        self.repetitions.get(&self.hash).copied().unwrap_or(0) >= 3
    }

    #[must_use]
    pub fn is_drawn_by_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= 100
    }

    #[must_use]
    pub fn is_drawn(&self) -> bool {
        self.is_drawn_by_repetition() || self.is_drawn_by_fifty_move_rule()
    }

    fn place(&mut self, sq: Square, color: Color, piece: Piece) {
        self.board.add_piece(sq, color, piece);
        self.hash ^= zobrist::square_key(sq, piece, color);
    }

    fn take(&mut self, sq: Square) -> Piece {
        let (piece, color) = self.board.remove_piece(sq);
        self.hash ^= zobrist::square_key(sq, piece, color);
        piece
    }

    fn relocate(&mut self, from: Square, to: Square, color: Color, piece: Piece) {
        self.take(from);
        self.place(to, color, piece);
    }

    /// Apply `mv`, pushing an undo frame that `unmake` can reverse exactly.
    pub fn do_move(&mut self, mv: Move) {
        let from = mv.from_square();
        let to = mv.to_square();
        let side = self.side_to_move;
        let piece = mv.piece();

        let prior_en_passant = self.en_passant;
        let prior_check_stats = self.check_stats;
        let prior_hash = self.hash;
        let prior_halfmove_clock = self.halfmove_clock;

        let mut captured = None;

        match mv.move_type() {
            MoveType::CastleKing => {
                self.relocate(from, to, side, Piece::King);
                let rank = side.home_rank_offset() / 8;
                self.relocate(Square::new(7, rank), Square::new(5, rank), side, Piece::Rook);
            }
            MoveType::CastleQueen => {
                self.relocate(from, to, side, Piece::King);
                let rank = side.home_rank_offset() / 8;
                self.relocate(Square::new(0, rank), Square::new(3, rank), side, Piece::Rook);
            }
            MoveType::EnPassant => {
                let captured_sq = Square::new(to.file(), from.rank());
                self.take(captured_sq);
                captured = Some(Piece::Pawn);
                self.relocate(from, to, side, Piece::Pawn);
            }
            MoveType::Normal => {
                if mv.is_capture() {
                    captured = Some(self.take(to));
                }
                self.relocate(from, to, side, piece);
            }
            promoting => {
                let promote_to = promoting
                    .promote_piece()
                    .expect("the only move types besides castling/en-passant/normal are promotions");
                if mv.is_capture() {
                    captured = Some(self.take(to));
                }
                self.take(from);
                self.place(to, side, promote_to);
            }
        }

        self.hash ^= zobrist::ep_key(self.en_passant);
        self.en_passant = if piece == Piece::Pawn
            && mv.move_type() == MoveType::Normal
            && from.rank().abs_diff(to.rank()) == 2
        {
            Some(Square::new(from.file(), (from.rank() + to.rank()) / 2))
        } else {
            None
        };
        self.hash ^= zobrist::ep_key(self.en_passant);

        let mut lost = if piece == Piece::King {
            CastleRights::color_rights(side)
        } else {
            rights_for_square(from)
        };
        lost |= rights_for_square(to);
        let castle_delta = self.castle_rights.revoke(lost);
        for index in rights_bit_indices(castle_delta) {
            self.hash ^= zobrist::castle_key(index);
        }

        self.history.push(UndoFrame {
            mv,
            captured,
            prior_en_passant,
            castle_delta,
            prior_check_stats,
            prior_hash,
            prior_halfmove_clock,
        });

        self.side_to_move = !side;
        self.hash ^= zobrist::side_key();
        self.check_stats = CheckStats::compute(&self.board, self.side_to_move);

        self.halfmove_clock = if piece == Piece::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };

        *self.repetitions.entry(self.hash).or_insert(0) += 1;
    }

    /// Reverse the most recent `do_move`. Panics if there is no move to undo.
    pub fn unmake(&mut self) {
        let frame = self.history.pop().expect("unmake called with empty history");

        if let Some(count) = self.repetitions.get_mut(&self.hash) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&self.hash);
            }
        }

        self.side_to_move = !self.side_to_move;
        let side = self.side_to_move;
        let mv = frame.mv;
        let from = mv.from_square();
        let to = mv.to_square();

        match mv.move_type() {
            MoveType::CastleKing => {
                self.board.relocate(to, from);
                let rank = side.home_rank_offset() / 8;
                self.board.relocate(Square::new(5, rank), Square::new(7, rank));
            }
            MoveType::CastleQueen => {
                self.board.relocate(to, from);
                let rank = side.home_rank_offset() / 8;
                self.board.relocate(Square::new(3, rank), Square::new(0, rank));
            }
            MoveType::EnPassant => {
                self.board.relocate(to, from);
                let captured_sq = Square::new(to.file(), from.rank());
                self.board.add_piece(captured_sq, !side, Piece::Pawn);
            }
            MoveType::Normal => {
                self.board.relocate(to, from);
                if let Some(cap) = frame.captured {
                    self.board.add_piece(to, !side, cap);
                }
            }
            _promoting => {
                self.board.remove_piece(to);
                self.board.add_piece(from, side, Piece::Pawn);
                if let Some(cap) = frame.captured {
                    self.board.add_piece(to, !side, cap);
                }
            }
        }

        self.castle_rights.restore(frame.castle_delta);
        self.en_passant = frame.prior_en_passant;
        self.check_stats = frame.prior_check_stats;
        self.hash = frame.prior_hash;
        self.halfmove_clock = frame.prior_halfmove_clock;
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

fn rights_for_square(sq: Square) -> CastleRights {
    match sq {
        Square::A1 => CastleRights::queen_castle(Color::White),
        Square::H1 => CastleRights::king_castle(Color::White),
        Square::A8 => CastleRights::queen_castle(Color::Black),
        Square::H8 => CastleRights::king_castle(Color::Black),
        _ => CastleRights::NO_RIGHTS,
    }
}

fn rights_bit_indices(rights: CastleRights) -> impl Iterator<Item = u8> {
    (0..4).filter(move |i| rights.0 & (1 << i) != 0)
}

fn full_hash(board: &Board, castle_rights: CastleRights, en_passant: Option<Square>, side: Color) -> u64 {
    let mut hash = 0u64;
    for sq in Square::ALL {
        if let Some((piece, color)) = board.piece_color_at(sq) {
            hash ^= zobrist::square_key(sq, piece, color);
        }
    }
    for index in rights_bit_indices(castle_rights) {
        hash ^= zobrist::castle_key(index);
    }
    hash ^= zobrist::ep_key(en_passant);
    if side == Color::Black {
        hash ^= zobrist::side_key();
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_is_white_to_move_with_full_rights() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.castle_rights(), CastleRights::ALL_RIGHTS);
        assert_eq!(game.en_passant_square(), None);
    }

    #[test]
    fn do_move_then_unmake_restores_everything() {
        let mut game = Game::new();
        let before_board = *game.board();
        let before_hash = game.hash();
        let before_rights = game.castle_rights();

        let mv = Move::quiet(Square::E2, Square::E4, Piece::Pawn);
        game.do_move(mv);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.en_passant_square(), Some(Square::E3));

        game.unmake();
        assert_eq!(*game.board(), before_board);
        assert_eq!(game.hash(), before_hash);
        assert_eq!(game.castle_rights(), before_rights);
        assert_eq!(game.en_passant_square(), None);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn double_push_sets_en_passant_square() {
        let mut game = Game::new();
        game.do_move(Move::quiet(Square::E2, Square::E4, Piece::Pawn));
        assert_eq!(game.en_passant_square(), Some(Square::E3));
    }

    #[test]
    fn king_move_forfeits_both_castle_rights() {
        let mut game = Game::from_parts(
            {
                let mut b = Board::EMPTY;
                b.add_piece(Square::E1, Color::White, Piece::King);
                b.add_piece(Square::A1, Color::White, Piece::Rook);
                b.add_piece(Square::H1, Color::White, Piece::Rook);
                b.add_piece(Square::E8, Color::Black, Piece::King);
                b
            },
            CastleRights::ALL_RIGHTS,
            None,
            Color::White,
        );
        game.do_move(Move::quiet(Square::E1, Square::E2, Piece::King));
        assert!(!game.castle_rights().is_kingside_legal(Color::White));
        assert!(!game.castle_rights().is_queenside_legal(Color::White));
        assert!(game.castle_rights().is_kingside_legal(Color::Black));
    }

    #[test]
    fn castling_relocates_both_king_and_rook() {
        let mut game = Game::from_parts(
            {
                let mut b = Board::EMPTY;
                b.add_piece(Square::E1, Color::White, Piece::King);
                b.add_piece(Square::H1, Color::White, Piece::Rook);
                b.add_piece(Square::E8, Color::Black, Piece::King);
                b
            },
            CastleRights::king_castle(Color::White),
            None,
            Color::White,
        );
        game.do_move(Move::castle_king(Square::E1, Square::G1));
        assert_eq!(game.board().piece_color_at(Square::G1), Some((Piece::King, Color::White)));
        assert_eq!(game.board().piece_color_at(Square::F1), Some((Piece::Rook, Color::White)));
        game.unmake();
        assert_eq!(game.board().piece_color_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(game.board().piece_color_at(Square::H1), Some((Piece::Rook, Color::White)));
    }

    #[test]
    fn fifty_move_clock_resets_on_capture() {
        let mut game = Game::from_parts(
            {
                let mut b = Board::EMPTY;
                b.add_piece(Square::E1, Color::White, Piece::King);
                b.add_piece(Square::E8, Color::Black, Piece::King);
                b.add_piece(Square::A1, Color::White, Piece::Rook);
                b.add_piece(Square::A8, Color::Black, Piece::Rook);
                b
            },
            CastleRights::NO_RIGHTS,
            None,
            Color::White,
        );
        game.do_move(Move::quiet(Square::E1, Square::D1, Piece::King));
        assert_eq!(game.halfmove_clock, 1);
        game.do_move(Move::capture(Square::A8, Square::A1, Piece::Rook));
        assert_eq!(game.halfmove_clock, 0);
    }
}
