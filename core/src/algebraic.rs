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

//! Long-algebraic move text: `[P]<from><'-'|'x'><to>[suffix]`, castling as
//! `O-O`/`O-O-O`. Pawn moves omit the piece letter.

use super::{
    game::Game,
    movegen,
    moves::{Move, MoveType},
    piece::Piece,
};

#[must_use]
pub fn format_move(mv: Move) -> String {
    match mv.move_type() {
        MoveType::CastleKing => return "O-O".to_string(),
        MoveType::CastleQueen => return "O-O-O".to_string(),
        _ => {}
    }

    let mut s = String::new();
    if mv.piece() != Piece::Pawn {
        s.push_str(mv.piece().code());
    }
    s.push_str(&mv.from_square().to_string());
    s.push(if mv.is_capture() { 'x' } else { '-' });
    s.push_str(&mv.to_square().to_string());
    if mv.is_en_passant() {
        s.push_str("ep");
    } else if let Some(p) = mv.promote_type() {
        s.push('=');
        s.push_str(p.code());
    }
    s
}

#[must_use]
/// Resolve `input` against `game`'s legal moves, matching its formatted text
/// case-insensitively. Returns `None` for illegal or unparseable input.
pub fn parse_move(input: &str, game: &Game) -> Option<Move> {
    let normalized = input.trim();
    movegen::legal_moves(game)
        .into_iter()
        .find(|&m| format_move(m).eq_ignore_ascii_case(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{piece::Piece, square::Square};

    #[test]
    fn pawn_move_omits_piece_letter() {
        let mv = Move::quiet(Square::E2, Square::E4, Piece::Pawn);
        assert_eq!(format_move(mv), "e2-e4");
    }

    #[test]
    fn knight_move_includes_piece_letter() {
        let mv = Move::quiet(Square::B1, Square::C3, Piece::Knight);
        assert_eq!(format_move(mv), "Nb1-c3");
    }

    #[test]
    fn capture_uses_x_separator() {
        let mv = Move::capture(Square::E4, Square::D5, Piece::Pawn);
        assert_eq!(format_move(mv), "e4xd5");
    }

    #[test]
    fn promotion_has_equals_suffix() {
        let mv = Move::promotion(Square::E7, Square::E8, Piece::Queen, false);
        assert_eq!(format_move(mv), "e7-e8=Q");
    }

    #[test]
    fn en_passant_has_ep_suffix() {
        let mv = Move::en_passant(Square::D5, Square::E6);
        assert_eq!(format_move(mv), "d5xe6ep");
    }

    #[test]
    fn castle_kingside_is_o_o() {
        let mv = Move::castle_king(Square::E1, Square::G1);
        assert_eq!(format_move(mv), "O-O");
    }

    #[test]
    fn parse_round_trips_through_format() {
        let game = Game::new();
        let mv = movegen::legal_moves(&game)[0];
        let text = format_move(mv);
        assert_eq!(parse_move(&text, &game), Some(mv));
    }

    #[test]
    fn parse_rejects_illegal_input() {
        let game = Game::new();
        assert_eq!(parse_move("z9-z9", &game), None);
    }
}
