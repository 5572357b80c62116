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

//! Forsyth-Edwards Notation parsing.
//!
//! Malformed input is always a `Result::Err`, never a panic: FEN comes from
//! a user or a test fixture, not from anything the move generator produced.

use super::{board::Board, castling::CastleRights, color::Color, game::Game, piece::Piece, square::Square};

/// Parse a FEN string into a fully-populated `Game`. Only the first four
/// fields (placement, side to move, castling rights, en passant target) are
/// consulted; halfmove clock and fullmove number, if present, are ignored
/// since `Game` tracks its own clock from the point a game starts.
pub fn parse_fen(fen: &str) -> Result<Game, String> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or_else(|| "empty FEN".to_string())?;
    let side_field = fields.next().unwrap_or("w");
    let castle_field = fields.next().unwrap_or("-");
    let ep_field = fields.next().unwrap_or("-");

    let board = parse_placement(placement)?;
    let side_to_move = match side_field {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(format!("unrecognized side to move '{other}'")),
    };
    let castle_rights = parse_castle_rights(castle_field)?;
    let en_passant = parse_en_passant(ep_field)?;

    if !board.is_valid() {
        return Err("piece placement violates board invariants".to_string());
    }
    if board.piece_occupancy(Piece::King).len() != 2 {
        return Err("a position must have exactly one king per side".to_string());
    }

    Ok(Game::from_parts(board, castle_rights, en_passant, side_to_move))
}

fn parse_placement(placement: &str) -> Result<Board, String> {
    let mut board = Board::EMPTY;
    let mut rank: i8 = 7;
    let mut file: u8 = 0;

    for c in placement.chars() {
        match c {
            '/' => {
                if file != 8 {
                    return Err(format!("rank {} did not account for all 8 files", rank + 1));
                }
                rank -= 1;
                if rank < 0 {
                    return Err("too many ranks in piece placement".to_string());
                }
                file = 0;
            }
            '1'..='8' => {
                file += c.to_digit(10).expect("matched on an ASCII digit") as u8;
            }
            _ => {
                if file >= 8 || !(0..8).contains(&rank) {
                    return Err(format!("piece character '{c}' falls outside the board"));
                }
                let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                let piece = Piece::from_code(c.to_ascii_uppercase())
                    .ok_or_else(|| format!("unrecognized piece character '{c}'"))?;
                board.add_piece(Square::new(file, rank as u8), color, piece);
                file += 1;
            }
        }
    }
    if file != 8 || rank != 0 {
        return Err("piece placement did not cover all 8 ranks".to_string());
    }
    Ok(board)
}

fn parse_castle_rights(field: &str) -> Result<CastleRights, String> {
    if field == "-" {
        return Ok(CastleRights::NO_RIGHTS);
    }
    let mut rights = CastleRights::NO_RIGHTS;
    for c in field.chars() {
        rights |= match c {
            'K' => CastleRights::king_castle(Color::White),
            'Q' => CastleRights::queen_castle(Color::White),
            'k' => CastleRights::king_castle(Color::Black),
            'q' => CastleRights::queen_castle(Color::Black),
            other => return Err(format!("unrecognized castling character '{other}'")),
        };
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, String> {
    if field == "-" {
        return Ok(None);
    }
    Square::from_algebraic(field)
        .map(Some)
        .ok_or_else(|| format!("invalid en passant square '{field}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_position() {
        let game = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.castle_rights(), CastleRights::ALL_RIGHTS);
        assert_eq!(game.board().occupancy().len(), 32);
    }

    #[test]
    fn parses_en_passant_target() {
        let game = parse_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        assert_eq!(game.en_passant_square(), Some(Square::D6));
    }

    #[test]
    fn parses_partial_castle_rights() {
        let game = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(game.castle_rights().is_kingside_legal(Color::White));
        assert!(!game.castle_rights().is_queenside_legal(Color::White));
        assert!(game.castle_rights().is_queenside_legal(Color::Black));
        assert!(!game.castle_rights().is_kingside_legal(Color::Black));
    }

    #[test]
    fn rejects_malformed_placement() {
        assert!(parse_fen("not a fen at all").is_err());
    }

    #[test]
    fn rejects_missing_king() {
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }
}
