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

//! Zobrist hash keys, used by `Game` for repetition detection.
//!
//! Keys are generated once at process start rather than hardcoded as
//! literals, the same `once_cell::sync::Lazy` + `fastrand` pattern `magic`
//! uses for its magic multipliers.

use once_cell::sync::Lazy;

use super::{color::Color, piece::Piece, square::Square};

struct ZobristKeys {
    square: [[[u64; 2]; Piece::NUM_TYPES]; 64],
    castle: [u64; 4],
    ep_file: [u64; 8],
    side: u64,
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut square = [[[0u64; 2]; Piece::NUM_TYPES]; 64];
    for sq in square.iter_mut() {
        for piece in sq.iter_mut() {
            for color in piece.iter_mut() {
                *color = fastrand::u64(..);
            }
        }
    }
    let mut castle = [0u64; 4];
    for key in castle.iter_mut() {
        *key = fastrand::u64(..);
    }
    let mut ep_file = [0u64; 8];
    for key in ep_file.iter_mut() {
        *key = fastrand::u64(..);
    }
    ZobristKeys {
        square,
        castle,
        ep_file,
        side: fastrand::u64(..),
    }
});

#[must_use]
pub fn square_key(sq: Square, piece: Piece, color: Color) -> u64 {
    KEYS.square[sq as usize][piece as usize][color as usize]
}

#[must_use]
/// `index` is the bit position of the right in `CastleRights` (0 = White
/// kingside, 1 = White queenside, 2 = Black kingside, 3 = Black queenside).
pub fn castle_key(index: u8) -> u64 {
    KEYS.castle[index as usize]
}

#[must_use]
/// Zero when there is no en passant target, matching the convention that an
/// absent key never perturbs the hash.
pub fn ep_key(sq: Option<Square>) -> u64 {
    match sq {
        Some(s) => KEYS.ep_file[s.file() as usize],
        None => 0,
    }
}

#[must_use]
pub fn side_key() -> u64 {
    KEYS.side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_squares_get_distinct_keys() {
        let a = square_key(Square::A1, Piece::Pawn, Color::White);
        let b = square_key(Square::A2, Piece::Pawn, Color::White);
        assert_ne!(a, b);
    }

    #[test]
    fn ep_key_is_zero_for_none() {
        assert_eq!(ep_key(None), 0);
    }

    #[test]
    fn keys_are_stable_across_calls() {
        let a = square_key(Square::E4, Piece::Knight, Color::Black);
        let b = square_key(Square::E4, Piece::Knight, Color::Black);
        assert_eq!(a, b);
    }
}
