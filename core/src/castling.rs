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

//! Castling rights management.

use super::color::Color;

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A 2x2 matrix of castling rights, packed into the low 4 bits.
/// From LSB to MSB: White kingside, White queenside, Black kingside, Black
/// queenside.
pub struct CastleRights(pub u8);

impl CastleRights {
    /// All four rights available.
    pub const ALL_RIGHTS: CastleRights = CastleRights(15);
    /// No rights available.
    pub const NO_RIGHTS: CastleRights = CastleRights(0);

    #[inline(always)]
    #[must_use]
    pub const fn king_castle(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(1),
            Color::Black => CastleRights(4),
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn queen_castle(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(2),
            Color::Black => CastleRights(8),
        }
    }

    #[must_use]
    pub const fn color_rights(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(3),
            Color::Black => CastleRights(12),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn is_kingside_legal(self, color: Color) -> bool {
        self & CastleRights::king_castle(color) != CastleRights::NO_RIGHTS
    }

    #[inline(always)]
    #[must_use]
    pub fn is_queenside_legal(self, color: Color) -> bool {
        self & CastleRights::queen_castle(color) != CastleRights::NO_RIGHTS
    }

    #[inline(always)]
    /// Remove the rights set in `lost`, returning what was actually cleared
    /// (the intersection of `self` and `lost`) so the caller can push it as
    /// an undo delta.
    pub fn revoke(&mut self, lost: CastleRights) -> CastleRights {
        let cleared = *self & lost;
        *self &= !lost;
        cleared
    }

    #[inline(always)]
    /// Re-apply a previously-removed set of rights.
    pub fn restore(&mut self, delta: CastleRights) {
        *self |= delta;
    }
}

impl BitOr<CastleRights> for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn bitor(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }
}

impl BitOrAssign<CastleRights> for CastleRights {
    #[inline(always)]
    fn bitor_assign(&mut self, other: CastleRights) {
        self.0 |= other.0;
    }
}

impl BitAnd<CastleRights> for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn bitand(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & other.0)
    }
}

impl BitAndAssign<CastleRights> for CastleRights {
    #[inline(always)]
    fn bitand_assign(&mut self, other: CastleRights) {
        self.0 &= other.0;
    }
}

impl Not for CastleRights {
    type Output = CastleRights;
    #[inline(always)]
    fn not(self) -> CastleRights {
        CastleRights(self.0 ^ 15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoke_then_restore_round_trips() {
        let mut rights = CastleRights::ALL_RIGHTS;
        let delta = rights.revoke(CastleRights::king_castle(Color::White));
        assert!(!rights.is_kingside_legal(Color::White));
        rights.restore(delta);
        assert!(rights.is_kingside_legal(Color::White));
    }
}
