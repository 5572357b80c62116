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

//! Directions on the board, as signed offsets to a square index.

use std::ops::{Add, Mul, Neg};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
/// A step between squares, expressed as the signed change in square index
/// (`rank * 8 + file`) that the step induces.
pub struct Direction(pub i8);

impl Direction {
    pub const NORTH: Direction = Direction(8);
    pub const SOUTH: Direction = Direction(-8);
    pub const EAST: Direction = Direction(1);
    pub const WEST: Direction = Direction(-1);
    pub const NORTHEAST: Direction = Direction(9);
    pub const NORTHWEST: Direction = Direction(7);
    pub const SOUTHEAST: Direction = Direction(-7);
    pub const SOUTHWEST: Direction = Direction(-9);

    /// The eight steps a knight can make.
    pub const KNIGHT_STEPS: [Direction; 8] = [
        Direction(17),
        Direction(15),
        Direction(10),
        Direction(6),
        Direction(-6),
        Direction(-10),
        Direction(-15),
        Direction(-17),
    ];

    /// The eight steps a king can make.
    pub const KING_STEPS: [Direction; 8] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
        Direction::NORTHEAST,
        Direction::NORTHWEST,
        Direction::SOUTHEAST,
        Direction::SOUTHWEST,
    ];
}

impl Add<Direction> for Direction {
    type Output = Direction;
    #[inline(always)]
    fn add(self, rhs: Direction) -> Direction {
        Direction(self.0 + rhs.0)
    }
}

impl Mul<i8> for Direction {
    type Output = Direction;
    #[inline(always)]
    fn mul(self, rhs: i8) -> Direction {
        Direction(self.0 * rhs)
    }
}

impl Neg for Direction {
    type Output = Direction;
    #[inline(always)]
    fn neg(self) -> Direction {
        Direction(-self.0)
    }
}
