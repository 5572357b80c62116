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

//! A limit to how long a search should run, checked between plies rather than
//! shared across threads: Corvid's search is single-threaded, so the fields
//! here are plain, not atomics behind a lock.

use std::time::{Duration, Instant};

#[derive(Debug)]
/// A wall-clock and node-count budget for one search.
pub struct SearchLimit {
    start_time: Instant,
    budget: Duration,
    nodes: u64,
}

impl SearchLimit {
    #[must_use]
    pub fn new(budget: Duration) -> SearchLimit {
        SearchLimit {
            start_time: Instant::now(),
            budget,
            nodes: 0,
        }
    }

    #[must_use]
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[must_use]
    #[inline]
    /// True once the budget's wall-clock duration has passed.
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    #[inline]
    pub fn add_nodes(&mut self, n: u64) {
        self.nodes += n;
    }

    #[must_use]
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_limit_with_nonzero_budget_has_not_expired() {
        let limit = SearchLimit::new(Duration::from_secs(10));
        assert!(!limit.expired());
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let limit = SearchLimit::new(Duration::ZERO);
        assert!(limit.expired());
    }

    #[test]
    fn add_nodes_accumulates() {
        let mut limit = SearchLimit::new(Duration::from_secs(10));
        limit.add_nodes(5);
        limit.add_nodes(3);
        assert_eq!(limit.nodes(), 8);
    }
}
