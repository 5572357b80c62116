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

//! Static evaluation and time-bounded search built atop `corvid_core`.

pub mod config;
pub mod eval;
pub mod limit;
pub mod search;

pub use config::SearchConfig;
pub use eval::{evaluate, Score};
pub use limit::SearchLimit;
pub use search::{iterative_deepening, search as run_search, SearchError, SearchInfo};
