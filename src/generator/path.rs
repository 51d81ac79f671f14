/*
path.rs

Copyright 2025 Hervé Quatremain

This file is part of Glissade.

Glissade is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Glissade is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Glissade. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Cells traversed by a slide.

use serde::Serialize;
use std::collections::HashSet;

use super::position::Position;

/// Path object.
///
/// Only serialized: the lookup set is not part of the output and is rebuilt by [`Path::push`].
#[derive(Serialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of positions, starting with the cell the slide started from.
    path: Vec<Position>,

    /// Stores the visited status of the positions.
    /// Instead of looking for the position in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    visited: HashSet<Position>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object that starts at the given position.
    pub fn new(start: Position) -> Self {
        let mut path: Path = Self {
            path: Vec::new(),
            visited: HashSet::new(),
        };
        path.push(start);
        path
    }

    /// Add a position to the path.
    pub fn push(&mut self, pos: Position) {
        self.path.push(pos);
        self.visited.insert(pos);
    }

    /// Get the number of positions in the path, start included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty. A path built with [`Path::new`] never is.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the position is in the path or not.
    pub fn contains(&self, pos: &Position) -> bool {
        self.visited.contains(pos)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<Position> {
        &self.path
    }

    /// Return the last position in the path.
    pub fn get_last(&self) -> Option<Position> {
        self.path.last().copied()
    }
}

/// Result of a slide simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// Where the slide stops.
    pub end: Position,

    /// All the cells from the start to [`Slide::end`], both included.
    pub path: Path,
}

impl Slide {
    /// Whether the slide did not move at all.
    pub fn is_blocked(&self) -> bool {
        self.path.len() <= 1
    }
}
