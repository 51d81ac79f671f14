/*
position.rs

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

//! Grid coordinates and slide directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinates. `x` is the column and `y` the row, both starting at 0 in the top left
/// corner.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Return the adjacent position in the given direction, or None when it would have a
    /// negative coordinate.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Position::new(self.x, y)),
            Direction::Right => Some(Position::new(self.x + 1, self.y)),
            Direction::Down => Some(Position::new(self.x, self.y + 1)),
            Direction::Left => self.x.checked_sub(1).map(|x| Position::new(x, self.y)),
        }
    }

    /// Whether the two positions are the same or touch each other, diagonals included.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four slide directions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All the directions, in the order the solver tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Convert a move letter (`U`, `R`, `D`, or `L`, any case) into a direction.
    pub fn from_letter(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'R' => Some(Direction::Right),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            _ => None,
        }
    }
}
