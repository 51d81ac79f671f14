/*
generator.rs

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

//! Generate and verify the daily sliding puzzles.
//!
//! A puzzle is a square grid surrounded by walls, with some inner walls, an actor, and a goal.
//! The actor slides in one of four directions until a wall stops it. The player must bring the
//! actor to the goal.
//!
//! The puzzle of a day is built as follows:
//!
//! * A date-time string is hashed into a seed with [`seeded_random::hash_string`], and a
//!   [`seeded_random::SeededRandom`] generator is created from that seed.
//!
//! * A [`grid::Grid`] is initialized with random inner walls that keep all the free cells
//!   connected. Then the [`actor::Actor`] and the goal are placed at random.
//!
//! * The [`solver::Solver`] verifies that the goal can be reached, computes the minimum number
//!   of moves, and checks that every free cell can be reached.
//!
//! * [`daily::generate_daily`] repeats these steps with other date-time strings until a
//!   puzzle is difficult enough, relaxing the difficulty when the day has no such puzzle.
//!   [`background::spawn`] runs that search in a thread.

pub mod actor;
pub mod background;
pub mod cancel;
pub mod daily;
pub mod grid;
pub mod path;
pub mod position;
pub mod seeded_random;
pub mod solver;
