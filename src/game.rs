/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! The [`Game`] object takes an accepted [`Puzzle`] and applies the player's moves to its own
//! copy of the grid. The front end animates the path returned by [`Game::move_player`] and
//! calls [`Game::finish_move`] when the animation is over. Moves are refused in between.

use log::debug;
use std::cmp::Ordering;
use std::fmt;

use crate::config::PKG_NAME;
use crate::generator::actor::Actor;
use crate::generator::daily::Puzzle;
use crate::generator::grid::Grid;
use crate::generator::path::Path;
use crate::generator::position::Direction;

/// Number of moves compared to the par of the puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Performance {
    UnderPar,
    Par,
    OverPar,
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Performance::UnderPar => write!(f, "under par"),
            Performance::Par => write!(f, "par"),
            Performance::OverPar => write!(f, "over par"),
        }
    }
}

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct Game {
    /// Puzzle being played. Its grid is never modified.
    puzzle: Puzzle,

    /// Grid with the current position of the actor.
    grid: Grid,

    actor: Actor,

    /// Whether a move is being animated.
    busy: bool,
}

impl Game {
    /// Create a [`Game`] object for the provided puzzle.
    pub fn new(puzzle: Puzzle) -> Self {
        let grid: Grid = puzzle.grid.clone();
        let actor: Actor = Actor {
            pos: puzzle.actor,
            initial_pos: puzzle.actor,
            move_count: 0,
        };
        Self {
            puzzle,
            grid,
            actor,
            busy: false,
        }
    }

    /// Slide the actor in the given direction.
    ///
    /// Return the path to animate, or None when the move is refused: a move is in progress, the
    /// game is already won, or a wall blocks the actor.
    pub fn move_player(&mut self, direction: Direction) -> Option<Path> {
        if self.busy || self.is_won() {
            return None;
        }

        let path: Path = self.actor.calculate_move_path(&self.grid, direction);
        if path.len() <= 1 {
            return None;
        }

        self.actor.follow(&mut self.grid, &path);
        self.busy = true;
        debug!(
            "Move {} {direction:?}: actor at {}",
            self.actor.move_count, self.actor.pos
        );
        Some(path)
    }

    /// Signal the end of the move animation.
    ///
    /// Return whether the puzzle is solved.
    pub fn finish_move(&mut self) -> bool {
        self.busy = false;
        self.is_won()
    }

    /// Put the actor back to its start position.
    pub fn reset(&mut self) {
        self.busy = false;
        self.actor.reset(&mut self.grid);
    }

    /// Whether a move is being animated.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the actor reached the goal.
    pub fn is_won(&self) -> bool {
        self.actor.on_goal(&self.grid)
    }

    pub fn move_count(&self) -> usize {
        self.actor.move_count
    }

    pub fn par(&self) -> usize {
        self.puzzle.par()
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Compare the number of moves with the par.
    pub fn performance(&self) -> Performance {
        match self.move_count().cmp(&self.par()) {
            Ordering::Less => Performance::UnderPar,
            Ordering::Equal => Performance::Par,
            Ordering::Greater => Performance::OverPar,
        }
    }

    /// Short summary that players can share.
    pub fn share_text(&self) -> String {
        if self.is_won() {
            format!(
                "{PKG_NAME} {}: solved in {} moves (par {}, {})",
                self.puzzle.date,
                self.move_count(),
                self.par(),
                self.performance()
            )
        } else {
            format!(
                "{PKG_NAME} {}: {} moves so far (par {})",
                self.puzzle.date,
                self.move_count(),
                self.par()
            )
        }
    }
}
