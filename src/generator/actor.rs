/*
actor.rs

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

//! The actor that the player slides across the grid.

use log::debug;
use serde::{Deserialize, Serialize};

use super::grid::{CellType, Grid, PlacementError};
use super::path::Path;
use super::position::{Direction, Position};
use super::seeded_random::SeededRandom;

/// Actor object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Actor {
    /// Current position.
    pub pos: Position,

    /// Spawn position. [`Actor::reset`] moves the actor back there.
    pub initial_pos: Position,

    /// Number of moves (key presses, not traversed cells) since the spawn or the last reset.
    pub move_count: usize,
}

impl Actor {
    /// Place the actor on a random free cell of the grid.
    ///
    /// # Errors
    ///
    /// Return [`PlacementError::Exhausted`] when no free cell is found after `attempts` draws. The error reports
    /// zero attempts when the grid has no inner cell.
    pub fn place(
        grid: &mut Grid,
        rng: &mut SeededRandom,
        attempts: usize,
    ) -> Result<Self, PlacementError> {
        let Some(last) = grid.last_inner_index() else {
            return Err(PlacementError::Exhausted { attempts: 0 });
        };

        for _ in 0..attempts {
            let x: usize = rng.random_int(1, last);
            let y: usize = rng.random_int(1, last);

            if grid.get_cell_type(x, y) != CellType::Wall {
                grid.set_cell_type(x, y, CellType::Actor);
                let pos: Position = Position::new(x, y);
                debug!("Actor placed at {pos}");
                return Ok(Self {
                    pos,
                    initial_pos: pos,
                    move_count: 0,
                });
            }
        }
        Err(PlacementError::Exhausted { attempts })
    }

    /// Move the actor back to its spawn position and clear the move counter.
    pub fn reset(&mut self, grid: &mut Grid) {
        self.vacate(grid);
        self.pos = self.initial_pos;
        grid.set_cell_type(self.pos.x, self.pos.y, CellType::Actor);
        self.move_count = 0;
    }

    /// Return the cells the actor would go through when moving in the given direction.
    ///
    /// Unlike [`Grid::simulate_move`], the actor stops on the goal instead of sliding past it.
    pub fn calculate_move_path(&self, grid: &Grid, direction: Direction) -> Path {
        let goal: Option<Position> = grid.goal();
        let mut path: Path = Path::new(self.pos);
        let mut current: Position = self.pos;

        while let Some(next) = current.step(direction) {
            if grid.get_cell_type(next.x, next.y) == CellType::Wall {
                break;
            }
            current = next;
            path.push(current);
            if goal == Some(current) {
                break;
            }
        }
        path
    }

    /// Move the actor to the last cell of the path and count the move.
    pub fn follow(&mut self, grid: &mut Grid, path: &Path) {
        if let Some(end) = path.get_last() {
            self.vacate(grid);
            self.pos = end;
            grid.set_cell_type(end.x, end.y, CellType::Actor);
            self.move_count += 1;
        }
    }

    /// Whether the actor stands on the goal.
    pub fn on_goal(&self, grid: &Grid) -> bool {
        grid.goal() == Some(self.pos)
    }

    // The cell the actor leaves gets its goal back if it was the goal.
    fn vacate(&self, grid: &mut Grid) {
        let cell: CellType = if self.on_goal(grid) {
            CellType::Goal
        } else {
            CellType::Empty
        };
        grid.set_cell_type(self.pos.x, self.pos.y, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> (Grid, Actor) {
        let grid: Grid = Grid::from_rows(&[
            "######", "#A.G.#", "#....#", "#....#", "#....#", "######",
        ])
        .expect("valid grid");
        let pos: Position = Position::new(1, 1);
        let actor: Actor = Actor {
            pos,
            initial_pos: pos,
            move_count: 0,
        };
        (grid, actor)
    }

    #[test]
    fn place_marks_the_cell() {
        let mut rng: SeededRandom = SeededRandom::new(1440848474);
        let mut grid: Grid = Grid::new(10);
        grid.initialize(&mut rng, (10, 15), 50);

        let actor: Actor = Actor::place(&mut grid, &mut rng, 1000).expect("actor placed");
        assert_eq!(actor.pos, Position::new(7, 2));
        assert_eq!(actor.initial_pos, actor.pos);
        assert_eq!(actor.move_count, 0);
        assert_eq!(grid.get_cell_type(7, 2), CellType::Actor);
    }

    #[test]
    fn place_is_bounded() {
        let mut grid: Grid = Grid::from_rows(&["###", "###", "###"]).expect("valid grid");
        let mut rng: SeededRandom = SeededRandom::new(1);
        assert_eq!(
            Actor::place(&mut grid, &mut rng, 10),
            Err(PlacementError::Exhausted { attempts: 10 })
        );
    }

    #[test]
    fn move_path_stops_on_goal() {
        let (grid, actor) = corridor();

        let path: Path = actor.calculate_move_path(&grid, Direction::Right);
        assert_eq!(path.get_last(), Some(Position::new(3, 1)));
        assert_eq!(path.len(), 3);

        // The grid primitive slides past the goal
        let slide = grid.simulate_move(actor.pos, Direction::Right);
        assert_eq!(slide.end, Position::new(4, 1));
    }

    #[test]
    fn blocked_move_path_only_has_the_start() {
        let (grid, actor) = corridor();
        let path: Path = actor.calculate_move_path(&grid, Direction::Up);
        assert_eq!(path.get(), &vec![Position::new(1, 1)]);
    }

    #[test]
    fn follow_and_reset() {
        let (mut grid, mut actor) = corridor();

        let path: Path = actor.calculate_move_path(&grid, Direction::Right);
        actor.follow(&mut grid, &path);
        assert!(actor.on_goal(&grid));
        assert_eq!(actor.move_count, 1);
        assert_eq!(grid.get_cell_type(1, 1), CellType::Empty);
        assert_eq!(grid.get_cell_type(3, 1), CellType::Actor);

        // Leaving the goal gives the cell its goal back
        let path: Path = actor.calculate_move_path(&grid, Direction::Down);
        actor.follow(&mut grid, &path);
        assert_eq!(grid.get_cell_type(3, 1), CellType::Goal);
        assert_eq!(actor.pos, Position::new(3, 4));
        assert_eq!(actor.move_count, 2);

        actor.reset(&mut grid);
        assert_eq!(actor.pos, Position::new(1, 1));
        assert_eq!(actor.move_count, 0);
        assert_eq!(grid.get_cell_type(1, 1), CellType::Actor);
        assert_eq!(grid.get_cell_type(3, 4), CellType::Empty);
        assert_eq!(grid.get_cell_type(3, 1), CellType::Goal);
    }

    #[test]
    fn reset_from_the_goal_restores_it() {
        let (mut grid, mut actor) = corridor();

        let path: Path = actor.calculate_move_path(&grid, Direction::Right);
        actor.follow(&mut grid, &path);
        actor.reset(&mut grid);
        assert_eq!(grid.get_cell_type(3, 1), CellType::Goal);
        assert_eq!(grid.get_cell_type(1, 1), CellType::Actor);
    }

    #[test]
    fn no_spawn_on_a_tiny_grid() {
        let mut grid: Grid = Grid::new(2);
        let mut rng: SeededRandom = SeededRandom::new(5);
        assert_eq!(
            Actor::place(&mut grid, &mut rng, 100),
            Err(PlacementError::Exhausted { attempts: 0 })
        );
    }
}
