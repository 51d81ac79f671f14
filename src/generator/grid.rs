/*
grid.rs

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

//! Square grid of cells and the sliding rules.
//!
//! The outer ring of the grid is always made of walls. Inner walls are added at random, but only
//! where they do not split the free cells into isolated areas (see
//! [`Grid::add_strategic_walls`]).

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::error::Error;
use std::fmt;

use super::path::{Path, Slide};
use super::position::{Direction, Position};
use super::seeded_random::SeededRandom;

/// Content of a cell.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CellType {
    #[default]
    Empty,
    Wall,
    Actor,
    Goal,
}

impl CellType {
    /// Character used for the text rendering of the grid.
    pub fn to_char(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Wall => '#',
            CellType::Actor => 'A',
            CellType::Goal => 'G',
        }
    }

    /// Reverse of [`CellType::to_char`].
    pub fn from_char(c: char) -> Option<CellType> {
        match c {
            '.' => Some(CellType::Empty),
            '#' => Some(CellType::Wall),
            'A' => Some(CellType::Actor),
            'G' => Some(CellType::Goal),
            _ => None,
        }
    }
}

/// Type of errors for the bounded placement loops.
#[derive(Debug, PartialEq)]
pub enum PlacementError {
    /// No suitable cell found after the given number of random draws.
    Exhausted { attempts: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlacementError::Exhausted { attempts } => {
                write!(f, "no suitable cell found after {attempts} attempts")
            }
        }
    }
}

impl Error for PlacementError {}

/// Grid object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Grid {
    /// Number of rows and columns.
    size: usize,

    /// Cells, row by row.
    cells: Vec<CellType>,

    /// Position of the goal, once placed.
    goal: Option<Position>,
}

impl Grid {
    /// Create a grid of empty cells, without walls.
    ///
    /// Grids smaller than 3x3 have no inner cell: walls, actor and goal cannot be placed.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellType::Empty; size * size],
            goal: None,
        }
    }

    /// Build a grid from its text rendering, one string per row (see [`CellType::to_char`]).
    ///
    /// # Errors
    ///
    /// Return an error if the rows do not form a square or contain unknown characters.
    pub fn from_rows(rows: &[&str]) -> Result<Self, String> {
        let size: usize = rows.len();
        let mut grid: Grid = Grid::new(size);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(format!("row {y} does not have {size} cells"));
            }
            for (x, c) in row.chars().enumerate() {
                let cell: CellType =
                    CellType::from_char(c).ok_or_else(|| format!("unknown cell '{c}'"))?;
                if cell == CellType::Goal {
                    grid.goal = Some(Position::new(x, y));
                }
                grid.set_cell_type(x, y, cell);
            }
        }
        Ok(grid)
    }

    /// Number of rows and columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Position of the goal, if already placed.
    pub fn goal(&self) -> Option<Position> {
        self.goal
    }

    /// Reset the grid: empty cells surrounded by walls, plus some random inner walls.
    ///
    /// Return the number of inner walls that were added.
    pub fn initialize(
        &mut self,
        rng: &mut SeededRandom,
        wall_count: (usize, usize),
        wall_attempts: usize,
    ) -> usize {
        self.cells.fill(CellType::Empty);
        self.goal = None;

        let last: usize = self.size.saturating_sub(1);
        for i in 0..self.size {
            self.set_cell_type(i, 0, CellType::Wall);
            self.set_cell_type(i, last, CellType::Wall);
            self.set_cell_type(0, i, CellType::Wall);
            self.set_cell_type(last, i, CellType::Wall);
        }

        self.add_strategic_walls(rng, wall_count, wall_attempts)
    }

    /// Add random inner walls that keep all the free cells connected.
    ///
    /// The number of walls is drawn from the `wall_count` range. For each wall, up to
    /// `wall_attempts` random positions are tried. A wall that would isolate some cells is
    /// removed and another position is drawn. When no position is found for a wall, the
    /// remaining walls are not added.
    ///
    /// Return the number of walls that were added.
    pub fn add_strategic_walls(
        &mut self,
        rng: &mut SeededRandom,
        wall_count: (usize, usize),
        wall_attempts: usize,
    ) -> usize {
        let Some(last) = self.last_inner_index() else {
            debug!("No inner cell in a {0}x{0} grid", self.size);
            return 0;
        };
        let num_walls: usize = rng.random_int(wall_count.0, wall_count.1);
        let mut added: usize = 0;

        for _ in 0..num_walls {
            let mut valid_position: bool = false;
            let mut attempts: usize = 0;

            while !valid_position && attempts < wall_attempts {
                let x: usize = rng.random_int(1, last);
                let y: usize = rng.random_int(1, last);

                if self.get_cell_type(x, y) != CellType::Wall {
                    self.set_cell_type(x, y, CellType::Wall);
                    if self.check_connectivity() {
                        valid_position = true;
                    } else {
                        self.set_cell_type(x, y, CellType::Empty);
                    }
                }
                attempts += 1;
            }

            if !valid_position {
                debug!("No position for wall {} after {attempts} attempts", added + 1);
                break;
            }
            added += 1;
        }

        debug!("{added} inner walls added out of {num_walls}");
        if log_enabled!(Level::Debug) {
            for line in self.to_string().lines() {
                debug!("    {line}");
            }
        }
        added
    }

    /// Whether all the inner free cells form a single area (4-directional adjacency).
    ///
    /// A grid without any free cell is connected.
    pub fn check_connectivity(&self) -> bool {
        let free: Vec<Position> = self
            .interior()
            .filter(|p| self.get_cell_type(p.x, p.y) != CellType::Wall)
            .collect();

        let start: Position = match free.first() {
            Some(p) => *p,
            None => return true,
        };

        let mut visited: HashSet<Position> = HashSet::with_capacity(free.len());
        let mut queue: VecDeque<Position> = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                if let Some(next) = current.step(direction)
                    && self.is_interior(&next)
                    && self.get_cell_type(next.x, next.y) != CellType::Wall
                    && visited.insert(next)
                {
                    queue.push_back(next);
                }
            }
        }
        visited.len() == free.len()
    }

    /// Slide from `start` in the given direction until the next cell is a wall or outside the
    /// grid.
    ///
    /// The goal does not stop the slide: the solver decides by itself whether a slide reached
    /// the goal (see [`crate::generator::actor::Actor::calculate_move_path`] for the player's
    /// moves, which do stop on the goal).
    pub fn simulate_move(&self, start: Position, direction: Direction) -> Slide {
        let mut path: Path = Path::new(start);
        let mut current: Position = start;

        while let Some(next) = current.step(direction) {
            if self.get_cell_type(next.x, next.y) == CellType::Wall {
                break;
            }
            current = next;
            path.push(current);
        }
        Slide { end: current, path }
    }

    /// Place the goal on a random empty cell that does not touch the actor.
    ///
    /// # Errors
    ///
    /// Return [`PlacementError::Exhausted`] when no cell is found after `attempts` draws. The error reports
    /// zero attempts when the grid has no inner cell.
    pub fn place_target(
        &mut self,
        actor_pos: Position,
        rng: &mut SeededRandom,
        attempts: usize,
    ) -> Result<Position, PlacementError> {
        let Some(last) = self.last_inner_index() else {
            return Err(PlacementError::Exhausted { attempts: 0 });
        };

        for _ in 0..attempts {
            let x: usize = rng.random_int(1, last);
            let y: usize = rng.random_int(1, last);
            let pos: Position = Position::new(x, y);

            if self.get_cell_type(x, y) == CellType::Empty && !actor_pos.is_adjacent(&pos) {
                self.set_cell_type(x, y, CellType::Goal);
                self.goal = Some(pos);
                debug!("Goal placed at {pos}");
                return Ok(pos);
            }
        }
        Err(PlacementError::Exhausted { attempts })
    }

    /// Remove the goal from the grid. Its cell becomes empty.
    pub fn clear_target(&mut self) {
        if let Some(pos) = self.goal.take() {
            self.set_cell_type(pos.x, pos.y, CellType::Empty);
        }
    }

    /// Return the content of the cell. Positions outside the grid are walls.
    pub fn get_cell_type(&self, x: usize, y: usize) -> CellType {
        if x >= self.size || y >= self.size {
            return CellType::Wall;
        }
        self.cells[y * self.size + x]
    }

    /// Change the content of the cell. Positions outside the grid are ignored.
    pub fn set_cell_type(&mut self, x: usize, y: usize, cell: CellType) {
        if x < self.size && y < self.size {
            self.cells[y * self.size + x] = cell;
        }
    }

    /// All the positions of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Position::new(x, y)))
    }

    /// All the positions inside the outer ring, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|p| self.is_interior(p))
    }

    /// Index of the last row and column inside the outer ring, or None for grids smaller
    /// than 3x3.
    pub fn last_inner_index(&self) -> Option<usize> {
        self.size.checked_sub(2).filter(|last| *last >= 1)
    }

    fn is_interior(&self, pos: &Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x + 1 < self.size && pos.y + 1 < self.size
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size {
            let row: String = (0..self.size)
                .map(|x| self.get_cell_type(x, y).to_char())
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_are_bounds_checked() {
        let mut grid: Grid = Grid::new(5);

        grid.set_cell_type(2, 3, CellType::Goal);
        assert_eq!(grid.get_cell_type(2, 3), CellType::Goal);
        grid.set_cell_type(2, 3, CellType::Wall);
        assert_eq!(grid.get_cell_type(2, 3), CellType::Wall);

        grid.set_cell_type(5, 0, CellType::Empty);
        grid.set_cell_type(0, 17, CellType::Goal);
        assert_eq!(grid.get_cell_type(5, 0), CellType::Wall);
        assert_eq!(grid.get_cell_type(0, 17), CellType::Wall);
        assert_eq!(grid.get_cell_type(usize::MAX, 2), CellType::Wall);
    }

    #[test]
    fn initialized_grid_has_walled_border_and_stays_connected() {
        for seed in [0, 1, 42, 1440848474, 874493418, u32::MAX / 3] {
            let mut rng: SeededRandom = SeededRandom::new(seed);
            let mut grid: Grid = Grid::new(10);
            let added: usize = grid.initialize(&mut rng, (10, 15), 50);

            assert!(added <= 15);
            assert!(grid.check_connectivity(), "seed {seed}:\n{grid}");
            for i in 0..10 {
                assert_eq!(grid.get_cell_type(i, 0), CellType::Wall);
                assert_eq!(grid.get_cell_type(i, 9), CellType::Wall);
                assert_eq!(grid.get_cell_type(0, i), CellType::Wall);
                assert_eq!(grid.get_cell_type(9, i), CellType::Wall);
            }
        }
    }

    #[test]
    fn connectivity_detects_pockets() {
        let grid: Grid = Grid::from_rows(&["#####", "#.#.#", "#.#.#", "#.#.#", "#####"])
            .expect("valid grid");
        assert!(!grid.check_connectivity());

        let grid: Grid = Grid::from_rows(&["#####", "#.#.#", "#...#", "#.#.#", "#####"])
            .expect("valid grid");
        assert!(grid.check_connectivity());

        let grid: Grid = Grid::from_rows(&["###", "###", "###"]).expect("valid grid");
        assert!(grid.check_connectivity());
    }

    #[test]
    fn slide_stops_before_walls_and_goes_through_goal() {
        let grid: Grid = Grid::from_rows(&["#####", "#...#", "#.G.#", "#..##", "#####"])
            .expect("valid grid");

        let slide: Slide = grid.simulate_move(Position::new(2, 3), Direction::Up);
        assert_eq!(slide.end, Position::new(2, 1));
        assert_eq!(
            slide.path.get(),
            &vec![
                Position::new(2, 3),
                Position::new(2, 2),
                Position::new(2, 1)
            ]
        );
        assert!(slide.path.contains(&Position::new(2, 2)));

        let slide: Slide = grid.simulate_move(Position::new(2, 3), Direction::Right);
        assert!(slide.is_blocked());
        assert_eq!(slide.end, Position::new(2, 3));
    }

    #[test]
    fn reference_layout_from_seed() {
        let mut rng: SeededRandom = SeededRandom::new(1440848474);
        let mut grid: Grid = Grid::new(10);
        grid.initialize(&mut rng, (10, 15), 50);

        let expected: Grid = Grid::from_rows(&[
            "##########",
            "#...#....#",
            "#.#.#....#",
            "#......###",
            "#..#..#..#",
            "#.......##",
            "#..#...#.#",
            "#........#",
            "#........#",
            "##########",
        ])
        .expect("valid grid");
        assert_eq!(grid, expected);
    }

    #[test]
    fn goal_is_never_next_to_the_actor() {
        let mut rng: SeededRandom = SeededRandom::new(7);
        let actor: Position = Position::new(4, 4);

        for _ in 0..50 {
            let mut grid: Grid = Grid::new(10);
            grid.initialize(&mut rng, (10, 15), 50);
            grid.set_cell_type(actor.x, actor.y, CellType::Actor);
            let goal: Position = grid
                .place_target(actor, &mut rng, 1000)
                .expect("goal placed");

            assert!(!actor.is_adjacent(&goal));
            assert_eq!(grid.get_cell_type(goal.x, goal.y), CellType::Goal);
            assert_eq!(grid.goal(), Some(goal));
        }
    }

    #[test]
    fn goal_placement_is_bounded() {
        // The only free cells touch the actor
        let mut grid: Grid = Grid::from_rows(&["#####", "#...#", "#.A.#", "#...#", "#####"])
            .expect("valid grid");
        let mut rng: SeededRandom = SeededRandom::new(3);

        assert_eq!(
            grid.place_target(Position::new(2, 2), &mut rng, 25),
            Err(PlacementError::Exhausted { attempts: 25 })
        );
        assert_eq!(grid.goal(), None);
    }

    #[test]
    fn tiny_grids_have_no_inner_cell() {
        for size in 0..3 {
            let mut grid: Grid = Grid::new(size);
            let mut rng: SeededRandom = SeededRandom::new(11);

            assert_eq!(grid.last_inner_index(), None);
            assert_eq!(grid.initialize(&mut rng, (10, 15), 50), 0);
            assert!(grid.positions().all(|p| grid.get_cell_type(p.x, p.y) == CellType::Wall));
            assert_eq!(grid.interior().count(), 0);
            assert!(grid.check_connectivity());
            assert_eq!(
                grid.place_target(Position::new(0, 0), &mut rng, 25),
                Err(PlacementError::Exhausted { attempts: 0 })
            );
        }
        assert_eq!(Grid::new(3).last_inner_index(), Some(1));
    }

    #[test]
    fn clear_target_empties_the_cell() {
        let mut grid: Grid = Grid::from_rows(&["#####", "#...#", "#.G.#", "#...#", "#####"])
            .expect("valid grid");

        grid.clear_target();
        assert_eq!(grid.goal(), None);
        assert_eq!(grid.get_cell_type(2, 2), CellType::Empty);
    }

    #[test]
    fn text_rendering() {
        let rows: [&str; 4] = ["####", "#AG#", "#..#", "####"];
        let grid: Grid = Grid::from_rows(&rows).expect("valid grid");
        assert_eq!(grid.to_string(), rows.join("\n") + "\n");
        assert!(Grid::from_rows(&["###", "#x#", "###"]).is_err());
        assert!(Grid::from_rows(&["###", "##", "###"]).is_err());
    }
}
