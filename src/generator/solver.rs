/*
solver.rs

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

//! Verify that a puzzle can be solved, and how hard it is.
//!
//! Both analyses are breadth-first searches where a node is a position and an edge is a full
//! slide in one direction. One edge is one key press for the player, whatever the number of
//! cells traversed.
//!
//! A slide that goes through the goal counts as reaching it, even when the slide would
//! continue past the goal: during play, the actor stops on the goal.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use super::grid::{CellType, Grid};
use super::path::Slide;
use super::position::{Direction, Position};

/// Outcome of the solvability analysis.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Whether the goal can be reached.
    pub solvable: bool,

    /// Minimum number of moves to reach the goal. Zero when not solvable.
    pub min_moves: usize,
}

/// Solver object.
pub struct Solver<'a> {
    grid: &'a Grid,
}

impl<'a> Solver<'a> {
    /// Create the object for the given grid.
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Search for the shortest solution from the given position.
    pub fn check_solvable(&self, start: Position) -> GenerationResult {
        let goal: Position = match self.grid.goal() {
            Some(g) => g,
            None => return GenerationResult::default(),
        };

        let mut visited: HashSet<Position> = HashSet::new();
        let mut queue: VecDeque<(Position, usize)> = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, moves)) = queue.pop_front() {
            if current == goal {
                return GenerationResult {
                    solvable: true,
                    min_moves: moves,
                };
            }

            for direction in Direction::ALL {
                let slide: Slide = self.grid.simulate_move(current, direction);

                if slide.path.contains(&goal) {
                    debug!(
                        "Goal {goal} reached in {} moves (last slide {direction:?} from {current})",
                        moves + 1
                    );
                    return GenerationResult {
                        solvable: true,
                        min_moves: moves + 1,
                    };
                }
                if visited.insert(slide.end) {
                    queue.push_back((slide.end, moves + 1));
                }
            }
        }
        debug!("Goal {goal} cannot be reached from {start}");
        GenerationResult::default()
    }

    /// Whether every empty cell and the goal can be touched, by landing on it or by sliding
    /// through it, from the given position.
    pub fn check_all_cells_reachable(&self, start: Position) -> bool {
        let mut required: HashSet<Position> = self
            .grid
            .positions()
            .filter(|p| {
                matches!(
                    self.grid.get_cell_type(p.x, p.y),
                    CellType::Empty | CellType::Goal
                )
            })
            .collect();
        required.remove(&start);

        let mut visited: HashSet<Position> = HashSet::new();
        let mut queue: VecDeque<Position> = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                let slide: Slide = self.grid.simulate_move(current, direction);

                for pos in slide.path.get() {
                    required.remove(pos);
                }
                if visited.insert(slide.end) {
                    queue.push_back(slide.end);
                }
            }
        }

        if !required.is_empty() {
            debug!(
                "{} cells cannot be reached from {start}: {required:?}",
                required.len()
            );
        }
        required.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).expect("valid grid")
    }

    #[test]
    fn single_wall_grid() {
        let g: Grid = grid(&["#####", "#A..#", "#.#.#", "#..G#", "#####"]);
        let solver: Solver = Solver::new(&g);

        assert_eq!(
            solver.check_solvable(Position::new(1, 1)),
            GenerationResult {
                solvable: true,
                min_moves: 2
            }
        );
    }

    #[test]
    fn sealed_goal_is_not_solvable() {
        let g: Grid = grid(&["#####", "#A..#", "#####", "#..G#", "#####"]);
        let solver: Solver = Solver::new(&g);

        assert_eq!(
            solver.check_solvable(Position::new(1, 1)),
            GenerationResult {
                solvable: false,
                min_moves: 0
            }
        );
        assert!(!solver.check_all_cells_reachable(Position::new(1, 1)));
    }

    #[test]
    fn no_goal_is_not_solvable() {
        let g: Grid = grid(&["#####", "#A..#", "#...#", "#...#", "#####"]);
        assert_eq!(
            Solver::new(&g).check_solvable(Position::new(1, 1)),
            GenerationResult::default()
        );
    }

    #[test]
    fn sliding_through_the_goal_reaches_it() {
        // No slide ends on (2, 1), the goal is only crossed
        let g: Grid = grid(&["#####", "#.G.#", "#.#.#", "#A..#", "#####"]);
        let result: GenerationResult = Solver::new(&g).check_solvable(Position::new(1, 3));
        assert!(result.solvable);
        assert_eq!(result.min_moves, 2);
    }

    #[test]
    fn crossed_cells_are_reachable() {
        // Slides only ever end in the corners, but they cross every other free cell
        let g: Grid = grid(&["#####", "#A..#", "#.#.#", "#..G#", "#####"]);
        let solver: Solver = Solver::new(&g);
        let start: Position = Position::new(1, 1);

        for direction in Direction::ALL {
            for corner in [Position::new(1, 1), Position::new(3, 1), Position::new(1, 3)] {
                assert_ne!(g.simulate_move(corner, direction).end, Position::new(2, 1));
            }
        }
        assert!(solver.check_all_cells_reachable(start));
    }

    #[test]
    fn connected_but_unreachable_center() {
        // Connected grid, but the center cell is never crossed by any slide
        let g: Grid = grid(&["#####", "#A..#", "#...#", "#..G#", "#####"]);
        assert!(g.check_connectivity());
        assert!(!Solver::new(&g).check_all_cells_reachable(Position::new(1, 1)));
    }

    #[test]
    fn reference_puzzle_needs_six_moves() {
        let g: Grid = grid(&[
            "##########",
            "#.#......#",
            "#........#",
            "#..#.....#",
            "#..A..#.##",
            "#..#..#G##",
            "#.......##",
            "#...#....#",
            "##...##..#",
            "##########",
        ]);
        let solver: Solver = Solver::new(&g);
        let start: Position = Position::new(3, 4);

        assert_eq!(
            solver.check_solvable(start),
            GenerationResult {
                solvable: true,
                min_moves: 6
            }
        );
        assert!(solver.check_all_cells_reachable(start));
    }
}
