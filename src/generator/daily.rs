/*
daily.rs

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

//! Generate the puzzle of the day.
//!
//! The puzzle only depends on the date, so that all the players get the same puzzle on a given
//! day. The date at midnight is hashed into a seed, and a puzzle is built from that seed. If the
//! puzzle is not good enough, then the time is moved forward and the new date-time string gives
//! a new seed.
//!
//! The search runs in tiers, from the hardest minimum number of moves to the easiest (see
//! [`GeneratorConfig::tiers`]). For each tier the whole day is scanned twice: first with one
//! second steps and `YYYY-MM-DDTHH:MM:SS` strings, then with 100ms steps and the millisecond
//! `YYYY-MM-DDTHH:MM:SS.mmmZ` strings.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use super::actor::Actor;
use super::cancel::CancelToken;
use super::grid::{Grid, PlacementError};
use super::position::Position;
use super::seeded_random::{SeededRandom, hash_string};
use super::solver::{GenerationResult, Solver};
use crate::config::{DAY_MS, GeneratorConfig, ScanConfig};

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerationError {
    /// The date is not in the `YYYY-MM-DD` format.
    InvalidDate(String),

    /// The generator configuration cannot produce puzzles.
    InvalidConfig(String),

    /// No puzzle found for the day, in any tier.
    Exhausted { date: NaiveDate },

    /// The search was cancelled or ran out of time.
    Cancelled,

    /// The background search stopped without returning a result.
    Disconnected,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::InvalidDate(s) => write!(f, "invalid date '{s}', expected YYYY-MM-DD"),
            GenerationError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            GenerationError::Exhausted { date } => write!(f, "no puzzle could be built for {date}"),
            GenerationError::Cancelled => write!(f, "puzzle generation cancelled"),
            GenerationError::Disconnected => write!(f, "puzzle generation stopped unexpectedly"),
        }
    }
}

impl Error for GenerationError {}

/// Accepted puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Day of the puzzle.
    pub date: NaiveDate,

    /// Date-time string that was hashed into the seed.
    pub key: String,

    pub seed: u32,

    /// Minimum number of moves required by the tier that accepted the puzzle.
    pub floor: usize,

    /// Grid, with the actor at its start position and the goal.
    pub grid: Grid,

    /// Start position of the actor.
    pub actor: Position,

    pub goal: Position,

    /// Solvability analysis. [`GenerationResult::min_moves`] is the par of the puzzle.
    pub result: GenerationResult,
}

impl Puzzle {
    /// Minimum number of moves to solve the puzzle.
    pub fn par(&self) -> usize {
        self.result.min_moves
    }
}

/// The two scans of a day.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Pass {
    /// Second steps, `YYYY-MM-DDTHH:MM:SS` strings.
    Coarse,

    /// Sub-second steps, `YYYY-MM-DDTHH:MM:SS.mmmZ` strings.
    Fine,
}

impl Pass {
    fn step_ms(self, scan: &ScanConfig) -> u64 {
        match self {
            Pass::Coarse => scan.coarse_step_ms,
            Pass::Fine => scan.fine_step_ms,
        }
    }

    fn format(self, datetime: &NaiveDateTime) -> String {
        match self {
            Pass::Coarse => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Pass::Fine => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Return [`GenerationError::InvalidDate`] when the string is not a valid date.
pub fn parse_date(date: &str) -> Result<NaiveDate, GenerationError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| GenerationError::InvalidDate(date.to_string()))
}

/// Return the date-time strings to hash for the given pass, in scan order.
///
/// The window is cut at the end of the day, so all the strings share the date of the puzzle.
pub fn candidate_keys(
    date: NaiveDate,
    pass: Pass,
    scan: &ScanConfig,
) -> impl Iterator<Item = String> {
    let midnight: NaiveDateTime = date.and_time(NaiveTime::MIN);
    let step: usize = usize::try_from(pass.step_ms(scan).max(1)).unwrap_or(usize::MAX);

    (0..scan.window_ms.min(DAY_MS))
        .step_by(step)
        .map_while(move |ms| {
            let offset: TimeDelta = TimeDelta::try_milliseconds(i64::try_from(ms).ok()?)?;
            midnight.checked_add_signed(offset)
        })
        .map(move |datetime| pass.format(&datetime))
}

/// Grid, actor, and goal built from a seed, before any verification.
pub struct Candidate {
    /// Generator in the state left by the placement of the goal.
    pub rng: SeededRandom,

    pub grid: Grid,

    pub actor: Actor,

    pub goal: Position,
}

impl Candidate {
    /// Build the grid, then place the actor, then the goal, all from the same random sequence.
    ///
    /// # Errors
    ///
    /// Return [`PlacementError::Exhausted`] when the actor or the goal cannot be placed.
    pub fn build(seed: u32, config: &GeneratorConfig) -> Result<Self, PlacementError> {
        let mut rng: SeededRandom = SeededRandom::new(seed);
        let mut grid: Grid = Grid::new(config.grid_size);

        grid.initialize(&mut rng, config.wall_count, config.wall_attempts);
        let actor: Actor = Actor::place(&mut grid, &mut rng, config.placement_attempts)?;
        let goal: Position = grid.place_target(actor.pos, &mut rng, config.placement_attempts)?;
        Ok(Self {
            rng,
            grid,
            actor,
            goal,
        })
    }
}

/// Build and verify the puzzle for the given seed.
///
/// The puzzle is accepted when it is solvable, when all its cells can be reached, and when it
/// needs at least `floor` moves. A puzzle that is too easy gets a single second chance with
/// another goal.
///
/// Return None when the puzzle is rejected.
///
/// # Errors
///
/// Return [`PlacementError::Exhausted`] when the actor or a goal cannot be placed. The caller
/// should move on to the next seed.
pub fn attempt(
    date: NaiveDate,
    key: &str,
    floor: usize,
    config: &GeneratorConfig,
) -> Result<Option<Puzzle>, PlacementError> {
    let seed: u32 = hash_string(key);
    let Candidate {
        mut rng,
        mut grid,
        actor,
        mut goal,
    } = Candidate::build(seed, config)?;

    let (mut result, reachable) = {
        let solver: Solver = Solver::new(&grid);
        (
            solver.check_solvable(actor.initial_pos),
            solver.check_all_cells_reachable(actor.initial_pos),
        )
    };
    debug!("{key} (seed {seed}): {result:?}, all cells reachable = {reachable}");

    if !result.solvable || !reachable {
        return Ok(None);
    }

    if result.min_moves < floor {
        // Too easy: try another goal once
        grid.clear_target();
        goal = grid.place_target(actor.pos, &mut rng, config.placement_attempts)?;
        result = Solver::new(&grid).check_solvable(actor.initial_pos);
        debug!("{key}: goal moved to {goal}: {result:?}");

        if !result.solvable || result.min_moves < floor {
            return Ok(None);
        }
    }

    Ok(Some(Puzzle {
        date,
        key: key.to_string(),
        seed,
        floor,
        grid,
        actor: actor.initial_pos,
        goal,
        result,
    }))
}

/// Find the puzzle of the given day.
///
/// # Errors
///
/// Return [`GenerationError::InvalidConfig`] for an unusable configuration,
/// [`GenerationError::Cancelled`] when the token fires during the search, and
/// [`GenerationError::Exhausted`] when no seed of the day gives a puzzle, even in the easiest
/// tier.
pub fn generate_daily(
    date: NaiveDate,
    config: &GeneratorConfig,
    token: &CancelToken,
) -> Result<Puzzle, GenerationError> {
    config.validate().map_err(GenerationError::InvalidConfig)?;

    for &floor in &config.tiers {
        for pass in [Pass::Coarse, Pass::Fine] {
            debug!("{date}: {pass:?} pass with at least {floor} moves");
            let mut tried: usize = 0;

            for key in candidate_keys(date, pass, &config.scan) {
                if token.is_cancelled() {
                    info!("{date}: search cancelled after {tried} seeds in the {pass:?} pass");
                    return Err(GenerationError::Cancelled);
                }
                tried += 1;

                match attempt(date, &key, floor, config) {
                    Ok(Some(puzzle)) => {
                        info!(
                            "{date}: puzzle found with {key} (seed {}), {} moves, tier {floor}",
                            puzzle.seed,
                            puzzle.par()
                        );
                        return Ok(puzzle);
                    }
                    Ok(None) => (),
                    Err(e) => debug!("{key}: {e}"),
                }
            }
            debug!("{date}: no puzzle in the {pass:?} pass after {tried} seeds");
        }
        info!("{date}: no puzzle with at least {floor} moves, relaxing the difficulty");
    }
    Err(GenerationError::Exhausted { date })
}

/// Parse the date and find its puzzle.
///
/// # Errors
///
/// See [`parse_date`] and [`generate_daily`].
pub fn generate_daily_from_str(
    date: &str,
    config: &GeneratorConfig,
    token: &CancelToken,
) -> Result<Puzzle, GenerationError> {
    generate_daily(parse_date(date)?, config, token)
}
