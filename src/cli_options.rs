/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, the puzzle of the day is generated and printed.
//!
//! # Examples
//!
//! Print the puzzle of April 30, 2025:
//!
//! ```
//! $ glissade --date 2025-04-30
//! ##########
//! #.#......#
//! #........#
//! #..#.....#
//! #..A..#.##
//! #..#..#G##
//! #.......##
//! #...#....#
//! ##...##..#
//! ##########
//!
//!   date = 2025-04-30
//!    key = 2025-04-30T00:01:40
//!   seed = 1440878389
//!   tier = 6
//!    par = 6
//! ```
//!
//! Replay a solution:
//!
//! ```
//! $ glissade --date 2025-04-30 --play RDRDLU
//! ...
//! glissade 2025-04-30: solved in 6 moves (par 6, par)
//! ```

use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use log::debug;
use rand::Rng;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use glissade::config::{COPYRIGHT_NOTICE, GeneratorConfig};
use glissade::game::Game;
use glissade::generator::background;
use glissade::generator::cancel::CancelToken;
use glissade::generator::daily::{self, Puzzle};
use glissade::generator::position::Direction;

/// Generate the daily sliding puzzle.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Day of the puzzle, in the YYYY-MM-DD format (today by default)
    #[arg(long, conflicts_with = "random_date")]
    date: Option<String>,

    /// Use a random day of the current year
    #[arg(short, long, default_value_t = false)]
    random_date: bool,

    /// JSON file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up the search after this number of seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Print the puzzle in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Play the given moves (U, R, D, and L letters) and print the outcome
    #[arg(short, long)]
    play: Option<String>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Outcome of the `--play` moves.
#[derive(Serialize)]
struct PlayReport {
    moves: usize,
    won: bool,
    performance: String,
    summary: String,
}

/// JSON output.
#[derive(Serialize)]
struct Report<'a> {
    puzzle: &'a Puzzle,
    play: Option<PlayReport>,
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let config: GeneratorConfig = match &args.config {
        Some(path) => match GeneratorConfig::load(path) {
            Ok(Some(c)) => c,
            Ok(None) => {
                eprintln!("Configuration file {path:?} not found");
                return 1;
            }
            Err(e) => {
                eprintln!("Cannot read the configuration file {path:?}: {e}");
                return 1;
            }
        },
        None => GeneratorConfig::default(),
    };

    let date: NaiveDate = if args.random_date {
        random_date()
    } else {
        match &args.date {
            Some(d) => match daily::parse_date(d) {
                Ok(date) => date,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return 1;
                }
            },
            None => Local::now().date_naive(),
        }
    };
    debug!("Generating the puzzle for {date}");

    let token: CancelToken = match args.timeout {
        Some(secs) => CancelToken::with_timeout(Duration::from_secs(secs)),
        None => CancelToken::new(),
    };

    let receiver = background::spawn(date, config, token);
    let puzzle: Puzzle = match background::wait(&receiver) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let play: Option<PlayReport> = match &args.play {
        Some(moves) => match play(&puzzle, moves) {
            Ok(report) => Some(report),
            Err(msg) => {
                eprintln!("Error: {msg}");
                return 1;
            }
        },
        None => None,
    };

    if args.json {
        let report: Report = Report {
            puzzle: &puzzle,
            play,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    } else {
        print!("{}", puzzle.grid);
        println!(
            "
  date = {}
   key = {}
  seed = {}
  tier = {}
   par = {}",
            puzzle.date,
            puzzle.key,
            puzzle.seed,
            puzzle.floor,
            puzzle.par()
        );
        if let Some(report) = play {
            println!("\n{}", report.summary);
        }
    }
    0
}

/// Pick a random day of the current year.
fn random_date() -> NaiveDate {
    let today: NaiveDate = Local::now().date_naive();
    let days: u32 = NaiveDate::from_ymd_opt(today.year(), 12, 31)
        .map(|d| d.ordinal())
        .unwrap_or(365);
    let ordinal: u32 = rand::rng().random_range(1..=days);

    NaiveDate::from_yo_opt(today.year(), ordinal).unwrap_or(today)
}

/// Play the moves on the puzzle.
fn play(puzzle: &Puzzle, moves: &str) -> Result<PlayReport, String> {
    let mut game: Game = Game::new(puzzle.clone());

    for c in moves.chars().filter(|c| !c.is_whitespace()) {
        let direction: Direction =
            Direction::from_letter(c).ok_or_else(|| format!("unknown move '{c}'"))?;
        match game.move_player(direction) {
            Some(path) => {
                debug!("{direction:?}: {:?}", path.get());
                game.finish_move();
            }
            None => debug!("{direction:?}: no move"),
        }
    }

    Ok(PlayReport {
        moves: game.move_count(),
        won: game.is_won(),
        performance: game.performance().to_string(),
        summary: game.share_text(),
    })
}
