/*
config.rs

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

//! Build constants and generator configuration.
//!
//! The [`GeneratorConfig`] object stores all the tunables of the puzzle generator. The defaults
//! reproduce the official daily puzzles; changing any value changes the puzzle of every day.
//! Developers can override the defaults with a JSON file:
//!
//! ```json
//! {
//!     "tiers": [8, 5, 1],
//!     "scan": { "window_ms": 3600000 }
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Side of the square grid, outer walls included.
pub const GRID_SIZE: usize = 10;

/// Length of a day. The scan never leaves the day of the puzzle.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Time steps used when scanning a day for a suitable seed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Step of the first pass, which hashes `YYYY-MM-DDTHH:MM:SS` strings.
    pub coarse_step_ms: u64,

    /// Step of the second pass, which hashes `YYYY-MM-DDTHH:MM:SS.mmmZ` strings.
    pub fine_step_ms: u64,

    /// Length of the scanned window, starting at midnight. At most [`DAY_MS`].
    pub window_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            coarse_step_ms: 1000,
            fine_step_ms: 100,
            window_ms: DAY_MS,
        }
    }
}

/// Generator configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Side of the grid, outer walls included.
    pub grid_size: usize,

    /// Inclusive range for the number of inner walls.
    pub wall_count: (usize, usize),

    /// Number of positions tried for each inner wall before giving up on the remaining walls.
    pub wall_attempts: usize,

    /// Number of positions tried when placing the actor or the goal.
    pub placement_attempts: usize,

    /// Minimum number of moves, from the hardest tier to the easiest.
    pub tiers: Vec<usize>,

    pub scan: ScanConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            wall_count: (10, 15),
            wall_attempts: 50,
            placement_attempts: 1000,
            tiers: vec![6, 4, 1],
            scan: ScanConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Read the configuration from a JSON file.
    ///
    /// Return None if the file does not exist. Missing keys get their default value.
    pub fn load(path: &Path) -> Result<Option<GeneratorConfig>, Box<dyn Error>> {
        let file: File;
        match File::open(path) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let config: GeneratorConfig = serde_json::from_reader(reader)?;
        debug!("Configuration loaded from {path:?}: {config:?}");
        Ok(Some(config))
    }

    /// Verify that the configuration can produce puzzles.
    ///
    /// # Errors
    ///
    /// Return a message that describes the first invalid parameter.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 3 {
            return Err(format!(
                "the grid size must be at least 3, got {}",
                self.grid_size
            ));
        }
        if self.wall_count.0 > self.wall_count.1 {
            return Err(format!(
                "invalid wall count range {}-{}",
                self.wall_count.0, self.wall_count.1
            ));
        }
        if self.tiers.is_empty() {
            return Err("at least one difficulty tier is required".to_string());
        }
        if self.tiers.contains(&0) {
            return Err("difficulty tiers must be at least 1".to_string());
        }
        if self.placement_attempts == 0 {
            return Err("the placement attempt count must be at least 1".to_string());
        }
        if self.scan.coarse_step_ms == 0 || self.scan.fine_step_ms == 0 {
            return Err("scan steps must be at least 1ms".to_string());
        }
        if self.scan.window_ms == 0 {
            return Err("the scan window cannot be empty".to_string());
        }
        if self.scan.window_ms > DAY_MS {
            return Err(format!(
                "the scan window cannot exceed one day ({DAY_MS}ms), got {}ms",
                self.scan.window_ms
            ));
        }
        Ok(())
    }
}
