/*
background.rs

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

//! Search for the puzzle of the day without blocking the caller.
//!
//! The search can take a while when the day has no hard puzzle. [`spawn`] runs it in a thread
//! and returns the receiving end of a channel that delivers the result. Interactive front ends
//! await the receiver, command-line tools block on it.

use chrono::NaiveDate;
use log::{debug, warn};
use std::thread;

use super::cancel::CancelToken;
use super::daily::{self, GenerationError, Puzzle};
use crate::config::GeneratorConfig;

/// Start the search for the puzzle of the given day.
///
/// The returned receiver yields a single result. Cancel the token to stop the search early.
pub fn spawn(
    date: NaiveDate,
    config: GeneratorConfig,
    token: CancelToken,
) -> async_channel::Receiver<Result<Puzzle, GenerationError>> {
    let (sender, receiver) = async_channel::bounded::<Result<Puzzle, GenerationError>>(1);

    thread::spawn(move || {
        debug!("Background search for {date} started");
        let result: Result<Puzzle, GenerationError> =
            daily::generate_daily(date, &config, &token);
        if sender.send_blocking(result).is_err() {
            warn!("The puzzle for {date} is ready, but nobody is waiting for it");
        }
    });
    receiver
}

/// Wait for the result of a search started with [`spawn`].
///
/// # Errors
///
/// Return the search error, or [`GenerationError::Disconnected`] when the search thread ended
/// without sending anything.
pub fn wait(
    receiver: &async_channel::Receiver<Result<Puzzle, GenerationError>>,
) -> Result<Puzzle, GenerationError> {
    receiver
        .recv_blocking()
        .map_err(|_| GenerationError::Disconnected)?
}
