/*
seeded_random.rs

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

//! Deterministic random numbers and seeds.
//!
//! Every daily puzzle must be identical for all the players, so the generator does not use the
//! [`rand`] thread generator but [`SeededRandom`], a tiny stateful sine-based generator. The same
//! seed always produces the same sequence of draws.
//!
//! Seeds are derived from date-time strings by [`hash_string`].

/// Seeded pseudo-random number generator.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    /// Current state. Incremented after each draw.
    seed: u64,
}

impl SeededRandom {
    /// Create the generator from the given seed. All seeds are valid.
    pub fn new(seed: u32) -> Self {
        Self { seed: seed as u64 }
    }

    /// Return a number in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        let x: f64 = (self.seed as f64).sin() * 10000.0;
        self.seed += 1;
        x - x.floor()
    }

    /// Return an integer between `min` and `max`, inclusive.
    pub fn random_int(&mut self, min: usize, max: usize) -> usize {
        let span: f64 = (max - min + 1) as f64;
        (self.random() * span).floor() as usize + min
    }
}

/// Hash the given string into a seed.
///
/// Polynomial rolling hash (`hash * 31 + code unit`) over the UTF-16 code units of the string,
/// wrapped to 32 bits. The absolute value of the result is returned.
pub fn hash_string(s: &str) -> u32 {
    let mut hash: i32 = 0;

    for c in s.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}
