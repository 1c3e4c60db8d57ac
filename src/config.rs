/*
config.rs

Copyright 2025 Hervé Quatremain

This file is part of Hexmaze.

Hexmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hexmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hexmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Build-time constants and the parameters of a maze generation run.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::process;

use crate::generator::walls::ShuffleMethod;

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\n\nCopyright 2025 Hervé Quatremain\n",
    "Based on make-maze, copyright 1995 Gareth McCaughan\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>"
);

/// Smallest number of columns or rows.
pub const MIN_DIMENSION: usize = 2;

/// Largest number of columns or rows.
pub const MAX_DIMENSION: usize = 1000;

/// Width of the drawing area, in points, that the maze must fit in.
pub const TARGET_WIDTH: f64 = 500.0;

/// Height of the drawing area, in points.
pub const TARGET_HEIGHT: f64 = 700.0;

/// Seeds derived from the clock are kept within 31 bits so that they are easy to type back.
const SEED_MASK: u64 = 0x7FFF_FFFF;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The number of columns or rows is not between [`MIN_DIMENSION`] and [`MAX_DIMENSION`].
    DimensionOutOfRange { name: &'static str, value: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::DimensionOutOfRange { name, value } => write!(
                f,
                "{name} = {value}: both dimensions must be in the range {MIN_DIMENSION}..{MAX_DIMENSION}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Parameters of a maze generation run.
///
/// The same parameters always produce the same maze.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Number of columns.
    pub columns: usize,

    /// Number of cells in each column.
    pub rows: usize,

    /// Seed for the random number generator.
    pub seed: u64,

    /// How the walls are randomly ordered.
    pub shuffle: ShuffleMethod,
}

impl MazeConfig {
    /// Create a [`MazeConfig`] object.
    ///
    /// If `seed` is [`None`], then a seed is derived from the current time.
    ///
    /// # Errors
    ///
    /// The method returns an error if a dimension is out of range.
    pub fn new(
        columns: usize,
        rows: usize,
        seed: Option<u64>,
        shuffle: ShuffleMethod,
    ) -> Result<Self, ConfigError> {
        check_dimension("columns", columns)?;
        check_dimension("rows", rows)?;

        let seed: u64 = match seed {
            Some(s) => s,
            None => {
                let s: u64 = seed_from_clock(Utc::now());
                debug!("Seed derived from the clock: {s}");
                s
            }
        };
        Ok(Self {
            columns,
            rows,
            seed,
            shuffle,
        })
    }

    /// Number of cells in the maze.
    pub fn num_cells(&self) -> usize {
        self.columns * self.rows
    }
}

fn check_dimension(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::DimensionOutOfRange { name, value })
    }
}

/// Derive a seed from the given time and the process ID.
///
/// Two runs started within the same second still get different seeds.
fn seed_from_clock(now: DateTime<Utc>) -> u64 {
    let secs: u64 = now.timestamp().unsigned_abs();
    let micros: u64 = now.timestamp_subsec_micros() as u64;
    let pid: u64 = process::id() as u64;
    ((secs << 8) ^ micros ^ (pid << 16)) & SEED_MASK
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dimensions_are_checked() {
        for (c, r) in [(1, 5), (5, 1), (1001, 5), (5, 0), (0, 0)] {
            assert!(MazeConfig::new(c, r, Some(1), ShuffleMethod::Uniform).is_err());
        }
        assert_eq!(
            MazeConfig::new(2, 1001, Some(1), ShuffleMethod::Uniform),
            Err(ConfigError::DimensionOutOfRange {
                name: "rows",
                value: 1001
            })
        );

        let config: MazeConfig =
            MazeConfig::new(1000, 2, Some(9), ShuffleMethod::Buckets).unwrap();
        assert_eq!(config.num_cells(), 2000);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn clock_seed() {
        let t: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let s: u64 = seed_from_clock(t);
        assert!(s <= SEED_MASK);
        assert_eq!(s, seed_from_clock(t));

        let config: MazeConfig = MazeConfig::new(3, 3, None, ShuffleMethod::Uniform).unwrap();
        assert!(config.seed <= SEED_MASK);
    }

    #[test]
    fn error_message() {
        let e: ConfigError = ConfigError::DimensionOutOfRange {
            name: "columns",
            value: 1,
        };
        assert_eq!(
            e.to_string(),
            "columns = 1: both dimensions must be in the range 2..1000"
        );
    }
}
