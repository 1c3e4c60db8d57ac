/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Generate a 30x40 maze and keep the seed for later:
//!
//! ```text
//! $ make-maze 30 40 > maze.json
//! $ jq .parameters maze.json
//! {
//!   "columns": 30,
//!   "rows": 40,
//!   "seed": 1794214753,
//!   "shuffle": "uniform"
//! }
//! ```
//!
//! Generate the same maze again, and display the progress:
//!
//! ```text
//! $ make-maze --debug 30 40 1794214753 > maze.json
//! ```
//!
//! Invalid dimensions are rejected before anything is generated:
//!
//! ```text
//! $ make-maze 1 40
//! error: invalid value '1' for '<COLUMNS>': 1 is not in 2..=1000
//! ```

use clap::Parser;
use log::{LevelFilter, debug};
use std::io::{self, Write};

use hexmaze::config::{COPYRIGHT_NOTICE, MAX_DIMENSION, MIN_DIMENSION, MazeConfig};
use hexmaze::document::Document;
use hexmaze::generator::maze::Maze;
use hexmaze::generator::walls::ShuffleMethod;

/// Make a random hexagonal maze and describe it in JSON.
#[derive(Parser, Debug)]
#[command(name = "make-maze", about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of columns
    #[arg(value_parser = clap::value_parser!(u16).range(MIN_DIMENSION as i64..=MAX_DIMENSION as i64))]
    columns: u16,

    /// Number of cells in each column
    #[arg(value_parser = clap::value_parser!(u16).range(MIN_DIMENSION as i64..=MAX_DIMENSION as i64))]
    rows: u16,

    /// Seed for the random number generator. Derived from the clock if omitted
    #[arg(allow_negative_numbers = true, value_parser = parse_seed)]
    seed: Option<u64>,

    /// How to randomize the order in which the walls are knocked down
    #[arg(value_enum, short, long, default_value_t = ShuffleMethod::Uniform)]
    shuffle: ShuffleMethod,

    /// Indent the JSON document
    #[arg(short, long, default_value_t = false)]
    pretty: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse the command-line options, generate the maze, and return the exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    run(&args, io::stdout().lock())
}

/// Parse the seed.
///
/// Negative values are accepted and stored in two's complement, so that the seed written to the
/// document is a positive value that produces the same maze.
fn parse_seed(s: &str) -> Result<u64, String> {
    if let Ok(seed) = s.parse::<u64>() {
        return Ok(seed);
    }
    s.parse::<i64>()
        .map(|seed| seed as u64)
        .map_err(|e| e.to_string())
}

/// Generate the maze and write its description to `out`.
fn run<W: Write>(args: &Args, out: W) -> u8 {
    let config: MazeConfig = match MazeConfig::new(
        args.columns as usize,
        args.rows as usize,
        args.seed,
        args.shuffle,
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let maze: Maze = match Maze::generate(&config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };
    debug!(
        "Start = {:?}  End = {:?}",
        maze.grid().coordinates(maze.start()),
        maze.grid().coordinates(maze.end())
    );

    match Document::new(&maze).write(out, args.pretty) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: cannot write the maze: {e}");
            1
        }
    }
}
