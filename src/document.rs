/*
document.rs

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

//! Describe a generated maze for the renderer.
//!
//! The maze is written as a JSON document that includes everything needed to draw it, and the
//! parameters to generate it again:
//!
//! ```text
//! {
//!   "generator": "make-maze",
//!   "version": "0.1.0",
//!   "parameters": { "columns": 2, "rows": 2, "seed": 42, "shuffle": "uniform" },
//!   "scale": 122.00807...,
//!   "walls": ["CD", "HH"],
//!   "exits": [80, 72, 2, 2],
//!   "start": { "cell": 3, "column": 1, "row": 1 },
//!   "end": { "cell": 2, "column": 1, "row": 0 },
//!   "statistics": { "cells": 4, "walls": 5, "opened": 3, "closed": 2, "path_length": 8 }
//! }
//! ```
//!
//! Each cell draws its upper walls: the one above it and the two on its upper left and upper
//! right.
//! In `walls`, each column is a string with one letter per cell, from the bottom row up.
//! The letter is `'A'` plus a 3-bit code of the closed upper walls:
//!
//! | bit | even columns | odd columns |
//! |-----|--------------|-------------|
//! | 1   | `Up`         | `Up`        |
//! | 2   | `LEq`        | `LUp`       |
//! | 4   | `REq`        | `RUp`       |
//!
//! Every wall between two cells is an upper wall of exactly one of them, so the letters carry all
//! the open and closed passages.
//! The outer walls of the grid are always closed.

use serde::Serialize;
use std::error::Error;
use std::io::{BufWriter, Write};

use crate::config::{MazeConfig, TARGET_HEIGHT, TARGET_WIDTH};
use crate::generator::grid::{Direction, Exits, Grid};
use crate::generator::maze::Maze;

/// Name of the program that produced the document.
const GENERATOR: &str = "make-maze";

/// Location of a cell.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub cell: usize,
    pub column: usize,
    pub row: usize,
}

impl Position {
    fn new(grid: &Grid, cell: usize) -> Self {
        let (column, row) = grid.coordinates(cell);
        Self { cell, column, row }
    }
}

/// Counters about the maze.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub cells: usize,
    pub walls: usize,
    pub opened: usize,
    pub closed: usize,

    /// Weighted length of the path between the start and the end.
    pub path_length: usize,
}

/// Output document.
#[derive(Serialize, Debug)]
pub struct Document<'a> {
    pub generator: &'static str,
    pub version: &'static str,

    /// Parameters to generate the same maze again.
    pub parameters: MazeConfig,

    /// Scaling factor so that the maze fits in the drawing area.
    pub scale: f64,

    /// Closed upper walls, one string per column.
    pub walls: Vec<String>,

    /// Open passages of each cell, in cell index order.
    pub exits: &'a [Exits],

    pub start: Position,
    pub end: Position,
    pub statistics: Statistics,
}

impl<'a> Document<'a> {
    /// Create a [`Document`] object for the given maze.
    pub fn new(maze: &'a Maze) -> Self {
        let grid: &Grid = maze.grid();
        let walls: Vec<String> = (0..grid.columns())
            .map(|column| {
                (0..grid.rows())
                    .map(|row| wall_letter(column, maze.exits(grid.index(column, row))))
                    .collect()
            })
            .collect();

        Self {
            generator: GENERATOR,
            version: env!("CARGO_PKG_VERSION"),
            parameters: *maze.config(),
            scale: scale(grid.columns(), grid.rows()),
            walls,
            exits: maze.exits_all(),
            start: Position::new(grid, maze.start()),
            end: Position::new(grid, maze.end()),
            statistics: Statistics {
                cells: grid.len(),
                walls: maze.num_walls(),
                opened: maze.opened(),
                closed: maze.closed(),
                path_length: maze.diameter().length,
            },
        }
    }

    /// Write the document in JSON format.
    pub fn write<W: Write>(&self, writer: W, pretty: bool) -> Result<(), Box<dyn Error>> {
        let mut writer: BufWriter<W> = BufWriter::new(writer);
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Return the directions of the upper walls of the cells in the given column.
pub fn upper_walls(column: usize) -> [Direction; 3] {
    if column & 1 == 0 {
        [Direction::Up, Direction::LEq, Direction::REq]
    } else {
        [Direction::Up, Direction::LUp, Direction::RUp]
    }
}

/// Return the letter that encodes the closed upper walls of a cell.
fn wall_letter(column: usize, exits: Exits) -> char {
    let code: u8 = upper_walls(column)
        .iter()
        .enumerate()
        .filter(|(_, d)| !exits.contains(**d))
        .fold(0, |code, (i, _)| code | (1u8 << i));
    char::from(b'A' + code)
}

/// Compute the scaling factor of a hexagon with sides of length 1, so that the grid fits in the
/// drawing area.
///
/// Each column is `(1 + sqrt(3)) / 2` units wide, and each row `sqrt(3)` units high, with room
/// for one more column and row for the margins.
pub fn scale(columns: usize, rows: usize) -> f64 {
    let sqrt3: f64 = 3f64.sqrt();
    let xs: f64 = TARGET_WIDTH / ((columns + 1) as f64 * (1.0 + sqrt3) / 2.0);
    let ys: f64 = TARGET_HEIGHT / ((rows + 1) as f64 * sqrt3);
    xs.min(ys)
}
