/*
grid.rs

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

//! Cells and adjacency in the hexagonal grid.
//!
//! The grid has `columns` columns numbered from left to right, and each column has `rows` cells
//! numbered from bottom to top.
//! Even columns (0, 2, ...) sit half a cell lower than odd columns (1, 3, ...):
//!
//! ```text
//!      ___     ___
//!  ___/1,2\___/3,2\
//! /0,2\___/2,2\___/
//! \___/1,1\___/3,1\
//! /0,1\___/2,1\___/
//! \___/1,0\___/3,0\
//! /0,0\___/2,0\___/
//! \___/   \___/
//! ```
//!
//! Cell `(column, row)` is stored at index `column * rows + row`, so the cells of a column are
//! contiguous.
//! A cell in an even column is adjacent to the cells at the same row and one row down in the
//! neighboring columns, whereas a cell in an odd column is adjacent to the cells at the same row
//! and one row up.

use serde::{Deserialize, Serialize};
use strum_macros::FromRepr;

/// Direction from a cell to one of its neighbors.
///
/// The discriminants are the bits used in the [`Exits`] bitmask.
/// The bit order is also the enumeration order: every loop that tests direction bits visits
/// them from the lowest to the highest bit.
///
/// `LDown` and `RDown` only exist for even columns, `LUp` and `RUp` only for odd columns.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Direction {
    /// Previous column, one row down.
    LDown = 0x01,
    /// Previous column, same row.
    LEq = 0x02,
    /// Previous column, one row up.
    LUp = 0x04,
    /// Same column, one row down.
    Down = 0x08,
    /// Same column, one row up.
    Up = 0x10,
    /// Next column, one row down.
    RDown = 0x20,
    /// Next column, same row.
    REq = 0x40,
    /// Next column, one row up.
    RUp = 0x80,
}

impl Direction {
    /// All the directions, in enumeration order.
    pub const ALL: [Direction; 8] = [
        Direction::LDown,
        Direction::LEq,
        Direction::LUp,
        Direction::Down,
        Direction::Up,
        Direction::RDown,
        Direction::REq,
        Direction::RUp,
    ];

    /// Directions that lead to a cell with a higher index.
    pub const FORWARD: [Direction; 4] = [
        Direction::Up,
        Direction::RDown,
        Direction::REq,
        Direction::RUp,
    ];

    /// Bit of the direction in an [`Exits`] bitmask.
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Direction seen from the neighbor.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::LDown => Direction::RUp,
            Direction::LEq => Direction::REq,
            Direction::LUp => Direction::RDown,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::RDown => Direction::LUp,
            Direction::REq => Direction::LEq,
            Direction::RUp => Direction::LDown,
        }
    }

    /// Column and row offsets of the neighbor.
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::LDown => (-1, -1),
            Direction::LEq => (-1, 0),
            Direction::LUp => (-1, 1),
            Direction::Down => (0, -1),
            Direction::Up => (0, 1),
            Direction::RDown => (1, -1),
            Direction::REq => (1, 0),
            Direction::RUp => (1, 1),
        }
    }

    /// Whether a cell in the given column can have a neighbor in that direction.
    fn exists_in_column(self, column: usize) -> bool {
        let odd: bool = column & 1 == 1;
        match self {
            Direction::LDown | Direction::RDown => !odd,
            Direction::LUp | Direction::RUp => odd,
            _ => true,
        }
    }
}

/// Set of open passages of a cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Exits(u8);

impl Exits {
    /// Create an [`Exits`] object from a raw bitmask.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Return the raw bitmask.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether the passage in the given direction is open.
    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Open the passage in the given direction.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Number of open passages.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether all the passages are closed.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the open directions in enumeration order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        (0..u8::BITS)
            .map(|shift| 1u8 << shift)
            .filter(move |bit| self.0 & bit != 0)
            .filter_map(Direction::from_repr)
    }
}

/// Dimensions of the grid and cell indexing.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    columns: usize,

    /// Number of cells in each column.
    rows: usize,
}

impl Grid {
    /// Create a [`Grid`] object.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of walls between adjacent cells.
    ///
    /// There are `columns * (rows - 1)` walls inside the columns, and `(columns - 1) * (2 * rows
    /// - 1)` walls between the columns.
    pub fn num_walls(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.columns * (self.rows - 1) + (self.columns - 1) * (2 * self.rows - 1)
    }

    /// Return the index of the cell at the given coordinates.
    pub fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    /// Return the `(column, row)` coordinates of the given cell.
    pub fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell / self.rows, cell % self.rows)
    }

    /// Return the neighbor of the cell in the given direction, or [`None`] if the cell is on the
    /// border or if the direction does not apply to the cell's column.
    pub fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        if cell >= self.len() {
            return None;
        }
        let (column, row) = self.coordinates(cell);
        if !direction.exists_in_column(column) {
            return None;
        }
        let (dc, dr) = direction.offset();
        let c: usize = column.checked_add_signed(dc)?;
        let r: usize = row.checked_add_signed(dr)?;
        if c >= self.columns || r >= self.rows {
            return None;
        }
        Some(self.index(c, r))
    }

    /// Return the direction that leads from `from` to `to`, or [`None`] if the cells are not
    /// adjacent.
    pub fn direction(&self, from: usize, to: usize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.neighbor(from, *d) == Some(to))
    }

    /// Iterate over the neighbors of the cell that have a higher index.
    ///
    /// Enumerating the forward neighbors of every cell visits each pair of adjacent cells
    /// exactly once.
    pub fn forward_neighbors(&self, cell: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::FORWARD
            .into_iter()
            .filter_map(move |d| self.neighbor(cell, d).map(|n| (d, n)))
    }

    /// Iterate over all the neighbors of the cell, in enumeration order.
    pub fn neighbors(&self, cell: usize) -> impl Iterator<Item = (Direction, usize)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(cell, d).map(|n| (d, n)))
    }
}
