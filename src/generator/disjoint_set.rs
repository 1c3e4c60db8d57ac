/*
disjoint_set.rs

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

//! Track the connected components of the cells while the maze is carved.
//!
//! The forest stores one entry per cell.
//! A negative entry `-n` marks the root of a component of `n` cells.
//! A non-negative entry is the index of another cell in the same component.
//! Following these parent links always ends at the root of the component.

use super::storage::{self, StorageError};

/// Union-find forest with path compression and union by size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// Parent link or negated component size, for each cell.
    forest: Vec<isize>,

    /// Number of components.
    components: usize,
}

impl DisjointSet {
    /// Create a [`DisjointSet`] object where each of the `len` cells is its own component.
    pub fn new(len: usize) -> Result<Self, StorageError> {
        Ok(Self {
            forest: storage::allocate("disjoint-set entries", len, -1)?,
            components: len,
        })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Number of distinct components.
    pub fn num_components(&self) -> usize {
        self.components
    }

    /// Whether the cell is the root of its component.
    pub fn is_root(&self, cell: usize) -> bool {
        self.forest[cell] < 0
    }

    /// Number of cells in the component of the given root.
    pub fn size(&self, root: usize) -> usize {
        debug_assert!(self.is_root(root), "cell {root} is not a root");
        self.forest[root].unsigned_abs()
    }

    /// Return the root of the component of `cell`.
    ///
    /// All the cells visited on the way are then linked directly to the root, so that the next
    /// lookups are shorter.
    pub fn find(&mut self, cell: usize) -> usize {
        let mut root: usize = cell;
        while self.forest[root] >= 0 {
            root = self.forest[root] as usize;
        }

        let mut c: usize = cell;
        while self.forest[c] >= 0 {
            let next: usize = self.forest[c] as usize;
            self.forest[c] = root as isize;
            c = next;
        }
        root
    }

    /// Merge the components of the two given roots and return the root of the merged component.
    ///
    /// Both cells must be distinct roots, as returned by [`DisjointSet::find`].
    /// The smaller component is attached under the larger one.
    /// On equal sizes, `root_y` becomes the root.
    pub fn union(&mut self, root_x: usize, root_y: usize) -> usize {
        debug_assert!(self.is_root(root_x), "cell {root_x} is not a root");
        debug_assert!(self.is_root(root_y), "cell {root_y} is not a root");
        debug_assert_ne!(root_x, root_y);

        let size_x: isize = self.forest[root_x];
        let size_y: isize = self.forest[root_y];
        self.components -= 1;

        // Sizes are negated: the smaller value is the larger component
        if size_x < size_y {
            self.forest[root_y] = root_x as isize;
            self.forest[root_x] = size_x + size_y;
            root_x
        } else {
            self.forest[root_x] = root_y as isize;
            self.forest[root_y] = size_x + size_y;
            root_y
        }
    }
}
