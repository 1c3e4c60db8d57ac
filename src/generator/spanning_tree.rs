/*
spanning_tree.rs

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

//! Carve the maze out of the grid.
//!
//! The walls are knocked down one after the other, in random order, unless the two cells on
//! either side are already connected.
//! Knocking down such a wall would create a second path between the two cells.
//! When all the walls have been processed, the open passages form a random spanning tree of the
//! grid.

use log::debug;
use serde::{Deserialize, Serialize};

use super::disjoint_set::DisjointSet;
use super::grid::{Direction, Exits, Grid};
use super::storage::{self, StorageError};
use super::walls::Wall;

/// What happened to a wall.
///
/// - an `Opened` wall became a passage between two components.
/// - a `Discarded` wall stays closed, because its cells were already connected.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum WallStatus {
    Opened,
    Discarded,
}

/// Open passages of all the cells.
#[derive(Debug, Clone)]
pub struct SpanningTree {
    /// Open passages, for each cell.
    exits: Vec<Exits>,

    /// Number of walls knocked down.
    opened: usize,

    /// Number of walls left standing.
    discarded: usize,
}

impl SpanningTree {
    /// Create a [`SpanningTree`] object where all the walls are closed.
    pub fn new(grid: &Grid) -> Result<Self, StorageError> {
        Ok(Self {
            exits: storage::allocate("cells", grid.len(), Exits::default())?,
            opened: 0,
            discarded: 0,
        })
    }

    /// Process the walls in the given order and return the carved maze.
    ///
    /// `components` must have one entry per cell of the grid.
    pub fn carve(
        grid: &Grid,
        walls: &[Wall],
        components: &mut DisjointSet,
    ) -> Result<Self, StorageError> {
        let mut tree: SpanningTree = SpanningTree::new(grid)?;
        for wall in walls {
            tree.process(grid, *wall, components);
        }
        debug!(
            "Opened walls = {}  Discarded walls = {}  Components = {}",
            tree.opened,
            tree.discarded,
            components.num_components()
        );
        Ok(tree)
    }

    /// Knock down the wall if its two cells are not connected yet.
    ///
    /// A wall between two cells that are not adjacent cannot be opened. It is discarded and the
    /// components are left untouched.
    pub fn process(&mut self, grid: &Grid, wall: Wall, components: &mut DisjointSet) -> WallStatus {
        let Some(d) = grid.direction(wall.lower, wall.higher) else {
            debug!("Cells {} and {} are not adjacent", wall.lower, wall.higher);
            self.discarded += 1;
            return WallStatus::Discarded;
        };

        let root_lower: usize = components.find(wall.lower);
        let root_higher: usize = components.find(wall.higher);
        if root_lower == root_higher {
            self.discarded += 1;
            return WallStatus::Discarded;
        }
        components.union(root_lower, root_higher);
        self.open(wall, d);
        WallStatus::Opened
    }

    /// Open the passage in both cells.
    fn open(&mut self, wall: Wall, direction: Direction) {
        self.exits[wall.lower].insert(direction);
        self.exits[wall.higher].insert(direction.opposite());
        self.opened += 1;
    }

    /// Return the open passages of all the cells.
    pub fn exits(&self) -> &[Exits] {
        &self.exits[..]
    }

    /// Return the open passages, consuming the object.
    pub fn into_exits(self) -> Vec<Exits> {
        self.exits
    }

    /// Number of walls knocked down.
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Number of walls left standing.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::walls::{ShuffleMethod, WallCatalogue};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    fn carve(columns: usize, rows: usize, seed: u64) -> (Grid, SpanningTree) {
        let grid: Grid = Grid::new(columns, rows);
        let mut catalogue: WallCatalogue = WallCatalogue::new(&grid).unwrap();
        catalogue
            .shuffle(ShuffleMethod::Uniform, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let mut components: DisjointSet = DisjointSet::new(grid.len()).unwrap();
        let tree: SpanningTree =
            SpanningTree::carve(&grid, catalogue.walls(), &mut components).unwrap();
        (grid, tree)
    }

    /// Breadth-first walk from cell 0. Return the number of reached cells, or None if a cell is
    /// reached twice.
    fn reachable(grid: &Grid, exits: &[Exits]) -> Option<usize> {
        let mut seen: Vec<bool> = vec![false; grid.len()];
        let mut queue: VecDeque<(usize, Option<usize>)> = VecDeque::from([(0, None)]);
        seen[0] = true;
        let mut count: usize = 1;
        while let Some((cell, from)) = queue.pop_front() {
            for d in exits[cell].iter() {
                let next: usize = grid.neighbor(cell, d)?;
                if Some(next) == from {
                    continue;
                }
                if seen[next] {
                    return None;
                }
                seen[next] = true;
                count += 1;
                queue.push_back((next, Some(cell)));
            }
        }
        Some(count)
    }

    #[test]
    fn process_opens_then_discards() {
        let grid: Grid = Grid::new(2, 2);
        let mut components: DisjointSet = DisjointSet::new(grid.len()).unwrap();
        let mut tree: SpanningTree = SpanningTree::new(&grid).unwrap();

        assert_eq!(
            tree.process(&grid, Wall::new(0, 1), &mut components),
            WallStatus::Opened
        );
        assert!(tree.exits()[0].contains(Direction::Up));
        assert!(tree.exits()[1].contains(Direction::Down));

        assert_eq!(
            tree.process(&grid, Wall::new(0, 2), &mut components),
            WallStatus::Opened
        );
        assert!(tree.exits()[0].contains(Direction::REq));
        assert!(tree.exits()[2].contains(Direction::LEq));

        // 1 and 2 are now connected through 0
        assert_eq!(
            tree.process(&grid, Wall::new(1, 2), &mut components),
            WallStatus::Discarded
        );
        assert!(!tree.exits()[1].contains(Direction::RDown));
        assert_eq!(tree.opened(), 2);
        assert_eq!(tree.discarded(), 1);
    }

    #[test]
    fn non_adjacent_cells_stay_apart() {
        let grid: Grid = Grid::new(3, 3);
        let mut components: DisjointSet = DisjointSet::new(grid.len()).unwrap();
        let mut tree: SpanningTree = SpanningTree::new(&grid).unwrap();

        assert_eq!(
            tree.process(&grid, Wall::new(0, 8), &mut components),
            WallStatus::Discarded
        );
        assert_ne!(components.find(0), components.find(8));
        assert_eq!(components.num_components(), grid.len());
        assert!(tree.exits()[0].is_empty());
        assert!(tree.exits()[8].is_empty());
        assert_eq!((tree.opened(), tree.discarded()), (0, 1));
    }

    #[test]
    fn two_by_two_opens_three_walls() {
        let (grid, tree) = carve(2, 2, 42);
        assert_eq!(tree.opened(), 3);
        assert_eq!(tree.discarded(), grid.num_walls() - 3);
        assert_eq!(reachable(&grid, tree.exits()), Some(4));
    }

    #[test]
    fn carving_produces_a_spanning_tree() {
        for (columns, rows, seed) in [(2, 9, 1), (9, 2, 2), (17, 13, 3), (40, 40, 4)] {
            let (grid, tree) = carve(columns, rows, seed);
            assert_eq!(tree.opened(), grid.len() - 1);
            assert_eq!(tree.opened() + tree.discarded(), grid.num_walls());
            assert_eq!(reachable(&grid, tree.exits()), Some(grid.len()));
        }
    }

    #[test]
    fn passages_are_symmetric() {
        let (grid, tree) = carve(11, 8, 5);
        let mut bits: usize = 0;
        for cell in 0..grid.len() {
            for d in tree.exits()[cell].iter() {
                let n: usize = grid.neighbor(cell, d).unwrap();
                assert!(tree.exits()[n].contains(d.opposite()));
                bits += 1;
            }
        }
        assert_eq!(bits, 2 * tree.opened());
    }
}
