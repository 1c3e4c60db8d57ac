/*
walls.rs

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

//! Walls between adjacent cells, and the random order in which they are processed.

use clap::ValueEnum;
use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::grid::Grid;
use super::storage::{self, StorageError};

/// Number of buckets for the [`ShuffleMethod::Buckets`] method.
const NUM_BUCKETS: usize = 1024;

/// Number of scattering passes for the [`ShuffleMethod::Buckets`] method.
const NUM_PASSES: usize = 3;

/// Wall between two adjacent cells.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    /// Cell with the lower index.
    pub lower: usize,

    /// Cell with the higher index.
    pub higher: usize,
}

impl Wall {
    /// Create a [`Wall`] object between the two given cells, in any order.
    pub fn new(cell1: usize, cell2: usize) -> Self {
        if cell1 < cell2 {
            Self {
                lower: cell1,
                higher: cell2,
            }
        } else {
            Self {
                lower: cell2,
                higher: cell1,
            }
        }
    }
}

/// How to randomize the order of the walls.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMethod {
    /// Uniform random permutation.
    #[default]
    Uniform,

    /// Three passes of scattering into 1024 random buckets, as the historical make-maze did.
    Buckets,
}

impl fmt::Display for ShuffleMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShuffleMethod::Uniform => write!(f, "uniform"),
            ShuffleMethod::Buckets => write!(f, "buckets"),
        }
    }
}

/// All the walls of the grid.
#[derive(Debug, Clone)]
pub struct WallCatalogue {
    walls: Vec<Wall>,
}

impl WallCatalogue {
    /// Create the catalogue of all the walls in the grid.
    ///
    /// Each pair of adjacent cells is listed exactly once.
    pub fn new(grid: &Grid) -> Result<Self, StorageError> {
        let mut walls: Vec<Wall> = storage::reserve("walls", grid.num_walls())?;
        for cell in 0..grid.len() {
            walls.extend(grid.forward_neighbors(cell).map(|(_, n)| Wall::new(cell, n)));
        }
        debug!("Number of walls: {}", walls.len());
        Ok(Self { walls })
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Return the walls in their current order.
    pub fn walls(&self) -> &[Wall] {
        &self.walls[..]
    }

    /// Reorder the walls randomly.
    pub fn shuffle<R: Rng + ?Sized>(
        &mut self,
        method: ShuffleMethod,
        rng: &mut R,
    ) -> Result<(), StorageError> {
        match method {
            ShuffleMethod::Uniform => self.walls.shuffle(rng),
            ShuffleMethod::Buckets => {
                for pass in 0..NUM_PASSES {
                    self.scatter(rng)?;
                    debug!("Bucket pass {} done", pass + 1);
                }
            }
        }
        if log_enabled!(Level::Debug) && !self.walls.is_empty() {
            debug!(
                "First walls: {:?}",
                &self.walls[..self.walls.len().min(4)]
            );
        }
        Ok(())
    }

    /// Give each wall a random bucket, and then concatenate the buckets in order.
    ///
    /// The walls in the same bucket keep their relative order.
    fn scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), StorageError> {
        let len: usize = self.walls.len();
        let mut keys: Vec<u16> = storage::reserve("bucket keys", len)?;
        keys.extend((0..len).map(|_| rng.random_range(0..NUM_BUCKETS as u16)));

        // Position of the first wall of each bucket in the output
        let mut offsets: [usize; NUM_BUCKETS] = [0; NUM_BUCKETS];
        for k in &keys {
            offsets[*k as usize] += 1;
        }
        let mut total: usize = 0;
        for o in offsets.iter_mut() {
            let count: usize = *o;
            *o = total;
            total += count;
        }

        let mut scattered: Vec<Wall> = storage::allocate("walls", len, Wall::new(0, 0))?;
        for (wall, k) in self.walls.iter().zip(&keys) {
            let o: &mut usize = &mut offsets[*k as usize];
            scattered[*o] = *wall;
            *o += 1;
        }
        self.walls = scattered;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn sorted(walls: &[Wall]) -> Vec<Wall> {
        let mut v: Vec<Wall> = walls.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn wall_orders_its_cells() {
        assert_eq!(Wall::new(7, 3), Wall { lower: 3, higher: 7 });
        assert_eq!(Wall::new(3, 7), Wall::new(7, 3));
    }

    #[test]
    fn catalogue_lists_each_adjacent_pair_once() {
        let grid: Grid = Grid::new(6, 5);
        let catalogue: WallCatalogue = WallCatalogue::new(&grid).unwrap();
        assert_eq!(catalogue.len(), grid.num_walls());

        let set: HashSet<Wall> = catalogue.walls().iter().copied().collect();
        assert_eq!(set.len(), catalogue.len());
        for w in catalogue.walls() {
            assert!(w.lower < w.higher);
            assert!(grid.direction(w.lower, w.higher).is_some());
        }
    }

    #[test]
    fn both_methods_permute_the_walls() {
        let grid: Grid = Grid::new(20, 17);
        let original: WallCatalogue = WallCatalogue::new(&grid).unwrap();

        for method in [ShuffleMethod::Uniform, ShuffleMethod::Buckets] {
            let mut c: WallCatalogue = original.clone();
            c.shuffle(method, &mut StdRng::seed_from_u64(7)).unwrap();
            assert_eq!(c.len(), original.len());
            assert_ne!(c.walls(), original.walls(), "{method} did not move any wall");
            assert_eq!(sorted(c.walls()), sorted(original.walls()));
        }
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let grid: Grid = Grid::new(12, 9);
        for method in [ShuffleMethod::Uniform, ShuffleMethod::Buckets] {
            let mut a: WallCatalogue = WallCatalogue::new(&grid).unwrap();
            let mut b: WallCatalogue = WallCatalogue::new(&grid).unwrap();
            a.shuffle(method, &mut StdRng::seed_from_u64(42)).unwrap();
            b.shuffle(method, &mut StdRng::seed_from_u64(42)).unwrap();
            assert_eq!(a.walls(), b.walls());

            let mut c: WallCatalogue = WallCatalogue::new(&grid).unwrap();
            c.shuffle(method, &mut StdRng::seed_from_u64(43)).unwrap();
            assert_ne!(a.walls(), c.walls());
        }
    }

    #[test]
    fn method_names() {
        assert_eq!(ShuffleMethod::default(), ShuffleMethod::Uniform);
        assert_eq!(ShuffleMethod::Buckets.to_string(), "buckets");
        assert_eq!(
            serde_json::to_string(&ShuffleMethod::Uniform).unwrap(),
            "\"uniform\""
        );
    }
}
