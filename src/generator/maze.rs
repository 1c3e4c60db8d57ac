/*
maze.rs

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

//! Generate a complete maze.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

use super::diameter::{Diameter, MazeTree};
use super::disjoint_set::DisjointSet;
use super::grid::{Exits, Grid};
use super::spanning_tree::SpanningTree;
use super::storage::StorageError;
use super::walls::WallCatalogue;
use crate::config::MazeConfig;

/// A generated maze.
#[derive(Debug, Clone)]
pub struct Maze {
    /// Parameters used to generate the maze.
    config: MazeConfig,

    /// Grid dimensions.
    grid: Grid,

    /// Open passages of each cell.
    exits: Vec<Exits>,

    /// Start, end, and length of the longest path.
    diameter: Diameter,

    /// Number of walls in the grid.
    num_walls: usize,

    /// Number of walls knocked down.
    opened: usize,
}

impl Maze {
    /// Generate the maze for the given parameters.
    ///
    /// # Errors
    ///
    /// The method returns an error if there is not enough memory for the grid.
    pub fn generate(config: &MazeConfig) -> Result<Self, StorageError> {
        debug!(
            "Generating a {}x{} maze  seed = {}  shuffle = {}",
            config.columns, config.rows, config.seed, config.shuffle
        );
        let grid: Grid = Grid::new(config.columns, config.rows);
        let mut rng: StdRng = StdRng::seed_from_u64(config.seed);

        let start: Instant = Instant::now();
        let mut catalogue: WallCatalogue = WallCatalogue::new(&grid)?;
        let mut components: DisjointSet = DisjointSet::new(grid.len())?;
        debug!("Initialization: {}s", start.elapsed().as_secs_f32());

        let start: Instant = Instant::now();
        catalogue.shuffle(config.shuffle, &mut rng)?;
        debug!("Shuffling walls: {}s", start.elapsed().as_secs_f32());

        let start: Instant = Instant::now();
        let carved: SpanningTree = SpanningTree::carve(&grid, catalogue.walls(), &mut components)?;
        debug!("Carving: {}s", start.elapsed().as_secs_f32());
        let num_walls: usize = catalogue.len();
        let opened: usize = carved.opened();
        drop(catalogue);
        drop(components);
        let exits: Vec<Exits> = carved.into_exits();

        let start: Instant = Instant::now();
        let tree: MazeTree = MazeTree::build(&grid, &exits)?;
        debug!("Building tree: {}s", start.elapsed().as_secs_f32());

        let start: Instant = Instant::now();
        let diameter: Diameter = tree.analyze()?;
        debug!("Analyzing tree: {}s", start.elapsed().as_secs_f32());

        Ok(Self {
            config: *config,
            grid,
            exits,
            diameter,
            num_walls,
            opened,
        })
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seed that reproduces the maze.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Return the open passages of the given cell.
    pub fn exits(&self, cell: usize) -> Exits {
        self.exits[cell]
    }

    /// Return the open passages of all the cells, in cell index order.
    pub fn exits_all(&self) -> &[Exits] {
        &self.exits[..]
    }

    pub fn diameter(&self) -> Diameter {
        self.diameter
    }

    /// Starting cell.
    pub fn start(&self) -> usize {
        self.diameter.first
    }

    /// Final cell.
    pub fn end(&self) -> usize {
        self.diameter.second
    }

    /// Number of walls between adjacent cells, open or not.
    pub fn num_walls(&self) -> usize {
        self.num_walls
    }

    /// Number of open passages.
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Number of walls left standing.
    pub fn closed(&self) -> usize {
        self.num_walls - self.opened
    }
}
