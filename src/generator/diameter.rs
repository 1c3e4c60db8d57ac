/*
diameter.rs

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

//! Select the start and the end of the maze.
//!
//! The carved maze is a tree.
//! [`MazeTree`] roots that tree at cell 0, and [`MazeTree::analyze`] finds the two cells that are
//! the furthest apart.
//!
//! The distance is weighted: going from a cell to one of its children costs one plus the number
//! of children of that cell.
//! A path that crosses many junctions is therefore longer than a path along a plain corridor,
//! which makes for a harder maze.
//!
//! Both the tree construction and the analysis use explicit stacks.
//! A 1000x1000 maze can have paths with hundreds of thousands of cells, which is too deep for
//! recursion.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};

use super::grid::{Exits, Grid};
use super::storage::{self, StorageError};

/// Parent entry of the root cell.
const NO_PARENT: usize = usize::MAX;

/// Longest path in the maze.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Diameter {
    /// One end of the path.
    pub first: usize,

    /// The other end of the path.
    pub second: usize,

    /// Weighted length of the path.
    pub length: usize,
}

/// Results of the analysis for the subtree of a cell.
#[derive(Debug, Copy, Clone, Default)]
struct Subtree {
    /// Weighted distance from the cell to its furthest descendant.
    distance: usize,

    /// Furthest descendant.
    furthest: usize,

    /// Weighted length of the longest path inside the subtree.
    length: usize,

    /// Ends of the longest path.
    first: usize,
    second: usize,
}

/// The maze as a tree rooted at cell 0.
#[derive(Debug, Clone)]
pub struct MazeTree {
    /// Parent of each cell. [`NO_PARENT`] for the root.
    parent: Vec<usize>,

    /// Position of the first child of each cell in [`MazeTree::child_list`].
    child_start: Vec<usize>,

    /// Number of children of each cell.
    num_children: Vec<u8>,

    /// Children of all the cells. The children of a cell are contiguous and follow the direction
    /// enumeration order.
    child_list: Vec<usize>,

    /// Cells in the order they were reached from the root. A cell always comes after its parent.
    order: Vec<usize>,

    /// Largest number of steps between the root and a cell.
    depth: usize,
}

impl MazeTree {
    /// Build the tree from the open passages of the cells.
    pub fn build(grid: &Grid, exits: &[Exits]) -> Result<Self, StorageError> {
        let len: usize = grid.len();
        let mut tree: MazeTree = MazeTree {
            parent: storage::allocate("tree parents", len, NO_PARENT)?,
            child_start: storage::allocate("tree nodes", len, 0)?,
            num_children: storage::allocate("tree nodes", len, 0)?,
            child_list: storage::reserve("tree children", len.saturating_sub(1))?,
            order: storage::reserve("tree nodes", len)?,
            depth: 0,
        };
        if len == 0 {
            return Ok(tree);
        }

        let mut visited: Vec<bool> = storage::allocate("visited flags", len, false)?;
        let mut stack: Vec<(usize, usize)> = storage::reserve("tree stack", len)?;
        visited[0] = true;
        stack.push((0, 0));

        while let Some((cell, depth)) = stack.pop() {
            tree.order.push(cell);
            tree.depth = tree.depth.max(depth);

            let start: usize = tree.child_list.len();
            tree.child_start[cell] = start;
            for d in exits[cell].iter() {
                let Some(next) = grid.neighbor(cell, d) else {
                    continue;
                };
                // The only visited neighbor of a cell in a tree is its parent
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                tree.parent[next] = cell;
                tree.child_list.push(next);
            }
            let end: usize = tree.child_list.len();
            tree.num_children[cell] = (end - start) as u8;
            for child in &tree.child_list[start..end] {
                stack.push((*child, depth + 1));
            }
        }

        if tree.order.len() != len {
            debug!(
                "Only {} cells out of {len} are reachable from the root",
                tree.order.len()
            );
        }
        debug!("Tree depth = {}", tree.depth);
        Ok(tree)
    }

    /// Number of cells in the tree.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Largest number of steps between the root and a cell.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Return the parent of the cell, or [`None`] for the root.
    pub fn parent(&self, cell: usize) -> Option<usize> {
        match self.parent[cell] {
            NO_PARENT => None,
            p => Some(p),
        }
    }

    /// Return the children of the cell.
    pub fn children(&self, cell: usize) -> &[usize] {
        let start: usize = self.child_start[cell];
        &self.child_list[start..start + self.num_children[cell] as usize]
    }

    pub fn num_children(&self, cell: usize) -> usize {
        self.num_children[cell] as usize
    }

    /// Cost of going from the cell to one of its children.
    pub fn weight(&self, cell: usize) -> usize {
        1 + self.num_children(cell)
    }

    /// Find the two cells the furthest apart.
    ///
    /// The subtrees are processed from the leaves up.
    /// For each cell, the two children with the furthest descendants give the longest path that
    /// goes through the cell.
    /// That path is compared to the longest path found inside the subtree of a child.
    ///
    /// On equal values, the child that comes last in the enumeration order wins.
    pub fn analyze(&self) -> Result<Diameter, StorageError> {
        let mut subtrees: Vec<Subtree> =
            storage::allocate("subtree results", self.parent.len(), Subtree::default())?;

        for &cell in self.order.iter().rev() {
            let children: &[usize] = self.children(cell);
            if children.is_empty() {
                subtrees[cell] = Subtree {
                    distance: 0,
                    furthest: cell,
                    length: 0,
                    first: cell,
                    second: cell,
                };
                continue;
            }

            let weight: usize = self.weight(cell);
            let mut d1: usize = 0;
            let mut d2: usize = 0;
            let mut best: usize = children[0];
            let mut runner_up: Option<usize> = None;
            let mut l1: usize = 0;
            let mut longest: usize = children[0];

            for &child in children {
                let s: &Subtree = &subtrees[child];
                if s.length >= l1 {
                    l1 = s.length;
                    longest = child;
                }
                let d: usize = s.distance + weight;
                if d >= d1 {
                    d2 = d1;
                    runner_up = if d1 > 0 { Some(best) } else { None };
                    d1 = d;
                    best = child;
                } else if d >= d2 {
                    d2 = d;
                    runner_up = Some(child);
                }
            }

            let furthest: usize = subtrees[best].furthest;
            let subtree: Subtree = if d1 + d2 > l1 {
                Subtree {
                    distance: d1,
                    furthest,
                    length: d1 + d2,
                    first: furthest,
                    // With a single child, the path ends at the cell itself
                    second: runner_up.map_or(cell, |c| subtrees[c].furthest),
                }
            } else {
                Subtree {
                    distance: d1,
                    furthest,
                    length: l1,
                    first: subtrees[longest].first,
                    second: subtrees[longest].second,
                }
            };
            subtrees[cell] = subtree;
        }

        let root: Subtree = subtrees.first().copied().unwrap_or_default();
        let diameter: Diameter = Diameter {
            first: root.first,
            second: root.second,
            length: root.length,
        };
        if log_enabled!(Level::Debug) {
            debug!(
                "Diameter: {} -> {}  length = {}  root distance = {}",
                diameter.first, diameter.second, diameter.length, root.distance
            );
        }
        Ok(diameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::disjoint_set::DisjointSet;
    use crate::generator::grid::Direction;
    use crate::generator::spanning_tree::SpanningTree;
    use crate::generator::walls::{ShuffleMethod, WallCatalogue};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn maze(columns: usize, rows: usize, seed: u64) -> (Grid, Vec<Exits>) {
        let grid: Grid = Grid::new(columns, rows);
        let mut catalogue: WallCatalogue = WallCatalogue::new(&grid).unwrap();
        catalogue
            .shuffle(ShuffleMethod::Buckets, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let mut components: DisjointSet = DisjointSet::new(grid.len()).unwrap();
        let carved: SpanningTree =
            SpanningTree::carve(&grid, catalogue.walls(), &mut components).unwrap();
        (grid, carved.into_exits())
    }

    /// Weighted distances from `source` to every cell.
    fn distances_from(tree: &MazeTree, source: usize) -> Vec<usize> {
        let mut dist: Vec<usize> = vec![usize::MAX; tree.len()];
        let mut stack: Vec<usize> = vec![source];
        dist[source] = 0;
        while let Some(cell) = stack.pop() {
            let mut next: Vec<(usize, usize)> = tree
                .children(cell)
                .iter()
                .map(|c| (*c, tree.weight(cell)))
                .collect();
            if let Some(p) = tree.parent(cell) {
                next.push((p, tree.weight(p)));
            }
            for (n, w) in next {
                if dist[n] == usize::MAX {
                    dist[n] = dist[cell] + w;
                    stack.push(n);
                }
            }
        }
        dist
    }

    /// Set the exits of a corridor running up column 0.
    fn corridor(rows: usize) -> (Grid, Vec<Exits>) {
        let grid: Grid = Grid::new(2, rows);
        let mut exits: Vec<Exits> = vec![Exits::default(); grid.len()];
        for r in 0..rows - 1 {
            exits[r].insert(Direction::Up);
            exits[r + 1].insert(Direction::Down);
        }
        // Hook the second column on the top of the first one so that the tree spans the grid
        let top: usize = grid.index(0, rows - 1);
        let right: usize = grid.index(1, rows - 1);
        exits[top].insert(Direction::REq);
        exits[right].insert(Direction::LEq);
        for r in 0..rows - 1 {
            let a: usize = grid.index(1, r);
            exits[a].insert(Direction::Up);
            exits[a + 1].insert(Direction::Down);
        }
        (grid, exits)
    }

    #[test]
    fn tree_structure() {
        let (grid, exits) = corridor(3);
        let tree: MazeTree = MazeTree::build(&grid, &exits).unwrap();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.parent(0), None);
        assert_eq!(tree.children(0), &[1]);
        assert_eq!(tree.children(2), &[5]);
        assert_eq!(tree.children(5), &[4]);
        assert_eq!(tree.parent(3), Some(4));
        assert_eq!(tree.num_children(3), 0);
        assert_eq!(tree.depth(), 5);
    }

    #[test]
    fn corridor_ends_are_chosen() {
        let (grid, exits) = corridor(4);
        let tree: MazeTree = MazeTree::build(&grid, &exits).unwrap();
        let d: Diameter = tree.analyze().unwrap();
        // Every step costs 2 along a corridor
        assert_eq!(d.length, 2 * (grid.len() - 1));
        let mut ends: [usize; 2] = [d.first, d.second];
        ends.sort_unstable();
        assert_eq!(ends, [0, grid.index(1, 0)]);
    }

    #[test]
    fn single_child_root_is_an_end() {
        // Star-like tree in a 2x2 grid: 0 -> 1, 1 -> 3, 1 -> 2
        let grid: Grid = Grid::new(2, 2);
        let mut exits: Vec<Exits> = vec![Exits::default(); 4];
        exits[0].insert(Direction::Up);
        exits[1].insert(Direction::Down);
        exits[1].insert(Direction::REq);
        exits[3].insert(Direction::LEq);
        exits[1].insert(Direction::RDown);
        exits[2].insert(Direction::LUp);
        let tree: MazeTree = MazeTree::build(&grid, &exits).unwrap();
        assert_eq!(tree.children(1), &[2, 3]);

        let d: Diameter = tree.analyze().unwrap();
        // 2 <-> 3 costs 3 + 3 through cell 1, 0 -> 1 -> x costs 2 + 3
        assert_eq!(d.length, 6);
        // Equal distances: the last child wins the first place
        assert_eq!((d.first, d.second), (3, 2));
    }

    #[test]
    fn diameter_is_the_longest_weighted_path() {
        for (columns, rows, seed) in [(2, 2, 42), (3, 5, 1), (6, 4, 2), (8, 8, 3), (12, 5, 4)] {
            let (grid, exits) = maze(columns, rows, seed);
            let tree: MazeTree = MazeTree::build(&grid, &exits).unwrap();
            assert_eq!(tree.len(), grid.len());
            let d: Diameter = tree.analyze().unwrap();

            let mut longest: usize = 0;
            for source in 0..grid.len() {
                let dist: Vec<usize> = distances_from(&tree, source);
                longest = longest.max(*dist.iter().max().unwrap());
                if source == d.first {
                    assert_eq!(dist[d.second], d.length);
                }
            }
            assert_eq!(d.length, longest, "{columns}x{rows} seed {seed}");
        }
    }

    #[test]
    fn ends_are_leaves() {
        let (grid, exits) = maze(15, 10, 9);
        let tree: MazeTree = MazeTree::build(&grid, &exits).unwrap();
        let d: Diameter = tree.analyze().unwrap();
        assert_ne!(d.first, d.second);
        for end in [d.first, d.second] {
            assert_eq!(exits[end].len(), 1, "cell {end} is not a dead end");
        }
    }
}
