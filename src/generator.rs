/*
generator.rs

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

//! Generate random hexagonal mazes.
//!
//! [`maze::Maze::generate`] runs all the steps for a [`crate::config::MazeConfig`] object:
//!
//! * [`grid::Grid`] defines the cells and which cells are adjacent.
//!   Open passages are stored per cell in [`grid::Exits`] bitmasks.
//!
//! * [`walls::WallCatalogue`] lists every wall between two adjacent cells, and then puts the
//!   walls in random order.
//!
//! * [`spanning_tree::SpanningTree::carve`] knocks down the walls in that order, unless the
//!   cells on both sides are already connected.
//!   [`disjoint_set::DisjointSet`] keeps track of the connected cells.
//!   The result is a perfect maze: there is exactly one path between any two cells.
//!
//! * [`diameter::MazeTree`] turns the maze into a tree, and [`diameter::MazeTree::analyze`]
//!   selects the two cells that are the furthest apart as the start and the end of the maze.
//!
//! The large arrays are allocated through the [`storage`] module, which reports a
//! [`storage::StorageError`] if there is not enough memory.

pub mod diameter;
pub mod disjoint_set;
pub mod grid;
pub mod maze;
pub mod spanning_tree;
pub mod storage;
pub mod walls;
