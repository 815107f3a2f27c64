// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Shortest paths through a mandatory waypoint.
//!
//! The crate computes, in an undirected graph with non-negative edge
//! weights, the length of a shortest path from a source to a destination
//! that visits at least one node of a given waypoint set, together with the
//! number of distinct paths of that length. The main entry point is
//! [`FindDinner`].

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod graph;
pub use self::graph::{Edge, UGraph};

pub mod collections;

// # Algorithms

pub mod shortestpath;
pub use self::shortestpath::ShortestPathTree;

pub mod waypoint;
pub use self::waypoint::{PathCounts, WaypointCount, WaypointSearch, WaypointTree};

pub mod solver;
pub use self::solver::{FindDinner, Solution, State};
