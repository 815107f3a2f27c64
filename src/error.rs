/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Errors reported by graph construction and the waypoint solver.

use crate::collections::QueueError;

/// Error raised by the graph and the solver.
///
/// Configuration errors are reported at the call that introduced them,
/// never at solve time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The solver needs at least a distinct origin and destination.
    #[error("at least 2 cities are required, got {0}")]
    TooFewCities(usize),

    /// An external city id outside `1..=num_cities`.
    #[error("city {city} is out of range 1..={num_cities}")]
    InvalidCity { city: usize, num_cities: usize },

    /// An internal node id outside `0..num_nodes`.
    #[error("node {node} is out of range 0..{num_nodes}")]
    InvalidNode { node: usize, num_nodes: usize },

    /// A per-node slice passed to a search does not have one entry per node.
    #[error("expected one entry for each of the {num_nodes} nodes, got {len}")]
    LengthMismatch { len: usize, num_nodes: usize },

    /// Both endpoints of an edge are equal.
    #[error("edge from {0} to itself")]
    SelfLoop(usize),

    #[error("edge weights must be non-negative")]
    NegativeWeight,

    /// A result has been queried before `solve` succeeded.
    #[error("the instance has not been solved yet")]
    NotSolved,

    /// The instance has been solved and is now read-only.
    #[error("the instance has already been solved")]
    AlreadySolved,

    /// Violation of the priority queue contract during a search.
    #[error("priority queue failure: {0}")]
    Queue(#[from] QueueError),
}

pub type Result<T> = std::result::Result<T, Error>;
