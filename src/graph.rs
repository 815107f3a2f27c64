// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! An undirected graph with non-negative edge weights.
//!
//! The nodes are numbered `0..n` and fixed at construction, edges are
//! added one by one. Parallel edges are allowed and are distinct edges.
//!
//! # Example
//!
//! ```
//! use rs_waypoint::UGraph;
//!
//! let mut g = UGraph::new(3);
//! let a = g.add_edge(0, 1, 4).unwrap();
//! let b = g.add_edge(1, 2, 2).unwrap();
//! let c = g.add_edge(1, 2, 3).unwrap();
//!
//! assert_eq!(g.num_edges(), 3);
//! assert_eq!(g.neighs(1).collect::<Vec<_>>(), vec![(a, 0), (b, 2), (c, 2)]);
//! assert_eq!(g.weight(c), 3);
//! assert_eq!(g.other(a, 0), 1);
//! ```

use crate::error::{Error, Result};

use num_traits::PrimInt;

use std::fmt;
use std::slice::Iter as SliceIter;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Edge of an undirected graph.
///
/// This is basically a newtype of the edge index.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Edge(u32);

impl Edge {
    /// Return the index of this edge in insertion order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Data for an edge.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
struct EdgeData<W> {
    nodes: [usize; 2],
    weight: W,
}

/// An adjacency list graph with weighted undirected edges.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct UGraph<W> {
    edges: Vec<EdgeData<W>>,
    // The incident edges of each node in insertion order. Every edge
    // appears in the lists of both of its end nodes.
    adj: Vec<Vec<u32>>,
}

/// Iterator over the incident edges of a node.
///
/// Yields each incident edge together with the node on its other side.
#[derive(Clone)]
pub struct NeighIt<'a, W> {
    g: &'a UGraph<W>,
    u: usize,
    it: SliceIter<'a, u32>,
}

impl<'a, W> Iterator for NeighIt<'a, W> {
    type Item = (Edge, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let g = self.g;
        let u = self.u;
        self.it.next().map(|&eid| {
            let [a, b] = g.edges[eid as usize].nodes;
            (Edge(eid), if a == u { b } else { a })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<W> UGraph<W>
where
    W: PrimInt,
{
    /// Create a graph with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        UGraph {
            edges: vec![],
            adj: vec![vec![]; n],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add an edge between `u` and `v` with the given `weight`.
    ///
    /// The edge is appended to the adjacency lists of both nodes. Fails if
    /// a node does not exist, if `u == v` or if the weight is negative.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: W) -> Result<Edge> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(Error::SelfLoop(u));
        }
        if weight < W::zero() {
            return Err(Error::NegativeWeight);
        }

        let eid = self.edges.len() as u32;
        self.edges.push(EdgeData { nodes: [u, v], weight });
        self.adj[u].push(eid);
        self.adj[v].push(eid);
        Ok(Edge(eid))
    }

    /// Return the end nodes of an edge in the order they have been added.
    pub fn enodes(&self, e: Edge) -> (usize, usize) {
        let [u, v] = self.edges[e.index()].nodes;
        (u, v)
    }

    pub fn weight(&self, e: Edge) -> W {
        self.edges[e.index()].weight
    }

    /// Return the end node of `e` that is not `u`.
    ///
    /// `u` must be an end node of `e`.
    pub fn other(&self, e: Edge, u: usize) -> usize {
        let (a, b) = self.enodes(e);
        debug_assert!(u == a || u == b, "Node {} is not incident to edge {}", u, e);
        if a == u {
            b
        } else {
            a
        }
    }

    /// Return an iterator over the incident edges of `u` in insertion order.
    ///
    /// The iterator can be cloned to restart the traversal.
    pub fn neighs(&self, u: usize) -> NeighIt<W> {
        NeighIt {
            g: self,
            u,
            it: self.adj[u].iter(),
        }
    }

    /// Return an iterator over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + Clone {
        (0..self.edges.len() as u32).map(Edge)
    }

    fn check_node(&self, u: usize) -> Result<()> {
        if u < self.num_nodes() {
            Ok(())
        } else {
            Err(Error::InvalidNode {
                node: u,
                num_nodes: self.num_nodes(),
            })
        }
    }
}
