// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Shortest path algorithms.

pub mod dijkstra;
pub use self::dijkstra::{Dijkstra, Relaxation};

use crate::graph::{Edge, UGraph};

use num_traits::PrimInt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The result of a single-source shortest path search.
///
/// For each node this stores the distance from the root (`None` if the node
/// is unreachable) and the last edge on one shortest path to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ShortestPathTree<W> {
    root: usize,
    dist: Vec<Option<W>>,
    pred: Vec<Option<Edge>>,
}

impl<W> ShortestPathTree<W>
where
    W: PrimInt,
{
    pub(crate) fn new(root: usize, dist: Vec<Option<W>>, pred: Vec<Option<Edge>>) -> Self {
        ShortestPathTree { root, dist, pred }
    }

    /// The node at which the search started.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Return the distance from the root to `u`, `None` if unreachable.
    pub fn dist(&self, u: usize) -> Option<W> {
        self.dist[u]
    }

    /// Return all distances indexed by node.
    pub fn distances(&self) -> &[Option<W>] {
        &self.dist
    }

    /// Return the incoming edge of `u` on its shortest path.
    pub fn pred(&self, u: usize) -> Option<Edge> {
        self.pred[u]
    }

    pub fn has_path_to(&self, u: usize) -> bool {
        self.dist[u].is_some()
    }

    /// Return the edges of a shortest path from the root to `u`.
    ///
    /// The edges are ordered from the root to `u`. Returns `None` if `u` is
    /// not reachable.
    pub fn path_to(&self, g: &UGraph<W>, u: usize) -> Option<Vec<Edge>> {
        if !self.has_path_to(u) {
            return None;
        }
        let mut path: Vec<_> = path_from_incomings(u, |v| self.pred[v].map(|e| (e, g.other(e, v)))).collect();
        path.reverse();
        Some(path)
    }

    /// Return the nodes of a shortest path from the root to `u`.
    ///
    /// Both the root and `u` are included.
    pub fn nodes_to(&self, g: &UGraph<W>, u: usize) -> Option<Vec<usize>> {
        let path = self.path_to(g, u)?;
        let mut nodes = Vec::with_capacity(path.len() + 1);
        nodes.push(self.root);
        for e in path {
            let last = nodes[nodes.len() - 1];
            nodes.push(g.other(e, last));
        }
        Some(nodes)
    }
}

/// Compute a path from a map of incoming edges for each node.
///
/// # Parameters
/// - `dst`: the destination node
/// - `incomings(v)`: return the incoming edge and preceding node for node `v`
///   (or `None` if it does not exist)
///
/// # Return
/// An iterator over the incoming edges starting from the last one.
pub fn path_from_incomings<N, E, I>(dst: N, incomings: I) -> impl Iterator<Item = E>
where
    N: Copy,
    I: Fn(N) -> Option<(E, N)>,
{
    let mut u = dst;
    std::iter::from_fn(move || {
        let (e, v) = incomings(u)?;
        u = v;
        Some(e)
    })
}
