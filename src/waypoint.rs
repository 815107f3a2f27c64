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

//! Counting shortest paths through waypoints.
//!
//! This module augments a Dijkstra search from the source $s$ with path
//! counts. For each node $v$ it maintains
//!
//! - the number of shortest $s$-$v$-paths, and
//! - the number of those paths that visit at least one waypoint
//!   ([`WaypointCount`]).
//!
//! The waypoint counts are pushed along the edges of the search, but only in
//! *relevant* directions. An edge $(u,v)$ is relevant if $v$ is strictly
//! closer to the destination $t$ than $u$, i.e. $d_t(v) < d_t(u)$, or if $u$
//! does not carry any waypoint path yet. The second condition allows the
//! first waypoint to be discovered in any direction. A waypoint itself is not
//! subject to this filter when its distance improves: all shortest paths to
//! it visit a waypoint.
//!
//! Once a node has handed its count to at least one neighbor, its own count
//! is marked as [`WaypointCount::Consumed`]: all of its paths are continued
//! elsewhere and must not be tallied at this node again. Each waypoint path
//! is therefore counted at exactly one node, the last node it reaches by
//! relevant edges.
//!
//! The distances to the destination must be computed beforehand, usually by
//! a [`dijkstra`](crate::shortestpath::dijkstra) search from $t$.

use crate::collections::{IndexBinHeap, IndexPriQueue};
use crate::error::{Error, Result};
use crate::graph::UGraph;
use crate::shortestpath::{Dijkstra, Relaxation, ShortestPathTree};

use log::{debug, trace};
use num_traits::PrimInt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Number of shortest paths to a node that visit a waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum WaypointCount {
    /// The paths end at this node (so far).
    Active(u64),
    /// The paths have been forwarded to neighbors of this node.
    Consumed,
}

impl WaypointCount {
    /// Return the count if it has not been consumed.
    pub fn active(self) -> Option<u64> {
        match self {
            WaypointCount::Active(n) => Some(n),
            WaypointCount::Consumed => None,
        }
    }

    pub fn is_consumed(self) -> bool {
        self == WaypointCount::Consumed
    }

    fn add(&mut self, n: u64) {
        if let WaypointCount::Active(ref mut c) = *self {
            *c = c.saturating_add(n);
        }
    }
}

impl Default for WaypointCount {
    fn default() -> Self {
        WaypointCount::Active(0)
    }
}

/// The path counts computed by a [`WaypointSearch`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PathCounts {
    total: Vec<u64>,
    waypoint: Vec<WaypointCount>,
}

impl PathCounts {
    /// Return the number of shortest paths from the source to `u`.
    ///
    /// Counts saturate at `u64::MAX`.
    pub fn total(&self, u: usize) -> u64 {
        self.total[u]
    }

    /// Return the waypoint paths to `u` that are tallied at `u`.
    pub fn waypoint(&self, u: usize) -> WaypointCount {
        self.waypoint[u]
    }
}

/// The result of a [`WaypointSearch`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct WaypointTree<W> {
    tree: ShortestPathTree<W>,
    counts: PathCounts,
}

impl<W> WaypointTree<W> {
    pub fn tree(&self) -> &ShortestPathTree<W> {
        &self.tree
    }

    pub fn counts(&self) -> &PathCounts {
        &self.counts
    }

    pub fn into_parts(self) -> (ShortestPathTree<W>, PathCounts) {
        (self.tree, self.counts)
    }
}

/// Dijkstra search from the source with waypoint path counting.
pub struct WaypointSearch<'a, W, P = IndexBinHeap<W>> {
    search: Dijkstra<'a, W, P>,
    is_waypoint: &'a [bool],
    dist_to_dest: &'a [Option<W>],
    total: Vec<u64>,
    waypoint: Vec<WaypointCount>,
}

impl<'a, W> WaypointSearch<'a, W>
where
    W: PrimInt,
{
    /// Start a search from `src` with a fresh priority queue.
    ///
    /// `is_waypoint` flags the waypoint nodes, `dist_to_dest` holds the
    /// distance of every node to the destination. Both must have one entry
    /// per node of `g`.
    pub fn new(g: &'a UGraph<W>, src: usize, is_waypoint: &'a [bool], dist_to_dest: &'a [Option<W>]) -> Result<Self> {
        WaypointSearch::with_queue(g, src, is_waypoint, dist_to_dest, IndexBinHeap::new(g.num_nodes()))
    }
}

impl<'a, W, P> WaypointSearch<'a, W, P>
where
    W: PrimInt,
    P: IndexPriQueue<W>,
{
    /// Start a search from `src` using the given priority queue.
    pub fn with_queue(
        g: &'a UGraph<W>,
        src: usize,
        is_waypoint: &'a [bool],
        dist_to_dest: &'a [Option<W>],
        pqueue: P,
    ) -> Result<Self> {
        let n = g.num_nodes();
        for len in [is_waypoint.len(), dist_to_dest.len()].iter().copied() {
            if len != n {
                return Err(Error::LengthMismatch { len, num_nodes: n });
            }
        }

        let search = Dijkstra::with_queue(g, src, pqueue)?;
        let mut total = vec![0; n];
        let mut waypoint = vec![WaypointCount::default(); n];
        // the empty path to the source visits a waypoint if the source is one
        total[src] = 1;
        if is_waypoint[src] {
            waypoint[src] = WaypointCount::Active(1);
        }

        Ok(WaypointSearch {
            search,
            is_waypoint,
            dist_to_dest,
            total,
            waypoint,
        })
    }

    /// Settle the next node and forward its path counts.
    ///
    /// Returns the settled node or `None` if the search is finished.
    pub fn step(&mut self) -> Result<Option<usize>> {
        let u = match self.search.settle_next() {
            Some(u) => u,
            None => return Ok(None),
        };
        if self.forward(u)? {
            trace!("waypoint count of {} consumed", u);
            self.waypoint[u] = WaypointCount::Consumed;
        }
        Ok(Some(u))
    }

    /// Run the search to completion.
    pub fn run(mut self) -> Result<WaypointTree<W>> {
        while self.step()?.is_some() {}
        let consumed = self.waypoint.iter().filter(|c| c.is_consumed()).count();
        debug!("waypoint search: {} nodes consumed their counts", consumed);
        Ok(WaypointTree {
            tree: self.search.into_tree(),
            counts: PathCounts {
                total: self.total,
                waypoint: self.waypoint,
            },
        })
    }

    /// Relax all edges of the settled node `u` and update the counts.
    ///
    /// Returns `true` if the waypoint count of `u` has been forwarded over
    /// at least one relevant edge.
    fn forward(&mut self, u: usize) -> Result<bool> {
        let g = self.search.graph();
        let mut forwarded = false;
        for (e, _) in g.neighs(u) {
            let (v, relaxation) = self.search.relax(u, e)?;
            let relevant = self.is_relevant(u, v);
            match relaxation {
                Relaxation::Improved => {
                    self.total[v] = self.total[u];
                    // every shortest path to a waypoint visits it
                    self.waypoint[v] = if self.is_waypoint[v] {
                        WaypointCount::Active(self.total[v])
                    } else if relevant {
                        self.waypoint[u]
                    } else {
                        WaypointCount::Active(0)
                    };
                    forwarded |= relevant;
                }
                Relaxation::Tied => {
                    self.total[v] = self.total[v].saturating_add(self.total[u]);
                    if relevant {
                        let carried = if self.is_waypoint[v] {
                            self.total[u]
                        } else {
                            self.waypoint[u].active().unwrap_or(0)
                        };
                        self.waypoint[v].add(carried);
                        forwarded = true;
                    }
                }
                Relaxation::Unchanged => {}
            }
        }
        Ok(forwarded)
    }

    /// Return `true` if waypoint paths may be pushed from `u` to `v`.
    fn is_relevant(&self, u: usize, v: usize) -> bool {
        let closer = match (self.dist_to_dest[v], self.dist_to_dest[u]) {
            (Some(dv), Some(du)) => dv < du,
            (Some(_), None) => true,
            (None, _) => false,
        };
        closer || self.waypoint[u] == WaypointCount::Active(0)
    }
}

/// Run a waypoint search from `src` given the tree of shortest paths to the
/// destination.
pub fn waypoint_tree<W>(g: &UGraph<W>, src: usize, is_waypoint: &[bool], to_dest: &ShortestPathTree<W>) -> Result<WaypointTree<W>>
where
    W: PrimInt,
{
    WaypointSearch::new(g, src, is_waypoint, to_dest.distances())?.run()
}
