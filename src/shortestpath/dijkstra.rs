/*
 * Copyright (c) 2017, 2018, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Dijkstra's shortest path algorithm.
//!
//! Dijkstra's algorithm computes the shortest path from some start node $s \in
//! V$ to all other nodes in an undirected graph. Each edge is assigned a
//! non-negative weight (or length) $w \colon E \to \mathbb{Z}_+$.
//!
//! The search can be driven step by step: [`Dijkstra::settle_next`] removes
//! the next node from the queue (its distance is final from then on) and
//! [`Dijkstra::relax`] relaxes a single incident edge and reports whether it
//! improved or tied the distance of the other end node. Algorithms that need
//! to attach their own bookkeeping to each relaxation use these two methods,
//! everything else simply calls [`Dijkstra::run`] or [`shortest_path_tree`].
//!
//! # Example
//!
//! ```
//! use rs_waypoint::UGraph;
//! use rs_waypoint::shortestpath::dijkstra;
//!
//! //   0 --9-- 1
//! //   |        \
//! //   2         6
//! //   |          \
//! //   2 --8------ 3
//! let mut g = UGraph::new(4);
//! g.add_edge(0, 1, 9).unwrap();
//! g.add_edge(0, 2, 2).unwrap();
//! g.add_edge(1, 3, 6).unwrap();
//! g.add_edge(2, 3, 8).unwrap();
//!
//! let tree = dijkstra::shortest_path_tree(&g, 0).unwrap();
//! assert_eq!(tree.dist(3), Some(10));
//! assert_eq!(tree.nodes_to(&g, 3), Some(vec![0, 2, 3]));
//!
//! let (path, dist) = dijkstra::find_path(&g, 1, 2).unwrap().unwrap();
//! assert_eq!(dist, 11);
//! assert_eq!(path.len(), 2);
//! ```

use crate::collections::{IndexBinHeap, IndexPriQueue, QueueError};
use crate::error::{Error, Result};
use crate::graph::{Edge, UGraph};
use crate::shortestpath::ShortestPathTree;

use log::{debug, trace};
use num_traits::PrimInt;

/// The outcome of relaxing a single edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// The edge gives a strictly shorter path to the other end node.
    Improved,
    /// The edge gives another path of the current shortest length to an
    /// unsettled node.
    Tied,
    /// Nothing changed.
    Unchanged,
}

/// Dijkstra search state.
///
/// The priority queue `P` can be passed in by the caller (e.g. as `&mut
/// IndexBinHeap`) so that it can be reused for multiple searches. The
/// distance and predecessor arrays belong to a single search.
pub struct Dijkstra<'a, W, P = IndexBinHeap<W>> {
    g: &'a UGraph<W>,
    root: usize,
    dist: Vec<Option<W>>,
    pred: Vec<Option<Edge>>,
    settled: Vec<bool>,
    num_settled: usize,
    pqueue: P,
}

impl<'a, W> Dijkstra<'a, W>
where
    W: PrimInt,
{
    /// Start a search from `root` with a fresh priority queue.
    pub fn new(g: &'a UGraph<W>, root: usize) -> Result<Self> {
        Dijkstra::with_queue(g, root, IndexBinHeap::new(g.num_nodes()))
    }
}

impl<'a, W, P> Dijkstra<'a, W, P>
where
    W: PrimInt,
    P: IndexPriQueue<W>,
{
    /// Start a search from `root` using the given priority queue.
    ///
    /// The queue is cleared first and must have room for all nodes of `g`.
    pub fn with_queue(g: &'a UGraph<W>, root: usize, mut pqueue: P) -> Result<Self> {
        let n = g.num_nodes();
        if root >= n {
            return Err(Error::InvalidNode { node: root, num_nodes: n });
        }
        if pqueue.capacity() < n {
            return Err(QueueError::IndexOutOfRange {
                index: n - 1,
                capacity: pqueue.capacity(),
            }
            .into());
        }

        pqueue.clear();
        let mut dist = vec![None; n];
        dist[root] = Some(W::zero());
        pqueue.insert(root, W::zero())?;

        Ok(Dijkstra {
            g,
            root,
            dist,
            pred: vec![None; n],
            settled: vec![false; n],
            num_settled: 0,
            pqueue,
        })
    }

    pub fn graph(&self) -> &'a UGraph<W> {
        self.g
    }

    /// Return the currently best known distance of `u`.
    pub fn dist(&self, u: usize) -> Option<W> {
        self.dist[u]
    }

    /// Return `true` iff `u` has been removed from the queue.
    pub fn is_settled(&self, u: usize) -> bool {
        self.settled[u]
    }

    /// Remove the node with the smallest distance from the queue.
    ///
    /// The distance of the returned node is final. Returns `None` once all
    /// reachable nodes have been settled.
    pub fn settle_next(&mut self) -> Option<usize> {
        let (u, _) = self.pqueue.pop_min()?;
        self.settled[u] = true;
        self.num_settled += 1;
        Some(u)
    }

    /// Relax the edge `e` leaving the node `u`.
    ///
    /// Returns the other end node of `e` and what happened to it. If the
    /// edge offers a strictly shorter path, distance, predecessor and queue
    /// entry of the other end node are updated.
    pub fn relax(&mut self, u: usize, e: Edge) -> Result<(usize, Relaxation)> {
        let v = self.g.other(e, u);
        let newdist = match self.dist[u].and_then(|d| d.checked_add(&self.g.weight(e))) {
            Some(d) => d,
            None => return Ok((v, Relaxation::Unchanged)),
        };

        let relaxation = match self.dist[v] {
            Some(d) if d < newdist => Relaxation::Unchanged,
            Some(d) if d == newdist => {
                if self.settled[v] {
                    Relaxation::Unchanged
                } else {
                    Relaxation::Tied
                }
            }
            _ => {
                self.dist[v] = Some(newdist);
                self.pred[v] = Some(e);
                self.pqueue.decrease_or_insert(v, newdist)?;
                Relaxation::Improved
            }
        };
        trace!("relax {} -> {} via edge {}: {:?}", u, v, e, relaxation);
        Ok((v, relaxation))
    }

    /// Settle the next node and relax all its incident edges.
    ///
    /// Returns the settled node or `None` if the search is finished.
    pub fn step(&mut self) -> Result<Option<usize>> {
        let u = match self.settle_next() {
            Some(u) => u,
            None => return Ok(None),
        };
        let g = self.g;
        for (e, _) in g.neighs(u) {
            self.relax(u, e)?;
        }
        Ok(Some(u))
    }

    /// Run the search to completion.
    pub fn run(mut self) -> Result<ShortestPathTree<W>> {
        while self.step()?.is_some() {}
        Ok(self.into_tree())
    }

    /// Return the distances and predecessors computed so far.
    pub fn into_tree(self) -> ShortestPathTree<W> {
        debug!(
            "dijkstra from {}: settled {} of {} nodes",
            self.root,
            self.num_settled,
            self.dist.len()
        );
        ShortestPathTree::new(self.root, self.dist, self.pred)
    }
}

/// Compute the shortest path tree rooted at `root`.
pub fn shortest_path_tree<W>(g: &UGraph<W>, root: usize) -> Result<ShortestPathTree<W>>
where
    W: PrimInt,
{
    Dijkstra::new(g, root)?.run()
}

/// Run a Dijkstra search and return a shortest path from `src` to `snk`.
///
/// The function returns the edges on the path (from `src` to `snk`) and its
/// length, or `None` if `snk` is not reachable.
pub fn find_path<W>(g: &UGraph<W>, src: usize, snk: usize) -> Result<Option<(Vec<Edge>, W)>>
where
    W: PrimInt,
{
    if snk >= g.num_nodes() {
        return Err(Error::InvalidNode {
            node: snk,
            num_nodes: g.num_nodes(),
        });
    }
    let mut search = Dijkstra::new(g, src)?;
    while let Some(u) = search.step()? {
        if u == snk {
            break;
        }
    }
    let tree = search.into_tree();
    Ok(tree.dist(snk).and_then(|d| tree.path_to(g, snk).map(|path| (path, d))))
}

#[cfg(test)]
mod tests {
    use super::{shortest_path_tree, Dijkstra, Relaxation};
    use crate::collections::{IndexBinHeap, IndexPriQueue};
    use crate::error::Error;
    use crate::graph::UGraph;

    fn example() -> UGraph<u32> {
        //  a-----9-----b
        //  | \          \
        //  |  2          6
        // 14   \          \
        //  |    c----8-----d
        //  |   / \        /
        //  |  9   10    15
        //  | /      \   /
        //  e----7----f-
        let mut g = UGraph::new(6);
        for &(u, v, w) in &[
            (0, 1, 9),
            (0, 2, 2),
            (0, 4, 14),
            (1, 3, 6),
            (2, 3, 8),
            (2, 4, 9),
            (2, 5, 10),
            (3, 5, 15),
            (4, 5, 7),
        ] {
            g.add_edge(u, v, w).unwrap();
        }
        g
    }

    #[test]
    fn test_distances() {
        let g = example();
        let tree = shortest_path_tree(&g, 4).unwrap();
        assert_eq!(tree.root(), 4);
        assert_eq!(
            tree.distances(),
            &[Some(11), Some(20), Some(9), Some(17), Some(0), Some(7)]
        );
        assert_eq!(tree.pred(4), None);
        assert_eq!(tree.nodes_to(&g, 1), Some(vec![4, 2, 0, 1]));
        assert_eq!(tree.nodes_to(&g, 4), Some(vec![4]));
    }

    #[test]
    fn test_unreachable() {
        let mut g = UGraph::<i32>::new(4);
        g.add_edge(0, 1, 3).unwrap();
        g.add_edge(2, 3, 1).unwrap();
        let tree = shortest_path_tree(&g, 1).unwrap();
        assert_eq!(tree.dist(0), Some(3));
        assert!(!tree.has_path_to(2));
        assert_eq!(tree.path_to(&g, 3), None);
    }

    #[test]
    fn test_relaxation_outcomes() {
        // two parallel edges of equal weight and a longer one
        let mut g = UGraph::<u8>::new(2);
        let a = g.add_edge(0, 1, 2).unwrap();
        let b = g.add_edge(0, 1, 2).unwrap();
        let c = g.add_edge(0, 1, 5).unwrap();
        let d = g.add_edge(0, 1, 1).unwrap();

        let mut search = Dijkstra::new(&g, 0).unwrap();
        assert_eq!(search.settle_next(), Some(0));
        assert_eq!(search.relax(0, a).unwrap(), (1, Relaxation::Improved));
        assert_eq!(search.relax(0, b).unwrap(), (1, Relaxation::Tied));
        assert_eq!(search.relax(0, c).unwrap(), (1, Relaxation::Unchanged));
        assert_eq!(search.relax(0, d).unwrap(), (1, Relaxation::Improved));
        assert_eq!(search.dist(1), Some(1));

        assert_eq!(search.settle_next(), Some(1));
        assert!(search.is_settled(1));
        assert_eq!(search.relax(1, d).unwrap(), (0, Relaxation::Unchanged));
        assert_eq!(search.settle_next(), None);
        assert_eq!(search.into_tree().pred(1), Some(d));
    }

    #[test]
    fn test_zero_weight_ties_settled() {
        let mut g = UGraph::<u32>::new(2);
        let e = g.add_edge(0, 1, 0).unwrap();
        let mut search = Dijkstra::new(&g, 0).unwrap();
        search.step().unwrap();
        assert_eq!(search.settle_next(), Some(1));
        // 0 is settled with the same distance, this is no new path
        assert_eq!(search.relax(1, e).unwrap(), (0, Relaxation::Unchanged));
    }

    #[test]
    fn test_reuse_queue() {
        let g = example();
        let mut heap = IndexBinHeap::new(g.num_nodes());
        let first = Dijkstra::with_queue(&g, 0, &mut heap).unwrap().run().unwrap();
        let second = Dijkstra::with_queue(&g, 0, &mut heap).unwrap().run().unwrap();
        assert_eq!(first, second);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_invalid() {
        let g = example();
        assert!(matches!(
            Dijkstra::new(&g, 6),
            Err(Error::InvalidNode { node: 6, num_nodes: 6 })
        ));
        let small = IndexBinHeap::new(3);
        assert!(matches!(Dijkstra::with_queue(&g, 0, small), Err(Error::Queue(_))));
    }
}
