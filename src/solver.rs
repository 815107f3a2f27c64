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

//! Shortest trips with a stop at a waypoint.
//!
//! Given a road network of `n` cities, where city `1` is the origin and city
//! `n` the destination, and a set of cities offering a dinner stop, find the
//! length of the shortest trip from origin to destination that passes at
//! least one dinner city and count the number of distinct trips of that
//! length.
//!
//! The solver runs three searches:
//!
//! 1. a Dijkstra search from the destination, giving $d_t(v)$,
//! 2. a [waypoint search](crate::waypoint) from the origin, giving $d_s(v)$
//!    and the waypoint path counts,
//! 3. a second search from the destination, which sums the remaining
//!    waypoint counts of all nodes with $d_s(v) + d_t(v) = L$,
//!
//! where $L = \min \\{ d_s(w) + d_t(w) : w \text{ waypoint} \\}$.
//!
//! # Example
//!
//! ```
//! use rs_waypoint::FindDinner;
//!
//! //     2
//! //    / \
//! //   1   4
//! //    \ /
//! //     3
//! let mut dinner = FindDinner::new(4).unwrap();
//! dinner.add_edge(1, 2, 1).unwrap();
//! dinner.add_edge(2, 4, 1).unwrap();
//! dinner.add_edge(1, 3, 1).unwrap();
//! dinner.add_edge(3, 4, 1).unwrap();
//! dinner.mark_waypoint(2).unwrap();
//! dinner.mark_waypoint(3).unwrap();
//! dinner.solve().unwrap();
//!
//! assert_eq!(dinner.shortest_length().unwrap(), Some(2));
//! assert_eq!(dinner.path_count().unwrap(), 2);
//! ```

use crate::collections::{IndexBinHeap, IndexPriQueue};
use crate::error::{Error, Result};
use crate::graph::{Edge, UGraph};
use crate::shortestpath::{Dijkstra, ShortestPathTree};
use crate::waypoint::{WaypointSearch, WaypointTree};

use log::{debug, info};
use num_traits::PrimInt;

use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The internal node of the origin (city `1`).
const ORIGIN: usize = 0;

/// The phases of a [`FindDinner`] instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Edges and waypoints may be added.
    Configuring,
    /// The distances to the destination are known.
    DestinationPassDone,
    /// The distances and path counts from the origin are known.
    SourcePassDone,
    Solved,
}

/// The solution of a [`FindDinner`] instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<W> {
    /// Length of a shortest trip through a waypoint, `None` if there is no
    /// such trip.
    pub length: Option<W>,
    /// Number of distinct trips of that length.
    pub count: u64,
}

/// Solver for shortest origin-destination trips through a waypoint.
///
/// Cities are numbered `1..=n`. The instance is single-use: it is configured
/// by [`add_edge`](Self::add_edge) and [`mark_waypoint`](Self::mark_waypoint),
/// solved once by [`solve`](Self::solve) and read-only afterwards.
pub struct FindDinner<W = i64> {
    g: UGraph<W>,
    is_waypoint: Vec<bool>,
    state: State,
    to_dest: Option<ShortestPathTree<W>>,
    from_origin: Option<WaypointTree<W>>,
    solution: Option<Solution<W>>,
}

impl<W> FindDinner<W>
where
    W: PrimInt + fmt::Display,
{
    /// Create an instance with `num_cities` cities.
    ///
    /// Fails unless there are at least 2 cities.
    pub fn new(num_cities: usize) -> Result<Self> {
        if num_cities < 2 {
            return Err(Error::TooFewCities(num_cities));
        }
        Ok(FindDinner {
            g: UGraph::new(num_cities),
            is_waypoint: vec![false; num_cities],
            state: State::Configuring,
            to_dest: None,
            from_origin: None,
            solution: None,
        })
    }

    pub fn num_cities(&self) -> usize {
        self.g.num_nodes()
    }

    /// The road network with internal (0-based) node ids.
    pub fn graph(&self) -> &UGraph<W> {
        &self.g
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Add a bidirectional road between two distinct cities.
    ///
    /// The `duration` must be non-negative. Multiple roads between the same
    /// cities are distinct roads.
    pub fn add_edge(&mut self, city1: usize, city2: usize, duration: W) -> Result<Edge> {
        self.check_configuring()?;
        let u = self.node(city1)?;
        let v = self.node(city2)?;
        if u == v {
            return Err(Error::SelfLoop(city1));
        }
        self.g.add_edge(u, v, duration)
    }

    /// Mark a city as a waypoint (a city offering dinner).
    pub fn mark_waypoint(&mut self, city: usize) -> Result<()> {
        self.check_configuring()?;
        let u = self.node(city)?;
        self.is_waypoint[u] = true;
        Ok(())
    }

    /// Return the waypoint cities in increasing order.
    pub fn waypoints(&self) -> Vec<usize> {
        (0..self.num_cities())
            .filter(|&u| self.is_waypoint[u])
            .map(|u| u + 1)
            .collect()
    }

    /// Solve the instance.
    ///
    /// This may be called only once. A missing trip is not an error, it is
    /// reported as a solution without length and a count of 0. If a search
    /// fails, the instance is left unsolved in the `Configuring` state.
    pub fn solve(&mut self) -> Result<Solution<W>> {
        let heap = IndexBinHeap::<W>::new(self.num_cities());
        self.solve_with_queue(heap)
    }

    /// Solve the instance, all searches share the given queue.
    fn solve_with_queue<P>(&mut self, heap: P) -> Result<Solution<W>>
    where
        P: IndexPriQueue<W>,
    {
        self.check_configuring()?;
        let result = self.run_searches(heap);
        if result.is_err() {
            self.state = State::Configuring;
        }
        result
    }

    fn run_searches<P>(&mut self, mut heap: P) -> Result<Solution<W>>
    where
        P: IndexPriQueue<W>,
    {
        let dest = self.destination();

        let to_dest = Dijkstra::with_queue(&self.g, dest, &mut heap)?.run()?;
        self.state = State::DestinationPassDone;

        let from_origin =
            WaypointSearch::with_queue(&self.g, ORIGIN, &self.is_waypoint, to_dest.distances(), &mut heap)?.run()?;
        self.state = State::SourcePassDone;

        let length = self.optimal_length(from_origin.tree(), &to_dest);
        let count = match length {
            Some(length) => self.aggregate(&from_origin, &to_dest, length, &mut heap)?,
            None => 0,
        };
        let solution = Solution { length, count };

        match length {
            Some(length) => info!("shortest trip through a waypoint: length {}, {} trips", length, count),
            None => info!("no trip through a waypoint"),
        }

        self.to_dest = Some(to_dest);
        self.from_origin = Some(from_origin);
        self.solution = Some(solution);
        self.state = State::Solved;
        Ok(solution)
    }

    /// Return the solution computed by [`solve`](Self::solve).
    pub fn solution(&self) -> Result<Solution<W>> {
        self.solution.ok_or(Error::NotSolved)
    }

    /// Return the length of a shortest trip through a waypoint.
    ///
    /// The length is `None` if no such trip exists.
    pub fn shortest_length(&self) -> Result<Option<W>> {
        Ok(self.solution()?.length)
    }

    /// Return the number of distinct shortest trips through a waypoint.
    pub fn path_count(&self) -> Result<u64> {
        Ok(self.solution()?.count)
    }

    /// Return `true` if `city` can be reached from the origin.
    pub fn has_route_from_origin(&self, city: usize) -> Result<bool> {
        let u = self.node(city)?;
        Ok(self.origin_tree()?.has_path_to(u))
    }

    /// Return `true` if the destination can be reached from `city`.
    pub fn has_route_to_destination(&self, city: usize) -> Result<bool> {
        let u = self.node(city)?;
        Ok(self.destination_tree()?.has_path_to(u))
    }

    /// Return the cities of a shortest route from the origin to `city`.
    ///
    /// Both the origin and `city` are included. Returns `None` if `city` is
    /// not reachable.
    pub fn route_from_origin(&self, city: usize) -> Result<Option<Vec<usize>>> {
        let u = self.node(city)?;
        let nodes = self.origin_tree()?.nodes_to(&self.g, u);
        Ok(nodes.map(|nodes| nodes.into_iter().map(|v| v + 1).collect()))
    }

    /// Return the cities of a shortest route from `city` to the destination.
    ///
    /// Both `city` and the destination are included. Returns `None` if the
    /// destination is not reachable.
    pub fn route_to_destination(&self, city: usize) -> Result<Option<Vec<usize>>> {
        let u = self.node(city)?;
        let nodes = self.destination_tree()?.nodes_to(&self.g, u);
        Ok(nodes.map(|nodes| nodes.into_iter().rev().map(|v| v + 1).collect()))
    }

    fn origin_tree(&self) -> Result<&ShortestPathTree<W>> {
        self.from_origin.as_ref().map(WaypointTree::tree).ok_or(Error::NotSolved)
    }

    fn destination_tree(&self) -> Result<&ShortestPathTree<W>> {
        self.to_dest.as_ref().ok_or(Error::NotSolved)
    }

    /// Return the minimal length of an origin-destination path through a
    /// waypoint.
    fn optimal_length(&self, from_origin: &ShortestPathTree<W>, to_dest: &ShortestPathTree<W>) -> Option<W> {
        (0..self.num_cities())
            .filter(|&u| self.is_waypoint[u])
            .filter_map(|u| through(from_origin, to_dest, u))
            .min()
    }

    /// Sum the waypoint counts of all nodes on an optimal path.
    ///
    /// The nodes are visited by another search from the destination, so only
    /// nodes connected to the destination are considered.
    fn aggregate<P>(
        &self,
        from_origin: &WaypointTree<W>,
        to_dest: &ShortestPathTree<W>,
        length: W,
        heap: P,
    ) -> Result<u64>
    where
        P: IndexPriQueue<W>,
    {
        let mut search = Dijkstra::with_queue(&self.g, self.destination(), heap)?;
        let mut count = 0u64;
        while let Some(u) = search.step()? {
            if through(from_origin.tree(), to_dest, u) != Some(length) {
                continue;
            }
            if let Some(n) = from_origin.counts().waypoint(u).active() {
                debug!("{} trips tallied at city {}", n, u + 1);
                count = count.saturating_add(n);
            }
        }
        Ok(count)
    }

    fn destination(&self) -> usize {
        self.num_cities() - 1
    }

    /// Convert an external city id to a node.
    fn node(&self, city: usize) -> Result<usize> {
        if city >= 1 && city <= self.num_cities() {
            Ok(city - 1)
        } else {
            Err(Error::InvalidCity {
                city,
                num_cities: self.num_cities(),
            })
        }
    }

    fn check_configuring(&self) -> Result<()> {
        if self.state == State::Configuring {
            Ok(())
        } else {
            Err(Error::AlreadySolved)
        }
    }
}

/// Return the length of a shortest origin-destination path through `u`.
fn through<W>(from_origin: &ShortestPathTree<W>, to_dest: &ShortestPathTree<W>, u: usize) -> Option<W>
where
    W: PrimInt,
{
    from_origin.dist(u)?.checked_add(&to_dest.dist(u)?)
}
