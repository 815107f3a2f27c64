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

//! Randomized cross-checks against a Floyd-Warshall brute force.

use rs_waypoint::shortestpath::dijkstra;
use rs_waypoint::{FindDinner, Solution, UGraph};

use proptest::collection::vec;
use proptest::prelude::*;

/// A random instance: number of nodes, edges `(u, v, weight)` on nodes
/// `0..n` without self loops, and a waypoint flag per node.
#[derive(Clone, Debug)]
struct Instance {
    n: usize,
    edges: Vec<(usize, usize, u32)>,
    waypoints: Vec<bool>,
}

fn instance() -> impl Strategy<Value = Instance> {
    instance_with_weights(0..10)
}

fn instance_with_weights(weights: std::ops::Range<u32>) -> impl Strategy<Value = Instance> {
    (2usize..8).prop_flat_map(move |n| {
        (
            vec((0..n, 1..n, weights.clone()), 0..16),
            vec(any::<bool>(), n),
        )
            .prop_map(move |(edges, waypoints)| Instance {
                n,
                edges: edges.into_iter().map(|(u, k, w)| (u, (u + k) % n, w)).collect(),
                waypoints,
            })
    })
}

/// All pairs shortest path distances.
fn floyd_warshall(inst: &Instance) -> Vec<Vec<Option<u64>>> {
    let n = inst.n;
    let mut dist = vec![vec![None; n]; n];
    for (u, row) in dist.iter_mut().enumerate() {
        row[u] = Some(0);
    }
    for &(u, v, w) in &inst.edges {
        let w = u64::from(w);
        if dist[u][v].map_or(true, |d| w < d) {
            dist[u][v] = Some(w);
            dist[v][u] = Some(w);
        }
    }
    for k in 0..n {
        for u in 0..n {
            for v in 0..n {
                if let (Some(a), Some(b)) = (dist[u][k], dist[k][v]) {
                    if dist[u][v].map_or(true, |d| a + b < d) {
                        dist[u][v] = Some(a + b);
                    }
                }
            }
        }
    }
    dist
}

/// Count the simple paths from `0` to `n - 1` of length `len` that visit a
/// waypoint. Parallel edges give distinct paths.
fn count_paths(inst: &Instance, len: u64) -> u64 {
    fn search(inst: &Instance, u: usize, len: u64, visited: &mut Vec<bool>, waypoint: bool) -> u64 {
        let waypoint = waypoint || inst.waypoints[u];
        if u == inst.n - 1 {
            return if len == 0 && waypoint { 1 } else { 0 };
        }
        visited[u] = true;
        let mut count = 0;
        for &(a, b, w) in &inst.edges {
            let w = u64::from(w);
            let v = if a == u {
                b
            } else if b == u {
                a
            } else {
                continue;
            };
            if !visited[v] && w <= len {
                count += search(inst, v, len - w, visited, waypoint);
            }
        }
        visited[u] = false;
        count
    }
    search(inst, 0, len, &mut vec![false; inst.n], false)
}

fn graph(inst: &Instance) -> UGraph<u32> {
    let mut g = UGraph::new(inst.n);
    for &(u, v, w) in &inst.edges {
        g.add_edge(u, v, w).unwrap();
    }
    g
}

/// Solve the instance, optionally with origin and destination swapped.
fn solve(inst: &Instance, reversed: bool) -> Solution<u32> {
    let n = inst.n;
    let city = |u: usize| if reversed { n - u } else { u + 1 };
    let mut dinner = FindDinner::new(n).unwrap();
    for &(u, v, w) in &inst.edges {
        dinner.add_edge(city(u), city(v), w).unwrap();
    }
    for u in (0..n).filter(|&u| inst.waypoints[u]) {
        dinner.mark_waypoint(city(u)).unwrap();
    }
    dinner.solve().unwrap()
}

proptest! {
    #[test]
    fn dijkstra_matches_floyd_warshall(inst in instance()) {
        let g = graph(&inst);
        let apsp = floyd_warshall(&inst);
        for root in 0..inst.n {
            let tree = dijkstra::shortest_path_tree(&g, root).unwrap();
            for u in 0..inst.n {
                prop_assert_eq!(tree.dist(u).map(u64::from), apsp[root][u]);
                if let Some(path) = tree.path_to(&g, u) {
                    let len: u64 = path.iter().map(|&e| u64::from(g.weight(e))).sum();
                    prop_assert_eq!(Some(len), apsp[root][u]);
                }
            }
        }
    }

    #[test]
    fn length_matches_floyd_warshall(inst in instance()) {
        let apsp = floyd_warshall(&inst);
        let t = inst.n - 1;
        let expected = (0..inst.n)
            .filter(|&w| inst.waypoints[w])
            .filter_map(|w| Some(apsp[0][w]? + apsp[w][t]?))
            .min();
        let solution = solve(&inst, false);
        prop_assert_eq!(solution.length.map(u64::from), expected);
        if solution.length.is_none() {
            prop_assert_eq!(solution.count, 0);
        }
    }

    #[test]
    fn count_matches_path_enumeration(inst in instance_with_weights(1..10)) {
        // exact when a waypoint lies on a shortest origin-destination path
        let apsp = floyd_warshall(&inst);
        let t = inst.n - 1;
        let solution = solve(&inst, false);
        if let (Some(length), Some(direct)) = (solution.length, apsp[0][t]) {
            if u64::from(length) == direct {
                prop_assert_eq!(solution.count, count_paths(&inst, direct));
            }
        }
    }

    #[test]
    fn length_is_symmetric(inst in instance()) {
        prop_assert_eq!(solve(&inst, false).length, solve(&inst, true).length);
    }

    #[test]
    fn solving_is_deterministic(inst in instance()) {
        prop_assert_eq!(solve(&inst, false), solve(&inst, false));
    }
}
