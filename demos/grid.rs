/*
 * Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use time::OffsetDateTime;

use rustop::opts;

use rs_waypoint::{FindDinner, Result};

/// Build a grid with `cols` columns and `rows` rows.
///
/// Cities are numbered row-wise starting at the bottom left corner (the
/// origin) and ending at the top right corner (the destination). Every
/// `stride`-th city is a waypoint.
fn grid(cols: usize, rows: usize, stride: usize) -> Result<FindDinner<u32>> {
    let city = |i: usize, j: usize| j * cols + i + 1;
    let weight = |i: usize, j: usize| 1 + ((7 * i + 3 * j) % 4) as u32;

    let mut dinner = FindDinner::new(cols * rows)?;
    for j in 0..rows {
        for i in 0..cols {
            if i + 1 < cols {
                dinner.add_edge(city(i, j), city(i + 1, j), weight(i, j))?;
            }
            if j + 1 < rows {
                dinner.add_edge(city(i, j), city(i, j + 1), weight(j, i))?;
            }
        }
    }
    if stride > 0 {
        for c in (stride..=cols * rows).step_by(stride) {
            dinner.mark_waypoint(c)?;
        }
    }
    Ok(dinner)
}

fn main() -> Result<()> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Count shortest origin-destination trips through a waypoint on a grid.";
        opt cols:usize=20, desc:"Number of columns.";
        opt rows:usize=20, desc:"Number of rows.";
        opt stride:usize=17, desc:"Every stride-th city is a waypoint.";
        opt num:usize=1, desc:"Number of times the instance is solved.";
    }
    .parse_or_exit();

    for _ in 0..args.num {
        let tstart = OffsetDateTime::now_utc();
        let mut dinner = grid(args.cols, args.rows, args.stride)?;
        let solution = dinner.solve()?;
        let tend = OffsetDateTime::now_utc();

        println!("Time: {}", (tend - tstart).as_seconds_f64());
        println!("  number of cities: {}", dinner.num_cities());
        println!("  number of roads: {}", dinner.graph().num_edges());
        println!("  number of waypoints: {}", dinner.waypoints().len());
        match solution.length {
            Some(length) => println!("Length: {}  Trips: {}", length, solution.count),
            None => println!("No trip through a waypoint"),
        }
    }

    Ok(())
}
