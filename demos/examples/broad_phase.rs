// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3-D broad phase: find candidate pairs of overlapping cubes.
//!
//! Every cube is inserted, then each cube queries the tree; pairs are reported
//! once with the smaller id first.
//!
//! Run:
//! - `cargo run -p understory_demos --example broad_phase`

use understory_aabb_tree::{Aabb, Error, Tree};

fn cube(x: i64, y: i64, z: i64, side: i64) -> Result<Aabb<i64>, Error> {
    Aabb::new([(x, x + side), (y, y + side), (z, z + side)])
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let cubes = [
        cube(0, 0, 0, 4)?,
        cube(3, 3, 3, 4)?,
        cube(7, 7, 7, 2)?,
        cube(20, 0, 0, 4)?,
        cube(24, 4, 4, 1)?,
        cube(50, 50, 50, 10)?,
    ];

    let mut tree = Tree::new();
    for (id, c) in cubes.iter().enumerate() {
        tree.insert(c.clone(), id)?;
    }

    let mut pairs = Vec::new();
    for (id, c) in cubes.iter().enumerate() {
        for &other in tree.overlap_values(c)? {
            if id < other {
                pairs.push((id, other));
            }
        }
    }
    pairs.sort_unstable();
    println!("candidate pairs: {pairs:?}");
    assert_eq!(pairs, [(0, 1), (1, 2), (3, 4)]);
    Ok(())
}
