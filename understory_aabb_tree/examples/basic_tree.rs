// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory AABB Tree: insert boxes, then run overlap queries.

use understory_aabb_tree::{Aabb, Error, Tree};

fn main() -> Result<(), Error> {
    let mut tree: Tree<i64, u32> = Tree::new();
    tree.insert(Aabb::new([(0, 10), (0, 10)])?, 1)?;
    tree.insert(Aabb::new([(5, 15), (5, 15)])?, 2)?;
    tree.insert(Aabb::new([(40, 50), (0, 10)])?, 3)?;

    println!("{tree}");

    // Query a box inside the first two items
    let q = Aabb::new([(6, 8), (6, 8)])?;
    println!("any overlap with {q}: {}", tree.does_overlap(&q)?);
    println!("values overlapping {q}: {:?}", tree.overlap_values(&q)?);
    Ok(())
}
