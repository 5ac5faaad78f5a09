// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! AABB tree basics.
//!
//! Insert a few Kurbo rectangles, dump the tree, and run overlap queries.
//! Set `RUST_LOG=trace` to watch each insertion decision.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example tree_basics`

use kurbo::Rect;
use understory_aabb_tree::{Aabb, Error, Tree};

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut tree = Tree::new();
    let items = [
        ("a", Rect::new(0.0, 0.0, 1.0, 1.0)),
        ("b", Rect::new(1.0, 1.0, 2.0, 2.0)),
        ("c", Rect::new(2.0, 2.0, 3.0, 3.0)),
        ("far", Rect::new(100.0, 0.0, 101.0, 1.0)),
    ];
    for (name, r) in items {
        tree.insert(Aabb::try_from(r)?, name)?;
    }
    println!("{tree}");
    println!("{tree:?}");

    // Closed intervals: "c" starts at 2.0, past the query's right edge.
    let q = Aabb::try_from(Rect::new(0.5, 0.5, 1.5, 1.5))?;
    let hits = tree.overlap_values(&q)?;
    println!("{q} overlaps {hits:?}");
    assert_eq!(hits, [&"a", &"b"]);

    let miss = Aabb::try_from(Rect::new(10.0, 10.0, 11.0, 11.0))?;
    assert!(!tree.does_overlap(&miss)?);

    if let Some(bounds) = tree.bounds().to_rect() {
        log::info!("tree covers {bounds:?}");
    }
    Ok(())
}
