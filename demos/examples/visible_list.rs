// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-window example using overlap queries.
//!
//! Rows of a long list are indexed once; each scroll position asks the tree
//! which rows touch the viewport.
//!
//! Run:
//! - `cargo run -p understory_demos --example visible_list`

use kurbo::Rect;
use understory_aabb_tree::{Aabb, Error, Tree};

const ROW_H: f64 = 20.0;
const WIDTH: f64 = 200.0;

fn main() -> Result<(), Error> {
    env_logger::init();

    let rows = 1000_usize;
    let mut tree = Tree::with_capacity(rows);
    for i in 0..rows {
        let y0 = i as f64 * ROW_H;
        tree.insert(Aabb::try_from(Rect::new(0.0, y0, WIDTH, y0 + ROW_H))?, i)?;
    }
    log::info!("indexed {} rows, depth {}", tree.len(), tree.depth());

    // Simulate a few scroll positions by changing the viewport rectangle.
    // Rows whose edge touches the viewport count as visible.
    for scroll in [0.0, 30.0, 200.0, 600.0] {
        let viewport = Aabb::try_from(Rect::new(0.0, scroll, WIDTH, scroll + 100.0))?;
        let mut visible: Vec<usize> = tree.overlap_values(&viewport)?.into_iter().copied().collect();
        visible.sort_unstable();
        println!("scroll={scroll:.1} -> visible indices: {visible:?}");
    }
    Ok(())
}
