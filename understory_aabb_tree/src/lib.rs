// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_aabb_tree --heading-base-level=0

//! Understory AABB Tree: a dynamic, d-dimensional AABB tree for overlap queries.
//!
//! Understory AABB Tree is a small building block for broad-phase collision checks
//! and "what is under this region" lookups.
//!
//! - Boxes ([`Aabb`]) are products of closed intervals in any number of dimensions.
//! - Insert boxes with user payloads one at a time; no bulk build is needed.
//! - Query whether anything overlaps a box, or collect the payloads of everything that does.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i32`, `i64`) and does not
//! depend on any geometry crate. Enable the `kurbo` feature to convert 2-D boxes
//! to and from `kurbo::Rect`.
//!
//! # Example
//!
//! ```rust
//! use understory_aabb_tree::{Aabb, Tree};
//!
//! let mut tree: Tree<f64, &str> = Tree::new();
//! tree.insert(Aabb::new([(0.0, 1.0), (0.0, 1.0)])?, "A")?;
//! tree.insert(Aabb::new([(5.0, 6.0), (5.0, 6.0)])?, "B")?;
//!
//! // Touching a corner counts as overlap.
//! let corner = Aabb::new([(0.0, 0.0), (0.0, 0.0)])?;
//! assert!(tree.does_overlap(&corner)?);
//! assert_eq!(tree.overlap_values(&corner)?, [&"A"]);
//!
//! let far = Aabb::new([(10.0, 11.0), (10.0, 11.0)])?;
//! assert!(tree.overlap_values(&far)?.is_empty());
//! # Ok::<(), understory_aabb_tree::Error>(())
//! ```
//!
//! ## Insertion heuristic
//!
//! Each insertion walks down from the root. At every internal node it compares
//! the cost of attaching the new item as a sibling of the entire subtree with
//! the cost of descending into either child, where costs are generalized
//! perimeters ([`Aabb::perimeter`]: perimeter in 2-D, surface area in 3-D).
//! This greedy descent keeps boxes small without a rebalancing pass. Tree quality
//! depends on insertion order; it is a heuristic, not an optimal tree.
//!
//! ## Dimensionality
//!
//! A tree takes its dimensionality from the first inserted box. Inserting or
//! querying with a box of another dimensionality fails with
//! [`Error::DimensionMismatch`] before anything is modified.
//!
//! ### Float semantics
//!
//! Intervals with NaN bounds are rejected at construction. Cost metrics use
//! widened accumulators (`f32`→`f64`, `i32`→`i64`, `i64`→`i128`). Integer
//! accumulators saturate rather than overflow, so costs of huge boxes clamp.
//!
//! ## Logging
//!
//! Insertion decisions are reported through the [`log`] facade: per-node
//! choices at `trace` level, root initialization and leaf splits at `debug`. Nothing is printed unless the application installs a logger.

#![no_std]

extern crate alloc;

pub mod error;
pub mod tree;
pub mod types;

pub use error::{Error, IntervalFault};
pub use tree::Tree;
pub use types::{Aabb, Accumulator, Scalar, ScalarAcc};
