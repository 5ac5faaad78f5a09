// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by boxes and the tree.

/// Why an interval was rejected at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntervalFault {
    /// The interval did not have exactly two bounds; carries the count it had.
    Arity(usize),
    /// The lower bound is greater than the upper bound (or the bounds are unordered, e.g. NaN).
    Inverted,
}

impl core::fmt::Display for IntervalFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Arity(n) => write!(f, "expected 2 bounds, found {n}"),
            Self::Inverted => f.write_str("lower bound exceeds upper bound"),
        }
    }
}

/// Errors reported by [`Aabb`](crate::Aabb) and [`Tree`](crate::Tree) operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An interval passed to a box constructor is malformed.
    #[error("invalid interval on axis {axis}: {fault}")]
    InvalidInterval {
        /// Axis (zero-based) of the offending interval.
        axis: usize,
        /// What was wrong with it.
        fault: IntervalFault,
    },
    /// Two non-empty boxes (or a box and a tree) disagree on dimensionality.
    #[error("dimension mismatch: expected {expected} axes, found {found}")]
    DimensionMismatch {
        /// Dimensionality of the receiver (or the tree).
        expected: usize,
        /// Dimensionality of the other operand.
        found: usize,
    },
    /// An empty box was given where an item box is required.
    #[error("cannot insert an empty box")]
    EmptyBox,
}
