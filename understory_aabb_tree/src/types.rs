// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{Debug, Display};

use crate::error::{Error, IntervalFault};

/// Widened accumulator for cost metrics.
///
/// Integer accumulators saturate instead of overflowing, so the cost of a very
/// large box clamps to the type's maximum. Float accumulators use plain IEEE
/// arithmetic.
pub trait Accumulator: Copy + PartialOrd + Debug {
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// The constant factor `2`.
    const TWO: Self;

    /// `self + rhs`, clamped for integers.
    fn sat_add(self, rhs: Self) -> Self;

    /// `self - rhs`, clamped for integers.
    fn sat_sub(self, rhs: Self) -> Self;

    /// `self * rhs`, clamped for integers.
    fn sat_mul(self, rhs: Self) -> Self;
}

impl Accumulator for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;

    #[inline]
    fn sat_add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sat_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn sat_mul(self, rhs: Self) -> Self {
        self * rhs
    }
}

macro_rules! int_accumulator {
    ($($t:ty),*) => {$(
        impl Accumulator for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const TWO: Self = 2;

            #[inline]
            fn sat_add(self, rhs: Self) -> Self {
                self.saturating_add(rhs)
            }

            #[inline]
            fn sat_sub(self, rhs: Self) -> Self {
                self.saturating_sub(rhs)
            }

            #[inline]
            fn sat_mul(self, rhs: Self) -> Self {
                self.saturating_mul(rhs)
            }
        }
    )*};
}

int_accumulator!(i64, i128);

/// Numeric scalar abstraction for box coordinates.
///
/// This trait provides the minimal set of operations required for the perimeter
/// cost metric, and an associated widened accumulator type for side lengths and
/// their products (e.g., f32→f64, i64→i128).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for perimeter/cost computations.
    type Acc: Accumulator;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v.into()
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i32 {
    type Acc = i64;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v.into()
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v.into()
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Axis-aligned bounding box in `d` dimensions.
///
/// A box is an ordered list of closed intervals `(lo, hi)`, one per axis, with
/// `lo <= hi` on every axis. A box with no intervals is the *empty* box: it is
/// the identity for [`merge`](Self::merge) and overlaps nothing.
///
/// Dimensionality is a runtime property; binary operations on two non-empty
/// boxes of different dimensionality fail with [`Error::DimensionMismatch`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aabb<T> {
    limits: Vec<(T, T)>,
}

impl<T> Aabb<T> {
    /// The empty (unset) box.
    pub const fn empty() -> Self {
        Self { limits: Vec::new() }
    }

    /// Number of axes. Zero for the empty box.
    pub fn dim(&self) -> usize {
        self.limits.len()
    }

    /// Whether this is the empty box.
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// The `(lo, hi)` intervals, one per axis.
    pub fn as_slice(&self) -> &[(T, T)] {
        &self.limits
    }

    /// Iterate over the `(lo, hi)` intervals in axis order.
    pub fn iter(&self) -> core::slice::Iter<'_, (T, T)> {
        self.limits.iter()
    }

    /// Fail unless `other` is empty, `self` is empty, or both share a dimensionality.
    pub(crate) fn check_dim(&self, other: &Self) -> Result<(), Error> {
        if self.is_empty() || other.is_empty() || self.dim() == other.dim() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            })
        }
    }
}

impl<T: Copy + PartialOrd> Aabb<T> {
    /// Create a box from `(lo, hi)` intervals, one per axis.
    ///
    /// An empty iterator produces the empty box.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInterval`] if any interval has `lo > hi` (or unordered bounds such as NaN).
    pub fn new<I>(intervals: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let limits = intervals
            .into_iter()
            .enumerate()
            .map(|(axis, (lo, hi))| {
                if le(lo, hi) {
                    Ok((lo, hi))
                } else {
                    Err(Error::InvalidInterval {
                        axis,
                        fault: IntervalFault::Inverted,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { limits })
    }

    /// Create a box from per-axis bound slices, each of which must hold exactly `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInterval`] if a slice does not have exactly two bounds or if `lo > hi`.
    pub fn from_bounds<B: AsRef<[T]>>(bounds: &[B]) -> Result<Self, Error> {
        let mut pairs = Vec::with_capacity(bounds.len());
        for (axis, b) in bounds.iter().enumerate() {
            let bound: &[T] = b.as_ref();
            match *bound {
                [lo, hi] => pairs.push((lo, hi)),
                _ => {
                    return Err(Error::InvalidInterval {
                        axis,
                        fault: IntervalFault::Arity(bound.len()),
                    });
                }
            }
        }
        Self::new(pairs)
    }

    /// The `(lo, hi)` interval on `axis`, if the box has that many axes.
    pub fn get(&self, axis: usize) -> Option<(T, T)> {
        self.limits.get(axis).copied()
    }

    /// The smallest box containing both `self` and `other`.
    ///
    /// The empty box is the identity: merging with it yields a copy of the other operand.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if both boxes are non-empty with different dimensionality.
    pub fn merge(&self, other: &Self) -> Result<Self, Error> {
        self.check_dim(other)?;
        Ok(union_aabb(self, other))
    }

    /// Whether the two boxes intersect. Closed intervals: touching faces overlap.
    ///
    /// An empty operand overlaps nothing.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if both boxes are non-empty with different dimensionality.
    pub fn overlaps(&self, other: &Self) -> Result<bool, Error> {
        self.check_dim(other)?;
        Ok(overlaps_aabb(self, other))
    }
}

impl<T: Scalar> Aabb<T> {
    /// Generalized perimeter used as the insertion cost proxy.
    ///
    /// For side lengths `l_1, ..., l_d`:
    ///
    /// - `d = 1`: `0`
    /// - `d = 2`: `2 (l_1 + l_2)`, the perimeter
    /// - `d = 3`: `2 (l_1 l_2 + l_2 l_3 + l_1 l_3)`, the surface area
    /// - general: `2 Σ_i Π_{j≠i} l_j`
    ///
    /// The empty box has perimeter `0`. Sides are measured in the widened
    /// accumulator, so `(i32::MIN, i32::MAX)` has its exact length; integer
    /// sums and products saturate at the accumulator's maximum.
    pub fn perimeter(&self) -> ScalarAcc<T> {
        if self.dim() < 2 {
            return T::Acc::ZERO;
        }
        let side = |&(lo, hi): &(T, T)| T::widen(hi).sat_sub(T::widen(lo));
        let mut total = T::Acc::ZERO;
        for i in 0..self.dim() {
            let face = self
                .limits
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(T::Acc::ONE, |acc, (_, l)| acc.sat_mul(side(l)));
            total = total.sat_add(face);
        }
        T::Acc::TWO.sat_mul(total)
    }
}

impl<T> core::ops::Index<usize> for Aabb<T> {
    type Output = (T, T);

    fn index(&self, axis: usize) -> &Self::Output {
        &self.limits[axis]
    }
}

impl<'a, T> IntoIterator for &'a Aabb<T> {
    type Item = &'a (T, T);
    type IntoIter = core::slice::Iter<'a, (T, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Display> Display for Aabb<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        f.write_str("[")?;
        for (i, (lo, hi)) in self.limits.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({lo}, {hi})")?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "kurbo")]
impl TryFrom<kurbo::Rect> for Aabb<f64> {
    type Error = Error;

    /// Convert a Kurbo rectangle into a 2-D box. The rectangle is normalized first,
    /// so only NaN coordinates are rejected.
    fn try_from(r: kurbo::Rect) -> Result<Self, Error> {
        let r = r.abs();
        Self::new([(r.x0, r.x1), (r.y0, r.y1)])
    }
}

#[cfg(feature = "kurbo")]
impl Aabb<f64> {
    /// The Kurbo rectangle covering this box, if it is 2-D.
    pub fn to_rect(&self) -> Option<kurbo::Rect> {
        match *self.as_slice() {
            [(x0, x1), (y0, y1)] => Some(kurbo::Rect::new(x0, y0, x1, y1)),
            _ => None,
        }
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

/// Union without a dimensionality check. Callers must have validated the operands.
pub(crate) fn union_aabb<T: PartialOrd + Copy>(a: &Aabb<T>, b: &Aabb<T>) -> Aabb<T> {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    Aabb {
        limits: a
            .limits
            .iter()
            .zip(&b.limits)
            .map(|(&(alo, ahi), &(blo, bhi))| (min_t(alo, blo), max_t(ahi, bhi)))
            .collect(),
    }
}

/// Overlap test without a dimensionality check. Callers must have validated the operands.
pub(crate) fn overlaps_aabb<T: PartialOrd + Copy>(a: &Aabb<T>, b: &Aabb<T>) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.limits
        .iter()
        .zip(&b.limits)
        .all(|(&(alo, ahi), &(blo, bhi))| le(blo, ahi) && le(alo, bhi))
}
