//! Static-rank extents

use super::{fmt_dims, validate_shape, DynExtents, Extents};
use crate::error::{Error, Result};
use std::fmt;
use std::ops::Index;

/// Extents whose rank `N` is fixed by the type and whose dimensions are
/// decided at construction
///
/// The `Default` value is `[0; N]`, the unset state of a fixed-rank tensor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedRankExtents<const N: usize>([usize; N]);

impl<const N: usize> FixedRankExtents<N> {
    /// Create validated extents from at most `N` dimensions
    ///
    /// Fails with [`Error::CapacityExceeded`] if more than `N` dimensions are
    /// given. Missing trailing dimensions stay zero, which makes the shape
    /// invalid unless `N == 0`.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.len() > N {
            return Err(Error::CapacityExceeded {
                len: dims.len(),
                capacity: N,
            });
        }

        let mut base = [0usize; N];
        base[..dims.len()].copy_from_slice(dims);
        validate_shape(&base)?;
        Ok(Self(base))
    }

    /// Create validated extents from an array of exactly `N` dimensions
    pub fn from_array(dims: [usize; N]) -> Result<Self> {
        validate_shape(&dims)?;
        Ok(Self(dims))
    }

    /// Underlying array
    #[inline]
    pub fn base(&self) -> &[usize; N] {
        &self.0
    }

    /// Set every dimension to `value` (no re-validation)
    pub fn fill(&mut self, value: usize) {
        self.0 = [value; N];
    }

    /// Iterate over the dimensions
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }
}

impl<const N: usize> Default for FixedRankExtents<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> Extents for FixedRankExtents<N> {
    const RANK: Option<usize> = Some(N);

    #[inline]
    fn as_slice(&self) -> &[usize] {
        &self.0
    }

    fn try_from_slice(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }

    #[inline]
    fn rank(&self) -> usize {
        N
    }
}

impl<const N: usize> Index<usize> for FixedRankExtents<N> {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.0[k]
    }
}

impl<const N: usize> fmt::Debug for FixedRankExtents<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<const N: usize> fmt::Display for FixedRankExtents<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(&self.0, f)
    }
}

impl<const N: usize> TryFrom<[usize; N]> for FixedRankExtents<N> {
    type Error = Error;

    fn try_from(value: [usize; N]) -> Result<Self> {
        Self::from_array(value)
    }
}

impl<const N: usize> TryFrom<&DynExtents> for FixedRankExtents<N> {
    type Error = Error;

    fn try_from(value: &DynExtents) -> Result<Self> {
        Self::try_from_extents(value)
    }
}
