//! Dynamic-rank extents

use super::{fmt_dims, validate_shape, Extents, STACK_DIMS};
use crate::error::Result;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;

/// Extents whose rank and dimensions are decided at construction
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct DynExtents(SmallVec<[usize; STACK_DIMS]>);

impl DynExtents {
    /// Create validated extents from dimensions
    ///
    /// # Example
    /// ```
    /// use extensor::tensor::{DynExtents, Extents};
    /// let e = DynExtents::new(&[2, 3, 4]).unwrap();
    /// assert_eq!(e.product(), 24);
    /// assert!(DynExtents::new(&[2, 0, 3]).is_err());
    /// ```
    pub fn new(dims: &[usize]) -> Result<Self> {
        validate_shape(dims)?;
        Ok(Self::from_unchecked(dims))
    }

    /// Create validated extents from an owned vector
    pub fn from_vec(dims: Vec<usize>) -> Result<Self> {
        validate_shape(&dims)?;
        Ok(Self(dims.into_iter().collect()))
    }

    /// Create extents without validation
    ///
    /// Used for lossless conversions of values that may be in the unset state.
    pub(crate) fn from_unchecked(dims: &[usize]) -> Self {
        Self(dims.iter().copied().collect())
    }

    /// Set every dimension to `value`
    ///
    /// Like the other in-place mutation of extents, this does not re-validate.
    pub fn fill(&mut self, value: usize) {
        self.0.iter_mut().for_each(|d| *d = value);
    }

    /// Iterate over the dimensions
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Remove singleton dimensions, keeping at least rank 2
    ///
    /// Extents of rank 2 or less are returned unchanged. Otherwise a fully
    /// singleton shape collapses to `[1, 1]` and a single non-singleton
    /// dimension `n` becomes `[n, 1]`.
    pub fn squeeze(&self) -> Self {
        if self.rank() <= 2 {
            return self.clone();
        }

        let kept: SmallVec<[usize; STACK_DIMS]> =
            self.0.iter().copied().filter(|&d| d != 1).collect();

        match kept.len() {
            0 => Self(SmallVec::from_slice(&[1, 1])),
            1 => Self(SmallVec::from_slice(&[kept[0], 1])),
            _ => Self(kept),
        }
    }
}

impl Extents for DynExtents {
    const RANK: Option<usize> = None;

    #[inline]
    fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    fn try_from_slice(dims: &[usize]) -> Result<Self> {
        Self::new(dims)
    }

    fn to_dynamic(&self) -> DynExtents {
        self.clone()
    }
}

impl Index<usize> for DynExtents {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.0[k]
    }
}

impl fmt::Debug for DynExtents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for DynExtents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(&self.0, f)
    }
}

impl AsRef<[usize]> for DynExtents {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl TryFrom<Vec<usize>> for DynExtents {
    type Error = crate::error::Error;

    fn try_from(value: Vec<usize>) -> Result<Self> {
        Self::from_vec(value)
    }
}

impl TryFrom<&[usize]> for DynExtents {
    type Error = crate::error::Error;

    fn try_from(value: &[usize]) -> Result<Self> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<[usize; N]> for DynExtents {
    type Error = crate::error::Error;

    fn try_from(value: [usize; N]) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<DynExtents> for Vec<usize> {
    fn from(value: DynExtents) -> Self {
        value.0.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new() {
        let e = DynExtents::new(&[2, 3]).unwrap();
        assert_eq!(e.rank(), 2);
        assert_eq!(e.at(0).unwrap(), 2);
        assert_eq!(e[1], 3);
        assert_eq!(e.product(), 6);
    }

    #[test]
    fn test_empty_is_valid() {
        let e = DynExtents::new(&[]).unwrap();
        assert!(e.is_empty());
        assert_eq!(e.product(), 1);
        assert_eq!(e, DynExtents::default());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = DynExtents::new(&[2, 0, 3]).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { ref shape, .. } if shape == &[2, 0, 3]));
    }

    #[test]
    fn test_at_out_of_range() {
        let e = DynExtents::new(&[4]).unwrap();
        assert_eq!(
            e.at(1),
            Err(Error::IndexOutOfBounds { index: 1, size: 1 })
        );
    }

    #[test]
    fn test_from_iter() {
        let e = DynExtents::try_from_iter((1..=3).map(|d| d * 2)).unwrap();
        assert_eq!(e.as_slice(), &[2, 4, 6]);
    }

    #[test]
    fn test_fill() {
        let mut e = DynExtents::new(&[2, 3, 4]).unwrap();
        e.fill(5);
        assert_eq!(e.as_slice(), &[5, 5, 5]);
    }

    #[test]
    fn test_squeeze() {
        let e = DynExtents::new(&[1, 3, 1, 4]).unwrap();
        assert_eq!(e.squeeze().as_slice(), &[3, 4]);

        let e = DynExtents::new(&[1, 1, 1]).unwrap();
        assert_eq!(e.squeeze().as_slice(), &[1, 1]);

        let e = DynExtents::new(&[1, 5, 1]).unwrap();
        assert_eq!(e.squeeze().as_slice(), &[5, 1]);

        let e = DynExtents::new(&[1, 5]).unwrap();
        assert_eq!(e.squeeze().as_slice(), &[1, 5]);
    }

    #[test]
    fn test_display() {
        let e = DynExtents::new(&[2, 3]).unwrap();
        assert_eq!(e.to_string(), "[2, 3]");
        assert_eq!(DynExtents::default().to_string(), "[]");
    }

    #[test]
    fn test_conversions() {
        let e = DynExtents::try_from(vec![3, 1]).unwrap();
        let v: Vec<usize> = e.clone().into();
        assert_eq!(v, vec![3, 1]);
        assert_eq!(DynExtents::try_from([3usize, 1]).unwrap(), e);
    }
}
