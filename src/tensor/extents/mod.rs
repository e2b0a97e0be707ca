//! Extents: the ordered dimension sizes of a tensor
//!
//! Three flavors trade compile-time checking for flexibility:
//!
//! | type | rank | dimensions |
//! |------|------|------------|
//! | [`DynExtents`] | run time | run time |
//! | [`FixedRankExtents<N>`] | compile time | run time |
//! | [`StaticExtents<S>`] | compile time | compile time |
//!
//! All of them implement [`Extents`], and everything generic in the crate
//! (the expression transforms in particular) is written against that trait.
//!
//! # Validity
//!
//! A shape is valid when it is empty (rank 0) or every dimension is at least 1.
//! Constructors reject anything else with [`Error::InvalidShape`]. The one
//! exception is the `Default` value of a flavor, which represents an unset
//! (uninitialized) tensor and may contain zeros.

mod dynamic;
mod fixed_rank;
mod static_extents;

pub use dynamic::DynExtents;
pub use fixed_rank::FixedRankExtents;
pub use static_extents::{Dims1, Dims2, Dims3, Dims4, StaticDims, StaticExtents};

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Most tensors have 4 or fewer dimensions, so we stack-allocate up to 4
pub(crate) const STACK_DIMS: usize = 4;

/// Shared shape-query interface of all extents flavors
pub trait Extents:
    Clone + PartialEq + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Rank known from the type alone (`None` for dynamic rank)
    const RANK: Option<usize>;

    /// View the dimensions as a slice
    fn as_slice(&self) -> &[usize];

    /// Build extents of this flavor from raw dimensions
    ///
    /// Fails with [`Error::InvalidShape`] for invalid shapes, and with a
    /// flavor-specific error when the dimensions do not fit the type.
    fn try_from_slice(dims: &[usize]) -> Result<Self>;

    /// Build extents of this flavor from an iterator of dimensions
    fn try_from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Result<Self> {
        let dims: SmallVec<[usize; STACK_DIMS]> = iter.into_iter().collect();
        Self::try_from_slice(&dims)
    }

    /// Convert from extents of another flavor (per-index copy)
    fn try_from_extents<O: Extents>(other: &O) -> Result<Self> {
        Self::try_from_slice(other.as_slice())
    }

    /// Number of dimensions
    #[inline]
    fn rank(&self) -> usize {
        self.as_slice().len()
    }

    /// Number of dimensions (alias of [`Extents::rank`])
    #[inline]
    fn len(&self) -> usize {
        self.rank()
    }

    /// Whether the rank is zero
    #[inline]
    fn is_empty(&self) -> bool {
        self.rank() == 0
    }

    /// Dimension `k`, checked
    fn at(&self, k: usize) -> Result<usize> {
        self.as_slice()
            .get(k)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index: k,
                size: self.rank(),
            })
    }

    /// Product of all dimensions (1 for rank 0)
    #[inline]
    fn product(&self) -> usize {
        self.as_slice().iter().product()
    }

    /// Whether the validity invariant holds
    #[inline]
    fn is_valid(&self) -> bool {
        is_valid_shape(self.as_slice())
    }

    /// All dimensions are one
    fn is_scalar(&self) -> bool {
        !self.is_empty() && self.as_slice().iter().all(|&d| d == 1)
    }

    /// Exactly one of the first two dimensions exceeds one, the rest are one
    fn is_vector(&self) -> bool {
        let dims = self.as_slice();
        match dims {
            [] => false,
            [n] => *n > 1,
            [a, b, rest @ ..] => ((*a > 1) ^ (*b > 1)) && rest.iter().all(|&d| d == 1),
        }
    }

    /// The first two dimensions exceed one, the rest are one
    fn is_matrix(&self) -> bool {
        let dims = self.as_slice();
        match dims {
            [a, b, rest @ ..] => *a > 1 && *b > 1 && rest.iter().all(|&d| d == 1),
            _ => false,
        }
    }

    /// Some dimension past the second exceeds one
    fn is_tensor(&self) -> bool {
        let dims = self.as_slice();
        dims.len() > 2 && dims[2..].iter().any(|&d| d > 1)
    }

    /// Compare with extents of any flavor
    #[inline]
    fn same_shape<O: Extents>(&self, other: &O) -> bool {
        self.as_slice() == other.as_slice()
    }

    /// Copy the dimensions into a `Vec`
    fn to_vec(&self) -> Vec<usize> {
        self.as_slice().to_vec()
    }

    /// Lossless conversion to dynamic extents
    fn to_dynamic(&self) -> DynExtents {
        DynExtents::from_unchecked(self.as_slice())
    }
}

/// Whether `dims` is a valid shape: rank 0, or no zero dimension and an
/// element count that fits in `usize`
#[inline]
pub fn is_valid_shape(dims: &[usize]) -> bool {
    dims.iter().all(|&d| d > 0) && checked_product(dims).is_some()
}

/// Element count of `dims`, `None` on overflow
#[inline]
pub(crate) fn checked_product(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

pub(crate) fn validate_shape(dims: &[usize]) -> Result<()> {
    if dims.contains(&0) {
        return Err(Error::invalid_shape(dims, "shape contains a zero dimension"));
    }
    if checked_product(dims).is_none() {
        return Err(Error::invalid_shape(dims, "element count overflows usize"));
    }
    Ok(())
}

/// Number of elements a tensor with these extents stores
///
/// Rank 0 is the unset state and owns no elements.
#[inline]
pub(crate) fn storage_len<E: Extents>(extents: &E) -> usize {
    if extents.is_empty() {
        0
    } else {
        extents.product()
    }
}

pub(crate) fn fmt_dims(dims: &[usize], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[")?;
    for (i, d) in dims.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{d}")?;
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(is_valid_shape(&[]));
        assert!(is_valid_shape(&[2, 3]));
        assert!(!is_valid_shape(&[2, 0, 3]));
        assert!(!is_valid_shape(&[usize::MAX, 2]));
    }

    #[test]
    fn test_element_count_overflow_rejected() {
        assert_eq!(checked_product(&[usize::MAX, 1]), Some(usize::MAX));
        assert_eq!(checked_product(&[usize::MAX, 2]), None);

        let err = DynExtents::new(&[usize::MAX, 2]).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_shape(&[usize::MAX, 2], "element count overflows usize")
        );
        assert!(matches!(
            FixedRankExtents::<3>::new(&[2, usize::MAX, 1]),
            Err(Error::InvalidShape { .. })
        ));
        assert!(DynExtents::new(&[usize::MAX]).is_ok());
    }

    #[test]
    fn test_classification() {
        let scalar = DynExtents::new(&[1, 1]).unwrap();
        assert!(scalar.is_scalar());
        assert!(!scalar.is_vector());

        let column = DynExtents::new(&[4, 1]).unwrap();
        assert!(column.is_vector());
        assert!(!column.is_matrix());

        let row = DynExtents::new(&[1, 4, 1]).unwrap();
        assert!(row.is_vector());

        let matrix = DynExtents::new(&[3, 4]).unwrap();
        assert!(matrix.is_matrix());
        assert!(!matrix.is_tensor());

        let tensor = DynExtents::new(&[3, 4, 2]).unwrap();
        assert!(tensor.is_tensor());
        assert!(!tensor.is_matrix());
    }

    #[test]
    fn test_storage_len() {
        assert_eq!(storage_len(&DynExtents::default()), 0);
        assert_eq!(storage_len(&FixedRankExtents::<2>::default()), 0);
        assert_eq!(storage_len(&DynExtents::new(&[2, 3]).unwrap()), 6);
    }

    #[test]
    fn test_cross_flavor_comparison() {
        let dynamic = DynExtents::new(&[2, 3]).unwrap();
        let fixed = FixedRankExtents::<2>::new(&[2, 3]).unwrap();
        let fully = StaticExtents::<Dims2<2, 3>>::new();

        assert!(dynamic.same_shape(&fixed));
        assert!(fixed.same_shape(&fully));
        assert_eq!(fully.to_dynamic(), dynamic);
    }
}
