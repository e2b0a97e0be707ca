//! Fully static extents

use super::{fmt_dims, validate_shape, Extents};
use crate::error::{Error, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Index;

/// Compile-time list of dimensions
///
/// Implemented by the `DimsN` markers below; further shapes can be declared
/// with [`static_dims!`](crate::static_dims).
pub trait StaticDims: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The dimensions
    const DIMS: &'static [usize];
}

/// Rank-1 static shape `[A]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dims1<const A: usize>;

/// Rank-2 static shape `[A, B]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dims2<const A: usize, const B: usize>;

/// Rank-3 static shape `[A, B, C]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dims3<const A: usize, const B: usize, const C: usize>;

/// Rank-4 static shape `[A, B, C, D]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dims4<const A: usize, const B: usize, const C: usize, const D: usize>;

impl<const A: usize> StaticDims for Dims1<A> {
    const DIMS: &'static [usize] = &[A];
}

impl<const A: usize, const B: usize> StaticDims for Dims2<A, B> {
    const DIMS: &'static [usize] = &[A, B];
}

impl<const A: usize, const B: usize, const C: usize> StaticDims for Dims3<A, B, C> {
    const DIMS: &'static [usize] = &[A, B, C];
}

impl<const A: usize, const B: usize, const C: usize, const D: usize> StaticDims
    for Dims4<A, B, C, D>
{
    const DIMS: &'static [usize] = &[A, B, C, D];
}

/// Declare a zero-sized [`StaticDims`] marker for an arbitrary static shape
///
/// # Example
/// ```
/// use extensor::static_dims;
/// use extensor::tensor::{Extents, StaticExtents};
///
/// static_dims!(pub Volume = [2, 3, 4, 5, 6]);
///
/// let e = StaticExtents::<Volume>::new();
/// assert_eq!(e.rank(), 5);
/// assert_eq!(e.product(), 720);
/// ```
#[macro_export]
macro_rules! static_dims {
    ($vis:vis $name:ident = [$($dim:expr),* $(,)?]) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::tensor::StaticDims for $name {
            const DIMS: &'static [usize] = &[$($dim),*];
        }
    };
}

const fn dims_are_valid(dims: &[usize]) -> bool {
    let mut count = 1usize;
    let mut i = 0;
    while i < dims.len() {
        if dims[i] == 0 {
            return false;
        }
        count = match count.checked_mul(dims[i]) {
            Some(c) => c,
            None => return false,
        };
        i += 1;
    }
    true
}

/// Extents whose rank and dimensions are both fixed by the type
///
/// Zero-sized. A shape containing a zero dimension, or one whose element count
/// overflows `usize`, fails to compile as soon as the extents are constructed.
pub struct StaticExtents<S: StaticDims>(PhantomData<S>);

impl<S: StaticDims> StaticExtents<S> {
    const VALID: () = assert!(
        dims_are_valid(S::DIMS),
        "static extents contain a zero dimension or overflow usize"
    );

    /// The dimensions as a slice
    pub const DIMS: &'static [usize] = S::DIMS;

    /// Create the (only) value of these extents
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID;
        Self(PhantomData)
    }
}

impl<S: StaticDims> Clone for StaticExtents<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: StaticDims> Copy for StaticExtents<S> {}

impl<S: StaticDims> Default for StaticExtents<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StaticDims> PartialEq for StaticExtents<S> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<S: StaticDims> Eq for StaticExtents<S> {}

impl<S: StaticDims> Hash for StaticExtents<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        S::DIMS.hash(state);
    }
}

impl<S: StaticDims> Extents for StaticExtents<S> {
    const RANK: Option<usize> = Some(S::DIMS.len());

    #[inline]
    fn as_slice(&self) -> &[usize] {
        S::DIMS
    }

    /// Succeeds only for exactly the static dimensions
    fn try_from_slice(dims: &[usize]) -> Result<Self> {
        validate_shape(dims)?;
        if dims != S::DIMS {
            return Err(Error::extents_mismatch(S::DIMS, dims));
        }
        Ok(Self::new())
    }

    #[inline]
    fn rank(&self) -> usize {
        S::DIMS.len()
    }

    #[inline]
    fn product(&self) -> usize {
        S::DIMS.iter().product()
    }
}

impl<S: StaticDims> Index<usize> for StaticExtents<S> {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &S::DIMS[k]
    }
}

impl<S: StaticDims> fmt::Debug for StaticExtents<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticExtents{:?}", S::DIMS)
    }
}

impl<S: StaticDims> fmt::Display for StaticExtents<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dims(S::DIMS, f)
    }
}
