//! Strides: element offsets for tensor memory layout

use super::extents::{Extents, STACK_DIMS};
use super::layout::Order;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Capability of a genuine stride set
///
/// Generic code that maps multi-indices to buffer offsets takes
/// `impl StrideSet`; unrelated integer sequences do not implement it.
pub trait StrideSet {
    /// Strides in elements, one per dimension
    fn stride_slice(&self) -> &[usize];

    /// Linear offset of a multi-index
    ///
    /// `index` must have one entry per dimension; entries are not bounds checked.
    #[inline]
    fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.stride_slice().len());
        index
            .iter()
            .zip(self.stride_slice())
            .map(|(&i, &s)| i * s)
            .sum()
    }
}

/// Strides type: element offsets between consecutive elements along each dimension
///
/// Derived from extents plus an [`Order`] and never mutated on its own;
/// recompute it whenever the extents change.
/// NOTE: Strides are in ELEMENTS, not bytes
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Strides(SmallVec<[usize; STACK_DIMS]>);

impl Strides {
    /// Compute packed strides for `shape` in the given order
    ///
    /// # Example
    /// ```
    /// use extensor::tensor::{Order, Strides};
    /// assert_eq!(Strides::new(&[2, 3, 4], Order::LastOrder).as_slice(), &[12, 4, 1]);
    /// assert_eq!(Strides::new(&[2, 3, 4], Order::FirstOrder).as_slice(), &[1, 2, 6]);
    /// ```
    pub fn new(shape: &[usize], order: Order) -> Self {
        if shape.is_empty() {
            return Self::default();
        }

        let mut strides: SmallVec<[usize; STACK_DIMS]> = SmallVec::from_elem(0, shape.len());
        let mut stride = 1usize;

        match order {
            Order::LastOrder => {
                for (s, &dim) in strides.iter_mut().zip(shape).rev() {
                    *s = stride;
                    stride *= dim;
                }
            }
            Order::FirstOrder => {
                for (s, &dim) in strides.iter_mut().zip(shape) {
                    *s = stride;
                    stride *= dim;
                }
            }
        }

        Self(strides)
    }

    /// Compute packed strides for extents of any flavor
    pub fn from_extents<E: Extents>(extents: &E, order: Order) -> Self {
        Self::new(extents.as_slice(), order)
    }

    /// View strides as a slice
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// Number of stride entries
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this stride vector is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dimension visiting order from largest to smallest stride
    #[inline]
    fn major_to_minor(&self, order: Order) -> impl Iterator<Item = usize> {
        let n = self.len();
        (0..n).map(move |j| match order {
            Order::LastOrder => j,
            Order::FirstOrder => n - 1 - j,
        })
    }

    /// Inverse of [`StrideSet::offset`] for packed strides
    ///
    /// `order` must be the order these strides were computed with and
    /// `linear` must be smaller than the element count.
    pub fn unravel(&self, linear: usize, order: Order) -> SmallVec<[usize; STACK_DIMS]> {
        let mut index: SmallVec<[usize; STACK_DIMS]> = SmallVec::from_elem(0, self.len());
        let mut rem = linear;
        for k in self.major_to_minor(order) {
            let s = self.0[k];
            index[k] = rem / s;
            rem %= s;
        }
        index
    }

    /// Translate a linear offset under these strides into an offset under `target`
    ///
    /// Equivalent to `target.offset(&self.unravel(linear, order))` without the
    /// intermediate index.
    pub fn remap(&self, linear: usize, order: Order, target: &impl StrideSet) -> usize {
        let target = target.stride_slice();
        let mut rem = linear;
        let mut offset = 0;
        for k in self.major_to_minor(order) {
            let s = self.0[k];
            offset += (rem / s) * target[k];
            rem %= s;
        }
        offset
    }
}

impl StrideSet for Strides {
    #[inline]
    fn stride_slice(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl Deref for Strides {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Strides {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}
