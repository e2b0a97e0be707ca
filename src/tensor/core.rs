//! Core Tensor type

use super::extents::{storage_len, DynExtents, Extents, FixedRankExtents, StaticExtents};
use super::layout::{Layout, LastOrder, Order};
use super::storage::Storage;
use super::strides::{StrideSet, Strides};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// N-dimensional array with an exclusively owned, contiguous buffer
///
/// `Tensor` consists of:
/// - **Storage**: the element buffer (`Vec<T>` by default, see [`Storage`])
/// - **Extents**: the shape, in one of the three [`Extents`] flavors
/// - **Layout**: a type-level storage order tag ([`LastOrder`] by default)
///
/// Strides are derived from extents and layout and recomputed whenever the
/// extents change.
///
/// # Size invariant
///
/// The buffer holds `extents.product()` elements, except for rank-0 extents
/// (the unset state of a default-constructed tensor), which own no elements.
///
/// # Example
///
/// ```
/// use extensor::prelude::*;
///
/// let r = Tensor::<f64>::from_vec(DynExtents::new(&[2, 3])?, (1..=6).map(f64::from).collect())?;
/// let t = Tensor::<f64>::from_expr(&r + 3.0 * &r)?;
///
/// assert_eq!(t.extents().as_slice(), &[2, 3]);
/// assert_eq!(t[[1, 2]], 24.0);
/// # Ok::<(), extensor::error::Error>(())
/// ```
#[derive(Clone)]
pub struct Tensor<T, E = DynExtents, L = LastOrder, S = Vec<T>>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    data: S,
    extents: E,
    strides: Strides,
    _marker: PhantomData<(T, L)>,
}

/// Tensor with rank and dimensions decided at run time
pub type DynTensor<T, L = LastOrder> = Tensor<T, DynExtents, L>;

/// Tensor with rank `N` fixed by the type
pub type FixedRankTensor<T, const N: usize, L = LastOrder> = Tensor<T, FixedRankExtents<N>, L>;

/// Tensor whose whole shape is fixed by the type
pub type StaticTensor<T, D, L = LastOrder> = Tensor<T, StaticExtents<D>, L>;

impl<T, E, L, S> Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    /// Create a tensor of the given extents filled with `T::default()`
    pub fn new(extents: E) -> Self {
        Self::full(extents, T::default())
    }

    /// Create a tensor of the given extents filled with `value`
    pub fn full(extents: E, value: T) -> Self {
        let len = storage_len(&extents);
        Self::from_parts(S::with_len(len, value), extents)
    }

    /// Create a tensor from raw dimensions, validated by the extents flavor
    pub fn from_shape(dims: &[usize]) -> Result<Self> {
        Ok(Self::new(E::try_from_slice(dims)?))
    }

    /// Create a tensor from existing elements laid out in this tensor's order
    ///
    /// Returns an error if `data.len()` does not equal the element count of
    /// `extents`.
    pub fn from_vec(extents: E, data: Vec<T>) -> Result<Self> {
        let expected = storage_len(&extents);
        if data.len() != expected {
            return Err(Error::extents_mismatch(&[expected], &[data.len()]));
        }
        Ok(Self::from_parts(S::from_vec(data), extents))
    }

    /// `data.len()` must already match `extents`
    pub(crate) fn from_parts(data: S, extents: E) -> Self {
        let strides = Strides::from_extents(&extents, L::ORDER);
        Self {
            data,
            extents,
            strides,
            _marker: PhantomData,
        }
    }

    // ===== Accessors =====

    /// Get the extents
    #[inline]
    pub fn extents(&self) -> &E {
        &self.extents
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    /// Get the storage order
    #[inline]
    pub fn order(&self) -> Order {
        L::ORDER
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.rank()
    }

    /// Get the total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Get size along a dimension
    pub fn dim(&self, k: usize) -> Result<usize> {
        self.extents.at(k).map_err(|_| Error::InvalidDimension {
            dim: k,
            ndim: self.rank(),
        })
    }

    /// Whether the tensor holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &S {
        &self.data
    }

    /// Elements in storage order
    #[inline]
    pub fn data(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Elements in storage order, mutably
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Size of the element buffer in bytes
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.size() * T::DTYPE.size_in_bytes()
    }

    /// Raw bytes of the elements
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    /// Iterate over elements in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data().iter()
    }

    /// Iterate mutably over elements in storage order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data_mut().iter_mut()
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.data_mut().fill(value);
    }

    // ===== Element Access =====

    /// Checked linear offset of a multi-index
    pub fn linear_index(&self, index: &[usize]) -> Result<usize> {
        let dims = self.extents.as_slice();
        if index.len() != dims.len() {
            return Err(Error::InvalidDimension {
                dim: index.len(),
                ndim: dims.len(),
            });
        }
        for (&i, &size) in index.iter().zip(dims) {
            if i >= size {
                return Err(Error::IndexOutOfBounds { index: i, size });
            }
        }
        Ok(self.strides.offset(index))
    }

    /// Checked multi-index access
    pub fn at(&self, index: &[usize]) -> Result<&T> {
        let offset = self.linear_index(index)?;
        Ok(&self.data()[offset])
    }

    /// Checked mutable multi-index access
    pub fn at_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let offset = self.linear_index(index)?;
        Ok(&mut self.data_mut()[offset])
    }

    /// Checked linear access
    pub fn get(&self, linear: usize) -> Option<&T> {
        self.data().get(linear)
    }

    // ===== Shape Changes =====

    /// Reinterpret the elements under new extents with the same element count
    pub fn reshape(&mut self, extents: E) -> Result<()> {
        let len = storage_len(&extents);
        if len != self.size() {
            return Err(Error::extents_mismatch(
                self.extents.as_slice(),
                extents.as_slice(),
            ));
        }
        self.set_extents(extents);
        Ok(())
    }

    /// Change the extents, reallocating if the element count changes
    ///
    /// Elements up to the smaller of the two sizes are kept in storage order;
    /// new slots are filled with `T::default()`.
    pub fn resize(&mut self, extents: E) {
        let len = storage_len(&extents);
        if len != self.data.len() {
            self.data.resize(len, T::default());
        }
        self.set_extents(extents);
    }

    fn set_extents(&mut self, extents: E) {
        self.strides = Strides::from_extents(&extents, L::ORDER);
        self.extents = extents;
    }

    /// Copy into a tensor with another storage order, keeping every multi-index
    pub fn to_layout<L2: Layout>(&self) -> Tensor<T, E, L2, S> {
        if L2::ORDER == L::ORDER {
            return Tensor::from_parts(self.data.clone(), self.extents.clone());
        }
        let target = Strides::from_extents(&self.extents, L2::ORDER);
        let mut data = S::with_len(self.size(), T::default());
        let out = data.as_mut_slice();
        for (i, &v) in self.iter().enumerate() {
            out[self.strides.remap(i, L::ORDER, &target)] = v;
        }
        Tensor::from_parts(data, self.extents.clone())
    }
}

impl<T, E, L, S> Default for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    /// Unset extents of the flavor; owns no elements unless the shape is static
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<T, E, L, S> PartialEq for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.extents == other.extents && self.data() == other.data()
    }
}

impl<T, E, L, S> Index<usize> for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    type Output = T;

    /// Linear access in storage order
    #[inline]
    fn index(&self, linear: usize) -> &T {
        &self.data()[linear]
    }
}

impl<T, E, L, S> IndexMut<usize> for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    #[inline]
    fn index_mut(&mut self, linear: usize) -> &mut T {
        &mut self.data_mut()[linear]
    }
}

impl<T, E, L, S, const N: usize> Index<[usize; N]> for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    type Output = T;

    /// Multi-index access
    ///
    /// # Panics
    ///
    /// Panics if the index has the wrong length or is out of bounds.
    fn index(&self, index: [usize; N]) -> &T {
        match self.at(&index) {
            Ok(v) => v,
            Err(e) => panic!("tensor index {index:?}: {e}"),
        }
    }
}

impl<T, E, L, S, const N: usize> IndexMut<[usize; N]> for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        match self.linear_index(&index) {
            Ok(offset) => &mut self.data_mut()[offset],
            Err(e) => panic!("tensor index {index:?}: {e}"),
        }
    }
}

impl<T, E, L, S> fmt::Debug for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("extents", &self.extents)
            .field("strides", &self.strides)
            .field("order", &L::ORDER)
            .field("dtype", &T::DTYPE)
            .field("data", &self.data())
            .finish()
    }
}

impl<T, E, L, S> fmt::Display for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({}, dtype={})", self.extents, T::DTYPE)
    }
}
