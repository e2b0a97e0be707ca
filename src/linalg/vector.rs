//! Dense 1-D vector

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::expr::{Expr, IntoExpr, Operand};
use crate::tensor::{DynExtents, Extents, Layout, Order, Storage, Tensor};
use std::ops::{Index, IndexMut};

/// Dense column vector
///
/// Takes part in expressions as a rank-2 operand with extents `[n, 1]`, so it
/// combines with `n x 1` tensors. An empty vector reads as the unset rank-0
/// shape instead.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector<T: Element> {
    data: Vec<T>,
}

impl<T: Element> Vector<T> {
    /// Create a vector of `n` default elements
    pub fn new(n: usize) -> Self {
        Self::from_elem(n, T::default())
    }

    /// Create a vector of `n` copies of `value`
    pub fn from_elem(n: usize, value: T) -> Self {
        Self {
            data: vec![value; n],
        }
    }

    /// Wrap existing elements
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Elements, mutably
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Element> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Element> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Element> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Element> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Element> Operand<T> for Vector<T> {
    fn extents(&self) -> DynExtents {
        if self.data.is_empty() {
            return DynExtents::default();
        }
        DynExtents::from_unchecked(&[self.data.len(), 1])
    }

    // [n, 1] linearizes identically in both orders
    fn order(&self) -> Order {
        Order::LastOrder
    }

    #[inline]
    fn get(&self, linear: usize) -> T {
        self.data[linear]
    }
}

impl<'a, 'b: 'a, T: Element> IntoExpr<'a, T> for &'b Vector<T> {
    #[inline]
    fn into_expr(self) -> Expr<'a, T> {
        Expr::Leaf(self)
    }
}

/// An empty vector becomes the empty tensor
impl<T: Element, L: Layout> From<Vector<T>> for Tensor<T, DynExtents, L> {
    fn from(v: Vector<T>) -> Self {
        match DynExtents::new(&[v.len(), 1]) {
            Ok(extents) => Tensor::from_parts(v.data, extents),
            Err(_) => Tensor::default(),
        }
    }
}

/// Accepts rank 1, or rank 2 with at most one non-singleton dimension
impl<T, E, L, S> TryFrom<Tensor<T, E, L, S>> for Vector<T>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    type Error = Error;

    fn try_from(t: Tensor<T, E, L, S>) -> Result<Self> {
        let dims = t.extents().as_slice();
        match *dims {
            [] | [_] => {}
            [rows, cols] if rows == 1 || cols == 1 => {}
            [_, _] => return Err(Error::extents_mismatch(&[dims.iter().product(), 1], dims)),
            _ => {
                return Err(Error::RankMismatch {
                    expected: 2,
                    got: dims.len(),
                })
            }
        }
        Ok(Self::from_vec(t.data().to_vec()))
    }
}
