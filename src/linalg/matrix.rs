//! Dense 2-D matrix

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::expr::{Expr, IntoExpr, Operand};
use crate::tensor::{DynExtents, Extents, LastOrder, Layout, Order, Storage, Tensor};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Dense matrix with a type-level storage order
///
/// Takes part in expressions as a rank-2 operand with extents `[rows, cols]`.
/// A matrix with a zero dimension reads as the unset rank-0 shape, the same
/// value its tensor conversion produces.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T: Element, L: Layout = LastOrder> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
    _layout: PhantomData<L>,
}

impl<T: Element, L: Layout> Matrix<T, L> {
    /// Create a `rows x cols` matrix of `T::default()`
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, T::default())
    }

    /// Create a `rows x cols` matrix filled with `value`
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
            _layout: PhantomData,
        }
    }

    /// Create a matrix from elements in this matrix's storage order
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::extents_mismatch(&[rows * cols], &[data.len()]));
        }
        Ok(Self {
            rows,
            cols,
            data,
            _layout: PhantomData,
        })
    }

    /// Create a matrix by evaluating `f(i, j)` at every position
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut m = Self::new(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                m[(i, j)] = f(i, j);
            }
        }
        m
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Elements in storage order
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Elements in storage order, mutably
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Element strides `[row, col]`
    #[inline]
    pub fn strides(&self) -> [usize; 2] {
        match L::ORDER {
            Order::LastOrder => [self.cols, 1],
            Order::FirstOrder => [1, self.rows],
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        let [si, sj] = self.strides();
        i * si + j * sj
    }

    /// Checked element access
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.rows && j < self.cols {
            Some(&self.data[self.offset(i, j)])
        } else {
            None
        }
    }
}

impl<T: Element, L: Layout> Index<(usize, usize)> for Matrix<T, L> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(
            i < self.rows && j < self.cols,
            "matrix index ({i}, {j}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        &self.data[self.offset(i, j)]
    }
}

impl<T: Element, L: Layout> IndexMut<(usize, usize)> for Matrix<T, L> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(
            i < self.rows && j < self.cols,
            "matrix index ({i}, {j}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        let offset = self.offset(i, j);
        &mut self.data[offset]
    }
}

impl<T: Element, L: Layout> Operand<T> for Matrix<T, L> {
    fn extents(&self) -> DynExtents {
        if self.rows == 0 || self.cols == 0 {
            return DynExtents::default();
        }
        DynExtents::from_unchecked(&[self.rows, self.cols])
    }

    fn order(&self) -> Order {
        L::ORDER
    }

    #[inline]
    fn get(&self, linear: usize) -> T {
        self.data[linear]
    }
}

impl<'a, 'b: 'a, T: Element, L: Layout> IntoExpr<'a, T> for &'b Matrix<T, L> {
    #[inline]
    fn into_expr(self) -> Expr<'a, T> {
        Expr::Leaf(self)
    }
}

/// A matrix with a zero dimension becomes the empty tensor
impl<T: Element, L: Layout> From<Matrix<T, L>> for Tensor<T, DynExtents, L> {
    fn from(m: Matrix<T, L>) -> Self {
        match DynExtents::new(&[m.rows, m.cols]) {
            Ok(extents) => Tensor::from_parts(m.data, extents),
            Err(_) => Tensor::default(),
        }
    }
}

/// Requires rank 2; the empty tensor becomes a `0 x 0` matrix
impl<T, E, L, S> TryFrom<Tensor<T, E, L, S>> for Matrix<T, L>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    type Error = Error;

    fn try_from(t: Tensor<T, E, L, S>) -> Result<Self> {
        match *t.extents().as_slice() {
            [] => Ok(Self::new(0, 0)),
            [rows, cols] => Self::from_vec(rows, cols, t.data().to_vec()),
            ref dims => Err(Error::RankMismatch {
                expected: 2,
                got: dims.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::FirstOrder;

    #[test]
    fn test_layouts() {
        let row = Matrix::<i32>::from_fn(2, 3, |i, j| (i * 3 + j) as i32);
        assert_eq!(row.data(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(row.strides(), [3, 1]);

        let col = Matrix::<i32, FirstOrder>::from_fn(2, 3, |i, j| (i * 3 + j) as i32);
        assert_eq!(col.data(), &[0, 3, 1, 4, 2, 5]);
        assert_eq!(col.strides(), [1, 2]);
        assert_eq!(col[(1, 2)], 5);
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Matrix::<f64>::from_vec(2, 2, vec![0.0; 3]).is_err());
        let m = Matrix::<f64>::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.get(1, 0), Some(&3.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_operand_extents() {
        let m = Matrix::<f32, FirstOrder>::new(4, 5);
        assert_eq!(Operand::extents(&m).as_slice(), &[4, 5]);
        assert_eq!(Operand::order(&m), Order::FirstOrder);
    }

    #[test]
    fn test_tensor_roundtrip() {
        let m = Matrix::<f64, FirstOrder>::from_fn(3, 2, |i, j| (i + 10 * j) as f64);
        let t: Tensor<f64, DynExtents, FirstOrder> = m.clone().into();
        assert_eq!(t.extents().as_slice(), &[3, 2]);
        assert_eq!(t[[2, 1]], 12.0);

        let back = Matrix::try_from(t).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_zero_dimension_becomes_empty_tensor() {
        let t: Tensor<f64> = Matrix::<f64>::new(0, 3).into();
        assert!(t.is_empty());
        assert_eq!(t.rank(), 0);
    }

    #[test]
    fn test_zero_dimension_leaf_is_unset() {
        let m = Matrix::<f64>::new(0, 3);
        assert_eq!(Operand::extents(&m), DynExtents::default());

        let t = Tensor::<f64>::from_expr(&m * 2.0).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.rank(), 0);
        assert_eq!(t, Tensor::<f64>::from(m));

        let mut full = Tensor::<f64>::full(DynExtents::new(&[2, 2]).unwrap(), 1.0);
        full.assign(-&Matrix::<f64, FirstOrder>::new(4, 0)).unwrap();
        assert!(full.is_empty());
    }

    #[test]
    fn test_try_from_wrong_rank() {
        let t = Tensor::<f64>::new(DynExtents::new(&[2, 2, 2]).unwrap());
        assert_eq!(
            Matrix::try_from(t),
            Err(Error::RankMismatch {
                expected: 2,
                got: 3
            })
        );
    }
}
