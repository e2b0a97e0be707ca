//! Matrix products
//!
//! Products are not part of the elementwise expression engine: they are
//! computed eagerly and their results take part in expressions as ordinary
//! operands, e.g. `&q + (&prod(&a, &b)? + 2.0 * &c)`.

use super::{Matrix, Vector};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::tensor::{Extents, Layout, Storage, Tensor};

/// Shape of a product `C[m, n] = A[m, k] * B[k, n]`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatmulShape {
    /// Rows of A and C
    pub m: usize,
    /// Columns of A, rows of B
    pub k: usize,
    /// Columns of B and C
    pub n: usize,
}

impl MatmulShape {
    /// Validate operand dimensions `[m, k]` and `[k2, n]`
    pub fn new(a: [usize; 2], b: [usize; 2]) -> Result<Self> {
        let [m, k] = a;
        let [k2, n] = b;
        if k != k2 {
            return Err(Error::extents_mismatch(&[k, n], &b));
        }
        Ok(Self { m, k, n })
    }
}

/// `out[i, j] = sum_p a[i, p] * b[p, j]` over 2-D strided buffers
fn matmul_strided<T: Element>(
    shape: MatmulShape,
    a: (&[T], [usize; 2]),
    b: (&[T], [usize; 2]),
    out: (&mut [T], [usize; 2]),
) {
    let (a, [ai, ap]) = a;
    let (b, [bp, bj]) = b;
    let (out, [oi, oj]) = out;
    for i in 0..shape.m {
        for j in 0..shape.n {
            let mut acc = T::zero();
            for p in 0..shape.k {
                acc = acc + a[i * ai + p * ap] * b[p * bp + j * bj];
            }
            out[i * oi + j * oj] = acc;
        }
    }
}

/// Product of two linear-algebra operands
pub trait Prod<Rhs> {
    /// Result type
    type Output;

    /// Compute `self * rhs`
    fn prod(&self, rhs: &Rhs) -> Result<Self::Output>;
}

impl<T: Element, L: Layout> Prod<Vector<T>> for Matrix<T, L> {
    type Output = Vector<T>;

    fn prod(&self, rhs: &Vector<T>) -> Result<Vector<T>> {
        let shape = MatmulShape::new([self.rows(), self.cols()], [rhs.len(), 1])?;
        let mut out = Vector::new(shape.m);
        matmul_strided(
            shape,
            (self.data(), self.strides()),
            (rhs.data(), [1, 1]),
            (out.data_mut(), [1, 1]),
        );
        Ok(out)
    }
}

impl<T: Element, L: Layout, L2: Layout> Prod<Matrix<T, L2>> for Matrix<T, L> {
    type Output = Matrix<T, L>;

    fn prod(&self, rhs: &Matrix<T, L2>) -> Result<Matrix<T, L>> {
        let shape = MatmulShape::new([self.rows(), self.cols()], [rhs.rows(), rhs.cols()])?;
        let mut out = Matrix::new(shape.m, shape.n);
        let out_strides = out.strides();
        matmul_strided(
            shape,
            (self.data(), self.strides()),
            (rhs.data(), rhs.strides()),
            (out.data_mut(), out_strides),
        );
        Ok(out)
    }
}

/// Matrix-vector or matrix-matrix product
///
/// # Example
/// ```
/// use extensor::linalg::{prod, Matrix, Vector};
///
/// let a = Matrix::<f64>::from_elem(2, 3, 1.0);
/// let b = Vector::from_vec(vec![1.0, 2.0, 3.0]);
/// assert_eq!(prod(&a, &b)?.data(), &[6.0, 6.0]);
/// # Ok::<(), extensor::error::Error>(())
/// ```
pub fn prod<A, B>(a: &A, b: &B) -> Result<A::Output>
where
    A: Prod<B>,
{
    a.prod(b)
}

fn matrix_dims<E: Extents>(extents: &E) -> Result<[usize; 2]> {
    match *extents.as_slice() {
        [rows, cols] => Ok([rows, cols]),
        ref dims => Err(Error::RankMismatch {
            expected: 2,
            got: dims.len(),
        }),
    }
}

impl<T, E, L, S> Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    /// Matrix product of two rank-2 tensors
    ///
    /// The result has this tensor's extents flavor, layout and storage.
    pub fn matmul<E2, L2, S2>(&self, rhs: &Tensor<T, E2, L2, S2>) -> Result<Self>
    where
        E2: Extents,
        L2: Layout,
        S2: Storage<T>,
    {
        let shape = MatmulShape::new(matrix_dims(self.extents())?, matrix_dims(rhs.extents())?)?;
        let mut out = Self::new(E::try_from_slice(&[shape.m, shape.n])?);
        let a_strides = [self.strides()[0], self.strides()[1]];
        let b_strides = [rhs.strides()[0], rhs.strides()[1]];
        let out_strides = [out.strides()[0], out.strides()[1]];
        matmul_strided(
            shape,
            (self.data(), a_strides),
            (rhs.data(), b_strides),
            (out.data_mut(), out_strides),
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{DynExtents, FirstOrder};

    #[test]
    fn test_matrix_vector() {
        let a = Matrix::<i64>::from_fn(2, 3, |i, j| (i * 3 + j) as i64);
        let b = Vector::from_vec(vec![1, 1, 1]);
        assert_eq!(prod(&a, &b).unwrap().data(), &[3, 12]);
    }

    #[test]
    fn test_matrix_matrix_mixed_layouts() {
        let a = Matrix::<f64>::from_fn(2, 3, |i, j| (i + j) as f64);
        let b = Matrix::<f64, FirstOrder>::from_fn(3, 2, |i, j| (i * j) as f64);
        let c = prod(&a, &b).unwrap();
        assert_eq!((c.rows(), c.cols()), (2, 2));
        for i in 0..2 {
            for j in 0..2 {
                let expected: f64 = (0..3).map(|p| ((i + p) * (p * j)) as f64).sum();
                assert_eq!(c[(i, j)], expected);
            }
        }
    }

    #[test]
    fn test_inner_dimension_mismatch() {
        let a = Matrix::<f32>::new(2, 3);
        let b = Vector::<f32>::new(2);
        assert_eq!(
            prod(&a, &b),
            Err(Error::extents_mismatch(&[3, 1], &[2, 1]))
        );
    }

    #[test]
    fn test_tensor_matmul() {
        let a = Tensor::<i32>::from_vec(DynExtents::new(&[2, 2]).unwrap(), vec![1, 2, 3, 4]).unwrap();
        let b = a.to_layout::<FirstOrder>();
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.data(), &[7, 10, 15, 22]);

        let v = Tensor::<i32>::new(DynExtents::new(&[2]).unwrap());
        assert!(matches!(a.matmul(&v), Err(Error::RankMismatch { got: 1, .. })));
    }
}
