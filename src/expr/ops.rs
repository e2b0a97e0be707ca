//! Arithmetic operators building expression nodes
//!
//! Every operator is O(1): it boxes its operands into a new node and returns.
//! Left-hand sides are `Expr`, `&Tensor`, `&Matrix`, `&Vector` and the
//! primitive element types; right-hand sides are anything implementing
//! [`IntoExpr`].

use super::{BinaryOp, Expr, IntoExpr, UnaryOp};
use crate::dtype::Element;
use crate::linalg::{Matrix, Vector};
use crate::tensor::{Extents, Layout, Storage, Tensor};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:ident) => {
        impl<'a, T, R> $trait<R> for Expr<'a, T>
        where
            T: Element,
            R: IntoExpr<'a, T>,
        {
            type Output = Expr<'a, T>;

            fn $method(self, rhs: R) -> Expr<'a, T> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<'a, T, E, L, S, R> $trait<R> for &'a Tensor<T, E, L, S>
        where
            T: Element,
            E: Extents,
            L: Layout,
            S: Storage<T>,
            R: IntoExpr<'a, T>,
        {
            type Output = Expr<'a, T>;

            fn $method(self, rhs: R) -> Expr<'a, T> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<'a, T, L, R> $trait<R> for &'a Matrix<T, L>
        where
            T: Element,
            L: Layout,
            R: IntoExpr<'a, T>,
        {
            type Output = Expr<'a, T>;

            fn $method(self, rhs: R) -> Expr<'a, T> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<'a, T, R> $trait<R> for &'a Vector<T>
        where
            T: Element,
            R: IntoExpr<'a, T>,
        {
            type Output = Expr<'a, T>;

            fn $method(self, rhs: R) -> Expr<'a, T> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, Add);
impl_binary_operator!(Sub, sub, Sub);
impl_binary_operator!(Mul, mul, Mul);
impl_binary_operator!(Div, div, Div);

// Scalar on the left: one impl per primitive and right-hand operand kind,
// since a generic `impl<R> Mul<R> for f64` is not allowed.
macro_rules! impl_scalar_lhs_operator {
    ($ty:ty, $trait:ident, $method:ident, $op:ident) => {
        impl<'a> $trait<Expr<'a, $ty>> for $ty {
            type Output = Expr<'a, $ty>;

            fn $method(self, rhs: Expr<'a, $ty>) -> Expr<'a, $ty> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<'a, E, L, S> $trait<&'a Tensor<$ty, E, L, S>> for $ty
        where
            E: Extents,
            L: Layout,
            S: Storage<$ty>,
        {
            type Output = Expr<'a, $ty>;

            fn $method(self, rhs: &'a Tensor<$ty, E, L, S>) -> Expr<'a, $ty> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<'a, L: Layout> $trait<&'a Matrix<$ty, L>> for $ty {
            type Output = Expr<'a, $ty>;

            fn $method(self, rhs: &'a Matrix<$ty, L>) -> Expr<'a, $ty> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }

        impl<'a> $trait<&'a Vector<$ty>> for $ty {
            type Output = Expr<'a, $ty>;

            fn $method(self, rhs: &'a Vector<$ty>) -> Expr<'a, $ty> {
                Expr::binary(BinaryOp::$op, self, rhs)
            }
        }
    };
}

macro_rules! impl_scalar_lhs_operators {
    ($($ty:ty),* $(,)?) => {
        $(
            impl_scalar_lhs_operator!($ty, Add, add, Add);
            impl_scalar_lhs_operator!($ty, Sub, sub, Sub);
            impl_scalar_lhs_operator!($ty, Mul, mul, Mul);
            impl_scalar_lhs_operator!($ty, Div, div, Div);
        )*
    };
}

impl_scalar_lhs_operators!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8);

#[cfg(feature = "f16")]
impl_scalar_lhs_operators!(half::f16, half::bf16);

impl<'a, T: Element> Neg for Expr<'a, T> {
    type Output = Expr<'a, T>;

    fn neg(self) -> Expr<'a, T> {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl<'a, T, E, L, S> Neg for &'a Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    type Output = Expr<'a, T>;

    fn neg(self) -> Expr<'a, T> {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl<'a, T: Element, L: Layout> Neg for &'a Matrix<T, L> {
    type Output = Expr<'a, T>;

    fn neg(self) -> Expr<'a, T> {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl<'a, T: Element> Neg for &'a Vector<T> {
    type Output = Expr<'a, T>;

    fn neg(self) -> Expr<'a, T> {
        Expr::unary(UnaryOp::Neg, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::DynExtents;

    fn leaf_values<T: Element>(dims: &[usize], value: T) -> Tensor<T> {
        Tensor::full(DynExtents::new(dims).unwrap(), value)
    }

    #[test]
    fn test_operand_kinds() {
        let a = leaf_values(&[2, 2], 1.0);
        let e = (&a + &a) - (2.0 * &a) * (&a / 4.0);
        assert_eq!(e.leaf_count(), 4);
        assert_eq!(e.to_string(), "((tensor[2, 2] + tensor[2, 2]) - ((2 * tensor[2, 2]) * (tensor[2, 2] / 4)))");
    }

    #[test]
    fn test_scalar_lhs_each_op() {
        let a = leaf_values(&[3], 2i64);
        for (e, op) in [
            (1i64 + &a, BinaryOp::Add),
            (1i64 - &a, BinaryOp::Sub),
            (1i64 * &a, BinaryOp::Mul),
            (1i64 / &a, BinaryOp::Div),
        ] {
            match e {
                Expr::Binary { op: got, lhs, .. } => {
                    assert_eq!(got, op);
                    assert!(matches!(*lhs, Expr::Scalar(1)));
                }
                _ => panic!("expected binary node"),
            }
        }
    }

    #[test]
    fn test_scalar_lhs_with_expression() {
        let a = leaf_values(&[3], 1.5f32);
        let e = 2.0f32 * (-&a);
        assert_eq!(e.to_string(), "(2 * -tensor[3])");
    }

    #[test]
    fn test_unsigned_negation_builds() {
        let a = leaf_values(&[2], 3u16);
        let e = -&a + 1u16;
        assert_eq!(e.depth(), 3);
    }
}
