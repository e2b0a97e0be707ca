//! Lazily evaluated tensor expressions
//!
//! Arithmetic on tensors does not compute anything. `&a + 3.0 * &b` builds an
//! [`Expr`] tree whose leaves borrow `a` and `b`; the work happens when the tree
//! is assigned to a destination, in a single pass without temporaries:
//!
//! 1. [`Expr::resolve_extents`] walks the tree once and checks that all tensor
//!    operands of every binary node have equal extents.
//! 2. The destination is resized to the resolved extents if needed.
//! 3. [`Expr::eval_at`] computes each destination element independently.
//!
//! ```
//! use extensor::prelude::*;
//!
//! let a = Tensor::<f64>::full(DynExtents::new(&[2, 2])?, 1.0);
//! let b = Tensor::<f64>::full(DynExtents::new(&[2, 2])?, 2.0);
//!
//! let mut c = Tensor::<f64>::default();
//! c.assign(-(&a + 3.0 * &b) / 2.0)?;
//! assert!(c.iter().all(|&v| v == -3.5));
//! # Ok::<(), extensor::error::Error>(())
//! ```
//!
//! Leaves hold plain borrows, so an expression can never outlive the tensors it
//! reads, and the destination of [`Tensor::assign`](crate::tensor::Tensor::assign)
//! can never appear inside its own expression. Self-referential updates use
//! [`Tensor::update`](crate::tensor::Tensor::update) instead.

mod assign;
mod ops;
mod transforms;

pub use transforms::EvalContext;

use crate::dtype::Element;
use crate::tensor::{DynExtents, Extents, Layout, Order, Storage, Tensor};
use std::fmt;

/// Elementwise binary operator of an expression node
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
}

impl BinaryOp {
    /// Verb used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Subtract",
            Self::Mul => "Multiply",
            Self::Div => "Divide",
        }
    }

    /// Infix symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Apply the operator to two elements
    ///
    /// Integer division by zero panics like the primitive operator does.
    #[inline]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elementwise unary operator of an expression node
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation: -a
    Neg,
    /// Identity: +a
    Plus,
}

impl UnaryOp {
    /// Infix symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
        }
    }

    /// Apply the operator to an element
    #[inline]
    pub fn apply<T: Element>(self, a: T) -> T {
        match self {
            Self::Neg => a.negate(),
            Self::Plus => a,
        }
    }
}

/// Anything an expression leaf can read from
///
/// Implemented by every [`Tensor`] and by the [`Matrix`](crate::linalg::Matrix)
/// and [`Vector`](crate::linalg::Vector) adapters.
pub trait Operand<T: Element>: Sync {
    /// Extents of the operand
    fn extents(&self) -> DynExtents;

    /// Storage order of the elements returned by [`Operand::get`]
    fn order(&self) -> Order;

    /// Element at a linear offset in storage order
    fn get(&self, linear: usize) -> T;
}

impl<T, E, L, S> Operand<T> for Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    fn extents(&self) -> DynExtents {
        Tensor::extents(self).to_dynamic()
    }

    fn order(&self) -> Order {
        L::ORDER
    }

    #[inline]
    fn get(&self, linear: usize) -> T {
        self.data()[linear]
    }
}

/// Deferred elementwise computation
///
/// Built by the arithmetic operators on `&Tensor`, `&Matrix`, `&Vector`,
/// scalars and other expressions. Nodes are immutable once built.
pub enum Expr<'a, T: Element> {
    /// Borrowed tensor operand
    Leaf(&'a dyn Operand<T>),
    /// Scalar terminal, compatible with any shape
    Scalar(T),
    /// Unary node
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand subtree
        operand: Box<Expr<'a, T>>,
    },
    /// Binary node
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left subtree
        lhs: Box<Expr<'a, T>>,
        /// Right subtree
        rhs: Box<Expr<'a, T>>,
    },
}

impl<'a, T: Element> Expr<'a, T> {
    /// Leaf reading from `operand`
    pub fn leaf(operand: &'a dyn Operand<T>) -> Self {
        Self::Leaf(operand)
    }

    /// Scalar terminal
    pub fn scalar(value: T) -> Self {
        Self::Scalar(value)
    }

    /// Unary node
    pub fn unary(op: UnaryOp, operand: impl IntoExpr<'a, T>) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand.into_expr()),
        }
    }

    /// Binary node
    pub fn binary(op: BinaryOp, lhs: impl IntoExpr<'a, T>, rhs: impl IntoExpr<'a, T>) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs.into_expr()),
            rhs: Box::new(rhs.into_expr()),
        }
    }

    /// Unary plus, the identity node (Rust has no prefix `+`)
    pub fn unary_plus(self) -> Self {
        Self::unary(UnaryOp::Plus, self)
    }

    /// Alias of [`Expr::unary_plus`]
    pub fn pos(self) -> Self {
        self.unary_plus()
    }

    /// Height of the tree (a terminal has depth 1)
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) | Self::Scalar(_) => 1,
            Self::Unary { operand, .. } => 1 + operand.depth(),
            Self::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
        }
    }

    /// Number of tensor leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Scalar(_) => 0,
            Self::Unary { operand, .. } => operand.leaf_count(),
            Self::Binary { lhs, rhs, .. } => lhs.leaf_count() + rhs.leaf_count(),
        }
    }
}

impl<T: Element> Clone for Expr<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(x) => Self::Leaf(*x),
            Self::Scalar(v) => Self::Scalar(*v),
            Self::Unary { op, operand } => Self::Unary {
                op: *op,
                operand: operand.clone(),
            },
            Self::Binary { op, lhs, rhs } => Self::Binary {
                op: *op,
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            },
        }
    }
}

/// Infix rendering, e.g. `(tensor[2, 3] + (3 * tensor[2, 3]))`
impl<T: Element> fmt::Display for Expr<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(x) => write!(f, "tensor{}", x.extents()),
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Self::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

impl<T: Element> fmt::Debug for Expr<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(x) => f
                .debug_struct("Leaf")
                .field("extents", &x.extents())
                .field("order", &x.order())
                .finish(),
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::Unary { op, operand } => f
                .debug_struct("Unary")
                .field("op", op)
                .field("operand", operand)
                .finish(),
            Self::Binary { op, lhs, rhs } => f
                .debug_struct("Binary")
                .field("op", op)
                .field("lhs", lhs)
                .field("rhs", rhs)
                .finish(),
        }
    }
}

/// Conversion into an expression node
///
/// Lets the operators accept tensors, adapters, scalars and expressions
/// interchangeably on their right-hand side.
pub trait IntoExpr<'a, T: Element> {
    /// Build the expression node
    fn into_expr(self) -> Expr<'a, T>;
}

impl<'a, 'b: 'a, T: Element> IntoExpr<'a, T> for Expr<'b, T> {
    #[inline]
    fn into_expr(self) -> Expr<'a, T> {
        self
    }
}

impl<'a, 'b: 'a, T, E, L, S> IntoExpr<'a, T> for &'b Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    #[inline]
    fn into_expr(self) -> Expr<'a, T> {
        Expr::Leaf(self)
    }
}

macro_rules! impl_scalar_into_expr {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> IntoExpr<'a, $ty> for $ty {
                #[inline]
                fn into_expr(self) -> Expr<'a, $ty> {
                    Expr::Scalar(self)
                }
            }
        )*
    };
}

impl_scalar_into_expr!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8);

#[cfg(feature = "f16")]
impl_scalar_into_expr!(half::f16, half::bf16);

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor(dims: &[usize], fill: f64) -> Tensor<f64> {
        Tensor::full(DynExtents::new(dims).unwrap(), fill)
    }

    #[test]
    fn test_op_names() {
        assert_eq!(BinaryOp::Add.to_string(), "Add");
        assert_eq!(BinaryOp::Sub.to_string(), "Subtract");
        assert_eq!(BinaryOp::Mul.to_string(), "Multiply");
        assert_eq!(BinaryOp::Div.to_string(), "Divide");
    }

    #[test]
    fn test_apply() {
        assert_eq!(BinaryOp::Sub.apply(7, 2), 5);
        assert_eq!(BinaryOp::Div.apply(7.0, 2.0), 3.5);
        assert_eq!(UnaryOp::Neg.apply(2.5f32), -2.5);
        assert_eq!(UnaryOp::Plus.apply(3u8), 3);
        assert_eq!(UnaryOp::Neg.apply(1u8), 255);
    }

    #[test]
    fn test_construction_is_lazy() {
        let a = tensor(&[2, 3], 1.0);
        let e = &a + 3.0 * &a;
        assert_eq!(e.depth(), 3);
        assert_eq!(e.leaf_count(), 2);
        assert!(matches!(e, Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn test_unary_plus() {
        let a = tensor(&[2], 1.0);
        let e = Expr::leaf(&a).unary_plus();
        assert!(matches!(e, Expr::Unary { op: UnaryOp::Plus, .. }));
        assert_eq!(Expr::leaf(&a).pos().to_string(), "+tensor[2]");
    }

    #[test]
    fn test_display() {
        let a = tensor(&[2, 3], 1.0);
        let e = -(&a + 3.0 * &a) / 2.0;
        assert_eq!(
            e.to_string(),
            "(-(tensor[2, 3] + (3 * tensor[2, 3])) / 2)"
        );
    }

    #[test]
    fn test_clone_shares_leaves() {
        let a = tensor(&[2, 2], 1.0);
        let e = &a * 2.0;
        let f = e.clone();
        assert_eq!(e.to_string(), f.to_string());
    }
}
