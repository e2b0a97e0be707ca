//! Tree walks over expressions: shape resolution and per-index evaluation

use super::Expr;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::tensor::{DynExtents, Extents, Order, Strides};
use log::debug;

/// Destination-side information needed to evaluate leaves
///
/// Leaves stored in the destination's order are read at the destination
/// offset directly. Leaves stored in the other order have the offset
/// translated through the destination's multi-index.
#[derive(Clone, Debug)]
pub struct EvalContext {
    order: Order,
    strides: Strides,
    transposed: Strides,
}

impl EvalContext {
    /// Context for a destination with the given extents and order
    pub fn new<E: Extents>(extents: &E, order: Order) -> Self {
        Self {
            order,
            strides: Strides::from_extents(extents, order),
            transposed: Strides::from_extents(extents, order.transposed()),
        }
    }

    /// Destination storage order
    pub fn order(&self) -> Order {
        self.order
    }

    /// Offset of destination element `linear` in a leaf stored in `order`
    #[inline]
    fn leaf_offset(&self, linear: usize, order: Order) -> usize {
        if order == self.order {
            linear
        } else {
            self.strides.remap(linear, self.order, &self.transposed)
        }
    }
}

impl<T: Element> Expr<'_, T> {
    /// Compute the extents this expression evaluates to
    ///
    /// Fails with [`Error::ShapeMismatch`] when the operands of some binary
    /// node have different extents, and with [`Error::ScalarExpression`] when
    /// the tree has no tensor leaf at all.
    pub fn resolve_extents(&self) -> Result<DynExtents> {
        self.resolve()?.ok_or(Error::ScalarExpression)
    }

    /// `None` for scalar-only subtrees
    fn resolve(&self) -> Result<Option<DynExtents>> {
        match self {
            Self::Leaf(x) => Ok(Some(x.extents())),
            Self::Scalar(_) => Ok(None),
            Self::Unary { operand, .. } => operand.resolve(),
            Self::Binary { op, lhs, rhs } => match (lhs.resolve()?, rhs.resolve()?) {
                (Some(l), Some(r)) if l != r => {
                    debug!("shape mismatch in {op}: {l} vs {r}");
                    Err(Error::ShapeMismatch {
                        op: *op,
                        lhs: l,
                        rhs: r,
                    })
                }
                (Some(l), _) => Ok(Some(l)),
                (None, r) => Ok(r),
            },
        }
    }

    /// Value of the expression at destination linear index `i`
    ///
    /// `i` must be smaller than the element count of the resolved extents,
    /// and `ctx` must be built from those extents.
    pub fn eval_at(&self, i: usize, ctx: &EvalContext) -> T {
        match self {
            Self::Leaf(x) => x.get(ctx.leaf_offset(i, x.order())),
            Self::Scalar(v) => *v,
            Self::Unary { op, operand } => op.apply(operand.eval_at(i, ctx)),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval_at(i, ctx), rhs.eval_at(i, ctx)),
        }
    }
}
