//! Assigning expressions to tensors

use super::{EvalContext, Expr, IntoExpr};
use crate::dtype::Element;
use crate::error::Result;
use crate::parallel::ParallelismConfig;
use crate::tensor::extents::storage_len;
use crate::tensor::{Extents, Layout, Storage, Tensor};
use log::{debug, trace};

impl<T, E, L, S> Tensor<T, E, L, S>
where
    T: Element,
    E: Extents,
    L: Layout,
    S: Storage<T>,
{
    /// Evaluate `expr` into this tensor
    ///
    /// The expression's extents are resolved first; on a shape mismatch, or
    /// when the resolved extents do not fit this tensor's extents flavor, the
    /// error is returned and `self` is left untouched. Otherwise `self` is
    /// resized if needed and every element is computed in one pass.
    ///
    /// # Example
    ///
    /// ```
    /// use extensor::prelude::*;
    ///
    /// let a = Tensor::<f64>::full(DynExtents::new(&[2, 3])?, 2.0);
    /// let b = Tensor::<f64>::full(DynExtents::new(&[3, 2])?, 1.0);
    ///
    /// let mut t = Tensor::<f64>::default();
    /// t.assign(&a * &a - 1.0)?;
    /// assert_eq!(t.data(), &[3.0; 6]);
    ///
    /// assert!(t.assign(&a + &b).is_err());
    /// assert_eq!(t.data(), &[3.0; 6]);
    /// # Ok::<(), extensor::error::Error>(())
    /// ```
    pub fn assign<'a>(&mut self, expr: impl IntoExpr<'a, T>) -> Result<()> {
        self.assign_with(expr, &ParallelismConfig::default())
    }

    /// Evaluate `expr` into this tensor with explicit parallelism settings
    pub fn assign_with<'a>(
        &mut self,
        expr: impl IntoExpr<'a, T>,
        config: &ParallelismConfig,
    ) -> Result<()> {
        let expr = expr.into_expr();
        let resolved = expr.resolve_extents()?;
        let extents = E::try_from_extents(&resolved)?;

        let len = storage_len(&extents);
        let evaluator = config.evaluator(len)?;

        let realloc = extents != *self.extents();
        if realloc {
            self.resize(extents);
        }

        trace!("assign {expr}");
        debug!(
            "assign extents={} elements={} bytes={} order={} parallel={} realloc={}",
            resolved,
            len,
            self.nbytes(),
            L::ORDER,
            evaluator.is_parallel(),
            realloc
        );

        let ctx = EvalContext::new(self.extents(), L::ORDER);
        evaluator.run(self.data_mut(), |i| expr.eval_at(i, &ctx));
        Ok(())
    }

    /// Create a tensor holding the value of `expr`
    pub fn from_expr<'a>(expr: impl IntoExpr<'a, T>) -> Result<Self> {
        let mut out = Self::default();
        out.assign(expr)?;
        Ok(out)
    }

    /// Replace this tensor with an expression over its current value
    ///
    /// The closure receives `self` by shared reference, so the expression may
    /// read it freely. The result is evaluated into a fresh buffer which
    /// replaces `self` only on success.
    ///
    /// ```
    /// use extensor::prelude::*;
    ///
    /// let mut t = Tensor::<f64>::from_vec(DynExtents::new(&[3])?, vec![1.0, 2.0, 3.0])?;
    /// t.update(|t| t + 3.0 * t)?;
    /// assert_eq!(t.data(), &[4.0, 8.0, 12.0]);
    /// # Ok::<(), extensor::error::Error>(())
    /// ```
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: for<'b> FnOnce(&'b Self) -> Expr<'b, T>,
    {
        let fresh = Self::from_expr(f(self))?;
        *self = fresh;
        Ok(())
    }

    /// Evaluate through a leaf into any other tensor type with the same element type
    ///
    /// Converts between extents flavors and storage orders; multi-indices are
    /// preserved. A tensor without elements (the unset state of any flavor)
    /// becomes the unset state of the target.
    pub fn convert<E2, L2, S2>(&self) -> Result<Tensor<T, E2, L2, S2>>
    where
        E2: Extents,
        L2: Layout,
        S2: Storage<T>,
    {
        if self.is_empty() {
            return Ok(Tensor::default());
        }
        Tensor::from_expr(self)
    }
}
