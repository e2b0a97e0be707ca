//! # extensor
//!
//! **N-dimensional tensors with static and dynamic extents and a fused expression engine.**
//!
//! Arithmetic on tensors builds lazy expression trees; assigning a tree to a
//! tensor checks all operand shapes once and then computes every element in a
//! single pass, without temporaries.
//!
//! ## Features
//!
//! - **Extents**: dynamic rank ([`DynExtents`](tensor::DynExtents)), rank fixed
//!   by the type ([`FixedRankExtents`](tensor::FixedRankExtents)) or fully
//!   static shapes ([`StaticExtents`](tensor::StaticExtents))
//! - **Layouts**: row-major (`LastOrder`) and column-major (`FirstOrder`),
//!   freely mixed inside one expression
//! - **Expressions**: `+ - * /`, negation and scalars, with shape checking
//!   before any element is written
//! - **Interop**: [`Matrix`](linalg::Matrix) and [`Vector`](linalg::Vector)
//!   operands and [`prod`](linalg::prod)
//! - **Parallel evaluation**: large assignments are split across rayon threads
//!
//! ## Quick Start
//!
//! ```rust
//! use extensor::prelude::*;
//!
//! let r = Tensor::<f64>::from_vec(DynExtents::new(&[2, 3])?, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//!
//! let mut t = Tensor::<f64>::default();
//! t.assign(&r + 3.0 * &r)?;
//! assert_eq!(t.data(), &[4.0, 8.0, 12.0, 16.0, 20.0, 24.0]);
//!
//! // Self-referential updates evaluate into a fresh buffer
//! t.update(|t| t - &r)?;
//! assert_eq!(t[[1, 2]], 18.0);
//! # Ok::<(), extensor::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded evaluation of large assignments
//! - `f16`: half-precision element types (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod expr;
pub mod linalg;
pub mod parallel;
pub mod tensor;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::expr::{BinaryOp, Expr, IntoExpr, Operand, UnaryOp};
    pub use crate::linalg::{prod, Matrix, Vector};
    pub use crate::parallel::ParallelismConfig;
    pub use crate::tensor::{
        DynExtents, DynTensor, Extents, FirstOrder, FixedRankExtents, FixedRankTensor, LastOrder,
        Layout, Order, StaticExtents, StaticTensor, Tensor,
    };
}
