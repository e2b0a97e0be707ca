//! Matrix and vector types interoperating with tensors
//!
//! [`Matrix`] and [`Vector`] are plain dense containers. They take part in
//! tensor expressions directly (as `[rows, cols]` and `[n, 1]` operands) and
//! convert to and from [`Tensor`](crate::tensor::Tensor).

mod matrix;
mod prod;
mod vector;

pub use matrix::Matrix;
pub use prod::{prod, MatmulShape, Prod};
pub use vector::Vector;
