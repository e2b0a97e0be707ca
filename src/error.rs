//! Error types for extensor

use crate::expr::BinaryOp;
use crate::tensor::DynExtents;
use thiserror::Error;

/// Result type alias using extensor's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in extensor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Extents violate the validity invariant (a zero dimension with nonzero rank)
    #[error("Invalid shape {shape:?}: {reason}")]
    InvalidShape {
        /// The rejected dimensions
        shape: Vec<usize>,
        /// Why the shape was rejected
        reason: &'static str,
    },

    /// Initializer does not fit into a fixed-rank extents value
    #[error("Initializer of length {len} exceeds extents capacity {capacity}")]
    CapacityExceeded {
        /// Length of the supplied initializer
        len: usize,
        /// Fixed rank of the target extents
        capacity: usize,
    },

    /// Operands of an elementwise binary operator have different shapes
    #[error("Cannot {op} Tensor of shapes {lhs} and {rhs}")]
    ShapeMismatch {
        /// The operator whose operands disagree
        op: BinaryOp,
        /// Resolved shape of the left operand
        lhs: DynExtents,
        /// Resolved shape of the right operand
        rhs: DynExtents,
    },

    /// Extents differ from what an operation requires
    #[error("Extents mismatch: expected {expected:?}, got {got:?}")]
    ExtentsMismatch {
        /// Expected dimensions
        expected: Vec<usize>,
        /// Actual dimensions
        got: Vec<usize>,
    },

    /// Rank differs from what an operation requires
    #[error("Rank mismatch: expected rank {expected}, got rank {got}")]
    RankMismatch {
        /// Expected rank
        expected: usize,
        /// Actual rank
        got: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid dimension index or wrong number of indices
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension (or number of indices supplied)
        dim: usize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Expression contains no tensor operand, so it has no shape
    #[error("Expression has no tensor operand to take a shape from")]
    ScalarExpression,

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create an invalid shape error
    pub fn invalid_shape(shape: &[usize], reason: &'static str) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
            reason,
        }
    }

    /// Create an extents mismatch error
    pub fn extents_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ExtentsMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}
