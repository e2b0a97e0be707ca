//! Tensor types and shape algebra
//!
//! This module provides the core [`Tensor`] type together with the pieces it is
//! built from: [`Extents`] (shape), [`Strides`] (offsets), [`Layout`] (storage
//! order) and [`Storage`] (element buffer).

mod core;
pub mod extents;
mod layout;
mod storage;
mod strides;

pub use core::{DynTensor, FixedRankTensor, StaticTensor, Tensor};
pub use extents::{
    is_valid_shape, Dims1, Dims2, Dims3, Dims4, DynExtents, Extents, FixedRankExtents,
    StaticDims, StaticExtents,
};
pub use layout::{ColumnMajor, FirstOrder, LastOrder, Layout, Order, RowMajor};
pub use storage::Storage;
pub use strides::{StrideSet, Strides};
