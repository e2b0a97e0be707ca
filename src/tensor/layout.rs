//! Storage order of tensor elements
//!
//! A tensor's elements live in one contiguous buffer. The storage order decides
//! which dimension varies fastest along that buffer:
//!
//! - [`LastOrder`] (row-major, C order): the rightmost dimension is contiguous
//! - [`FirstOrder`] (column-major, Fortran order): the leftmost dimension is contiguous
//!
//! The order is carried at the type level by the zero-sized tags implementing
//! [`Layout`], and at run time by [`Order`].

use std::fmt;

/// Run-time storage order
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Column-major: the first dimension has stride 1
    FirstOrder,
    /// Row-major: the last dimension has stride 1
    #[default]
    LastOrder,
}

impl Order {
    /// The other storage order
    #[inline]
    pub const fn transposed(self) -> Self {
        match self {
            Self::FirstOrder => Self::LastOrder,
            Self::LastOrder => Self::FirstOrder,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstOrder => write!(f, "first-order"),
            Self::LastOrder => write!(f, "last-order"),
        }
    }
}

/// Compile-time storage order tag
pub trait Layout: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The run-time order this tag stands for
    const ORDER: Order;
}

/// Column-major storage tag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FirstOrder;

/// Row-major storage tag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LastOrder;

impl Layout for FirstOrder {
    const ORDER: Order = Order::FirstOrder;
}

impl Layout for LastOrder {
    const ORDER: Order = Order::LastOrder;
}

/// Column-major storage tag
pub type ColumnMajor = FirstOrder;

/// Row-major storage tag
pub type RowMajor = LastOrder;
