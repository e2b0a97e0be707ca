//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a tensor
///
/// # Bounds
/// - `Copy + Default + Send + Sync + 'static` - value semantics, shareable across
///   the evaluation threads
/// - `Pod + Zeroable` - byte-level views of tensor storage (bytemuck)
/// - `Add + Sub + Mul + Div` - the elementwise operators of an expression
/// - `Debug + Display` - diagnostics and expression printing
///
/// `Neg` is not required since unsigned types don't support it; the
/// expression engine negates through [`Element::negate`] instead.
pub trait Element:
    Copy
    + Default
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
    + fmt::Debug
    + fmt::Display
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Additive inverse
    ///
    /// Unsigned types wrap (two's complement), matching `0 - x` in modular
    /// arithmetic.
    fn negate(self) -> Self;
}

macro_rules! impl_float_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn negate(self) -> Self {
                -self
            }
        }
    };
}

macro_rules! impl_int_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn negate(self) -> Self {
                self.wrapping_neg()
            }
        }
    };
}

impl_float_element!(f64, DType::F64);
impl_float_element!(f32, DType::F32);
impl_int_element!(i64, DType::I64);
impl_int_element!(i32, DType::I32);
impl_int_element!(i16, DType::I16);
impl_int_element!(i8, DType::I8);
impl_int_element!(u64, DType::U64);
impl_int_element!(u32, DType::U32);
impl_int_element!(u16, DType::U16);
impl_int_element!(u8, DType::U8);

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::f16::ONE
    }

    #[inline]
    fn negate(self) -> Self {
        -self
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }

    #[inline]
    fn one() -> Self {
        half::bf16::ONE
    }

    #[inline]
    fn negate(self) -> Self {
        -self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_mapping() {
        assert_eq!(<f64 as Element>::DTYPE, DType::F64);
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<i32 as Element>::DTYPE, DType::I32);
        assert_eq!(<u8 as Element>::DTYPE, DType::U8);
    }

    #[test]
    fn test_negate() {
        assert_eq!(2.5f64.negate(), -2.5);
        assert_eq!(7i32.negate(), -7);
        assert_eq!(1u8.negate(), u8::MAX);
    }

    #[test]
    fn test_identities() {
        assert_eq!(<f32 as Element>::one() + <f32 as Element>::zero(), 1.0);
        assert_eq!(<u16 as Element>::one() * 3, 3);
        assert_eq!(<i8 as Element>::zero().negate(), 0);
    }
}
