//! Integration tests for extents, strides and layouts
//!
//! Tests verify:
//! - Shape validity across the three extents flavors
//! - Conversions between flavors
//! - Stride computation and index round trips

mod common;

use common::extents;
use extensor::error::Error;
use extensor::static_dims;
use extensor::tensor::{
    Dims2, Dims4, DynExtents, Extents, FixedRankExtents, Order, StaticExtents, StrideSet,
    Strides,
};

static_dims!(Volume = [2, 3, 4, 5, 6]);

// ============================================================================
// Validity
// ============================================================================

#[test]
fn test_zero_dimension_rejected_everywhere() {
    assert!(matches!(
        DynExtents::new(&[2, 0, 3]),
        Err(Error::InvalidShape { .. })
    ));
    assert!(matches!(
        FixedRankExtents::<3>::new(&[2, 0, 3]),
        Err(Error::InvalidShape { .. })
    ));
    assert!(matches!(
        StaticExtents::<Dims2<2, 3>>::try_from_slice(&[2, 0]),
        Err(Error::InvalidShape { .. })
    ));
}

#[test]
fn test_empty_shape_accepted() {
    let e = DynExtents::new(&[]).unwrap();
    assert!(e.is_empty());
    assert!(e.is_valid());
    assert_eq!(e.product(), 1);
    assert!(FixedRankExtents::<0>::new(&[]).is_ok());
}

#[test]
fn test_overflowing_element_count_rejected() {
    let err = DynExtents::new(&[usize::MAX, 2]).unwrap_err();
    assert_eq!(err.to_string(), format!("Invalid shape [{}, 2]: element count overflows usize", usize::MAX));
    assert!(FixedRankExtents::<2>::new(&[usize::MAX / 2 + 1, 2]).is_err());
    assert!(extensor::tensor::Tensor::<u8>::from_shape(&[usize::MAX, 2]).is_err());
}

#[test]
fn test_fixed_rank_capacity() {
    assert_eq!(
        FixedRankExtents::<2>::new(&[1, 2, 3]),
        Err(Error::CapacityExceeded {
            len: 3,
            capacity: 2
        })
    );
    // missing trailing dimensions stay zero
    assert!(matches!(
        FixedRankExtents::<3>::new(&[4, 5]),
        Err(Error::InvalidShape { .. })
    ));
}

#[test]
fn test_unset_state() {
    let d = DynExtents::default();
    assert_eq!(d.rank(), 0);

    let f = FixedRankExtents::<3>::default();
    assert_eq!(f.as_slice(), &[0, 0, 0]);
    assert!(!f.is_valid());
}

#[test]
fn test_fill_does_not_validate() {
    let mut f = FixedRankExtents::<2>::new(&[2, 2]).unwrap();
    f.fill(0);
    assert!(!f.is_valid());

    let mut d = extents(&[2, 2, 2]);
    d.fill(3);
    assert_eq!(d.product(), 27);
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_roundtrip_through_dynamic() {
    let fixed = FixedRankExtents::<4>::new(&[2, 3, 1, 5]).unwrap();
    let dynamic = fixed.to_dynamic();
    let back = FixedRankExtents::<4>::try_from_extents(&dynamic).unwrap();
    assert_eq!(back, fixed);
    assert_eq!(back.product(), fixed.product());

    let fully = StaticExtents::<Dims4<2, 3, 1, 5>>::new();
    assert_eq!(fully.to_dynamic(), dynamic);
    assert!(fully.same_shape(&fixed));
    assert_eq!(
        StaticExtents::<Dims4<2, 3, 1, 5>>::try_from_extents(&dynamic).unwrap(),
        fully
    );
}

#[test]
fn test_static_mismatch() {
    let dynamic = extents(&[3, 2]);
    assert_eq!(
        StaticExtents::<Dims2<2, 3>>::try_from_extents(&dynamic),
        Err(Error::extents_mismatch(&[2, 3], &[3, 2]))
    );
}

#[test]
fn test_fixed_rank_from_wrong_rank() {
    let dynamic = extents(&[2, 3, 4]);
    assert!(FixedRankExtents::<2>::try_from_extents(&dynamic).is_err());
}

#[test]
fn test_macro_declared_rank5() {
    let e = StaticExtents::<Volume>::new();
    assert_eq!(<StaticExtents<Volume> as Extents>::RANK, Some(5));
    assert_eq!(e.product(), 720);
    assert!(e.is_tensor());
}

#[test]
fn test_squeeze() {
    assert_eq!(extents(&[1, 4, 1, 3, 1]).squeeze().as_slice(), &[4, 3]);
    assert_eq!(extents(&[1, 1, 1, 1]).squeeze().as_slice(), &[1, 1]);
}

// ============================================================================
// Strides
// ============================================================================

fn sum_offsets(strides: &impl StrideSet, dims: &[usize]) -> usize {
    let mut total = 0;
    let mut index = vec![0; dims.len()];
    loop {
        total += strides.offset(&index);
        let mut k = 0;
        loop {
            if k == dims.len() {
                return total;
            }
            index[k] += 1;
            if index[k] < dims[k] {
                break;
            }
            index[k] = 0;
            k += 1;
        }
    }
}

#[test]
fn test_strides_cover_buffer_once() {
    let dims = [3, 4, 2];
    let n: usize = dims.iter().product();
    for order in [Order::FirstOrder, Order::LastOrder] {
        let strides = Strides::new(&dims, order);
        // every offset 0..n visited exactly once sums to n(n-1)/2
        assert_eq!(sum_offsets(&strides, &dims), n * (n - 1) / 2, "{order}");
        for i in 0..n {
            assert_eq!(strides.offset(&strides.unravel(i, order)), i);
        }
    }
}

#[test]
fn test_orders_are_transposes() {
    let last = Strides::new(&[2, 3, 4], Order::LastOrder);
    let first = Strides::new(&[4, 3, 2], Order::FirstOrder);
    let reversed: Vec<usize> = first.iter().rev().copied().collect();
    assert_eq!(last.as_slice(), reversed.as_slice());
}
