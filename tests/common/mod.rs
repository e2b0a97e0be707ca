//! Common test utilities
#![allow(dead_code)]

use extensor::dtype::Element;
use extensor::tensor::{DynExtents, Extents, Tensor};

/// Route `log` records to the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build dynamic extents, panicking on an invalid shape
pub fn extents(dims: &[usize]) -> DynExtents {
    DynExtents::new(dims).expect("valid test shape")
}

/// `v` as an element, counted up from `T::zero()`
pub fn scalar<T: Element>(v: usize) -> T {
    (0..v).fold(T::zero(), |acc, _| acc + T::one())
}

/// Tensor holding `1, 2, 3, ...` in storage order
pub fn iota<T: Element>(dims: &[usize]) -> Tensor<T> {
    let e = extents(dims);
    let data = std::iter::successors(Some(T::one()), |&v| Some(v + T::one()))
        .take(e.product())
        .collect();
    Tensor::from_vec(e, data).expect("length matches extents")
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
