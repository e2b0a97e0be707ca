//! Storage: the element container behind a tensor
//!
//! A tensor only needs its buffer to be constructible from an element count,
//! indexable as a slice and resizable. Any container providing that can back
//! a [`Tensor`](super::Tensor); `Vec<T>` is the default and `SmallVec` keeps
//! small tensors on the stack.

use smallvec::SmallVec;

/// Contiguous, exclusively owned element buffer
pub trait Storage<T>: Clone + Send + Sync {
    /// Create a buffer holding `len` copies of `value`
    fn with_len(len: usize, value: T) -> Self;

    /// Take ownership of existing elements
    fn from_vec(data: Vec<T>) -> Self;

    /// View the elements
    fn as_slice(&self) -> &[T];

    /// View the elements mutably
    fn as_mut_slice(&mut self) -> &mut [T];

    /// Grow or shrink to `len` elements, filling new slots with `value`
    fn resize(&mut self, len: usize, value: T);

    /// Number of elements
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if storage is empty
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Storage<T> for Vec<T> {
    fn with_len(len: usize, value: T) -> Self {
        vec![value; len]
    }

    fn from_vec(data: Vec<T>) -> Self {
        data
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn resize(&mut self, len: usize, value: T) {
        Vec::resize(self, len, value);
    }
}

impl<A> Storage<A::Item> for SmallVec<A>
where
    A: smallvec::Array + Send + Sync,
    A::Item: Clone + Send + Sync,
{
    fn with_len(len: usize, value: A::Item) -> Self {
        SmallVec::from_elem(value, len)
    }

    fn from_vec(data: Vec<A::Item>) -> Self {
        SmallVec::from_vec(data)
    }

    #[inline]
    fn as_slice(&self) -> &[A::Item] {
        self
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [A::Item] {
        self
    }

    fn resize(&mut self, len: usize, value: A::Item) {
        SmallVec::resize(self, len, value);
    }
}
