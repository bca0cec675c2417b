//! Variable-length kernels for runtime element counts.
//!
//! `floor(count / W)` full native registers via unaligned loads and stores,
//! then a scalar tail for the `count % W` remaining elements. `count = 0`
//! touches no memory.

use crate::capability::SimdCapability;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::op::{BinaryOp, TernaryOp, UnaryOp};

// ============================================================================
// Raw pointer engine
// ============================================================================

/// Apply `op` to `count` elements behind raw pointers.
///
/// # Safety
///
/// For `count > 0`, `a` and `b` must be valid for `count` reads and `out`
/// for `count` writes; `out` may equal `a` or `b` but must not partially
/// overlap either. With `count == 0` the pointers are never dereferenced and
/// may be null. `capability` must be available on this CPU.
#[inline]
pub unsafe fn binary_raw<T: Element>(
    op: BinaryOp,
    a: *const T,
    b: *const T,
    out: *mut T,
    count: usize,
    capability: SimdCapability,
) {
    let lanes = capability.lanes::<T>();
    let mut i = 0;
    if lanes > 1 {
        while i + lanes <= count {
            unsafe { T::binary_block(op, lanes, a.add(i), b.add(i), out.add(i)) };
            i += lanes;
        }
    }

    // Scalar tail
    while i < count {
        unsafe { *out.add(i) = op.apply(*a.add(i), *b.add(i)) };
        i += 1;
    }
}

/// Unary counterpart of [`binary_raw`].
///
/// # Safety
///
/// Same contract as [`binary_raw`] with a single input.
#[inline]
pub unsafe fn unary_raw<T: Element>(
    op: UnaryOp,
    a: *const T,
    out: *mut T,
    count: usize,
    capability: SimdCapability,
) {
    let lanes = capability.lanes::<T>();
    let mut i = 0;
    if lanes > 1 {
        while i + lanes <= count {
            unsafe { T::unary_block(op, lanes, a.add(i), out.add(i)) };
            i += lanes;
        }
    }

    // Scalar tail
    while i < count {
        unsafe { *out.add(i) = op.apply(*a.add(i)) };
        i += 1;
    }
}

/// Ternary counterpart of [`binary_raw`].
///
/// # Safety
///
/// Same contract as [`binary_raw`] with three inputs.
#[inline]
pub unsafe fn ternary_raw<T: Element>(
    op: TernaryOp,
    a: *const T,
    b: *const T,
    c: *const T,
    out: *mut T,
    count: usize,
    capability: SimdCapability,
) {
    let lanes = capability.lanes::<T>();
    let mut i = 0;
    if lanes > 1 {
        while i + lanes <= count {
            unsafe { T::ternary_block(op, lanes, a.add(i), b.add(i), c.add(i), out.add(i)) };
            i += lanes;
        }
    }

    // Scalar tail
    while i < count {
        unsafe { *out.add(i) = op.apply(*a.add(i), *b.add(i), *c.add(i)) };
        i += 1;
    }
}

// ============================================================================
// Slice API
// ============================================================================

/// Apply `op` elementwise over equal-length slices on an explicit capability.
///
/// # Panics
///
/// Panics if the slice lengths differ or `capability` is not available on
/// this CPU.
#[inline]
pub fn binary_with<T: Element>(
    op: BinaryOp,
    a: &[T],
    b: &[T],
    out: &mut [T],
    capability: SimdCapability,
) {
    assert_eq!(a.len(), b.len(), "Vector lengths must match");
    assert_eq!(a.len(), out.len(), "Output length must match input length");
    assert!(
        capability.is_available(),
        "SIMD capability not available: {capability}"
    );
    unsafe { binary_raw(op, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), a.len(), capability) };
}

/// Unary counterpart of [`binary_with`].
///
/// # Panics
///
/// Panics if the slice lengths differ or `capability` is not available on
/// this CPU.
#[inline]
pub fn unary_with<T: Element>(op: UnaryOp, a: &[T], out: &mut [T], capability: SimdCapability) {
    assert_eq!(a.len(), out.len(), "Output length must match input length");
    assert!(
        capability.is_available(),
        "SIMD capability not available: {capability}"
    );
    unsafe { unary_raw(op, a.as_ptr(), out.as_mut_ptr(), a.len(), capability) };
}

/// Ternary counterpart of [`binary_with`].
///
/// # Panics
///
/// Panics if the slice lengths differ or `capability` is not available on
/// this CPU.
#[inline]
pub fn ternary_with<T: Element>(
    op: TernaryOp,
    a: &[T],
    b: &[T],
    c: &[T],
    out: &mut [T],
    capability: SimdCapability,
) {
    assert_eq!(a.len(), b.len(), "Vector lengths must match");
    assert_eq!(a.len(), c.len(), "Vector lengths must match");
    assert_eq!(a.len(), out.len(), "Output length must match input length");
    assert!(
        capability.is_available(),
        "SIMD capability not available: {capability}"
    );
    unsafe { ternary_raw(op, a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr(), a.len(), capability) };
}

/// [`binary_with`] on the detected capability.
#[inline]
pub fn binary<T: Element>(op: BinaryOp, a: &[T], b: &[T], out: &mut [T]) {
    binary_with(op, a, b, out, SimdCapability::cached());
}

/// [`unary_with`] on the detected capability.
#[inline]
pub fn unary<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    unary_with(op, a, out, SimdCapability::cached());
}

/// [`ternary_with`] on the detected capability.
#[inline]
pub fn ternary<T: Element>(op: TernaryOp, a: &[T], b: &[T], c: &[T], out: &mut [T]) {
    ternary_with(op, a, b, c, out, SimdCapability::cached());
}

/// Scalar reference implementation of [`binary`].
#[inline]
pub fn binary_scalar<T: Element>(op: BinaryOp, a: &[T], b: &[T], out: &mut [T]) {
    assert_eq!(a.len(), b.len(), "Vector lengths must match");
    assert_eq!(a.len(), out.len(), "Output length must match input length");
    for ((o, &ai), &bi) in out.iter_mut().zip(a).zip(b) {
        *o = op.apply(ai, bi);
    }
}

/// Scalar reference implementation of [`unary`].
#[inline]
pub fn unary_scalar<T: Element>(op: UnaryOp, a: &[T], out: &mut [T]) {
    assert_eq!(a.len(), out.len(), "Output length must match input length");
    for (o, &ai) in out.iter_mut().zip(a) {
        *o = op.apply(ai);
    }
}

/// Scalar reference implementation of [`ternary`].
#[inline]
pub fn ternary_scalar<T: Element>(op: TernaryOp, a: &[T], b: &[T], c: &[T], out: &mut [T]) {
    assert_eq!(a.len(), b.len(), "Vector lengths must match");
    assert_eq!(a.len(), c.len(), "Vector lengths must match");
    assert_eq!(a.len(), out.len(), "Output length must match input length");
    for (((o, &ai), &bi), &ci) in out.iter_mut().zip(a).zip(b).zip(c) {
        *o = op.apply(ai, bi, ci);
    }
}

// ============================================================================
// Checked slice API
// ============================================================================

/// Non-panicking form of [`binary_with`]. Nothing is written on error.
pub fn try_binary<T: Element>(
    op: BinaryOp,
    a: &[T],
    b: &[T],
    out: &mut [T],
    capability: SimdCapability,
) -> Result<()> {
    if !capability.is_available() {
        return Err(Error::UnsupportedCapability(capability));
    }
    check_len("b", a.len(), b.len())?;
    check_len("out", a.len(), out.len())?;
    unsafe { binary_raw(op, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), a.len(), capability) };
    Ok(())
}

/// Non-panicking form of [`unary_with`]. Nothing is written on error.
pub fn try_unary<T: Element>(
    op: UnaryOp,
    a: &[T],
    out: &mut [T],
    capability: SimdCapability,
) -> Result<()> {
    if !capability.is_available() {
        return Err(Error::UnsupportedCapability(capability));
    }
    check_len("out", a.len(), out.len())?;
    unsafe { unary_raw(op, a.as_ptr(), out.as_mut_ptr(), a.len(), capability) };
    Ok(())
}

/// Non-panicking form of [`ternary_with`]. Nothing is written on error.
pub fn try_ternary<T: Element>(
    op: TernaryOp,
    a: &[T],
    b: &[T],
    c: &[T],
    out: &mut [T],
    capability: SimdCapability,
) -> Result<()> {
    if !capability.is_available() {
        return Err(Error::UnsupportedCapability(capability));
    }
    check_len("b", a.len(), b.len())?;
    check_len("c", a.len(), c.len())?;
    check_len("out", a.len(), out.len())?;
    unsafe { ternary_raw(op, a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr(), a.len(), capability) };
    Ok(())
}

fn check_len(operand: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            operand,
            expected,
            actual,
        })
    }
}

// ============================================================================
// Named kernels
// ============================================================================

/// `out[i] = a[i] + b[i]` over `f32` slices of equal length.
#[inline]
pub fn add_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    binary(BinaryOp::Add, a, b, out);
}

/// `out[i] = a[i] + b[i]` over `f64` slices of equal length.
#[inline]
pub fn add_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    binary(BinaryOp::Add, a, b, out);
}

/// `out[i] = a[i] - b[i]` over `f32` slices of equal length.
#[inline]
pub fn sub_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    binary(BinaryOp::Sub, a, b, out);
}

/// `out[i] = a[i] - b[i]` over `f64` slices of equal length.
#[inline]
pub fn sub_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    binary(BinaryOp::Sub, a, b, out);
}

/// `out[i] = a[i] < b[i] ? a[i] : b[i]` over `f32` slices of equal length.
#[inline]
pub fn min_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    binary(BinaryOp::Min, a, b, out);
}

/// `out[i] = a[i] < b[i] ? a[i] : b[i]` over `f64` slices of equal length.
#[inline]
pub fn min_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    binary(BinaryOp::Min, a, b, out);
}

/// `out[i] = a[i] > b[i] ? a[i] : b[i]` over `f32` slices of equal length.
#[inline]
pub fn max_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    binary(BinaryOp::Max, a, b, out);
}

/// `out[i] = a[i] > b[i] ? a[i] : b[i]` over `f64` slices of equal length.
#[inline]
pub fn max_f64(a: &[f64], b: &[f64], out: &mut [f64]) {
    binary(BinaryOp::Max, a, b, out);
}
