//! Scalar register path: one lane at a time, same semantics as the vectors.

use crate::element::Element;
use crate::op::{BinaryOp, TernaryOp, UnaryOp};

/// # Safety
///
/// `a` and `b` valid for `width` reads, `out` for `width` writes.
#[inline(always)]
pub(crate) unsafe fn binary<T: Element>(
    op: BinaryOp,
    width: usize,
    a: *const T,
    b: *const T,
    out: *mut T,
) {
    for i in 0..width {
        unsafe { *out.add(i) = op.apply(*a.add(i), *b.add(i)) };
    }
}

/// # Safety
///
/// `a` valid for `width` reads, `out` for `width` writes.
#[inline(always)]
pub(crate) unsafe fn unary<T: Element>(op: UnaryOp, width: usize, a: *const T, out: *mut T) {
    for i in 0..width {
        unsafe { *out.add(i) = op.apply(*a.add(i)) };
    }
}

/// # Safety
///
/// `a`, `b` and `c` valid for `width` reads, `out` for `width` writes.
#[inline(always)]
pub(crate) unsafe fn ternary<T: Element>(
    op: TernaryOp,
    width: usize,
    a: *const T,
    b: *const T,
    c: *const T,
    out: *mut T,
) {
    for i in 0..width {
        unsafe { *out.add(i) = op.apply(*a.add(i), *b.add(i), *c.add(i)) };
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use fallback::*;

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
mod fallback {
    use super::{binary, ternary, unary};
    use crate::op::{BinaryOp, TernaryOp, UnaryOp};

    #[inline(always)]
    pub(crate) unsafe fn binary_f32(op: BinaryOp, width: usize, a: *const f32, b: *const f32, out: *mut f32) {
        unsafe { binary(op, width, a, b, out) }
    }

    #[inline(always)]
    pub(crate) unsafe fn binary_f64(op: BinaryOp, width: usize, a: *const f64, b: *const f64, out: *mut f64) {
        unsafe { binary(op, width, a, b, out) }
    }

    #[inline(always)]
    pub(crate) unsafe fn unary_f32(op: UnaryOp, width: usize, a: *const f32, out: *mut f32) {
        unsafe { unary(op, width, a, out) }
    }

    #[inline(always)]
    pub(crate) unsafe fn unary_f64(op: UnaryOp, width: usize, a: *const f64, out: *mut f64) {
        unsafe { unary(op, width, a, out) }
    }

    #[inline(always)]
    pub(crate) unsafe fn ternary_f32(
        op: TernaryOp,
        width: usize,
        a: *const f32,
        b: *const f32,
        c: *const f32,
        out: *mut f32,
    ) {
        unsafe { ternary(op, width, a, b, c, out) }
    }

    #[inline(always)]
    pub(crate) unsafe fn ternary_f64(
        op: TernaryOp,
        width: usize,
        a: *const f64,
        b: *const f64,
        c: *const f64,
        out: *mut f64,
    ) {
        unsafe { ternary(op, width, a, b, c, out) }
    }
}
