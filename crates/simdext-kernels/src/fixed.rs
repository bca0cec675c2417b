//! Fixed-width kernels for statically known element counts.
//!
//! The element count `N` is part of the type (`&[T; N]`), so the named
//! kernels (`add_f32x4`, `min_f64x3`, ...) take no length. Each call walks
//! the lane plan for `N` on the current CPU: full registers first, then
//! narrower registers, then a partial register for odd widths.
//!
//! Partial groups are staged through a zero-padded stack buffer so the
//! kernel never reads or writes past element `N - 1`.

use std::ptr;

use crate::capability::SimdCapability;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::op::{BinaryOp, TernaryOp, UnaryOp};
use crate::plan::{LaneGroup, LanePlan, MAX_FIXED_WIDTH};

// ============================================================================
// Raw pointer engine
// ============================================================================

/// Apply `op` to `N` elements behind raw pointers.
///
/// # Safety
///
/// `a` and `b` must be valid for `N` reads and `out` for `N` writes.
/// `out` may equal `a` or `b` but must not partially overlap either.
/// `capability` must be available on this CPU.
#[inline]
pub unsafe fn binary_raw<T: Element, const N: usize>(
    op: BinaryOp,
    a: *const T,
    b: *const T,
    out: *mut T,
    capability: SimdCapability,
) {
    const { assert!(N <= MAX_FIXED_WIDTH, "fixed-width kernels cover at most 16 elements") };

    let plan = LanePlan::for_capability::<T>(N, capability);
    for group in plan.groups() {
        let o = group.offset;
        unsafe { binary_group(op, group, a.add(o), b.add(o), out.add(o)) };
    }
}

/// Unary counterpart of [`binary_raw`].
///
/// # Safety
///
/// `a` must be valid for `N` reads and `out` for `N` writes; `out` may equal
/// `a`. `capability` must be available on this CPU.
#[inline]
pub unsafe fn unary_raw<T: Element, const N: usize>(
    op: UnaryOp,
    a: *const T,
    out: *mut T,
    capability: SimdCapability,
) {
    const { assert!(N <= MAX_FIXED_WIDTH, "fixed-width kernels cover at most 16 elements") };

    let plan = LanePlan::for_capability::<T>(N, capability);
    for group in plan.groups() {
        let o = group.offset;
        unsafe { unary_group(op, group, a.add(o), out.add(o)) };
    }
}

/// Ternary counterpart of [`binary_raw`].
///
/// # Safety
///
/// `a`, `b` and `c` must be valid for `N` reads and `out` for `N` writes;
/// `out` may equal any input. `capability` must be available on this CPU.
#[inline]
pub unsafe fn ternary_raw<T: Element, const N: usize>(
    op: TernaryOp,
    a: *const T,
    b: *const T,
    c: *const T,
    out: *mut T,
    capability: SimdCapability,
) {
    const { assert!(N <= MAX_FIXED_WIDTH, "fixed-width kernels cover at most 16 elements") };

    let plan = LanePlan::for_capability::<T>(N, capability);
    for group in plan.groups() {
        let o = group.offset;
        unsafe { ternary_group(op, group, a.add(o), b.add(o), c.add(o), out.add(o)) };
    }
}

#[inline(always)]
unsafe fn binary_group<T: Element>(
    op: BinaryOp,
    group: &LaneGroup,
    a: *const T,
    b: *const T,
    out: *mut T,
) {
    if !group.is_partial() {
        unsafe { T::binary_block(op, group.lanes, a, b, out) };
        return;
    }

    let mut va = [T::default(); MAX_FIXED_WIDTH];
    let mut vb = [T::default(); MAX_FIXED_WIDTH];
    let mut vo = [T::default(); MAX_FIXED_WIDTH];
    unsafe {
        ptr::copy_nonoverlapping(a, va.as_mut_ptr(), group.len);
        ptr::copy_nonoverlapping(b, vb.as_mut_ptr(), group.len);
        T::binary_block(op, group.lanes, va.as_ptr(), vb.as_ptr(), vo.as_mut_ptr());
        ptr::copy_nonoverlapping(vo.as_ptr(), out, group.len);
    }
}

#[inline(always)]
unsafe fn unary_group<T: Element>(op: UnaryOp, group: &LaneGroup, a: *const T, out: *mut T) {
    if !group.is_partial() {
        unsafe { T::unary_block(op, group.lanes, a, out) };
        return;
    }

    let mut va = [T::default(); MAX_FIXED_WIDTH];
    let mut vo = [T::default(); MAX_FIXED_WIDTH];
    unsafe {
        ptr::copy_nonoverlapping(a, va.as_mut_ptr(), group.len);
        T::unary_block(op, group.lanes, va.as_ptr(), vo.as_mut_ptr());
        ptr::copy_nonoverlapping(vo.as_ptr(), out, group.len);
    }
}

#[inline(always)]
unsafe fn ternary_group<T: Element>(
    op: TernaryOp,
    group: &LaneGroup,
    a: *const T,
    b: *const T,
    c: *const T,
    out: *mut T,
) {
    if !group.is_partial() {
        unsafe { T::ternary_block(op, group.lanes, a, b, c, out) };
        return;
    }

    let mut va = [T::default(); MAX_FIXED_WIDTH];
    let mut vb = [T::default(); MAX_FIXED_WIDTH];
    let mut vc = [T::default(); MAX_FIXED_WIDTH];
    let mut vo = [T::default(); MAX_FIXED_WIDTH];
    unsafe {
        ptr::copy_nonoverlapping(a, va.as_mut_ptr(), group.len);
        ptr::copy_nonoverlapping(b, vb.as_mut_ptr(), group.len);
        ptr::copy_nonoverlapping(c, vc.as_mut_ptr(), group.len);
        T::ternary_block(op, group.lanes, va.as_ptr(), vb.as_ptr(), vc.as_ptr(), vo.as_mut_ptr());
        ptr::copy_nonoverlapping(vo.as_ptr(), out, group.len);
    }
}

// ============================================================================
// Array API
// ============================================================================

/// Apply `op` to two `N`-element arrays on an explicit capability.
///
/// # Panics
///
/// Panics if `capability` is not available on this CPU.
#[inline]
pub fn binary_with<T: Element, const N: usize>(
    op: BinaryOp,
    a: &[T; N],
    b: &[T; N],
    out: &mut [T; N],
    capability: SimdCapability,
) {
    assert!(
        capability.is_available(),
        "SIMD capability not available: {capability}"
    );
    unsafe { binary_raw::<T, N>(op, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), capability) };
}

/// Apply `op` to one `N`-element array on an explicit capability.
///
/// # Panics
///
/// Panics if `capability` is not available on this CPU.
#[inline]
pub fn unary_with<T: Element, const N: usize>(
    op: UnaryOp,
    a: &[T; N],
    out: &mut [T; N],
    capability: SimdCapability,
) {
    assert!(
        capability.is_available(),
        "SIMD capability not available: {capability}"
    );
    unsafe { unary_raw::<T, N>(op, a.as_ptr(), out.as_mut_ptr(), capability) };
}

/// Apply `op` to three `N`-element arrays on an explicit capability.
///
/// # Panics
///
/// Panics if `capability` is not available on this CPU.
#[inline]
pub fn ternary_with<T: Element, const N: usize>(
    op: TernaryOp,
    a: &[T; N],
    b: &[T; N],
    c: &[T; N],
    out: &mut [T; N],
    capability: SimdCapability,
) {
    assert!(
        capability.is_available(),
        "SIMD capability not available: {capability}"
    );
    unsafe { ternary_raw::<T, N>(op, a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr(), capability) };
}

/// [`binary_with`] on the detected capability.
#[inline]
pub fn binary<T: Element, const N: usize>(op: BinaryOp, a: &[T; N], b: &[T; N], out: &mut [T; N]) {
    let capability = SimdCapability::cached();
    unsafe { binary_raw::<T, N>(op, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), capability) };
}

/// [`unary_with`] on the detected capability.
#[inline]
pub fn unary<T: Element, const N: usize>(op: UnaryOp, a: &[T; N], out: &mut [T; N]) {
    let capability = SimdCapability::cached();
    unsafe { unary_raw::<T, N>(op, a.as_ptr(), out.as_mut_ptr(), capability) };
}

/// [`ternary_with`] on the detected capability.
#[inline]
pub fn ternary<T: Element, const N: usize>(op: TernaryOp, a: &[T; N], b: &[T; N], c: &[T; N], out: &mut [T; N]) {
    let capability = SimdCapability::cached();
    unsafe { ternary_raw::<T, N>(op, a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr(), capability) };
}

// ============================================================================
// Checked slice API
// ============================================================================

fn as_array<'a, T, const N: usize>(operand: &'static str, s: &'a [T]) -> Result<&'a [T; N]> {
    s.try_into().map_err(|_| Error::LengthMismatch {
        operand,
        expected: N,
        actual: s.len(),
    })
}

fn as_array_mut<'a, T, const N: usize>(operand: &'static str, s: &'a mut [T]) -> Result<&'a mut [T; N]> {
    let actual = s.len();
    s.try_into().map_err(|_| Error::LengthMismatch {
        operand,
        expected: N,
        actual,
    })
}

/// Slice form of [`binary_with`]; every slice must hold exactly `N` elements.
///
/// Nothing is written unless all checks pass.
pub fn try_binary<T: Element, const N: usize>(
    op: BinaryOp,
    a: &[T],
    b: &[T],
    out: &mut [T],
    capability: SimdCapability,
) -> Result<()> {
    if !capability.is_available() {
        return Err(Error::UnsupportedCapability(capability));
    }
    let a = as_array::<T, N>("a", a)?;
    let b = as_array::<T, N>("b", b)?;
    let out = as_array_mut::<T, N>("out", out)?;
    unsafe { binary_raw::<T, N>(op, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), capability) };
    Ok(())
}

/// Slice form of [`unary_with`]; both slices must hold exactly `N` elements.
pub fn try_unary<T: Element, const N: usize>(
    op: UnaryOp,
    a: &[T],
    out: &mut [T],
    capability: SimdCapability,
) -> Result<()> {
    if !capability.is_available() {
        return Err(Error::UnsupportedCapability(capability));
    }
    let a = as_array::<T, N>("a", a)?;
    let out = as_array_mut::<T, N>("out", out)?;
    unsafe { unary_raw::<T, N>(op, a.as_ptr(), out.as_mut_ptr(), capability) };
    Ok(())
}

/// Slice form of [`ternary_with`]; every slice must hold exactly `N` elements.
pub fn try_ternary<T: Element, const N: usize>(
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
    let a = as_array::<T, N>("a", a)?;
    let b = as_array::<T, N>("b", b)?;
    let c = as_array::<T, N>("c", c)?;
    let out = as_array_mut::<T, N>("out", out)?;
    unsafe { ternary_raw::<T, N>(op, a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr(), capability) };
    Ok(())
}

// ============================================================================
// Named kernels
// ============================================================================

macro_rules! fixed_binary_kernels {
    ($op:ident, $expr:literal: $($name:ident => $ty:ty, $n:literal;)*) => {
        $(
            #[doc = concat!("`out[i] = ", $expr, "` over ", stringify!($n), " `", stringify!($ty), "` elements.")]
            #[inline]
            pub fn $name(a: &[$ty; $n], b: &[$ty; $n], out: &mut [$ty; $n]) {
                binary::<$ty, $n>(BinaryOp::$op, a, b, out);
            }
        )*
    };
}

fixed_binary_kernels! { Add, "a[i] + b[i]":
    add_f32x2 => f32, 2;
    add_f32x3 => f32, 3;
    add_f32x4 => f32, 4;
    add_f32x8 => f32, 8;
    add_f32x16 => f32, 16;
    add_f64x2 => f64, 2;
    add_f64x3 => f64, 3;
    add_f64x4 => f64, 4;
    add_f64x8 => f64, 8;
    add_f64x16 => f64, 16;
}

fixed_binary_kernels! { Sub, "a[i] - b[i]":
    sub_f32x2 => f32, 2;
    sub_f32x3 => f32, 3;
    sub_f32x4 => f32, 4;
    sub_f32x8 => f32, 8;
    sub_f32x16 => f32, 16;
    sub_f64x2 => f64, 2;
    sub_f64x3 => f64, 3;
    sub_f64x4 => f64, 4;
    sub_f64x8 => f64, 8;
    sub_f64x16 => f64, 16;
}

fixed_binary_kernels! { Min, "a[i] < b[i] ? a[i] : b[i]":
    min_f32x2 => f32, 2;
    min_f32x3 => f32, 3;
    min_f32x4 => f32, 4;
    min_f32x8 => f32, 8;
    min_f32x16 => f32, 16;
    min_f64x2 => f64, 2;
    min_f64x3 => f64, 3;
    min_f64x4 => f64, 4;
    min_f64x8 => f64, 8;
    min_f64x16 => f64, 16;
}

fixed_binary_kernels! { Max, "a[i] > b[i] ? a[i] : b[i]":
    max_f32x2 => f32, 2;
    max_f32x3 => f32, 3;
    max_f32x4 => f32, 4;
    max_f32x8 => f32, 8;
    max_f32x16 => f32, 16;
    max_f64x2 => f64, 2;
    max_f64x3 => f64, 3;
    max_f64x4 => f64, 4;
    max_f64x8 => f64, 8;
    max_f64x16 => f64, 16;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp<const N: usize>(scale: f32, shift: f32) -> [f32; N] {
        std::array::from_fn(|i| i as f32 * scale + shift)
    }

    #[test]
    fn add_f32x4_example() {
        let mut out = [0.0; 4];
        add_f32x4(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0], &mut out);
        assert_eq!(out, [11.0, 22.0, 33.0, 44.0]);
    }

    #[test]
    fn sub_f64x3_example() {
        let mut out = [0.0; 3];
        sub_f64x3(&[5.0, 4.0, 3.0], &[1.0, 1.0, 1.0], &mut out);
        assert_eq!(out, [4.0, 3.0, 2.0]);
    }

    #[test]
    fn min_max_f32x3_example() {
        let a = [1.0f32, -2.0, 3.0];
        let b = [0.5f32, 4.0, 3.0];
        let mut out = [0.0; 3];
        min_f32x3(&a, &b, &mut out);
        assert_eq!(out, [0.5, -2.0, 3.0]);
        max_f32x3(&a, &b, &mut out);
        assert_eq!(out, [1.0, 4.0, 3.0]);
    }

    #[test]
    fn ternary_matches_scalar_on_every_capability() {
        fn check<const N: usize>() {
            let a = ramp::<N>(0.75, -3.0);
            let b = ramp::<N>(-0.5, 2.5);
            let c = ramp::<N>(0.125, -0.25);
            for cap in SimdCapability::available() {
                for op in TernaryOp::ALL {
                    let mut out = [f32::NAN; N];
                    ternary_with(op, &a, &b, &c, &mut out, cap);
                    for i in 0..N {
                        let expected = op.apply(a[i], b[i], c[i]);
                        assert!(
                            out[i].to_bits() == expected.to_bits() || (out[i].is_nan() && expected.is_nan()),
                            "{op} x{N} on {cap}, lane {i}"
                        );
                    }
                }
            }
        }
        check::<2>();
        check::<3>();
        check::<4>();
        check::<8>();
        check::<13>();
        check::<16>();
    }

    #[test]
    fn ternary_width_three_leaves_fourth_slot_untouched() {
        let a = [5.0f64, -5.0, 0.5, 1000.0];
        let lo = [0.0f64; 4];
        let hi = [1.0f64; 4];
        for cap in SimdCapability::available() {
            let mut out = [0.0f64, 0.0, 0.0, -42.0];
            unsafe {
                ternary_raw::<f64, 3>(TernaryOp::Clamp, a.as_ptr(), lo.as_ptr(), hi.as_ptr(), out.as_mut_ptr(), cap)
            };
            assert_eq!(out, [1.0, 0.0, 0.5, -42.0], "on {cap}");
        }
    }

    #[test]
    fn try_ternary_names_the_short_operand() {
        let mut out = [0.0f32; 4];
        let err = try_ternary::<f32, 4>(TernaryOp::Lerp, &[0.0; 4], &[1.0; 4], &[0.5; 2], &mut out, SimdCapability::Scalar)
            .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { operand: "c", expected: 4, actual: 2 }));
        try_ternary::<f32, 4>(TernaryOp::Lerp, &[0.0; 4], &[1.0; 4], &[0.5; 4], &mut out, SimdCapability::Scalar).unwrap();
        assert_eq!(out, [0.5; 4]);
    }

    #[test]
    fn every_capability_agrees_with_scalar() {
        fn check<const N: usize>() {
            let a = ramp::<N>(1.5, -7.25);
            let b = ramp::<N>(-0.75, 2.0);
            for cap in SimdCapability::available() {
                for op in BinaryOp::ALL {
                    let mut out = [f32::NAN; N];
                    binary_with(op, &a, &b, &mut out, cap);
                    for i in 0..N {
                        assert_eq!(out[i].to_bits(), op.apply(a[i], b[i]).to_bits(), "{op} x{N} on {cap}, lane {i}");
                    }
                }
                let mut out = [f32::NAN; N];
                unary_with(UnaryOp::Abs, &a, &mut out, cap);
                for i in 0..N {
                    assert_eq!(out[i], a[i].abs(), "abs x{N} on {cap}, lane {i}");
                }
            }
        }
        check::<1>();
        check::<2>();
        check::<3>();
        check::<4>();
        check::<5>();
        check::<7>();
        check::<8>();
        check::<16>();
    }

    #[test]
    fn width_three_leaves_fourth_slot_untouched() {
        let a = [1.0f32, 2.0, 3.0, 1000.0];
        let b = [4.0f32, 5.0, 6.0, 2000.0];
        let mut out = [0.0f32, 0.0, 0.0, -42.0];
        for cap in SimdCapability::available() {
            unsafe {
                binary_raw::<f32, 3>(BinaryOp::Add, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), cap)
            };
            assert_eq!(out, [5.0, 7.0, 9.0, -42.0], "on {cap}");
        }
    }

    #[test]
    fn in_place_through_identical_pointers() {
        for cap in SimdCapability::available() {
            let mut buf: [f64; 16] = std::array::from_fn(|i| i as f64 - 8.0);
            let b = [0.5f64; 16];
            let p = buf.as_mut_ptr();
            unsafe { binary_raw::<f64, 16>(BinaryOp::Sub, p, b.as_ptr(), p, cap) };
            for (i, v) in buf.iter().enumerate() {
                assert_eq!(*v, i as f64 - 8.5);
            }
            unsafe { unary_raw::<f64, 16>(UnaryOp::Abs, p, p, cap) };
            for (i, v) in buf.iter().enumerate() {
                assert_eq!(*v, (i as f64 - 8.5).abs());
            }
        }
    }

    #[test]
    fn try_binary_rejects_wrong_lengths() {
        let cap = SimdCapability::Scalar;
        let mut out = [0.0f32; 4];
        let err = try_binary::<f32, 4>(BinaryOp::Add, &[1.0; 3], &[1.0; 4], &mut out, cap).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                operand: "a",
                expected: 4,
                actual: 3
            }
        );
        let err = try_unary::<f32, 4>(UnaryOp::Abs, &[1.0; 4], &mut out[..2], cap).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { operand: "out", .. }));
        assert_eq!(out, [0.0; 4]);
    }

    #[test]
    fn try_binary_accepts_exact_lengths() {
        let mut out = vec![0.0f64; 8];
        let a: Vec<f64> = (0..8).map(f64::from).collect();
        try_binary::<f64, 8>(BinaryOp::Add, &a, &a, &mut out, SimdCapability::cached()).unwrap();
        assert_eq!(out, (0..8).map(|i| 2.0 * f64::from(i)).collect::<Vec<_>>());
    }
}
