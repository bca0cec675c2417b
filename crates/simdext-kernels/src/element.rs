//! Floating point element types the kernels are instantiated for.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::arch;
use crate::op::{BinaryOp, TernaryOp, UnaryOp};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A lane element: `f32` or `f64`.
///
/// The scalar methods define the reference semantics; the block methods run
/// one vector register's worth of lanes on the current CPU.
pub trait Element:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Type tag used in kernel names (`"f32"` / `"f64"`).
    const TYPE_NAME: &'static str;

    /// `0.0`, positive.
    const ZERO: Self;
    /// `1.0`.
    const ONE: Self;
    /// `2.0`, a smoothstep coefficient.
    const TWO: Self;
    /// `3.0`, a smoothstep coefficient.
    const THREE: Self;

    /// Largest value below `1.0`; the upper bound of `fract`.
    const FRACT_MAX: Self;

    /// Absolute value by clearing the sign bit.
    fn abs(self) -> Self;

    /// Round toward negative infinity (exact).
    fn floor(self) -> Self;

    /// Correctly rounded square root.
    fn sqrt(self) -> Self;

    /// Whether the value is any NaN.
    fn is_nan(self) -> bool;

    /// Raw IEEE-754 bits, widened to `u64`.
    fn to_bits_u64(self) -> u64;

    /// Lossy conversion used by test-data generators.
    fn from_f64(value: f64) -> Self;

    /// Apply `op` to one register group of `width` lanes.
    ///
    /// # Safety
    ///
    /// `width` must be 1, 2, 4, 8 or 16 and no wider than the native lane
    /// count of a capability available on this CPU. `a` and `b` must be valid
    /// for `width` reads and `out` for `width` writes. `out` may equal `a` or
    /// `b` but must not partially overlap them.
    unsafe fn binary_block(
        op: BinaryOp,
        width: usize,
        a: *const Self,
        b: *const Self,
        out: *mut Self,
    );

    /// Unary counterpart of [`Element::binary_block`].
    ///
    /// # Safety
    ///
    /// Same contract as [`Element::binary_block`].
    unsafe fn unary_block(op: UnaryOp, width: usize, a: *const Self, out: *mut Self);

    /// Ternary counterpart of [`Element::binary_block`].
    ///
    /// # Safety
    ///
    /// Same contract as [`Element::binary_block`], with `c` valid for
    /// `width` reads as well.
    unsafe fn ternary_block(
        op: TernaryOp,
        width: usize,
        a: *const Self,
        b: *const Self,
        c: *const Self,
        out: *mut Self,
    );
}

impl Element for f32 {
    const TYPE_NAME: &'static str = "f32";

    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const THREE: Self = 3.0;
    const FRACT_MAX: Self = f32::from_bits(0x3f7f_ffff);

    #[inline(always)]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        f32::floor(self)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn to_bits_u64(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline(always)]
    unsafe fn binary_block(op: BinaryOp, width: usize, a: *const f32, b: *const f32, out: *mut f32) {
        unsafe { arch::binary_f32(op, width, a, b, out) }
    }

    #[inline(always)]
    unsafe fn unary_block(op: UnaryOp, width: usize, a: *const f32, out: *mut f32) {
        unsafe { arch::unary_f32(op, width, a, out) }
    }

    #[inline(always)]
    unsafe fn ternary_block(
        op: TernaryOp,
        width: usize,
        a: *const f32,
        b: *const f32,
        c: *const f32,
        out: *mut f32,
    ) {
        unsafe { arch::ternary_f32(op, width, a, b, c, out) }
    }
}

impl Element for f64 {
    const TYPE_NAME: &'static str = "f64";

    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const THREE: Self = 3.0;
    const FRACT_MAX: Self = f64::from_bits(0x3fef_ffff_ffff_ffff);

    #[inline(always)]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        f64::floor(self)
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn to_bits_u64(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline(always)]
    unsafe fn binary_block(op: BinaryOp, width: usize, a: *const f64, b: *const f64, out: *mut f64) {
        unsafe { arch::binary_f64(op, width, a, b, out) }
    }

    #[inline(always)]
    unsafe fn unary_block(op: UnaryOp, width: usize, a: *const f64, out: *mut f64) {
        unsafe { arch::unary_f64(op, width, a, out) }
    }

    #[inline(always)]
    unsafe fn ternary_block(
        op: TernaryOp,
        width: usize,
        a: *const f64,
        b: *const f64,
        c: *const f64,
        out: *mut f64,
    ) {
        unsafe { arch::ternary_f64(op, width, a, b, c, out) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(<f32 as Element>::TYPE_NAME, "f32");
        assert_eq!(<f64 as Element>::TYPE_NAME, "f64");
    }

    #[test]
    fn bits_widen_without_reinterpretation() {
        assert_eq!(1.0f32.to_bits_u64(), 0x3f80_0000);
        assert_eq!(1.0f64.to_bits_u64(), 0x3ff0_0000_0000_0000);
        assert_ne!((-0.0f32).to_bits_u64(), 0.0f32.to_bits_u64());
    }

    #[test]
    fn scalar_block_matches_scalar_ops() {
        let a = [-1.5f64];
        let b = [0.25f64];
        let mut out = [0.0f64];
        unsafe { f64::binary_block(BinaryOp::Sub, 1, a.as_ptr(), b.as_ptr(), out.as_mut_ptr()) };
        assert_eq!(out[0], -1.75);
        unsafe { f64::unary_block(UnaryOp::Abs, 1, a.as_ptr(), out.as_mut_ptr()) };
        assert_eq!(out[0], 1.5);
        let c = [2.0f64];
        unsafe { f64::ternary_block(TernaryOp::Clamp, 1, a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr()) };
        assert_eq!(out[0], 0.25);
    }

    #[test]
    fn fract_max_is_one_ulp_below_one() {
        assert_eq!(f32::FRACT_MAX, 1.0 - f32::EPSILON / 2.0);
        assert_eq!(f64::FRACT_MAX, 1.0 - f64::EPSILON / 2.0);
        assert!(f32::FRACT_MAX < 1.0);
    }
}
