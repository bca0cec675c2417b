//! Absolute-value kernels, fixed-width and variable-length.
//!
//! Same lane plans and tails as the binary kernels with a single input. The
//! vector path clears the sign bit; the scalar tail does the same, so
//! `abs(-0.0)` is `+0.0` on every path.

use crate::fixed;
use crate::op::UnaryOp;
use crate::variable;

macro_rules! fixed_abs_kernels {
    ($($name:ident => $ty:ty, $n:literal;)*) => {
        $(
            #[doc = concat!("`out[i] = |a[i]|` over ", stringify!($n), " `", stringify!($ty), "` elements.")]
            #[inline]
            pub fn $name(a: &[$ty; $n], out: &mut [$ty; $n]) {
                fixed::unary::<$ty, $n>(UnaryOp::Abs, a, out);
            }
        )*
    };
}

fixed_abs_kernels! {
    abs_f32x2 => f32, 2;
    abs_f32x3 => f32, 3;
    abs_f32x4 => f32, 4;
    abs_f32x8 => f32, 8;
    abs_f32x16 => f32, 16;
    abs_f64x2 => f64, 2;
    abs_f64x3 => f64, 3;
    abs_f64x4 => f64, 4;
    abs_f64x8 => f64, 8;
    abs_f64x16 => f64, 16;
}

/// `out[i] = |a[i]|` over `f32` slices of equal length.
#[inline]
pub fn abs_f32(a: &[f32], out: &mut [f32]) {
    variable::unary(UnaryOp::Abs, a, out);
}

/// `out[i] = |a[i]|` over `f64` slices of equal length.
#[inline]
pub fn abs_f64(a: &[f64], out: &mut [f64]) {
    variable::unary(UnaryOp::Abs, a, out);
}
