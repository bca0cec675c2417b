//! Rounding, sign, reciprocal and interpolation kernels.
//!
//! Named fixed-width (`floor_f32x4`, `clamp_f64x3`, ...) and variable-length
//! (`floor_f32`, `lerp_f64`, ...) entry points over [`UnaryOp`] and
//! [`TernaryOp`]. Ternary kernels take `(a, b, c)` in the operand order of
//! the matching op: `clamp(x, lo, hi)`, `lerp(from, to, t)` and
//! `smoothstep(edge0, edge1, x)`.

use crate::fixed;
use crate::op::{TernaryOp, UnaryOp};
use crate::variable;

macro_rules! unary_kernels {
    ($op:ident, $doc:literal:
        fixed: [$($name:ident => $ty:ty, $n:literal;)*]
        variable: [$($vname:ident => $vty:ty;)*]
    ) => {
        $(
            #[doc = concat!($doc, " over ", stringify!($n), " `", stringify!($ty), "` elements.")]
            #[inline]
            pub fn $name(a: &[$ty; $n], out: &mut [$ty; $n]) {
                fixed::unary::<$ty, $n>(UnaryOp::$op, a, out);
            }
        )*
        $(
            #[doc = concat!($doc, " over `", stringify!($vty), "` slices of equal length.")]
            #[inline]
            pub fn $vname(a: &[$vty], out: &mut [$vty]) {
                variable::unary(UnaryOp::$op, a, out);
            }
        )*
    };
}

macro_rules! ternary_kernels {
    ($op:ident, $doc:literal:
        fixed: [$($name:ident => $ty:ty, $n:literal;)*]
        variable: [$($vname:ident => $vty:ty;)*]
    ) => {
        $(
            #[doc = concat!($doc, " over ", stringify!($n), " `", stringify!($ty), "` elements.")]
            #[inline]
            pub fn $name(a: &[$ty; $n], b: &[$ty; $n], c: &[$ty; $n], out: &mut [$ty; $n]) {
                fixed::ternary::<$ty, $n>(TernaryOp::$op, a, b, c, out);
            }
        )*
        $(
            #[doc = concat!($doc, " over `", stringify!($vty), "` slices of equal length.")]
            #[inline]
            pub fn $vname(a: &[$vty], b: &[$vty], c: &[$vty], out: &mut [$vty]) {
                variable::ternary(TernaryOp::$op, a, b, c, out);
            }
        )*
    };
}

unary_kernels! { Floor, "`out[i] = floor(a[i])`":
    fixed: [
        floor_f32x2 => f32, 2;
        floor_f32x3 => f32, 3;
        floor_f32x4 => f32, 4;
        floor_f32x8 => f32, 8;
        floor_f32x16 => f32, 16;
        floor_f64x2 => f64, 2;
        floor_f64x3 => f64, 3;
        floor_f64x4 => f64, 4;
        floor_f64x8 => f64, 8;
        floor_f64x16 => f64, 16;
    ]
    variable: [floor_f32 => f32; floor_f64 => f64;]
}

unary_kernels! { Fract, "`out[i] = a[i] - floor(a[i])`, at most the largest value below `1.0`,":
    fixed: [
        fract_f32x2 => f32, 2;
        fract_f32x3 => f32, 3;
        fract_f32x4 => f32, 4;
        fract_f32x8 => f32, 8;
        fract_f32x16 => f32, 16;
        fract_f64x2 => f64, 2;
        fract_f64x3 => f64, 3;
        fract_f64x4 => f64, 4;
        fract_f64x8 => f64, 8;
        fract_f64x16 => f64, 16;
    ]
    variable: [fract_f32 => f32; fract_f64 => f64;]
}

unary_kernels! { Sign, "`out[i]` is `1`, `-1` or `+0` by the sign of `a[i]`":
    fixed: [
        sign_f32x2 => f32, 2;
        sign_f32x3 => f32, 3;
        sign_f32x4 => f32, 4;
        sign_f32x8 => f32, 8;
        sign_f32x16 => f32, 16;
        sign_f64x2 => f64, 2;
        sign_f64x3 => f64, 3;
        sign_f64x4 => f64, 4;
        sign_f64x8 => f64, 8;
        sign_f64x16 => f64, 16;
    ]
    variable: [sign_f32 => f32; sign_f64 => f64;]
}

unary_kernels! { Recip, "`out[i] = 1 / a[i]`":
    fixed: [
        recip_f32x2 => f32, 2;
        recip_f32x3 => f32, 3;
        recip_f32x4 => f32, 4;
        recip_f32x8 => f32, 8;
        recip_f32x16 => f32, 16;
        recip_f64x2 => f64, 2;
        recip_f64x3 => f64, 3;
        recip_f64x4 => f64, 4;
        recip_f64x8 => f64, 8;
        recip_f64x16 => f64, 16;
    ]
    variable: [recip_f32 => f32; recip_f64 => f64;]
}

unary_kernels! { Rsqrt, "`out[i] = 1 / sqrt(a[i])`":
    fixed: [
        rsqrt_f32x2 => f32, 2;
        rsqrt_f32x3 => f32, 3;
        rsqrt_f32x4 => f32, 4;
        rsqrt_f32x8 => f32, 8;
        rsqrt_f32x16 => f32, 16;
        rsqrt_f64x2 => f64, 2;
        rsqrt_f64x3 => f64, 3;
        rsqrt_f64x4 => f64, 4;
        rsqrt_f64x8 => f64, 8;
        rsqrt_f64x16 => f64, 16;
    ]
    variable: [rsqrt_f32 => f32; rsqrt_f64 => f64;]
}

ternary_kernels! { Clamp, "`out[i] = min(max(a[i], b[i]), c[i])`":
    fixed: [
        clamp_f32x2 => f32, 2;
        clamp_f32x3 => f32, 3;
        clamp_f32x4 => f32, 4;
        clamp_f32x8 => f32, 8;
        clamp_f32x16 => f32, 16;
        clamp_f64x2 => f64, 2;
        clamp_f64x3 => f64, 3;
        clamp_f64x4 => f64, 4;
        clamp_f64x8 => f64, 8;
        clamp_f64x16 => f64, 16;
    ]
    variable: [clamp_f32 => f32; clamp_f64 => f64;]
}

ternary_kernels! { Lerp, "`out[i] = a[i] + c[i] * (b[i] - a[i])`":
    fixed: [
        lerp_f32x2 => f32, 2;
        lerp_f32x3 => f32, 3;
        lerp_f32x4 => f32, 4;
        lerp_f32x8 => f32, 8;
        lerp_f32x16 => f32, 16;
        lerp_f64x2 => f64, 2;
        lerp_f64x3 => f64, 3;
        lerp_f64x4 => f64, 4;
        lerp_f64x8 => f64, 8;
        lerp_f64x16 => f64, 16;
    ]
    variable: [lerp_f32 => f32; lerp_f64 => f64;]
}

ternary_kernels! { Smoothstep, "Hermite step of `c[i]` between edges `a[i]` and `b[i]`":
    fixed: [
        smoothstep_f32x2 => f32, 2;
        smoothstep_f32x3 => f32, 3;
        smoothstep_f32x4 => f32, 4;
        smoothstep_f32x8 => f32, 8;
        smoothstep_f32x16 => f32, 16;
        smoothstep_f64x2 => f64, 2;
        smoothstep_f64x3 => f64, 3;
        smoothstep_f64x4 => f64, 4;
        smoothstep_f64x8 => f64, 8;
        smoothstep_f64x16 => f64, 16;
    ]
    variable: [smoothstep_f32 => f32; smoothstep_f64 => f64;]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_and_fract_f32x4() {
        let a = [-1.5f32, -0.0, 2.25, 7.0];
        let mut out = [0.0; 4];
        floor_f32x4(&a, &mut out);
        assert_eq!(out, [-2.0, -0.0, 2.0, 7.0]);
        assert_eq!(out[1].to_bits(), (-0.0f32).to_bits());
        fract_f32x4(&a, &mut out);
        assert_eq!(out, [0.5, 0.0, 0.25, 0.0]);
    }

    #[test]
    fn fract_stays_below_one() {
        let a = [-1e-10f64, -1e-300, f64::INFINITY];
        let mut out = [0.0; 3];
        fract_f64x3(&a, &mut out);
        for v in out {
            assert!(v < 1.0, "{v}");
        }
    }

    #[test]
    fn sign_f64x3_zero_and_nan() {
        let mut out = [9.0; 3];
        sign_f64x3(&[-0.0, f64::NAN, -2.0], &mut out);
        assert_eq!(out.map(f64::to_bits), [0.0f64, 0.0, -1.0].map(f64::to_bits));
    }

    #[test]
    fn recip_and_rsqrt_are_exact_on_powers_of_two() {
        let a: [f32; 16] = std::array::from_fn(|i| (1u32 << (2 * (i % 8))) as f32);
        let mut out = [0.0; 16];
        recip_f32x16(&a, &mut out);
        for i in 0..16 {
            assert_eq!(out[i], 1.0 / a[i]);
        }
        rsqrt_f32x16(&a, &mut out);
        for i in 0..16 {
            assert_eq!(out[i], 1.0 / (1u32 << (i % 8)) as f32);
        }
    }

    #[test]
    fn clamp_f32x3_example() {
        let mut out = [0.0; 3];
        clamp_f32x3(&[-2.0, 0.5, 9.0], &[0.0; 3], &[1.0; 3], &mut out);
        assert_eq!(out, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let from = [2.0f64, -4.0, 10.0, 0.0];
        let to = [6.0f64, 4.0, 10.0, 1.0];
        let mut out = [0.0; 4];
        lerp_f64x4(&from, &to, &[0.0; 4], &mut out);
        assert_eq!(out, from);
        lerp_f64x4(&from, &to, &[1.0; 4], &mut out);
        assert_eq!(out, to);
        lerp_f64x4(&from, &to, &[0.5; 4], &mut out);
        assert_eq!(out, [4.0, 0.0, 10.0, 0.5]);
    }

    #[test]
    fn smoothstep_variable_any_count() {
        for count in [0usize, 1, 3, 8, 17, 33] {
            let x: Vec<f32> = (0..count).map(|i| i as f32 / 8.0 - 1.0).collect();
            let e0 = vec![0.0f32; count];
            let e1 = vec![2.0f32; count];
            let mut out = vec![f32::NAN; count];
            smoothstep_f32(&e0, &e1, &x, &mut out);
            for i in 0..count {
                let t = (x[i] / 2.0).clamp(0.0, 1.0);
                assert_eq!(out[i], t * t * (3.0 - 2.0 * t), "count {count} lane {i}");
            }
        }
    }

    #[test]
    fn variable_unary_kernels() {
        let a = [-2.5f64, -1.0, 0.0, 0.25, 3.75];
        let mut out = [0.0; 5];
        floor_f64(&a, &mut out);
        assert_eq!(out, [-3.0, -1.0, 0.0, 0.0, 3.0]);
        sign_f64(&a, &mut out);
        assert_eq!(out, [-1.0, -1.0, 0.0, 1.0, 1.0]);
        recip_f64(&[4.0, 0.5, -2.0, 8.0, 1.0], &mut out);
        assert_eq!(out, [0.25, 2.0, -0.5, 0.125, 1.0]);

        let mut out = [0.0f32; 3];
        rsqrt_f32(&[4.0, 0.25, 1.0], &mut out);
        assert_eq!(out, [0.5, 2.0, 1.0]);
        fract_f32(&[1.75, -0.75, 3.0], &mut out);
        assert_eq!(out, [0.75, 0.25, 0.0]);
    }
}
