//! NEON register kernels (aarch64).

use std::arch::aarch64::*;

use super::scalar;
use crate::op::{BinaryOp, TernaryOp, UnaryOp};

// `fmin`/`fmax` propagate NaN and order signed zeros, while the x86 rule
// returns the second operand. Select on a plain comparison instead.

#[inline]
#[target_feature(enable = "neon")]
fn min_f32x2(a: float32x2_t, b: float32x2_t) -> float32x2_t {
    vbsl_f32(vclt_f32(a, b), a, b)
}

#[inline]
#[target_feature(enable = "neon")]
fn max_f32x2(a: float32x2_t, b: float32x2_t) -> float32x2_t {
    vbsl_f32(vcgt_f32(a, b), a, b)
}

#[inline]
#[target_feature(enable = "neon")]
fn min_f32x4(a: float32x4_t, b: float32x4_t) -> float32x4_t {
    vbslq_f32(vcltq_f32(a, b), a, b)
}

#[inline]
#[target_feature(enable = "neon")]
fn max_f32x4(a: float32x4_t, b: float32x4_t) -> float32x4_t {
    vbslq_f32(vcgtq_f32(a, b), a, b)
}

#[inline]
#[target_feature(enable = "neon")]
fn min_f64x2(a: float64x2_t, b: float64x2_t) -> float64x2_t {
    vbslq_f64(vcltq_f64(a, b), a, b)
}

#[inline]
#[target_feature(enable = "neon")]
fn max_f64x2(a: float64x2_t, b: float64x2_t) -> float64x2_t {
    vbslq_f64(vcgtq_f64(a, b), a, b)
}

#[inline]
#[target_feature(enable = "neon")]
fn sign_f32x2(v: float32x2_t) -> float32x2_t {
    let zero = vdup_n_f32(0.0);
    let neg = vbsl_f32(vclt_f32(v, zero), vdup_n_f32(-1.0), zero);
    vbsl_f32(vcgt_f32(v, zero), vdup_n_f32(1.0), neg)
}

#[inline]
#[target_feature(enable = "neon")]
fn sign_f32x4(v: float32x4_t) -> float32x4_t {
    let zero = vdupq_n_f32(0.0);
    let neg = vbslq_f32(vcltq_f32(v, zero), vdupq_n_f32(-1.0), zero);
    vbslq_f32(vcgtq_f32(v, zero), vdupq_n_f32(1.0), neg)
}

#[inline]
#[target_feature(enable = "neon")]
fn sign_f64x2(v: float64x2_t) -> float64x2_t {
    let zero = vdupq_n_f64(0.0);
    let neg = vbslq_f64(vcltq_f64(v, zero), vdupq_n_f64(-1.0), zero);
    vbslq_f64(vcgtq_f64(v, zero), vdupq_n_f64(1.0), neg)
}

register_kernels! {
    feature: "neon",
    elem: f32,
    load: vld1_f32,
    store: vst1_f32,
    splat: vdup_n_f32,
    add: vadd_f32,
    sub: vsub_f32,
    mul: vmul_f32,
    div: vdiv_f32,
    min: min_f32x2,
    max: max_f32x2,
    abs: vabs_f32,
    floor: vrndm_f32,
    sqrt: vsqrt_f32,
    sign: sign_f32x2,
    binary: binary_f32x2,
    unary: unary_f32x2,
    ternary: ternary_f32x2,
}

register_kernels! {
    feature: "neon",
    elem: f32,
    load: vld1q_f32,
    store: vst1q_f32,
    splat: vdupq_n_f32,
    add: vaddq_f32,
    sub: vsubq_f32,
    mul: vmulq_f32,
    div: vdivq_f32,
    min: min_f32x4,
    max: max_f32x4,
    abs: vabsq_f32,
    floor: vrndmq_f32,
    sqrt: vsqrtq_f32,
    sign: sign_f32x4,
    binary: binary_f32x4,
    unary: unary_f32x4,
    ternary: ternary_f32x4,
}

register_kernels! {
    feature: "neon",
    elem: f64,
    load: vld1q_f64,
    store: vst1q_f64,
    splat: vdupq_n_f64,
    add: vaddq_f64,
    sub: vsubq_f64,
    mul: vmulq_f64,
    div: vdivq_f64,
    min: min_f64x2,
    max: max_f64x2,
    abs: vabsq_f64,
    floor: vrndmq_f64,
    sqrt: vsqrtq_f64,
    sign: sign_f64x2,
    binary: binary_f64x2,
    unary: unary_f64x2,
    ternary: ternary_f64x2,
}

width_dispatch! {
    elem: f32,
    binary: binary_f32,
    unary: unary_f32,
    ternary: ternary_f32,
    widths: [
        4 => (binary_f32x4, unary_f32x4, ternary_f32x4),
        2 => (binary_f32x2, unary_f32x2, ternary_f32x2),
    ],
}

width_dispatch! {
    elem: f64,
    binary: binary_f64,
    unary: unary_f64,
    ternary: ternary_f64,
    widths: [
        2 => (binary_f64x2, unary_f64x2, ternary_f64x2),
    ],
}
