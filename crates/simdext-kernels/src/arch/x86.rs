//! SSE2 / AVX / AVX-512 register kernels.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::scalar;
use crate::op::{BinaryOp, TernaryOp, UnaryOp};

// ============================================================================
// Helpers
// ============================================================================

// Two f32 lanes travel in the low 64 bits of an xmm register.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load_f32x2(p: *const f32) -> __m128 {
    unsafe { _mm_castsi128_ps(_mm_loadl_epi64(p as *const __m128i)) }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store_f32x2(p: *mut f32, v: __m128) {
    unsafe { _mm_storel_epi64(p as *mut __m128i, _mm_castps_si128(v)) }
}

#[inline]
#[target_feature(enable = "sse2")]
fn abs_ps128(v: __m128) -> __m128 {
    _mm_andnot_ps(_mm_set1_ps(-0.0), v)
}

#[inline]
#[target_feature(enable = "sse2")]
fn abs_pd128(v: __m128d) -> __m128d {
    _mm_andnot_pd(_mm_set1_pd(-0.0), v)
}

#[inline]
#[target_feature(enable = "avx")]
fn abs_ps256(v: __m256) -> __m256 {
    _mm256_andnot_ps(_mm256_set1_ps(-0.0), v)
}

#[inline]
#[target_feature(enable = "avx")]
fn abs_pd256(v: __m256d) -> __m256d {
    _mm256_andnot_pd(_mm256_set1_pd(-0.0), v)
}

// SSE2 has no rounding instruction. Adding and subtracting 2^23 rounds |v|
// to the nearest integer; the sign is restored and lanes that landed above v
// step down by one. Lanes with |v| >= 2^23 (and NaN) are already integral and
// pass through.
#[inline]
#[target_feature(enable = "sse2")]
fn floor_ps128(v: __m128) -> __m128 {
    let sign = _mm_set1_ps(-0.0);
    let magic = _mm_set1_ps(8_388_608.0);
    let av = _mm_andnot_ps(sign, v);
    let r = _mm_sub_ps(_mm_add_ps(av, magic), magic);
    let r = _mm_or_ps(r, _mm_and_ps(sign, v));
    let r = _mm_sub_ps(r, _mm_and_ps(_mm_cmpgt_ps(r, v), _mm_set1_ps(1.0)));
    let small = _mm_cmplt_ps(av, magic);
    _mm_or_ps(_mm_and_ps(small, r), _mm_andnot_ps(small, v))
}

// Same as `floor_ps128` with 2^52.
#[inline]
#[target_feature(enable = "sse2")]
fn floor_pd128(v: __m128d) -> __m128d {
    let sign = _mm_set1_pd(-0.0);
    let magic = _mm_set1_pd(4_503_599_627_370_496.0);
    let av = _mm_andnot_pd(sign, v);
    let r = _mm_sub_pd(_mm_add_pd(av, magic), magic);
    let r = _mm_or_pd(r, _mm_and_pd(sign, v));
    let r = _mm_sub_pd(r, _mm_and_pd(_mm_cmpgt_pd(r, v), _mm_set1_pd(1.0)));
    let small = _mm_cmplt_pd(av, magic);
    _mm_or_pd(_mm_and_pd(small, r), _mm_andnot_pd(small, v))
}

#[inline]
#[target_feature(enable = "avx512f")]
fn floor_ps512(v: __m512) -> __m512 {
    _mm512_roundscale_ps::<{ _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC }>(v)
}

#[inline]
#[target_feature(enable = "avx512f")]
fn floor_pd512(v: __m512d) -> __m512d {
    _mm512_roundscale_pd::<{ _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC }>(v)
}

#[inline]
#[target_feature(enable = "sse2")]
fn sign_ps128(v: __m128) -> __m128 {
    let zero = _mm_setzero_ps();
    let pos = _mm_and_ps(_mm_cmpgt_ps(v, zero), _mm_set1_ps(1.0));
    let neg = _mm_and_ps(_mm_cmplt_ps(v, zero), _mm_set1_ps(-1.0));
    _mm_or_ps(pos, neg)
}

#[inline]
#[target_feature(enable = "sse2")]
fn sign_pd128(v: __m128d) -> __m128d {
    let zero = _mm_setzero_pd();
    let pos = _mm_and_pd(_mm_cmpgt_pd(v, zero), _mm_set1_pd(1.0));
    let neg = _mm_and_pd(_mm_cmplt_pd(v, zero), _mm_set1_pd(-1.0));
    _mm_or_pd(pos, neg)
}

#[inline]
#[target_feature(enable = "avx")]
fn sign_ps256(v: __m256) -> __m256 {
    let zero = _mm256_setzero_ps();
    let pos = _mm256_and_ps(_mm256_cmp_ps::<_CMP_GT_OQ>(v, zero), _mm256_set1_ps(1.0));
    let neg = _mm256_and_ps(_mm256_cmp_ps::<_CMP_LT_OQ>(v, zero), _mm256_set1_ps(-1.0));
    _mm256_or_ps(pos, neg)
}

#[inline]
#[target_feature(enable = "avx")]
fn sign_pd256(v: __m256d) -> __m256d {
    let zero = _mm256_setzero_pd();
    let pos = _mm256_and_pd(_mm256_cmp_pd::<_CMP_GT_OQ>(v, zero), _mm256_set1_pd(1.0));
    let neg = _mm256_and_pd(_mm256_cmp_pd::<_CMP_LT_OQ>(v, zero), _mm256_set1_pd(-1.0));
    _mm256_or_pd(pos, neg)
}

#[inline]
#[target_feature(enable = "avx512f")]
fn sign_ps512(v: __m512) -> __m512 {
    let zero = _mm512_setzero_ps();
    let gt = _mm512_cmp_ps_mask::<_CMP_GT_OQ>(v, zero);
    let lt = _mm512_cmp_ps_mask::<_CMP_LT_OQ>(v, zero);
    let r = _mm512_mask_blend_ps(gt, zero, _mm512_set1_ps(1.0));
    _mm512_mask_blend_ps(lt, r, _mm512_set1_ps(-1.0))
}

#[inline]
#[target_feature(enable = "avx512f")]
fn sign_pd512(v: __m512d) -> __m512d {
    let zero = _mm512_setzero_pd();
    let gt = _mm512_cmp_pd_mask::<_CMP_GT_OQ>(v, zero);
    let lt = _mm512_cmp_pd_mask::<_CMP_LT_OQ>(v, zero);
    let r = _mm512_mask_blend_pd(gt, zero, _mm512_set1_pd(1.0));
    _mm512_mask_blend_pd(lt, r, _mm512_set1_pd(-1.0))
}

// ============================================================================
// SSE2 Implementation
// ============================================================================

register_kernels! {
    feature: "sse2",
    elem: f32,
    load: load_f32x2,
    store: store_f32x2,
    splat: _mm_set1_ps,
    add: _mm_add_ps,
    sub: _mm_sub_ps,
    mul: _mm_mul_ps,
    div: _mm_div_ps,
    min: _mm_min_ps,
    max: _mm_max_ps,
    abs: abs_ps128,
    floor: floor_ps128,
    sqrt: _mm_sqrt_ps,
    sign: sign_ps128,
    binary: binary_f32x2,
    unary: unary_f32x2,
    ternary: ternary_f32x2,
}

register_kernels! {
    feature: "sse2",
    elem: f32,
    load: _mm_loadu_ps,
    store: _mm_storeu_ps,
    splat: _mm_set1_ps,
    add: _mm_add_ps,
    sub: _mm_sub_ps,
    mul: _mm_mul_ps,
    div: _mm_div_ps,
    min: _mm_min_ps,
    max: _mm_max_ps,
    abs: abs_ps128,
    floor: floor_ps128,
    sqrt: _mm_sqrt_ps,
    sign: sign_ps128,
    binary: binary_f32x4,
    unary: unary_f32x4,
    ternary: ternary_f32x4,
}

register_kernels! {
    feature: "sse2",
    elem: f64,
    load: _mm_loadu_pd,
    store: _mm_storeu_pd,
    splat: _mm_set1_pd,
    add: _mm_add_pd,
    sub: _mm_sub_pd,
    mul: _mm_mul_pd,
    div: _mm_div_pd,
    min: _mm_min_pd,
    max: _mm_max_pd,
    abs: abs_pd128,
    floor: floor_pd128,
    sqrt: _mm_sqrt_pd,
    sign: sign_pd128,
    binary: binary_f64x2,
    unary: unary_f64x2,
    ternary: ternary_f64x2,
}

// ============================================================================
// AVX Implementation
// ============================================================================

register_kernels! {
    feature: "avx",
    elem: f32,
    load: _mm256_loadu_ps,
    store: _mm256_storeu_ps,
    splat: _mm256_set1_ps,
    add: _mm256_add_ps,
    sub: _mm256_sub_ps,
    mul: _mm256_mul_ps,
    div: _mm256_div_ps,
    min: _mm256_min_ps,
    max: _mm256_max_ps,
    abs: abs_ps256,
    floor: _mm256_floor_ps,
    sqrt: _mm256_sqrt_ps,
    sign: sign_ps256,
    binary: binary_f32x8,
    unary: unary_f32x8,
    ternary: ternary_f32x8,
}

register_kernels! {
    feature: "avx",
    elem: f64,
    load: _mm256_loadu_pd,
    store: _mm256_storeu_pd,
    splat: _mm256_set1_pd,
    add: _mm256_add_pd,
    sub: _mm256_sub_pd,
    mul: _mm256_mul_pd,
    div: _mm256_div_pd,
    min: _mm256_min_pd,
    max: _mm256_max_pd,
    abs: abs_pd256,
    floor: _mm256_floor_pd,
    sqrt: _mm256_sqrt_pd,
    sign: sign_pd256,
    binary: binary_f64x4,
    unary: unary_f64x4,
    ternary: ternary_f64x4,
}

// ============================================================================
// AVX-512 Implementation
// ============================================================================

register_kernels! {
    feature: "avx512f",
    elem: f32,
    load: _mm512_loadu_ps,
    store: _mm512_storeu_ps,
    splat: _mm512_set1_ps,
    add: _mm512_add_ps,
    sub: _mm512_sub_ps,
    mul: _mm512_mul_ps,
    div: _mm512_div_ps,
    min: _mm512_min_ps,
    max: _mm512_max_ps,
    abs: _mm512_abs_ps,
    floor: floor_ps512,
    sqrt: _mm512_sqrt_ps,
    sign: sign_ps512,
    binary: binary_f32x16,
    unary: unary_f32x16,
    ternary: ternary_f32x16,
}

register_kernels! {
    feature: "avx512f",
    elem: f64,
    load: _mm512_loadu_pd,
    store: _mm512_storeu_pd,
    splat: _mm512_set1_pd,
    add: _mm512_add_pd,
    sub: _mm512_sub_pd,
    mul: _mm512_mul_pd,
    div: _mm512_div_pd,
    min: _mm512_min_pd,
    max: _mm512_max_pd,
    abs: _mm512_abs_pd,
    floor: floor_pd512,
    sqrt: _mm512_sqrt_pd,
    sign: sign_pd512,
    binary: binary_f64x8,
    unary: unary_f64x8,
    ternary: ternary_f64x8,
}

// ============================================================================
// Width dispatch
// ============================================================================

width_dispatch! {
    elem: f32,
    binary: binary_f32,
    unary: unary_f32,
    ternary: ternary_f32,
    widths: [
        16 => (binary_f32x16, unary_f32x16, ternary_f32x16),
        8 => (binary_f32x8, unary_f32x8, ternary_f32x8),
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
        8 => (binary_f64x8, unary_f64x8, ternary_f64x8),
        4 => (binary_f64x4, unary_f64x4, ternary_f64x4),
        2 => (binary_f64x2, unary_f64x2, ternary_f64x2),
    ],
}
