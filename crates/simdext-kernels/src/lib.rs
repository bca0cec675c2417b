//! Elementwise SIMD kernels over `f32` and `f64` buffers.
//!
//! Provides runtime-detected SIMD implementations for:
//! - fixed-width kernels over 2, 3, 4, 8 and 16 elements (`add_f32x4`, ...)
//! - variable-length kernels over any element count (`add_f32`, ...)
//! - absolute value in both forms (`abs_f64x3`, `abs_f64`, ...)
//! - min/max, floor, fract, sign, reciprocal and reciprocal square root
//! - the three-input clamp, lerp and smoothstep ([`math`])
//!
//! On x86/x86_64 systems, automatically uses AVX-512, AVX2 or SSE2; on
//! aarch64, NEON. Falls back to scalar on all other architectures. Every path
//! produces bit-identical results: each lane evaluates the same correctly
//! rounded IEEE-754 operations in the same order as the scalar definition in
//! [`op`], with no fused multiply-add and no hardware estimates.
//!
//! The hot path never allocates and never reports errors; the `try_*` entry
//! points in [`fixed`] and [`variable`] validate lengths up front.

pub mod abs;
mod arch;
pub mod capability;
pub mod element;
pub mod error;
pub mod fixed;
pub mod math;
pub mod op;
pub mod plan;
pub mod variable;

pub use abs::{
    abs_f32, abs_f32x2, abs_f32x3, abs_f32x4, abs_f32x8, abs_f32x16, abs_f64, abs_f64x2, abs_f64x3,
    abs_f64x4, abs_f64x8, abs_f64x16,
};
pub use capability::SimdCapability;
pub use element::Element;
pub use error::{Error, Result};
pub use fixed::{
    add_f32x2, add_f32x3, add_f32x4, add_f32x8, add_f32x16, add_f64x2, add_f64x3, add_f64x4,
    add_f64x8, add_f64x16, max_f32x2, max_f32x3, max_f32x4, max_f32x8, max_f32x16, max_f64x2,
    max_f64x3, max_f64x4, max_f64x8, max_f64x16, min_f32x2, min_f32x3, min_f32x4, min_f32x8,
    min_f32x16, min_f64x2, min_f64x3, min_f64x4, min_f64x8, min_f64x16, sub_f32x2, sub_f32x3, sub_f32x4, sub_f32x8, sub_f32x16, sub_f64x2,
    sub_f64x3, sub_f64x4, sub_f64x8, sub_f64x16,
};
pub use math::{
    clamp_f32, clamp_f32x2, clamp_f32x3, clamp_f32x4, clamp_f32x8, clamp_f32x16, clamp_f64,
    clamp_f64x2, clamp_f64x3, clamp_f64x4, clamp_f64x8, clamp_f64x16, floor_f32, floor_f32x2,
    floor_f32x3, floor_f32x4, floor_f32x8, floor_f32x16, floor_f64, floor_f64x2, floor_f64x3,
    floor_f64x4, floor_f64x8, floor_f64x16, fract_f32, fract_f32x2, fract_f32x3, fract_f32x4,
    fract_f32x8, fract_f32x16, fract_f64, fract_f64x2, fract_f64x3, fract_f64x4, fract_f64x8,
    fract_f64x16, lerp_f32, lerp_f32x2, lerp_f32x3, lerp_f32x4, lerp_f32x8, lerp_f32x16, lerp_f64,
    lerp_f64x2, lerp_f64x3, lerp_f64x4, lerp_f64x8, lerp_f64x16, recip_f32, recip_f32x2,
    recip_f32x3, recip_f32x4, recip_f32x8, recip_f32x16, recip_f64, recip_f64x2, recip_f64x3,
    recip_f64x4, recip_f64x8, recip_f64x16, rsqrt_f32, rsqrt_f32x2, rsqrt_f32x3, rsqrt_f32x4,
    rsqrt_f32x8, rsqrt_f32x16, rsqrt_f64, rsqrt_f64x2, rsqrt_f64x3, rsqrt_f64x4, rsqrt_f64x8,
    rsqrt_f64x16, sign_f32, sign_f32x2, sign_f32x3, sign_f32x4, sign_f32x8, sign_f32x16, sign_f64,
    sign_f64x2, sign_f64x3, sign_f64x4, sign_f64x8, sign_f64x16, smoothstep_f32, smoothstep_f32x2,
    smoothstep_f32x3, smoothstep_f32x4, smoothstep_f32x8, smoothstep_f32x16, smoothstep_f64,
    smoothstep_f64x2, smoothstep_f64x3, smoothstep_f64x4, smoothstep_f64x8, smoothstep_f64x16,
};
pub use op::{BinaryOp, TernaryOp, UnaryOp};
pub use plan::{FIXED_WIDTHS, LaneGroup, LanePlan, MAX_FIXED_WIDTH, plan};
pub use variable::{
    add_f32, add_f64, max_f32, max_f64, min_f32, min_f64, sub_f32, sub_f64,
};
