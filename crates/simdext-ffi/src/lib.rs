//! C ABI surface for the simdext kernels.
//!
//! Every kernel is exported unmangled as `{op}_{type}{width}`:
//!
//! ```c
//! void add_f32x4(const float *a, const float *b, float *out);
//! void abs_f64x3(const double *a, double *out);
//! void sub_f32(const float *a, const float *b, float *out, size_t count);
//! void clamp_f32x4(const float *a, const float *b, const float *c, float *out);
//! ```
//!
//! The matching declarations live in `include/simdext.h`. Functions return
//! nothing and report nothing: buffer sizes are the caller's responsibility.
//! The instruction set is detected once per process on first call.

use simdext_kernels::fixed;
use simdext_kernels::variable;
use simdext_kernels::{BinaryOp, SimdCapability, TernaryOp, UnaryOp};

macro_rules! export_fixed_binary {
    ($op:ident: $($name:ident => $ty:ty, $n:literal;)*) => {
        $(
            /// # Safety
            ///
            #[doc = concat!("`a` and `b` must point to ", stringify!($n), " readable elements and `out` to ",
                stringify!($n), " writable elements. `out` may equal `a` or `b`.")]
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(a: *const $ty, b: *const $ty, out: *mut $ty) {
                unsafe {
                    fixed::binary_raw::<$ty, $n>(BinaryOp::$op, a, b, out, SimdCapability::cached())
                }
            }
        )*
    };
}

macro_rules! export_fixed_unary {
    ($op:ident: $($name:ident => $ty:ty, $n:literal;)*) => {
        $(
            /// # Safety
            ///
            #[doc = concat!("`a` must point to ", stringify!($n), " readable elements and `out` to ",
                stringify!($n), " writable elements. `out` may equal `a`.")]
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(a: *const $ty, out: *mut $ty) {
                unsafe { fixed::unary_raw::<$ty, $n>(UnaryOp::$op, a, out, SimdCapability::cached()) }
            }
        )*
    };
}

macro_rules! export_fixed_ternary {
    ($op:ident: $($name:ident => $ty:ty, $n:literal;)*) => {
        $(
            /// # Safety
            ///
            #[doc = concat!("`a`, `b` and `c` must point to ", stringify!($n), " readable elements and `out` to ",
                stringify!($n), " writable elements. `out` may equal any input.")]
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(a: *const $ty, b: *const $ty, c: *const $ty, out: *mut $ty) {
                unsafe {
                    fixed::ternary_raw::<$ty, $n>(TernaryOp::$op, a, b, c, out, SimdCapability::cached())
                }
            }
        )*
    };
}

macro_rules! export_variable_binary {
    ($($name:ident => $op:ident, $ty:ty;)*) => {
        $(
            /// # Safety
            ///
            /// `a` and `b` must point to `count` readable elements and `out` to
            /// `count` writable elements. With `count == 0` nothing is accessed.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(a: *const $ty, b: *const $ty, out: *mut $ty, count: usize) {
                unsafe { variable::binary_raw(BinaryOp::$op, a, b, out, count, SimdCapability::cached()) }
            }
        )*
    };
}

macro_rules! export_variable_unary {
    ($($name:ident => $op:ident, $ty:ty;)*) => {
        $(
            /// # Safety
            ///
            /// `a` must point to `count` readable elements and `out` to `count`
            /// writable elements. With `count == 0` nothing is accessed.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(a: *const $ty, out: *mut $ty, count: usize) {
                unsafe { variable::unary_raw(UnaryOp::$op, a, out, count, SimdCapability::cached()) }
            }
        )*
    };
}

macro_rules! export_variable_ternary {
    ($($name:ident => $op:ident, $ty:ty;)*) => {
        $(
            /// # Safety
            ///
            /// `a`, `b` and `c` must point to `count` readable elements and `out`
            /// to `count` writable elements. With `count == 0` nothing is accessed.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(
                a: *const $ty,
                b: *const $ty,
                c: *const $ty,
                out: *mut $ty,
                count: usize,
            ) {
                unsafe { variable::ternary_raw(TernaryOp::$op, a, b, c, out, count, SimdCapability::cached()) }
            }
        )*
    };
}

// Add

export_fixed_binary! { Add:
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

// Sub

export_fixed_binary! { Sub:
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

// Abs

export_fixed_unary! { Abs:
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

// Min

export_fixed_binary! { Min:
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

// Max

export_fixed_binary! { Max:
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

// Floor

export_fixed_unary! { Floor:
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
}

// Fract

export_fixed_unary! { Fract:
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
}

// Sign

export_fixed_unary! { Sign:
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
}

// Recip

export_fixed_unary! { Recip:
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
}

// Rsqrt

export_fixed_unary! { Rsqrt:
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
}

// Clamp

export_fixed_ternary! { Clamp:
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
}

// Lerp

export_fixed_ternary! { Lerp:
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
}

// Smoothstep

export_fixed_ternary! { Smoothstep:
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
}

// Variable length

export_variable_binary! {
    add_f32 => Add, f32;
    add_f64 => Add, f64;
    sub_f32 => Sub, f32;
    sub_f64 => Sub, f64;
    min_f32 => Min, f32;
    min_f64 => Min, f64;
    max_f32 => Max, f32;
    max_f64 => Max, f64;
}

export_variable_unary! {
    abs_f32 => Abs, f32;
    abs_f64 => Abs, f64;
    floor_f32 => Floor, f32;
    floor_f64 => Floor, f64;
    fract_f32 => Fract, f32;
    fract_f64 => Fract, f64;
    sign_f32 => Sign, f32;
    sign_f64 => Sign, f64;
    recip_f32 => Recip, f32;
    recip_f64 => Recip, f64;
    rsqrt_f32 => Rsqrt, f32;
    rsqrt_f64 => Rsqrt, f64;
}

export_variable_ternary! {
    clamp_f32 => Clamp, f32;
    clamp_f64 => Clamp, f64;
    lerp_f32 => Lerp, f32;
    lerp_f64 => Lerp, f64;
    smoothstep_f32 => Smoothstep, f32;
    smoothstep_f64 => Smoothstep, f64;
}
