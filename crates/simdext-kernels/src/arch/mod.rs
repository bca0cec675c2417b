//! Per-ISA register kernels.
//!
//! Each function handles exactly one register group. `width` selects the
//! register class (16/8/4/2 lanes), width 1 runs the scalar path. Callers get
//! `width` from a lane plan, so it never exceeds what the chosen capability
//! can execute.

/// Generates the binary, unary and ternary kernels for one register class.
///
/// The bodies mirror `BinaryOp::apply`, `UnaryOp::apply` and
/// `TernaryOp::apply` operation for operation.
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
macro_rules! register_kernels {
    (
        feature: $feature:literal,
        elem: $ty:ty,
        load: $load:ident,
        store: $store:ident,
        splat: $splat:ident,
        add: $add:ident,
        sub: $sub:ident,
        mul: $mul:ident,
        div: $div:ident,
        min: $min:ident,
        max: $max:ident,
        abs: $abs:ident,
        floor: $floor:ident,
        sqrt: $sqrt:ident,
        sign: $sign:ident,
        binary: $binary:ident,
        unary: $unary:ident,
        ternary: $ternary:ident $(,)?
    ) => {
        #[inline]
        #[target_feature(enable = $feature)]
        unsafe fn $binary(op: BinaryOp, a: *const $ty, b: *const $ty, out: *mut $ty) {
            unsafe {
                let va = $load(a);
                let vb = $load(b);
                let r = match op {
                    BinaryOp::Add => $add(va, vb),
                    BinaryOp::Sub => $sub(va, vb),
                    BinaryOp::Min => $min(va, vb),
                    BinaryOp::Max => $max(va, vb),
                };
                $store(out, r);
            }
        }

        #[inline]
        #[target_feature(enable = $feature)]
        unsafe fn $unary(op: UnaryOp, a: *const $ty, out: *mut $ty) {
            unsafe {
                let va = $load(a);
                let r = match op {
                    UnaryOp::Abs => $abs(va),
                    UnaryOp::Floor => $floor(va),
                    UnaryOp::Fract => $min(
                        $sub(va, $floor(va)),
                        $splat(<$ty as crate::element::Element>::FRACT_MAX),
                    ),
                    UnaryOp::Sign => $sign(va),
                    UnaryOp::Recip => $div($splat(1.0), va),
                    UnaryOp::Rsqrt => $div($splat(1.0), $sqrt(va)),
                };
                $store(out, r);
            }
        }

        #[inline]
        #[target_feature(enable = $feature)]
        unsafe fn $ternary(op: TernaryOp, a: *const $ty, b: *const $ty, c: *const $ty, out: *mut $ty) {
            unsafe {
                let va = $load(a);
                let vb = $load(b);
                let vc = $load(c);
                let r = match op {
                    TernaryOp::Clamp => $min($max(va, vb), vc),
                    TernaryOp::Lerp => $add(va, $mul(vc, $sub(vb, va))),
                    TernaryOp::Smoothstep => {
                        let t = $div($sub(vc, va), $sub(vb, va));
                        let t = $min($max(t, $splat(0.0)), $splat(1.0));
                        $mul($mul(t, t), $sub($splat(3.0), $mul($splat(2.0), t)))
                    }
                };
                $store(out, r);
            }
        }
    };
}

/// Generates the width dispatch for one element type.
#[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
macro_rules! width_dispatch {
    (
        elem: $ty:ty,
        binary: $binary_fn:ident,
        unary: $unary_fn:ident,
        ternary: $ternary_fn:ident,
        widths: [$($w:literal => ($b:ident, $u:ident, $t:ident)),* $(,)?] $(,)?
    ) => {
        /// # Safety
        ///
        /// See [`crate::Element::binary_block`].
        #[inline(always)]
        pub(crate) unsafe fn $binary_fn(op: BinaryOp, width: usize, a: *const $ty, b: *const $ty, out: *mut $ty) {
            unsafe {
                match width {
                    $($w => $b(op, a, b, out),)*
                    _ => scalar::binary(op, width, a, b, out),
                }
            }
        }

        /// # Safety
        ///
        /// See [`crate::Element::unary_block`].
        #[inline(always)]
        pub(crate) unsafe fn $unary_fn(op: UnaryOp, width: usize, a: *const $ty, out: *mut $ty) {
            unsafe {
                match width {
                    $($w => $u(op, a, out),)*
                    _ => scalar::unary(op, width, a, out),
                }
            }
        }

        /// # Safety
        ///
        /// See [`crate::Element::ternary_block`].
        #[inline(always)]
        pub(crate) unsafe fn $ternary_fn(
            op: TernaryOp,
            width: usize,
            a: *const $ty,
            b: *const $ty,
            c: *const $ty,
            out: *mut $ty,
        ) {
            unsafe {
                match width {
                    $($w => $t(op, a, b, c, out),)*
                    _ => scalar::ternary(op, width, a, b, c, out),
                }
            }
        }
    };
}

mod scalar;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use x86::{binary_f32, binary_f64, ternary_f32, ternary_f64, unary_f32, unary_f64};

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
pub(crate) use neon::{binary_f32, binary_f64, ternary_f32, ternary_f64, unary_f32, unary_f64};

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use scalar::{binary_f32, binary_f64, ternary_f32, ternary_f64, unary_f32, unary_f64};
