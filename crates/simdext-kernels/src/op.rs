//! Elementwise operations supported by the kernels.
//!
//! Each `apply` is the scalar definition of its operation. The register
//! kernels in `arch` evaluate the same expression tree with the same
//! operand order, so every path rounds identically.

use std::fmt;

use crate::element::Element;

/// `a < b ? a : b`. The second operand wins on NaN and on `-0.0` vs `+0.0`,
/// which is exactly what `minps`/`minpd` do.
#[inline(always)]
pub(crate) fn min<T: Element>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

/// `a > b ? a : b`, the `maxps`/`maxpd` rule.
#[inline(always)]
pub(crate) fn max<T: Element>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

/// Two-operand elementwise operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `out[i] = a[i] + b[i]`
    Add,
    /// `out[i] = a[i] - b[i]`
    Sub,
    /// `out[i] = a[i] < b[i] ? a[i] : b[i]`
    Min,
    /// `out[i] = a[i] > b[i] ? a[i] : b[i]`
    Max,
}

impl BinaryOp {
    /// Every binary operation, in export order.
    pub const ALL: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Min, BinaryOp::Max];

    /// Scalar semantics of the operation. Vector lanes must match this bit-for-bit.
    #[inline(always)]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Min => min(a, b),
            BinaryOp::Max => max(a, b),
        }
    }

    /// Exported name prefix (`"add"` in `add_f32x4`).
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
        }
    }
}

/// Single-operand elementwise operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `out[i] = |a[i]|`
    Abs,
    /// Round toward negative infinity.
    Floor,
    /// `a - floor(a)`, capped just below `1.0`.
    Fract,
    /// `1.0` for positive, `-1.0` for negative, `+0.0` for zeros and NaN.
    Sign,
    /// `1.0 / a`
    Recip,
    /// `1.0 / sqrt(a)`
    Rsqrt,
}

impl UnaryOp {
    /// Every unary operation, in export order.
    pub const ALL: [UnaryOp; 6] = [
        UnaryOp::Abs,
        UnaryOp::Floor,
        UnaryOp::Fract,
        UnaryOp::Sign,
        UnaryOp::Recip,
        UnaryOp::Rsqrt,
    ];

    /// Scalar semantics of the operation.
    ///
    /// `Abs` clears the sign bit, so `-0.0` maps to `+0.0` and negative NaNs
    /// lose their sign, exactly like the vector instructions. `Recip` and
    /// `Rsqrt` are correctly rounded divisions, not hardware estimates.
    #[inline(always)]
    pub fn apply<T: Element>(self, a: T) -> T {
        match self {
            UnaryOp::Abs => a.abs(),
            UnaryOp::Floor => a.floor(),
            UnaryOp::Fract => min(a - a.floor(), T::FRACT_MAX),
            UnaryOp::Sign => {
                if a > T::ZERO {
                    T::ONE
                } else if a < T::ZERO {
                    -T::ONE
                } else {
                    T::ZERO
                }
            }
            UnaryOp::Recip => T::ONE / a,
            UnaryOp::Rsqrt => T::ONE / a.sqrt(),
        }
    }

    /// Exported name prefix (`"abs"` in `abs_f64x3`).
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOp::Abs => "abs",
            UnaryOp::Floor => "floor",
            UnaryOp::Fract => "fract",
            UnaryOp::Sign => "sign",
            UnaryOp::Recip => "recip",
            UnaryOp::Rsqrt => "rsqrt",
        }
    }
}

/// Three-operand elementwise operation over `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    /// `min(max(a, b), c)`: `a` clamped to `[b, c]`.
    Clamp,
    /// `a + c * (b - a)`: linear blend from `a` to `b` by `c`.
    Lerp,
    /// Hermite step of `c` between edges `a` and `b`:
    /// `t = clamp((c - a) / (b - a), 0, 1)`, then `t * t * (3 - 2 * t)`.
    Smoothstep,
}

impl TernaryOp {
    /// Every ternary operation, in export order.
    pub const ALL: [TernaryOp; 3] = [TernaryOp::Clamp, TernaryOp::Lerp, TernaryOp::Smoothstep];

    /// Scalar semantics of the operation. No fused multiply-add anywhere.
    #[inline(always)]
    pub fn apply<T: Element>(self, a: T, b: T, c: T) -> T {
        match self {
            TernaryOp::Clamp => min(max(a, b), c),
            TernaryOp::Lerp => a + c * (b - a),
            TernaryOp::Smoothstep => {
                let t = (c - a) / (b - a);
                let t = min(max(t, T::ZERO), T::ONE);
                (t * t) * (T::THREE - T::TWO * t)
            }
        }
    }

    /// Exported name prefix (`"lerp"` in `lerp_f32x4`).
    pub fn name(&self) -> &'static str {
        match self {
            TernaryOp::Clamp => "clamp",
            TernaryOp::Lerp => "lerp",
            TernaryOp::Smoothstep => "smoothstep",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TernaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_semantics() {
        assert_eq!(BinaryOp::Add.apply(1.5f32, 2.25), 3.75);
        assert_eq!(BinaryOp::Sub.apply(5.0f64, 1.0), 4.0);
        assert_eq!(BinaryOp::Min.apply(-1.0f32, 2.0), -1.0);
        assert_eq!(BinaryOp::Max.apply(-1.0f64, 2.0), 2.0);
        assert_eq!(UnaryOp::Abs.apply(-3.0f32), 3.0);
        assert_eq!(UnaryOp::Abs.apply(2.0f64), 2.0);
    }

    #[test]
    fn abs_clears_sign_of_negative_zero() {
        let r = UnaryOp::Abs.apply(-0.0f32);
        assert_eq!(r.to_bits(), 0.0f32.to_bits());
        let r = UnaryOp::Abs.apply(-0.0f64);
        assert_eq!(r.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn min_max_take_second_operand_on_ties_and_nan() {
        assert_eq!(BinaryOp::Min.apply(-0.0f32, 0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!(BinaryOp::Min.apply(0.0f32, -0.0).to_bits(), (-0.0f32).to_bits());
        assert_eq!(BinaryOp::Max.apply(-0.0f64, 0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(BinaryOp::Min.apply(f32::NAN, 3.0), 3.0);
        assert!(BinaryOp::Max.apply(3.0f64, f64::NAN).is_nan());
    }

    #[test]
    fn floor_and_fract() {
        assert_eq!(UnaryOp::Floor.apply(-2.5f32), -3.0);
        assert_eq!(UnaryOp::Floor.apply(2.5f64), 2.0);
        assert_eq!(UnaryOp::Floor.apply(-0.0f32).to_bits(), (-0.0f32).to_bits());
        assert_eq!(UnaryOp::Fract.apply(2.75f32), 0.75);
        assert_eq!(UnaryOp::Fract.apply(-0.25f64), 0.75);
        // Tiny negatives round up to 1.0 before the cap.
        assert_eq!(UnaryOp::Fract.apply(-1e-10f32), f32::from_bits(0x3f7f_ffff));
        assert_eq!(UnaryOp::Fract.apply(-1e-20f64), f64::from_bits(0x3fef_ffff_ffff_ffff));
        // inf - inf is NaN, which the cap replaces.
        assert_eq!(UnaryOp::Fract.apply(f32::INFINITY), f32::from_bits(0x3f7f_ffff));
    }

    #[test]
    fn sign_recip_rsqrt() {
        assert_eq!(UnaryOp::Sign.apply(-7.0f32), -1.0);
        assert_eq!(UnaryOp::Sign.apply(1e-30f64), 1.0);
        assert_eq!(UnaryOp::Sign.apply(-0.0f32).to_bits(), 0.0f32.to_bits());
        assert_eq!(UnaryOp::Sign.apply(f64::NAN).to_bits(), 0.0f64.to_bits());
        assert_eq!(UnaryOp::Recip.apply(4.0f32), 0.25);
        assert_eq!(UnaryOp::Recip.apply(-0.0f64), f64::NEG_INFINITY);
        assert_eq!(UnaryOp::Rsqrt.apply(16.0f64), 0.25);
        assert!(UnaryOp::Rsqrt.apply(-1.0f32).is_nan());
    }

    #[test]
    fn ternary_semantics() {
        assert_eq!(TernaryOp::Clamp.apply(5.0f32, 0.0, 1.0), 1.0);
        assert_eq!(TernaryOp::Clamp.apply(-5.0f64, 0.0, 1.0), 0.0);
        assert_eq!(TernaryOp::Clamp.apply(0.5f32, 0.0, 1.0), 0.5);
        assert_eq!(TernaryOp::Clamp.apply(f32::NAN, 0.0, 1.0), 0.0);
        assert_eq!(TernaryOp::Lerp.apply(2.0f64, 6.0, 0.25), 3.0);
        assert_eq!(TernaryOp::Lerp.apply(2.0f32, 6.0, 1.0), 6.0);
        assert_eq!(TernaryOp::Smoothstep.apply(0.0f64, 1.0, 0.5), 0.5);
        assert_eq!(TernaryOp::Smoothstep.apply(0.0f32, 1.0, -3.0), 0.0);
        assert_eq!(TernaryOp::Smoothstep.apply(0.0f32, 1.0, 3.0), 1.0);
        assert_eq!(TernaryOp::Smoothstep.apply(0.0f64, 4.0, 1.0), 0.15625);
    }

    #[test]
    fn names() {
        assert_eq!(BinaryOp::Add.to_string(), "add");
        assert_eq!(BinaryOp::Max.to_string(), "max");
        assert_eq!(UnaryOp::Abs.to_string(), "abs");
        assert_eq!(UnaryOp::Rsqrt.to_string(), "rsqrt");
        assert_eq!(TernaryOp::Smoothstep.to_string(), "smoothstep");
    }

    #[test]
    fn all_lists_every_name_once() {
        let mut names: Vec<&str> = BinaryOp::ALL.iter().map(|op| op.name()).collect();
        names.extend(UnaryOp::ALL.iter().map(|op| op.name()));
        names.extend(TernaryOp::ALL.iter().map(|op| op.name()));
        assert_eq!(
            names,
            [
                "add", "sub", "min", "max", "abs", "floor", "fract", "sign", "recip", "rsqrt", "clamp", "lerp",
                "smoothstep"
            ]
        );
    }
}
