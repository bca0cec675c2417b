//! Runs every kernel against its references.
//!
//! For each capability and element type:
//! - fixed-width kernels are compared lane by lane with the scalar
//!   semantics and with the variable-length kernel at the same count, and
//!   the slot just past the last element must keep its sentinel;
//! - variable-length kernels are compared with the scalar semantics over
//!   the configured counts, again with a sentinel past the end, plus one
//!   `count = 0` call through null pointers.

use simdext_kernels::{BinaryOp, Element, SimdCapability, TernaryOp, UnaryOp, fixed, variable};

use crate::config::{ElementType, VerifyConfig};
use crate::error::Result;
use crate::generator::InputGenerator;
use crate::report::{CaseResult, Mismatch, VerificationReport};

/// Input draws per fixed-width kernel.
const FIXED_ROUNDS: usize = 8;

/// Written past the end of every output buffer; must survive the call.
const SENTINEL: f64 = -7.25e7;

#[derive(Debug, Clone, Copy)]
enum Kernel {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Ternary(TernaryOp),
}

impl Kernel {
    const ALL: [Kernel; 13] = [
        Kernel::Binary(BinaryOp::Add),
        Kernel::Binary(BinaryOp::Sub),
        Kernel::Binary(BinaryOp::Min),
        Kernel::Binary(BinaryOp::Max),
        Kernel::Unary(UnaryOp::Abs),
        Kernel::Unary(UnaryOp::Floor),
        Kernel::Unary(UnaryOp::Fract),
        Kernel::Unary(UnaryOp::Sign),
        Kernel::Unary(UnaryOp::Recip),
        Kernel::Unary(UnaryOp::Rsqrt),
        Kernel::Ternary(TernaryOp::Clamp),
        Kernel::Ternary(TernaryOp::Lerp),
        Kernel::Ternary(TernaryOp::Smoothstep),
    ];

    fn name(&self) -> &'static str {
        match self {
            Kernel::Binary(op) => op.name(),
            Kernel::Unary(op) => op.name(),
            Kernel::Ternary(op) => op.name(),
        }
    }

    fn reference<T: Element>(&self, a: T, b: T, c: T) -> T {
        match self {
            Kernel::Binary(op) => op.apply(a, b),
            Kernel::Unary(op) => op.apply(a),
            Kernel::Ternary(op) => op.apply(a, b, c),
        }
    }

    /// # Safety
    ///
    /// `a`, `b`, `c` hold at least `N` elements, `out` at least `N`, and
    /// `capability` is available.
    unsafe fn run_fixed<T: Element, const N: usize>(
        &self,
        a: &[T],
        b: &[T],
        c: &[T],
        out: &mut [T],
        capability: SimdCapability,
    ) {
        unsafe {
            match self {
                Kernel::Binary(op) => {
                    fixed::binary_raw::<T, N>(*op, a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), capability)
                }
                Kernel::Unary(op) => fixed::unary_raw::<T, N>(*op, a.as_ptr(), out.as_mut_ptr(), capability),
                Kernel::Ternary(op) => fixed::ternary_raw::<T, N>(
                    *op,
                    a.as_ptr(),
                    b.as_ptr(),
                    c.as_ptr(),
                    out.as_mut_ptr(),
                    capability,
                ),
            }
        }
    }

    /// # Safety
    ///
    /// `a`, `b`, `c` hold at least `count` elements, `out` at least `count`,
    /// and `capability` is available.
    unsafe fn run_variable<T: Element>(
        &self,
        a: *const T,
        b: *const T,
        c: *const T,
        out: *mut T,
        count: usize,
        capability: SimdCapability,
    ) {
        unsafe {
            match self {
                Kernel::Binary(op) => variable::binary_raw(*op, a, b, out, count, capability),
                Kernel::Unary(op) => variable::unary_raw(*op, a, out, count, capability),
                Kernel::Ternary(op) => variable::ternary_raw(*op, a, b, c, out, count, capability),
            }
        }
    }
}

/// Bit-identical, or both NaN (NaN payloads are not part of the contract).
fn same<T: Element>(expected: T, actual: T) -> bool {
    expected.to_bits_u64() == actual.to_bits_u64() || (expected.is_nan() && actual.is_nan())
}

fn first_mismatch<T: Element>(
    reference: &str,
    count: usize,
    expected: impl Iterator<Item = T>,
    actual: &[T],
) -> Option<Mismatch> {
    expected
        .zip(actual)
        .enumerate()
        .find(|(_, (e, a))| !same(*e, **a))
        .map(|(index, (e, a))| Mismatch {
            count,
            index,
            reference: reference.to_string(),
            expected_bits: e.to_bits_u64(),
            actual_bits: a.to_bits_u64(),
        })
}

fn sentinel_mismatch<T: Element>(count: usize, out: &[T]) -> Option<Mismatch> {
    let sentinel = T::from_f64(SENTINEL);
    let actual = out[count];
    (!same(sentinel, actual)).then(|| Mismatch {
        count,
        index: count,
        reference: "sentinel".to_string(),
        expected_bits: sentinel.to_bits_u64(),
        actual_bits: actual.to_bits_u64(),
    })
}

/// Run the configured verification.
pub fn verify(config: &VerifyConfig) -> Result<VerificationReport> {
    config.validate()?;
    let capabilities = config.resolve_capabilities()?;

    let mut report = VerificationReport::new(SimdCapability::cached().name());
    report.capabilities = capabilities.iter().map(|c| c.name().to_string()).collect();

    for &capability in &capabilities {
        for element in &config.element_types {
            log::debug!(
                "verifying {} kernels on {}",
                element.name(),
                capability
            );
            match element {
                ElementType::F32 => verify_element::<f32>(capability, config, &mut report),
                ElementType::F64 => verify_element::<f64>(capability, config, &mut report),
            }
        }
    }

    for case in report.failures() {
        log::warn!(
            "{} on {} disagrees with its reference: {:?}",
            case.kernel,
            case.capability,
            case.mismatch
        );
    }
    log::info!(
        "verification finished: {} of {} cases passed ({} kernel calls)",
        report.summary.passed_cases,
        report.summary.total_cases,
        report.summary.total_calls
    );

    Ok(report)
}

fn verify_element<T: Element>(
    capability: SimdCapability,
    config: &VerifyConfig,
    report: &mut VerificationReport,
) {
    let salt = std::mem::size_of::<T>() as u64;
    let mut inputs = InputGenerator::new(config.seed.wrapping_mul(31).wrapping_add(salt), config.special_values);

    for kernel in Kernel::ALL {
        report.add_case(verify_fixed::<T, 2>(kernel, capability, &mut inputs));
        report.add_case(verify_fixed::<T, 3>(kernel, capability, &mut inputs));
        report.add_case(verify_fixed::<T, 4>(kernel, capability, &mut inputs));
        report.add_case(verify_fixed::<T, 8>(kernel, capability, &mut inputs));
        report.add_case(verify_fixed::<T, 16>(kernel, capability, &mut inputs));
        report.add_case(verify_variable::<T>(kernel, capability, config, &mut inputs));
    }
}

fn verify_fixed<T: Element, const N: usize>(
    kernel: Kernel,
    capability: SimdCapability,
    inputs: &mut InputGenerator,
) -> CaseResult {
    let name = format!("{}_{}x{}", kernel.name(), T::TYPE_NAME, N);
    let sentinel = T::from_f64(SENTINEL);
    let mut mismatch = None;
    let mut calls = 0;

    for _ in 0..FIXED_ROUNDS {
        let a: Vec<T> = inputs.buffer(N);
        let b: Vec<T> = inputs.buffer(N);
        let c: Vec<T> = inputs.buffer(N);
        let mut fixed_out = vec![sentinel; N + 1];
        let mut var_out = vec![sentinel; N];

        unsafe {
            kernel.run_fixed::<T, N>(&a, &b, &c, &mut fixed_out, capability);
            kernel.run_variable(a.as_ptr(), b.as_ptr(), c.as_ptr(), var_out.as_mut_ptr(), N, capability);
        }
        calls += 2;

        let expected = (0..N).map(|i| kernel.reference(a[i], b[i], c[i]));
        mismatch = first_mismatch("scalar", N, expected, &fixed_out[..N])
            .or_else(|| first_mismatch("variable", N, var_out.iter().copied(), &fixed_out[..N]))
            .or_else(|| sentinel_mismatch(N, &fixed_out));
        if mismatch.is_some() {
            break;
        }
    }

    CaseResult {
        capability: capability.name().to_string(),
        kernel: name,
        calls,
        passed: mismatch.is_none(),
        mismatch,
    }
}

fn verify_variable<T: Element>(
    kernel: Kernel,
    capability: SimdCapability,
    config: &VerifyConfig,
    inputs: &mut InputGenerator,
) -> CaseResult {
    let name = format!("{}_{}", kernel.name(), T::TYPE_NAME);
    let sentinel = T::from_f64(SENTINEL);
    let mut mismatch = None;
    let mut calls = 0;

    unsafe {
        kernel.run_variable::<T>(
            std::ptr::null(),
            std::ptr::null(),
            std::ptr::null(),
            std::ptr::null_mut(),
            0,
            capability,
        );
    }
    calls += 1;

    for count in config.variable_counts(capability.lanes::<T>()) {
        let a: Vec<T> = inputs.buffer(count);
        let b: Vec<T> = inputs.buffer(count);
        let c: Vec<T> = inputs.buffer(count);
        let mut out = vec![sentinel; count + 1];

        unsafe { kernel.run_variable(a.as_ptr(), b.as_ptr(), c.as_ptr(), out.as_mut_ptr(), count, capability) };
        calls += 1;

        let expected = (0..count).map(|i| kernel.reference(a[i], b[i], c[i]));
        mismatch = first_mismatch("scalar", count, expected, &out[..count])
            .or_else(|| sentinel_mismatch(count, &out));
        if mismatch.is_some() {
            break;
        }
    }

    CaseResult {
        capability: capability.name().to_string(),
        kernel: name,
        calls,
        passed: mismatch.is_none(),
        mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_only_run_passes() {
        let config = VerifyConfig {
            capabilities: vec!["scalar".to_string()],
            max_count: 9,
            extra_counts: vec![],
            ..Default::default()
        };
        let report = verify(&config).unwrap();
        assert!(report.passed, "{}", report.to_text());
        assert_eq!(report.capabilities, vec!["scalar".to_string()]);
        // 13 kernels x (5 fixed widths + 1 variable) x 2 element types
        assert_eq!(report.summary.total_cases, 156);
    }

    #[test]
    fn kernel_list_covers_every_op() {
        for op in BinaryOp::ALL {
            assert!(Kernel::ALL.iter().any(|k| matches!(k, Kernel::Binary(o) if *o == op)), "{op}");
        }
        for op in UnaryOp::ALL {
            assert!(Kernel::ALL.iter().any(|k| matches!(k, Kernel::Unary(o) if *o == op)), "{op}");
        }
        for op in TernaryOp::ALL {
            assert!(Kernel::ALL.iter().any(|k| matches!(k, Kernel::Ternary(o) if *o == op)), "{op}");
        }
        assert_eq!(
            Kernel::ALL.len(),
            BinaryOp::ALL.len() + UnaryOp::ALL.len() + TernaryOp::ALL.len()
        );
    }

    #[test]
    fn same_treats_nans_as_equal() {
        assert!(same(f32::NAN, -f32::NAN));
        assert!(!same(0.0f32, -0.0f32));
        assert!(same(1.5f64, 1.5f64));
    }

    #[test]
    fn first_mismatch_reports_lane() {
        let expected = [1.0f64, 2.0, 3.0];
        let actual = [1.0f64, 2.0, 4.0];
        let m = first_mismatch("scalar", 3, expected.iter().copied(), &actual).unwrap();
        assert_eq!(m.index, 2);
        assert_eq!(m.expected_bits, 3.0f64.to_bits());
        assert_eq!(m.actual_bits, 4.0f64.to_bits());
    }

    #[test]
    fn sentinel_detects_overwrite() {
        let out = [1.0f32, 2.0, 3.0, SENTINEL as f32];
        assert!(sentinel_mismatch(3, &out).is_none());
        let out = [1.0f32, 2.0, 3.0, 0.0];
        assert!(sentinel_mismatch(3, &out).is_some());
    }
}
